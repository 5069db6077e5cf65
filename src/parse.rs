//! Parse CSS color syntax into a [`Color`].
//!
//! Supported forms:
//! * `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! * `rgb()`/`rgba()` with legacy (comma) or modern (space, `/ alpha`) syntax
//! * `hsl()`/`hsla()` with legacy or modern syntax, hue units
//!   `deg`, `rad`, `grad` and `turn`
//! * `oklab()` and `oklch()` with modern syntax
//! * named colors and `transparent`
//!
//! The parser is also the validity predicate: a string is a recognized color
//! if and only if [`parse`] returns `Ok`.

use crate::{
    error::ParseError,
    math::normalize_hue,
    models::{Model, Srgb},
    named, Color, Component, Space,
};

/// 100% chroma and a/b for the Oklab family.
/// <https://drafts.csswg.org/css-color-4/#specifying-oklab-oklch>
const OKLAB_PERCENT_SCALE: Component = 0.4;

/// Parse a CSS color string.
pub fn parse(input: &str) -> Result<Color, ParseError> {
    let input = input.trim().to_ascii_lowercase();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Some(hex) = input.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(open) = input.find('(') {
        let name = &input[..open];
        let args = input[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| ParseError::BadArguments(name.to_string()))?;
        return parse_function(name, args);
    }

    if input == "transparent" {
        return Ok(Color::new(Space::Srgb, 0.0, 0.0, 0.0, 0.0));
    }

    named::lookup(&input)
        .map(|rgb| Srgb::from_rgb8(rgb).to_color(Some(1.0)))
        .ok_or(ParseError::UnknownName(input))
}

/// Returns true if the input is a recognized CSS color.
pub fn is_valid_color(input: &str) -> bool {
    parse(input).is_ok()
}

fn parse_hex(hex: &str) -> Result<Color, ParseError> {
    let invalid = || ParseError::InvalidHex(hex.to_string());

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

    let [r, g, b, a] = match hex.len() {
        3 => [digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, 255],
        4 => [digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, digit(3)? * 17],
        6 => [pair(0)?, pair(2)?, pair(4)?, 255],
        8 => [pair(0)?, pair(2)?, pair(4)?, pair(6)?],
        _ => return Err(invalid()),
    };

    Ok(Srgb::from_rgb8([r, g, b]).to_color(Some(a as Component / 255.0)))
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Syntax {
    /// `rgb(1, 2, 3)`
    Legacy,
    /// `rgb(1 2 3 / 0.5)`
    Modern,
}

struct Arguments<'a> {
    syntax: Syntax,
    values: [&'a str; 3],
    alpha: Option<&'a str>,
}

fn split_arguments<'a>(name: &str, args: &'a str) -> Result<Arguments<'a>, ParseError> {
    let bad = || ParseError::BadArguments(name.to_string());

    if args.contains(',') {
        if args.contains('/') {
            return Err(bad());
        }
        let parts = args.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.iter().any(|p| p.is_empty() || p.contains(char::is_whitespace)) {
            return Err(bad());
        }
        return match parts.as_slice() {
            [a, b, c] => Ok(Arguments {
                syntax: Syntax::Legacy,
                values: [*a, *b, *c],
                alpha: None,
            }),
            [a, b, c, alpha] => Ok(Arguments {
                syntax: Syntax::Legacy,
                values: [*a, *b, *c],
                alpha: Some(*alpha),
            }),
            _ => Err(bad()),
        };
    }

    let mut halves = args.split('/');
    let values = halves.next().unwrap_or_default();
    let alpha = match halves.next() {
        Some(alpha) => {
            let alpha = alpha.trim();
            if alpha.is_empty() || alpha.contains(char::is_whitespace) {
                return Err(bad());
            }
            Some(alpha)
        }
        None => None,
    };
    if halves.next().is_some() {
        return Err(bad());
    }

    match values.split_whitespace().collect::<Vec<_>>().as_slice() {
        [a, b, c] => Ok(Arguments {
            syntax: Syntax::Modern,
            values: [*a, *b, *c],
            alpha,
        }),
        _ => Err(bad()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(Component),
    Percentage(Component),
    /// A number with an angle unit, already converted to degrees.
    Angle(Component),
    None,
}

fn tokenize(text: &str) -> Result<Token, ParseError> {
    if text == "none" {
        return Ok(Token::None);
    }

    // Finite as f64 is not enough, the value has to fit a `Component`.
    let finite = |v: Component| -> Result<Component, ParseError> {
        if v.is_finite() {
            Ok(v)
        } else {
            Err(ParseError::BadComponent(text.to_string()))
        }
    };
    let number = |s: &str| -> Result<Component, ParseError> {
        let value = s
            .parse::<f64>()
            .map_err(|_| ParseError::BadComponent(text.to_string()))?;
        finite(value as Component)
    };

    if let Some(value) = text.strip_suffix('%') {
        return Ok(Token::Percentage(number(value)?));
    }

    // `grad` has to be checked before `rad`.
    const ANGLE_UNITS: &[(&str, Component)] = &[
        ("deg", 1.0),
        ("grad", 0.9),
        ("rad", 180.0 / std::f64::consts::PI as Component),
        ("turn", 360.0),
    ];
    for &(unit, to_degrees) in ANGLE_UNITS {
        if let Some(value) = text.strip_suffix(unit) {
            return Ok(Token::Angle(finite(number(value)? * to_degrees)?));
        }
    }

    Ok(Token::Number(number(text)?))
}

/// Shorthand to resolve one component into `Some(value)` or `None` for
/// missing components.
type Resolved = Result<Option<Component>, ParseError>;

fn check_range(text: &str, value: Component, min: Component, max: Component) -> Resolved {
    if value < min || value > max {
        Err(ParseError::OutOfRange(text.to_string()))
    } else {
        Ok(Some(value))
    }
}

struct Resolver {
    syntax: Syntax,
}

impl Resolver {
    fn token(&self, text: &str) -> Result<Token, ParseError> {
        match tokenize(text)? {
            Token::None if self.syntax == Syntax::Legacy => {
                Err(ParseError::BadComponent(text.to_string()))
            }
            token => Ok(token),
        }
    }

    fn rgb_channel(&self, text: &str) -> Resolved {
        match self.token(text)? {
            Token::Number(v) => check_range(text, v, 0.0, 255.0).map(|v| v.map(|v| v / 255.0)),
            Token::Percentage(v) => check_range(text, v, 0.0, 100.0).map(|v| v.map(|v| v / 100.0)),
            Token::None => Ok(None),
            Token::Angle(_) => Err(ParseError::BadComponent(text.to_string())),
        }
    }

    fn alpha(&self, text: Option<&str>) -> Resolved {
        let Some(text) = text else {
            return Ok(Some(1.0));
        };
        match self.token(text)? {
            Token::Number(v) => check_range(text, v, 0.0, 1.0),
            Token::Percentage(v) => check_range(text, v, 0.0, 100.0).map(|v| v.map(|v| v / 100.0)),
            Token::None => Ok(None),
            Token::Angle(_) => Err(ParseError::BadComponent(text.to_string())),
        }
    }

    fn hue(&self, text: &str) -> Resolved {
        match self.token(text)? {
            Token::Number(v) | Token::Angle(v) => Ok(Some(normalize_hue(v))),
            Token::None => Ok(None),
            Token::Percentage(_) => Err(ParseError::BadComponent(text.to_string())),
        }
    }

    /// Saturation and lightness of HSL. Bare numbers are only allowed with
    /// the modern syntax.
    fn hsl_percentage(&self, text: &str) -> Resolved {
        match self.token(text)? {
            Token::Percentage(v) => check_range(text, v, 0.0, 100.0).map(|v| v.map(|v| v / 100.0)),
            Token::Number(v) if self.syntax == Syntax::Modern => {
                check_range(text, v, 0.0, 100.0).map(|v| v.map(|v| v / 100.0))
            }
            Token::None => Ok(None),
            _ => Err(ParseError::BadComponent(text.to_string())),
        }
    }

    fn oklab_lightness(&self, text: &str) -> Resolved {
        match self.token(text)? {
            Token::Number(v) => check_range(text, v, 0.0, 1.0),
            Token::Percentage(v) => check_range(text, v, 0.0, 100.0).map(|v| v.map(|v| v / 100.0)),
            Token::None => Ok(None),
            Token::Angle(_) => Err(ParseError::BadComponent(text.to_string())),
        }
    }

    /// The a and b components of Oklab.
    fn oklab_axis(&self, text: &str) -> Resolved {
        match self.token(text)? {
            Token::Number(v) => Ok(Some(v)),
            Token::Percentage(v) => check_range(text, v, -100.0, 100.0)
                .map(|v| v.map(|v| v / 100.0 * OKLAB_PERCENT_SCALE)),
            Token::None => Ok(None),
            Token::Angle(_) => Err(ParseError::BadComponent(text.to_string())),
        }
    }

    fn oklch_chroma(&self, text: &str) -> Resolved {
        match self.token(text)? {
            Token::Number(v) => check_range(text, v, 0.0, Component::MAX),
            Token::Percentage(v) => check_range(text, v, 0.0, Component::MAX)
                .map(|v| v.map(|v| v / 100.0 * OKLAB_PERCENT_SCALE)),
            Token::None => Ok(None),
            Token::Angle(_) => Err(ParseError::BadComponent(text.to_string())),
        }
    }
}

fn parse_function(name: &str, args: &str) -> Result<Color, ParseError> {
    let arguments = split_arguments(name, args)?;
    let r = Resolver {
        syntax: arguments.syntax,
    };
    let [c0, c1, c2] = arguments.values;

    let color = match name {
        "rgb" | "rgba" => Color::new(
            Space::Srgb,
            r.rgb_channel(c0)?,
            r.rgb_channel(c1)?,
            r.rgb_channel(c2)?,
            r.alpha(arguments.alpha)?,
        ),
        "hsl" | "hsla" => Color::new(
            Space::Hsl,
            r.hue(c0)?,
            r.hsl_percentage(c1)?,
            r.hsl_percentage(c2)?,
            r.alpha(arguments.alpha)?,
        ),
        "oklab" | "oklch" if arguments.syntax == Syntax::Legacy => {
            return Err(ParseError::BadArguments(name.to_string()))
        }
        "oklab" => Color::new(
            Space::Oklab,
            r.oklab_lightness(c0)?,
            r.oklab_axis(c1)?,
            r.oklab_axis(c2)?,
            r.alpha(arguments.alpha)?,
        ),
        "oklch" => Color::new(
            Space::Oklch,
            r.oklab_lightness(c0)?,
            r.oklch_chroma(c1)?,
            r.hue(c2)?,
            r.alpha(arguments.alpha)?,
        ),
        _ => return Err(ParseError::UnknownFunction(name.to_string())),
    };

    Ok(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_component_eq, Components, Flags};

    #[test]
    fn hex_colors() {
        let c = parse("#ff8000").unwrap();
        assert_eq!(c.space, Space::Srgb);
        assert_component_eq!(c.components.0, 1.0);
        assert_component_eq!(c.components.1, 128.0 / 255.0);
        assert_component_eq!(c.components.2, 0.0);
        assert_eq!(c.alpha, 1.0);

        let c = parse("#F00").unwrap();
        assert_eq!(c.components, Components(1.0, 0.0, 0.0));

        let c = parse("#0000ff80").unwrap();
        assert_component_eq!(c.alpha, 128.0 / 255.0);

        let c = parse("#fff8").unwrap();
        assert_component_eq!(c.alpha, 136.0 / 255.0);
    }

    #[test]
    fn invalid_hex_colors() {
        assert_eq!(parse("#ff"), Err(ParseError::InvalidHex("ff".to_string())));
        assert!(parse("#fffff").is_err());
        assert!(parse("#gggggg").is_err());
        assert!(parse("#").is_err());
    }

    #[test]
    fn rgb_legacy_and_modern() {
        let legacy = parse("rgb(255, 0, 51)").unwrap();
        let modern = parse("rgb(255 0 51)").unwrap();
        assert_eq!(legacy, modern);
        assert_component_eq!(legacy.components.2, 0.2);

        let c = parse("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(c.alpha, 0.5);

        let c = parse("rgb(100% 50% 0% / 25%)").unwrap();
        assert_eq!(c.components, Components(1.0, 0.5, 0.0));
        assert_eq!(c.alpha, 0.25);

        let c = parse("RGB(10 20 none)").unwrap();
        assert_eq!(c.flags, Flags::C2_IS_NONE);
    }

    #[test]
    fn rgb_errors() {
        assert_eq!(
            parse("rgb(256, 0, 0)"),
            Err(ParseError::OutOfRange("256".to_string()))
        );
        assert!(parse("rgb(1, 2)").is_err());
        assert!(parse("rgb(1 2 3 4)").is_err());
        assert!(parse("rgb(1, 2, none)").is_err());
        assert!(parse("rgb(1, 2, 3 / 1)").is_err());
        assert!(parse("rgb(1 2 3").is_err());
        assert!(parse("rgb(1deg 2 3)").is_err());
        assert!(parse("rgb(a b c)").is_err());
        assert!(parse("rgb (1 2 3)").is_err());
        assert!(!is_valid_color("rgba (1, 2, 3, 0.5)"));
        assert!(parse("rgb(1 2 3 / 2)").is_err());
    }

    #[test]
    fn hsl_with_units() {
        let c = parse("hsl(120deg 50% 25%)").unwrap();
        assert_eq!(c.space, Space::Hsl);
        assert_eq!(c.components, Components(120.0, 0.5, 0.25));

        let c = parse("hsl(0.5turn, 100%, 50%)").unwrap();
        assert_component_eq!(c.components.0, 180.0);

        let c = parse("hsl(200grad 100% 50%)").unwrap();
        assert_component_eq!(c.components.0, 180.0);

        let c = parse("hsl(3.14159265rad 100% 50%)").unwrap();
        approx::assert_abs_diff_eq!(c.components.0, 180.0, epsilon = 1.0e-3);

        let c = parse("hsl(-60 100 50)").unwrap();
        assert_component_eq!(c.components.0, 300.0);

        let c = parse("hsla(0, 0%, 100%, 0.3)").unwrap();
        assert_component_eq!(c.alpha, 0.3);
    }

    #[test]
    fn hsl_errors() {
        assert!(parse("hsl(0, 50, 50)").is_err());
        assert!(parse("hsl(0 150% 50%)").is_err());
        assert!(parse("hsl(10% 50% 50%)").is_err());
    }

    #[test]
    fn oklab_family() {
        let c = parse("oklch(0.7 0.15 180)").unwrap();
        assert_eq!(c.space, Space::Oklch);
        assert_component_eq!(c.components.0, 0.7);
        assert_component_eq!(c.components.1, 0.15);
        assert_component_eq!(c.components.2, 180.0);

        let c = parse("oklch(70% 50% 90deg / 0.5)").unwrap();
        assert_component_eq!(c.components.0, 0.7);
        assert_component_eq!(c.components.1, 0.2);
        assert_eq!(c.alpha, 0.5);

        let c = parse("oklab(0.5 -0.1 0.1)").unwrap();
        assert_eq!(c.space, Space::Oklab);
        assert_component_eq!(c.components.1, -0.1);

        assert!(parse("oklch(0.5, 0.1, 20)").is_err());
        assert!(parse("oklch(120 50 50)").is_err());
        assert!(parse("oklch(0.5 -0.1 20)").is_err());
    }

    #[test]
    fn overflowing_components() {
        assert_eq!(
            parse("oklab(0.5 1e400 0)"),
            Err(ParseError::BadComponent("1e400".to_string()))
        );
        assert!(!is_valid_color("oklch(0.5 1e400 0)"));
        assert!(!is_valid_color("hsl(1e400 50% 50%)"));
        assert!(!is_valid_color("oklab(0.5 inf 0)"));
        assert!(!is_valid_color("oklab(0.5 nan 0)"));
    }

    #[cfg(not(feature = "f64"))]
    #[test]
    fn components_must_fit_in_single_precision() {
        assert_eq!(
            parse("oklab(0.5 1e39 0)"),
            Err(ParseError::BadComponent("1e39".to_string()))
        );
        assert!(!is_valid_color("oklch(0.5 1e39 0)"));
        assert!(!is_valid_color("hsl(1e38turn 50% 50%)"));
        assert!(is_valid_color("oklab(0.5 1e38 0)"));
    }

    #[test]
    fn named_colors() {
        let c = parse("RebeccaPurple").unwrap();
        assert_eq!(Srgb::from_color(&c).to_rgb8(), [102, 51, 153]);

        let c = parse("transparent").unwrap();
        assert_eq!(c.alpha, 0.0);

        assert_eq!(
            parse("blurple"),
            Err(ParseError::UnknownName("blurple".to_string()))
        );
    }

    #[test]
    fn validity_predicate() {
        assert!(is_valid_color("#ffffff"));
        assert!(is_valid_color("  red "));
        assert!(!is_valid_color(""));
        assert!(!is_valid_color("ffffff"));
        assert!(!is_valid_color("hwb(0 0% 0%)"));
        assert_eq!(
            parse("lab(50 0 0)"),
            Err(ParseError::UnknownFunction("lab".to_string()))
        );
    }
}
