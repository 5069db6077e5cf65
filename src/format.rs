//! Serialize colors into CSS text.
//!
//! [`convert`] always succeeds and produces the canonical form of each
//! format. [`format_css`] renders rgb and hsl with extra options and rejects
//! anything it cannot express, callers fall back to [`convert`].

use std::fmt;

use crate::{
    code::ColorCode,
    error::FormatError,
    math::normalize,
    models::{Model, Srgb},
    Color, Component, Space,
};

/// The formats a color can be rendered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Format {
    /// `#rrggbb`
    #[default]
    Hex,
    /// `rgb(r, g, b)`
    Rgb,
    /// `hsl(h, s%, l%)`
    Hsl,
    /// `oklch(l c h)`
    Oklch,
}

impl Format {
    /// All formats, in display order.
    pub const ALL: [Format; 4] = [Format::Hex, Format::Rgb, Format::Hsl, Format::Oklch];

    /// The name of the format as used in CSS function names.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Hex => "hex",
            Format::Rgb => "rgb",
            Format::Hsl => "hsl",
            Format::Oklch => "oklch",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown format: {s}"))
    }
}

/// Options for [`format_css`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Use the space separated syntax (`rgb(255 0 0 / 0.5)`) instead of the
    /// legacy comma syntax (`rgba(255, 0, 0, 0.5)`).
    pub modern: bool,
    /// Always write the alpha channel, even for opaque colors.
    pub include_alpha: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            modern: true,
            include_alpha: false,
        }
    }
}

/// A color rendered in each of the supported formats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formats {
    /// `#rrggbb`
    pub hex: String,
    /// `rgb(r, g, b)`
    pub rgb: String,
    /// `hsl(h, s%, l%)`
    pub hsl: String,
    /// `oklch(l c h)`
    pub oklch: String,
}

impl Formats {
    /// The value for the given format.
    pub fn get(&self, format: Format) -> &str {
        match format {
            Format::Hex => &self.hex,
            Format::Rgb => &self.rgb,
            Format::Hsl => &self.hsl,
            Format::Oklch => &self.oklch,
        }
    }
}

/// Render a color in every supported format.
pub fn formats(code: &ColorCode) -> Formats {
    let color = code.color();
    Formats {
        hex: convert(color, Format::Hex),
        rgb: convert(color, Format::Rgb),
        hsl: convert(color, Format::Hsl),
        oklch: convert(color, Format::Oklch),
    }
}

/// Render a color in the canonical syntax of `format`. Missing components
/// are written as zero, alpha is only written when below 1.
pub fn convert(color: &Color, format: Format) -> String {
    match format {
        Format::Hex => to_hex(color),
        Format::Rgb => write_rgb(color, Syntax::LEGACY),
        Format::Hsl => write_hsl(color, Syntax::LEGACY),
        Format::Oklch => write_oklch(color),
    }
}

/// Render a color as rgb or hsl with the given options. Colors with `none`
/// components are rejected, as are formats other than rgb and hsl. A hue
/// without saturation is written as zero.
pub fn format_css(
    color: &Color,
    format: Format,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    if matches!(format, Format::Hex | Format::Oklch) {
        return Err(FormatError::Unsupported(format));
    }
    if color.has_missing_components() {
        return Err(FormatError::MissingComponent);
    }

    let syntax = Syntax {
        modern: options.modern,
        force_alpha: options.include_alpha,
    };

    Ok(match format {
        Format::Rgb => write_rgb(color, syntax),
        _ => write_hsl(color, syntax),
    })
}

/// Render a color as `#rrggbb`, or `#rrggbbaa` when it is translucent.
pub fn to_hex(color: &Color) -> String {
    let srgb = color.to_srgb_in_gamut();
    let [r, g, b] = Srgb::from_color(&srgb).to_rgb8();

    let alpha = alpha_of(color);
    if alpha < 1.0 {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

#[derive(Clone, Copy)]
struct Syntax {
    modern: bool,
    force_alpha: bool,
}

impl Syntax {
    const LEGACY: Syntax = Syntax {
        modern: false,
        force_alpha: false,
    };

    /// Write `name(a, b, c)` / `name(a b c / alpha)` with the legacy `a`
    /// suffix on the function name when alpha is written.
    fn write(&self, name: &str, values: [String; 3], alpha: Component) -> String {
        let [a, b, c] = values;
        let with_alpha = self.force_alpha || alpha < 1.0;
        match (self.modern, with_alpha) {
            (true, false) => format!("{name}({a} {b} {c})"),
            (true, true) => format!("{name}({a} {b} {c} / {})", number(alpha, 3)),
            (false, false) => format!("{name}({a}, {b}, {c})"),
            (false, true) => format!("{name}a({a}, {b}, {c}, {})", number(alpha, 3)),
        }
    }
}

fn alpha_of(color: &Color) -> Component {
    color.alpha().unwrap_or(0.0)
}

fn write_rgb(color: &Color, syntax: Syntax) -> String {
    let srgb = Srgb::from_color(&color.to_srgb_in_gamut());
    let [r, g, b] = srgb.to_rgb8().map(|v| v.to_string());
    syntax.write("rgb", [r, g, b], alpha_of(color))
}

fn write_hsl(color: &Color, syntax: Syntax) -> String {
    let hsl = color.to_srgb_in_gamut().to_space(Space::Hsl);
    let saturation = number(normalize(hsl.components.1) * 100.0, 2);
    let lightness = number(normalize(hsl.components.2) * 100.0, 2);
    // A hue without saturation is meaningless, write it as zero.
    let hue = if saturation == "0" {
        "0".to_string()
    } else {
        number(normalize(hsl.components.0), 2)
    };
    syntax.write(
        "hsl",
        [hue, format!("{saturation}%"), format!("{lightness}%")],
        alpha_of(color),
    )
}

fn write_oklch(color: &Color) -> String {
    let oklch = color.to_space(Space::Oklch);
    let lightness = number(normalize(oklch.components.0), 4);
    let chroma = number(normalize(oklch.components.1), 4);
    let hue = if chroma == "0" {
        "0".to_string()
    } else {
        number(normalize(oklch.components.2), 2)
    };

    let alpha = alpha_of(color);
    if alpha < 1.0 {
        format!("oklch({lightness} {chroma} {hue} / {})", number(alpha, 3))
    } else {
        format!("oklch({lightness} {chroma} {hue})")
    }
}

/// Write a number with at most `precision` decimals and no trailing zeros.
fn number(value: Component, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
