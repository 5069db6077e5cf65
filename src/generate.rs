//! Derive related colors from a base color.
//!
//! * A **scheme** rotates the hue of the base color in HSL.
//! * A **palette** is either monochromatic (the base hue at several
//!   lightness levels) or one of the schemes.
//! * A **swatch** is a tonal ramp from light to dark, keyed like
//!   `50, 100, 200, ..., 900, 950`.
//!
//! All generated colors are mapped into sRGB and returned as hex codes.

use std::fmt;

use crate::{
    code::ColorCode, error::Rejection, math::normalize_hue, parse::parse, Color, Component,
    Flags, Space,
};

/// The kinds of generators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    /// See [`palette`].
    Palette,
    /// See [`scheme`].
    Scheme,
    /// See [`swatch`].
    Swatch,
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GeneratorKind::Palette => "palette",
            GeneratorKind::Scheme => "scheme",
            GeneratorKind::Swatch => "swatch",
        })
    }
}

/// Harmonies built by rotating the hue of the base color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SchemeType {
    /// The base color and its neighbours 30° to either side.
    Analogous,
    /// The base color and the color opposite to it.
    #[default]
    Complementary,
    /// The base color and the colors at 120° and 240°.
    Triadic,
}

impl SchemeType {
    /// Look up a scheme by name, falling back to
    /// [`SchemeType::Complementary`] for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "analogous" => SchemeType::Analogous,
            "triadic" => SchemeType::Triadic,
            "complementary" => SchemeType::Complementary,
            other => {
                tracing::debug!(name = other, "unknown scheme type, using complementary");
                SchemeType::Complementary
            }
        }
    }

    /// Hue rotations in degrees, the base color first.
    fn rotations(&self) -> &'static [Component] {
        match self {
            SchemeType::Analogous => &[0.0, -30.0, 30.0],
            SchemeType::Complementary => &[0.0, 180.0],
            SchemeType::Triadic => &[0.0, 120.0, 240.0],
        }
    }
}

/// The types of palettes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaletteType {
    /// Same as [`SchemeType::Analogous`].
    #[default]
    Analogous,
    /// The hue and saturation of the base color at decreasing lightness.
    Monochromatic,
    /// Same as [`SchemeType::Complementary`].
    Complementary,
    /// Same as [`SchemeType::Triadic`].
    Triadic,
}

impl PaletteType {
    /// Look up a palette by name. Anything but `monochromatic` is looked up
    /// as a scheme.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("monochromatic") {
            return PaletteType::Monochromatic;
        }
        match SchemeType::from_name(name) {
            SchemeType::Analogous => PaletteType::Analogous,
            SchemeType::Complementary => PaletteType::Complementary,
            SchemeType::Triadic => PaletteType::Triadic,
        }
    }
}

/// Options for monochromatic palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PaletteOptions {
    /// The number of colors.
    pub size: usize,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self { size: 6 }
    }
}

/// Options for swatches.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SwatchOptions {
    /// Oklch lightness of the darkest step.
    pub min_lightness: Component,
    /// Oklch lightness of the lightest step.
    pub max_lightness: Component,
}

impl Default for SwatchOptions {
    fn default() -> Self {
        Self {
            min_lightness: 0.2,
            max_lightness: 0.97,
        }
    }
}

/// Which colors to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generator {
    /// A palette of the given type.
    Palette(PaletteType),
    /// A scheme of the given type.
    Scheme(SchemeType),
    /// An 11 step swatch.
    Swatch,
}

impl Generator {
    /// The kind of generator, used in error reports.
    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Palette(_) => GeneratorKind::Palette,
            Generator::Scheme(_) => GeneratorKind::Scheme,
            Generator::Swatch => GeneratorKind::Swatch,
        }
    }
}

/// A base color and what to generate from it.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorRequest {
    /// Any valid CSS color.
    pub base: String,
    /// What to generate.
    pub generator: Generator,
    /// Used by monochromatic palettes.
    pub palette: PaletteOptions,
    /// Used by swatches.
    pub swatch: SwatchOptions,
}

impl GeneratorRequest {
    /// A request with default options.
    pub fn new(base: impl Into<String>, generator: Generator) -> Self {
        Self {
            base: base.into(),
            generator,
            palette: PaletteOptions::default(),
            swatch: SwatchOptions::default(),
        }
    }
}

/// Generate the colors for a request.
///
/// ```rust
/// use tinct::{generate, Generator, GeneratorRequest, SchemeType};
/// let request = GeneratorRequest::new("#ff0000", Generator::Scheme(SchemeType::Complementary));
/// let colors = generate(&request).unwrap();
/// assert_eq!(colors[1].as_str(), "#00ffff");
/// ```
pub fn generate(request: &GeneratorRequest) -> Result<Vec<ColorCode>, Rejection> {
    let base = parse(&request.base).map_err(|_| Rejection::InvalidBaseColor {
        input: request.base.clone(),
    })?;

    let colors = match request.generator {
        Generator::Palette(palette_type) => palette(&base, palette_type, &request.palette),
        Generator::Scheme(scheme_type) => scheme(&base, scheme_type),
        Generator::Swatch => swatch(&base, &request.swatch).map(Swatch::into_colors),
    };

    colors.map_err(|err| {
        tracing::debug!(base = %request.base, %err, "generating colors failed");
        err
    })
}

/// Generate a palette from `base`.
pub fn palette(
    base: &Color,
    palette_type: PaletteType,
    options: &PaletteOptions,
) -> Result<Vec<ColorCode>, Rejection> {
    let scheme_type = match palette_type {
        PaletteType::Monochromatic => return monochromatic(base, options.size),
        PaletteType::Analogous => SchemeType::Analogous,
        PaletteType::Complementary => SchemeType::Complementary,
        PaletteType::Triadic => SchemeType::Triadic,
    };

    scheme(base, scheme_type).map_err(|_| Rejection::GenerationFailure {
        kind: GeneratorKind::Palette,
    })
}

/// Generate a scheme from `base`, starting with the base color itself.
pub fn scheme(base: &Color, scheme_type: SchemeType) -> Result<Vec<ColorCode>, Rejection> {
    let hsl = base.to_srgb_in_gamut().to_space(Space::Hsl);

    scheme_type
        .rotations()
        .iter()
        .map(|rotation| {
            let hue = hsl.c0().map(|hue| normalize_hue(hue + rotation));
            let color = Color::new(
                Space::Hsl,
                hue,
                hsl.components.1,
                hsl.components.2,
                hsl.alpha(),
            );
            to_code(&color, GeneratorKind::Scheme)
        })
        .collect()
}

fn monochromatic(base: &Color, size: usize) -> Result<Vec<ColorCode>, Rejection> {
    if size == 0 {
        return Err(Rejection::GenerationFailure {
            kind: GeneratorKind::Palette,
        });
    }

    let hsl = base.to_srgb_in_gamut().to_space(Space::Hsl);
    let step = 0.8 / size as Component;

    (1..=size)
        .rev()
        .map(|i| {
            let color = Color::new(
                Space::Hsl,
                hsl.c0(),
                hsl.components.1,
                step * i as Component,
                hsl.alpha(),
            );
            to_code(&color, GeneratorKind::Palette)
        })
        .collect()
}

fn to_code(color: &Color, kind: GeneratorKind) -> Result<ColorCode, Rejection> {
    let srgb = color.to_srgb_in_gamut();
    // A NaN anywhere on the way ends up as a missing sRGB component.
    let channels = Flags::C0_IS_NONE | Flags::C1_IS_NONE | Flags::C2_IS_NONE;
    if !color.components.is_finite()
        || !srgb.components.is_finite()
        || srgb.flags.intersects(channels)
    {
        return Err(Rejection::GenerationFailure { kind });
    }
    Ok(ColorCode::from_srgb(srgb))
}

/// The keys of the steps of a [`Swatch`], light to dark.
pub const SWATCH_KEYS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// A tonal ramp of a single hue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Swatch {
    steps: Vec<(u16, ColorCode)>,
}

impl Swatch {
    /// The color for a key in [`SWATCH_KEYS`].
    pub fn get(&self, key: u16) -> Option<&ColorCode> {
        self.steps
            .iter()
            .find_map(|(k, code)| (*k == key).then_some(code))
    }

    /// Iterate over the keys and colors, light to dark.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &ColorCode)> {
        self.steps.iter().map(|(key, code)| (*key, code))
    }

    /// The colors without their keys, light to dark.
    pub fn into_colors(self) -> Vec<ColorCode> {
        self.steps.into_iter().map(|(_, code)| code).collect()
    }
}

/// Generate a swatch with the hue of `base`.
///
/// The lightness of the steps is spread evenly between the limits in
/// `options`. Chroma peaks at the middle step with the chroma of the base
/// color and fades toward the light and dark ends.
pub fn swatch(base: &Color, options: &SwatchOptions) -> Result<Swatch, Rejection> {
    let oklch = base.to_space(Space::Oklch);
    let chroma = oklch.c1().unwrap_or(0.0);
    let hue = oklch.c2();
    let alpha = oklch.alpha();

    let anchor = |lightness: Component, chroma: Component| {
        Color::new(Space::Oklch, lightness, chroma, hue, alpha)
    };
    let light = anchor(options.max_lightness, chroma * 0.1);
    let mid = anchor((options.max_lightness + options.min_lightness) / 2.0, chroma);
    let dark = anchor(options.min_lightness, chroma * 0.5);

    let last = (SWATCH_KEYS.len() - 1) as Component;
    let steps = SWATCH_KEYS
        .iter()
        .enumerate()
        .map(|(index, &key)| {
            let t = index as Component / last;
            let color = if t <= 0.5 {
                light.interpolate(&mid, t * 2.0, Space::Oklch)
            } else {
                mid.interpolate(&dark, t * 2.0 - 1.0, Space::Oklch)
            };
            to_code(&color, GeneratorKind::Swatch).map(|code| (key, code))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Swatch { steps })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(colors: &[ColorCode]) -> Vec<&str> {
        colors.iter().map(ColorCode::as_str).collect()
    }

    fn hue_of(code: &ColorCode) -> Component {
        code.color().to_space(Space::Hsl).components.0
    }

    #[test]
    fn complementary_scheme() {
        let request = GeneratorRequest::new("#ff0000", Generator::Scheme(SchemeType::default()));
        let colors = generate(&request).unwrap();
        assert_eq!(hex(&colors), ["#ff0000", "#00ffff"]);

        let delta = (hue_of(&colors[1]) - hue_of(&colors[0])).abs();
        approx::assert_abs_diff_eq!(delta, 180.0, epsilon = 0.5);
    }

    #[test]
    fn analogous_and_triadic_schemes() {
        let red = parse("red").unwrap();
        assert_eq!(
            hex(&scheme(&red, SchemeType::Analogous).unwrap()),
            ["#ff0000", "#ff0080", "#ff8000"]
        );
        assert_eq!(
            hex(&scheme(&red, SchemeType::Triadic).unwrap()),
            ["#ff0000", "#00ff00", "#0000ff"]
        );
    }

    #[test]
    fn unknown_scheme_names_fall_back() {
        assert_eq!(SchemeType::from_name("tetradic"), SchemeType::Complementary);
        assert_eq!(SchemeType::from_name(" Triadic "), SchemeType::Triadic);
        assert_eq!(PaletteType::from_name("monochromatic"), PaletteType::Monochromatic);
        assert_eq!(PaletteType::from_name("unknown"), PaletteType::Complementary);
        assert_eq!(PaletteType::default(), PaletteType::Analogous);
    }

    #[test]
    fn palettes_share_schemes() {
        let red = parse("red").unwrap();
        let options = PaletteOptions::default();
        assert_eq!(
            palette(&red, PaletteType::Triadic, &options).unwrap(),
            scheme(&red, SchemeType::Triadic).unwrap()
        );
    }

    #[test]
    fn monochromatic_palette() {
        let request =
            GeneratorRequest::new("#ff0000", Generator::Palette(PaletteType::Monochromatic));
        let colors = generate(&request).unwrap();
        assert_eq!(colors.len(), 6);

        let lightness = colors
            .iter()
            .map(|c| c.color().to_space(Space::Hsl).components.2)
            .collect::<Vec<_>>();
        for (l, expected) in lightness.iter().zip([0.8, 0.6667, 0.5333, 0.4, 0.2667, 0.1333]) {
            approx::assert_abs_diff_eq!(*l, expected, epsilon = 0.005);
        }
        for code in &colors {
            approx::assert_abs_diff_eq!(hue_of(code), 0.0, epsilon = 0.5);
        }

        let mut request = request;
        request.palette.size = 3;
        assert_eq!(generate(&request).unwrap().len(), 3);

        request.palette.size = 1;
        assert_eq!(hex(&generate(&request).unwrap()), ["#ff9999"]);
    }

    #[test]
    fn empty_monochromatic_palette_is_rejected() {
        let mut request =
            GeneratorRequest::new("#ff0000", Generator::Palette(PaletteType::Monochromatic));
        request.palette.size = 0;
        assert_eq!(
            generate(&request),
            Err(Rejection::GenerationFailure {
                kind: GeneratorKind::Palette
            })
        );
    }

    #[test]
    fn swatch_ramps_from_light_to_dark() {
        let base = parse("#3b82f6").unwrap();
        let swatch = swatch(&base, &SwatchOptions::default()).unwrap();
        assert_eq!(swatch.iter().map(|(key, _)| key).collect::<Vec<_>>(), SWATCH_KEYS);
        assert!(swatch.get(500).is_some());
        assert!(swatch.get(150).is_none());

        let lightness = swatch
            .iter()
            .map(|(_, code)| code.color().to_space(Space::Oklch).components.0)
            .collect::<Vec<_>>();
        approx::assert_abs_diff_eq!(lightness[0], 0.97, epsilon = 0.01);
        approx::assert_abs_diff_eq!(lightness[10], 0.2, epsilon = 0.01);
        for pair in lightness.windows(2) {
            assert!(pair[1] <= pair[0] + 1.0e-3, "{lightness:?}");
        }

        let request = GeneratorRequest::new("#3b82f6", Generator::Swatch);
        let colors = generate(&request).unwrap();
        assert_eq!(colors, swatch.into_colors());
    }

    #[test]
    fn gray_swatches_stay_gray() {
        use crate::models::{Model, Srgb};

        let gray = parse("#808080").unwrap();
        for (_, code) in swatch(&gray, &SwatchOptions::default()).unwrap().iter() {
            let [r, g, b] = Srgb::from_color(code.color()).to_rgb8();
            assert!(r == g && g == b, "{code}");
        }
    }

    #[test]
    fn unbounded_base_colors_fail_to_generate() {
        let base = Color::new(Space::Oklab, 0.5, Component::INFINITY, 0.0, 1.0);
        assert_eq!(
            swatch(&base, &SwatchOptions::default()),
            Err(Rejection::GenerationFailure {
                kind: GeneratorKind::Swatch
            })
        );
    }

    #[test]
    fn invalid_base_colors_are_rejected() {
        let request = GeneratorRequest::new("not a color", Generator::Swatch);
        assert_eq!(
            generate(&request),
            Err(Rejection::InvalidBaseColor {
                input: "not a color".to_string()
            })
        );
    }
}
