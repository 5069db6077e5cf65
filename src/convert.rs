//! Conversions between the color spaces supported by [`Color`].
//!
//! Direct conversions (sRGB <-> HSL, Oklab <-> Oklch, gamma encoding) are
//! done without leaving the sRGB or Oklab families. Anything else goes
//! through CIE-XYZ with a D65 white point.
//!
//! ```rust
//! use tinct::{Color, Space};
//! let red = Color::new(Space::Srgb, 1.0, 0.0, 0.0, 1.0);
//! let oklch = red.to_space(Space::Oklch);
//! assert!((oklch.components.2 - 29.23).abs() < 0.01);
//! ```

use crate::{
    color::{Color, Components, Space},
    models::{Hsl, Model, Oklab, Oklch, Srgb, SrgbLinear, ToXyz, XyzD65},
};

impl Color {
    /// Convert this color from its current color space/notation to the
    /// specified color space/notation. Alpha and missing alpha are kept.
    pub fn to_space(&self, space: Space) -> Self {
        use Space as S;

        if self.space == space {
            return self.clone();
        }

        tracing::trace!(from = ?self.space, to = ?space, "converting color");

        // Handle direct conversions.
        match (self.space, space) {
            (S::Srgb, S::SrgbLinear) => {
                return self
                    .as_model::<Srgb>()
                    .to_linear_light()
                    .to_color(self.alpha())
            }
            (S::SrgbLinear, S::Srgb) => {
                return self
                    .as_model::<SrgbLinear>()
                    .to_gamma_encoded()
                    .to_color(self.alpha())
            }
            (S::Srgb, S::Hsl) => return self.as_model::<Srgb>().to_hsl().to_color(self.alpha()),
            (S::Hsl, S::Srgb) => return self.as_model::<Hsl>().to_srgb().to_color(self.alpha()),
            (S::Oklab, S::Oklch) => {
                return self.as_model::<Oklab>().to_polar().to_color(self.alpha())
            }
            (S::Oklch, S::Oklab) => {
                return self
                    .as_model::<Oklch>()
                    .to_rectangular()
                    .to_color(self.alpha())
            }
            _ => {}
        }

        // The rest converts to XyzD65.
        let base = match self.space {
            S::Srgb => self.as_model::<Srgb>().to_linear_light().to_xyz(),
            S::SrgbLinear => self.as_model::<SrgbLinear>().to_xyz(),
            S::Hsl => self
                .as_model::<Hsl>()
                .to_srgb()
                .to_linear_light()
                .to_xyz(),
            S::Oklab => self.as_model::<Oklab>().to_xyz(),
            S::Oklch => self.as_model::<Oklch>().to_rectangular().to_xyz(),
            S::XyzD65 => self.as_model::<XyzD65>(),
        };

        match space {
            S::Srgb => SrgbLinear::from(base)
                .to_gamma_encoded()
                .to_color(self.alpha()),
            S::SrgbLinear => SrgbLinear::from(base).to_color(self.alpha()),
            S::Hsl => SrgbLinear::from(base)
                .to_gamma_encoded()
                .to_hsl()
                .to_color(self.alpha()),
            S::Oklab => Oklab::from(base).to_color(self.alpha()),
            S::Oklch => Oklab::from(base).to_polar().to_color(self.alpha()),
            S::XyzD65 => base.to_color(self.alpha()),
        }
    }
}

impl Srgb {
    /// Convert a color specified in the sRGB color space to the HSL notation.
    pub fn to_hsl(&self) -> Hsl {
        util::rgb_to_hsl(&self.to_components()).into()
    }
}

impl Hsl {
    /// Convert this color from the HSL notation to the sRGB color space.
    pub fn to_srgb(&self) -> Srgb {
        util::hsl_to_rgb(&Components(self.hue, self.saturation, self.lightness)).into()
    }
}

mod util {
    use crate::{
        color::{Component, Components},
        math::{almost_zero, normalize, normalize_hue},
    };

    /// Convert from RGB notation to HSL notation.
    /// <https://drafts.csswg.org/css-color-4/#rgb-to-hsl>
    pub fn rgb_to_hsl(from: &Components) -> Components {
        let Components(red, green, blue) = *from;

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let delta = max - min;

        let hue = if delta != 0.0 {
            60.0 * if max == red {
                (green - blue) / delta + if green < blue { 6.0 } else { 0.0 }
            } else if max == green {
                (blue - red) / delta + 2.0
            } else {
                (red - green) / delta + 4.0
            }
        } else {
            Component::NAN
        };

        let lightness = (min + max) / 2.0;

        let saturation =
            if almost_zero(delta) || almost_zero(lightness) || almost_zero(1.0 - lightness) {
                0.0
            } else {
                (max - lightness) / lightness.min(1.0 - lightness)
            };

        Components(hue, saturation, lightness)
    }

    /// Convert from HSL notation to RGB notation.
    /// <https://drafts.csswg.org/css-color-4/#hsl-to-rgb>
    pub fn hsl_to_rgb(from: &Components) -> Components {
        let Components(hue, saturation, lightness) = from.map(normalize);

        if saturation <= 0.0 {
            return Components(lightness, lightness, lightness);
        }

        let hue = normalize_hue(hue);

        let f = |n: Component| {
            let k = (n + hue / 30.0) % 12.0;
            let a = saturation * lightness.min(1.0 - lightness);
            lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
        };

        Components(f(0.0), f(8.0), f(4.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;
    use crate::color::Component;
    use crate::models::D65_WHITE_POINT;

    #[test]
    fn test_conversions() {
        use Space as S;

        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        #[allow(clippy::type_complexity)]
        const TESTS: &[(Space, Component, Component, Component, Space, Component, Component, Component)] = &[
            (S::Srgb, 0.823529, 0.411765, 0.117647, S::Srgb, 0.823529, 0.411765, 0.117647),
            (S::Srgb, 0.823529, 0.411765, 0.117647, S::Hsl, 25.000000, 0.750000, 0.470588),
            (S::Srgb, 0.823529, 0.411765, 0.117647, S::Oklab, 0.634398, 0.099074, 0.119193),
            (S::Srgb, 0.823529, 0.411765, 0.117647, S::SrgbLinear, 0.644480, 0.141263, 0.012983),
            (S::Srgb, 0.823529, 0.411765, 0.117647, S::XyzD65, 0.318634, 0.239006, 0.041637),
            (S::Hsl, 25.000000, 0.750000, 0.470588, S::Srgb, 0.823529, 0.411765, 0.117647),
            (S::Hsl, 25.000000, 0.750000, 0.470588, S::Hsl, 25.000000, 0.750000, 0.470588),
            (S::Oklab, 0.634398, 0.099074, 0.119193, S::Srgb, 0.823529, 0.411765, 0.117647),
            (S::SrgbLinear, 0.644480, 0.141263, 0.012983, S::Srgb, 0.823529, 0.411765, 0.117647),
            (S::XyzD65, 0.318634, 0.239006, 0.041637, S::Srgb, 0.823529, 0.411765, 0.117647),
        ];

        for &(source_space, source_0, source_1, source_2, dest_space, dest_0, dest_1, dest_2) in
            TESTS
        {
            let source = Color::new(source_space, source_0, source_1, source_2, 1.0);
            let dest = source.to_space(dest_space);
            approx::assert_abs_diff_eq!(dest.components.0, dest_0, epsilon = 1.0e-3);
            approx::assert_abs_diff_eq!(dest.components.1, dest_1, epsilon = 1.0e-3);
            approx::assert_abs_diff_eq!(dest.components.2, dest_2, epsilon = 1.0e-3);
        }
    }

    #[test]
    fn oklch_of_chocolate() {
        let color = Color::new(Space::Srgb, 0.823529, 0.411765, 0.117647, 1.0);
        let oklch = color.to_space(Space::Oklch);
        approx::assert_abs_diff_eq!(oklch.components.0, 0.634398, epsilon = 1.0e-3);
        approx::assert_abs_diff_eq!(oklch.components.1, 0.154992, epsilon = 1.0e-3);
        approx::assert_abs_diff_eq!(oklch.components.2, 50.266483, epsilon = 0.1);
    }

    #[test]
    fn white_maps_to_the_white_point() {
        let white = Color::new(Space::Srgb, 1.0, 1.0, 1.0, 1.0);
        let xyz = white.to_space(Space::XyzD65);
        approx::assert_abs_diff_eq!(xyz.components.0, D65_WHITE_POINT.0, epsilon = 1.0e-4);
        approx::assert_abs_diff_eq!(xyz.components.1, D65_WHITE_POINT.1, epsilon = 1.0e-4);
        approx::assert_abs_diff_eq!(xyz.components.2, D65_WHITE_POINT.2, epsilon = 1.0e-4);

        let oklch = white.to_space(Space::Oklch);
        approx::assert_abs_diff_eq!(oklch.components.0, 1.0, epsilon = 1.0e-4);
        assert!(oklch.c2().is_none());
    }

    #[test]
    fn hue_is_powerless_if_there_is_no_chroma() {
        assert!(Srgb::new(1.0, 1.0, 1.0).to_hsl().hue.is_nan());
        assert!(Srgb::new(0.0, 0.0, 0.0).to_hsl().hue.is_nan());
        assert!(Srgb::new(0.5, 0.5, 0.5).to_hsl().hue.is_nan());
    }

    #[test]
    fn converting_a_color_should_maintain_source_alpha() {
        let hsl = Color::new(Space::Hsl, 120.0, 0.4, 0.4, None);
        let srgb = hsl.to_space(Space::Srgb);
        assert!(srgb.alpha().is_none());

        let hsl = Color::new(Space::Hsl, 120.0, 0.4, 0.4, 0.25);
        assert_eq!(hsl.to_space(Space::Oklch).alpha(), Some(0.25));
    }

    #[test]
    fn rgb_to_hsl() {
        // color(srgb 0.46 0.52 0.28 / 0.5)
        let srgb = Color::new(Space::Srgb, 0.46, 0.52, 0.28, 0.5);
        let hsl = srgb.to_space(Space::Hsl);
        assert_component_eq!(hsl.components.0, 75.0);
        assert_component_eq!(hsl.components.1, 0.3);
        assert_component_eq!(hsl.components.2, 0.4);
    }
}
