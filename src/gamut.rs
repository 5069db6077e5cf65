//! Gamut mapping functions.
//! <https://drafts.csswg.org/css-color-4/#gamut-mapping>

use crate::{Color, Component, Space};

#[allow(clippy::manual_range_contains)]
fn in_zero_to_one(value: Component) -> bool {
    // Allow for rounding errors picked up on the way through other spaces.
    const EPSILON: Component = 1.0e-5;
    value >= -EPSILON && value <= 1.0 + EPSILON
}

/// Calculate deltaE OK (simple root sum of squares).
/// <https://drafts.csswg.org/css-color-4/#color-difference-OK>
fn delta_eok(reference: &Color, sample: &Color) -> Component {
    // Delta is calculated in the oklab color space.
    let reference = reference.to_space(Space::Oklab);
    let sample = sample.to_space(Space::Oklab);

    let d = sample.components - reference.components;
    (d.0 * d.0 + d.1 * d.1 + d.2 * d.2).sqrt()
}

impl Color {
    /// Convert this color to sRGB, mapping it into the sRGB gamut if needed.
    /// The result always has components in [0..1].
    pub fn to_srgb_in_gamut(&self) -> Color {
        self.to_space(Space::Srgb).map_into_gamut_limits().clip()
    }

    /// If this color is not within gamut limits of it's color space, then a
    /// gamut mapping is applied to map the components into range.
    /// <https://drafts.csswg.org/css-color-4/#binsearch>
    pub fn map_into_gamut_limits(&self) -> Self {
        // 1. if destination has no gamut limits (XYZ-D65, Oklab, Oklch)
        //    return origin.
        if matches!(self.space, Space::Oklab | Space::Oklch | Space::XyzD65) {
            return self.clone();
        }

        // Local optimization: If the color is already in gamut, then we can
        // skip the binary search and return the color.
        if self.in_gamut() {
            return self.clone();
        }

        // 2. let origin_Oklch be origin converted from origin color space to
        //    the Oklch color space.
        let origin_oklch = self.to_space(Space::Oklch);

        // 3. if the Lightness of origin_Oklch is greater than or equal to
        //    100%, return { 1 1 1 origin.alpha } in destination.
        if origin_oklch.components.0 >= 1.0 {
            return Color::new(Space::Srgb, 1.0, 1.0, 1.0, self.alpha()).to_space(self.space);
        }

        // 4. if the Lightness of origin_Oklch is less than than or equal to
        //    0%, return { 0 0 0 origin.alpha } in destination.
        if origin_oklch.components.0 <= 0.0 {
            return Color::new(Space::Srgb, 0.0, 0.0, 0.0, self.alpha()).to_space(self.space);
        }

        // 8. let JND be 0.02
        const JND: Component = 0.02;

        // 9. let epsilon be 0.0001
        const EPSILON: Component = 1.0e-4;

        // 11. set min to zero
        let mut min = 0.0;

        // 12. set max to the Oklch chroma of origin_Oklch.
        let mut max = origin_oklch.components.1;

        // 13. let min_inGamut be a boolean that represents when min is still
        //     in gamut, and set it to true
        let mut min_in_gamut = true;

        let mut current = origin_oklch.clone();
        let mut current_in_space = self.clone();

        // If we are already clipped, then we can return the clipped color and
        // avoid the binary search completely.
        let clipped = current_in_space.clip();
        if delta_eok(&current, &clipped) < JND {
            return clipped;
        }

        // 14. while (max - min is greater than epsilon) repeat the following
        //     steps.
        while max - min > EPSILON {
            // 14.1. set chroma to (min + max) / 2
            let chroma = (min + max) / 2.0;

            // 14.2. set current to origin_Oklch and then set the chroma
            //       component to chroma
            current.components.1 = chroma;

            current_in_space = current.to_space(self.space);

            // 14.3. if min_inGamut is true and also if inGamut(current) is
            //       true, set min to chroma and continue to repeat these steps.
            if min_in_gamut && current_in_space.in_gamut() {
                min = chroma;
                continue;
            }

            // 14.4.1. set clipped to clip(current)
            let clipped = current_in_space.clip();

            // 14.4.2. set E to delta(clipped, current)
            let e = delta_eok(&clipped, &current);

            // 14.4.3. if E < JND
            if e < JND {
                // 14.4.3.1. if (JND - E < epsilon) return clipped as the gamut
                //           mapped color
                if JND - e < EPSILON {
                    return clipped;
                }

                // 14.4.3.2.1. set min_inGamut to false
                min_in_gamut = false;

                // 14.4.3.2.2. set min to chroma
                min = chroma;
            } else {
                // 14.4.4. otherwise, set max to chroma and continue to repeat
                //         these steps
                max = chroma;
            }
        }

        // 15. return current as the gamut mapped color current
        current_in_space
    }

    /// Return a color with each of the components clipped (clamped to [0..1])
    /// in sRGB. HSL colors are clipped in sRGB and converted back.
    /// NOTE: This is a lossy operation.
    pub fn clip(&self) -> Color {
        match self.space {
            Space::Srgb | Space::SrgbLinear => Color {
                components: self.components.map(|c| c.clamp(0.0, 1.0)),
                ..self.clone()
            },
            Space::Hsl => self.to_space(Space::Srgb).clip().to_space(Space::Hsl),
            Space::Oklab | Space::Oklch | Space::XyzD65 => self.clone(),
        }
    }

    /// Returns true if the color is within its gamut limits.
    ///
    /// For sRGB based colors, checking components to be inside [0..1].
    /// `Hsl` is converted to [`Space::Srgb`] before being checked.
    pub fn in_gamut(&self) -> bool {
        match self.space {
            Space::Srgb | Space::SrgbLinear => {
                in_zero_to_one(self.components.0)
                    && in_zero_to_one(self.components.1)
                    && in_zero_to_one(self.components.2)
            }
            Space::Hsl => self.to_space(Space::Srgb).in_gamut(),
            Space::Oklab | Space::Oklch | Space::XyzD65 => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_gamut_colors_are_untouched() {
        let color = Color::new(Space::Srgb, 0.2, 0.4, 0.6, 1.0);
        assert_eq!(color.map_into_gamut_limits(), color);
        assert!(color.in_gamut());
    }

    #[test]
    fn map_vivid_oklch_into_srgb() {
        // oklch(0.7 0.4 150) is far outside of sRGB.
        let source = Color::new(Space::Oklch, 0.7, 0.4, 150.0, 1.0);
        assert!(!source.to_space(Space::Srgb).in_gamut());

        let mapped = source.to_srgb_in_gamut();
        assert!(mapped.in_gamut());

        // Lightness and hue are kept, chroma is reduced.
        let back = mapped.to_space(Space::Oklch);
        approx::assert_abs_diff_eq!(back.components.0, 0.7, epsilon = 0.03);
        approx::assert_abs_diff_eq!(back.components.2, 150.0, epsilon = 3.0);
        assert!(back.components.1 < 0.4);
    }

    #[test]
    fn very_light_colors_map_to_white() {
        let source = Color::new(Space::Oklch, 1.2, 0.1, 40.0, 0.5);
        let mapped = source.to_srgb_in_gamut();
        assert_eq!(mapped.components, crate::Components(1.0, 1.0, 1.0));
        assert_eq!(mapped.alpha(), Some(0.5));
    }

    #[test]
    fn clipping_clamps_components() {
        let color = Color::new(Space::Srgb, 1.5, -0.5, 0.5, 1.0);
        let clipped = color.clip();
        assert_eq!(clipped.components, crate::Components(1.0, 0.0, 0.5));
    }
}
