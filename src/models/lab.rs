//! Models for the Oklab color space in its rectangular (Oklab) and polar
//! (Oklch) forms.

use crate::{
    color::{Component, Components, HasSpace, Space},
    math::{almost_zero, normalize, normalize_hue, transform, transform_3x3, Transform},
    models::xyz::{ToXyz, XyzD65},
};

tinct_macros::gen_model! {
    /// The model for a color specified in the oklab color space with the
    /// rectangular orthogonal form.
    pub struct Oklab {
        /// The lightness component, in the range [0..1].
        pub lightness: Component,
        /// The a component.
        pub a: Component,
        /// The b component.
        pub b: Component,
    }
}

impl Oklab {
    /// Convert this orthogonal rectangular model into its cylindrical polar
    /// form.
    pub fn to_polar(&self) -> Oklch {
        let chroma = (self.a * self.a + self.b * self.b).sqrt();
        let hue = if almost_zero(chroma) {
            Component::NAN
        } else {
            normalize_hue(self.b.atan2(self.a).to_degrees())
        };

        Oklch::new(self.lightness, chroma, hue)
    }
}

impl HasSpace for Oklab {
    const SPACE: Space = Space::Oklab;
}

impl From<XyzD65> for Oklab {
    fn from(value: XyzD65) -> Self {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const XYZ_TO_LMS: Transform = transform_3x3(
             0.8190224432164319,  0.0329836671980271,  0.048177199566046255,
             0.3619062562801221,  0.9292868468965546,  0.26423952494422764,
            -0.12887378261216414, 0.03614466816999844, 0.6335478258136937,
        );

        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const LMS_TO_OKLAB: Transform = transform_3x3(
             0.2104542553,  1.9779984951,  0.0259040371,
             0.7936177850, -2.4285922050,  0.7827717662,
            -0.0040720468,  0.4505937099, -0.8086757660,
        );

        let lms = transform(&XYZ_TO_LMS, value.to_components());
        let lms = lms.map(|v| v.cbrt());
        transform(&LMS_TO_OKLAB, lms).into()
    }
}

impl ToXyz for Oklab {
    fn to_xyz(&self) -> XyzD65 {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const OKLAB_TO_LMS: Transform = transform_3x3(
            0.99999999845051981432,  1.0000000088817607767,    1.0000000546724109177,
            0.39633779217376785678, -0.1055613423236563494,   -0.089484182094965759684,
            0.21580375806075880339, -0.063854174771705903402, -1.2914855378640917399,
        );

        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const LMS_TO_XYZ: Transform = transform_3x3(
             1.2268798733741557,  -0.04057576262431372, -0.07637294974672142,
            -0.5578149965554813,   1.1122868293970594,  -0.4214933239627914,
             0.28139105017721583, -0.07171106666151701,  1.5869240244272418,
        );

        let lms = transform(&OKLAB_TO_LMS, Components(self.lightness, self.a, self.b));
        let lms = lms.map(|v| v * v * v);
        transform(&LMS_TO_XYZ, lms).into()
    }
}

tinct_macros::gen_model! {
    /// The model for a color specified in the oklab color space with the
    /// cylindrical polar form.
    pub struct Oklch {
        /// The lightness component, in the range [0..1].
        pub lightness: Component,
        /// The chroma component.
        pub chroma: Component,
        /// The hue component, in degrees.
        pub hue: Component,
    }
}

impl Oklch {
    /// Convert this cylindrical polar model into its orthogonal rectangular
    /// form. A missing hue is treated as zero.
    pub fn to_rectangular(&self) -> Oklab {
        let hue = normalize(self.hue).to_radians();
        let a = self.chroma * hue.cos();
        let b = self.chroma * hue.sin();

        Oklab::new(self.lightness, a, b)
    }
}

impl HasSpace for Oklch {
    const SPACE: Space = Space::Oklch;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn converting_to_polar_should_set_hue_to_missing_for_small_a_b_values() {
        let lab = Oklab::new(0.5, 0.0, 0.0);
        let polar = lab.to_polar();

        assert!(polar.hue.is_nan());
    }

    #[test]
    fn polar_round_trip() {
        let lab = Oklab::new(0.634398, 0.099074, 0.119193);
        let lch = lab.to_polar();
        approx::assert_abs_diff_eq!(lch.chroma, 0.154992, epsilon = 1.0e-4);
        approx::assert_abs_diff_eq!(lch.hue, 50.266483, epsilon = 1.0e-2);

        let back = lch.to_rectangular();
        assert_component_eq!(back.a, lab.a);
        assert_component_eq!(back.b, lab.b);
    }
}
