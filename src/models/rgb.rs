//! Model a color in the sRGB color space.

use crate::{
    color::{Component, Components, HasSpace, Space},
    math::{transform, transform_3x3, Transform},
    models::xyz::{ToXyz, XyzD65},
};

mod encoding {
    /// This trait is used to identity tags that specify gamma encoding.
    pub trait Encoding {}

    #[derive(Clone, Debug)]
    pub struct GammaEncoded;
    impl Encoding for GammaEncoded {}

    #[derive(Clone, Debug)]
    pub struct LinearLight;
    impl Encoding for LinearLight {}
}

tinct_macros::gen_model! {
    /// A color specified in the sRGB color space.
    pub struct Rgb<E: encoding::Encoding> {
        /// The red component of the color.
        pub red: Component,
        /// The green component of the color.
        pub green: Component,
        /// The blue component of the color.
        pub blue: Component,
    }
}

impl Rgb<encoding::GammaEncoded> {
    /// Convert this model from gamma encoded to linear light.
    pub fn to_linear_light(&self) -> Rgb<encoding::LinearLight> {
        self.to_components()
            .map(|value| {
                let abs = value.abs();

                if abs < 0.04045 {
                    value / 12.92
                } else {
                    value.signum() * ((abs + 0.055) / 1.055).powf(2.4)
                }
            })
            .into()
    }

    /// Returns the components as 8-bit channels, clamped into range.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |value: Component| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.red), channel(self.green), channel(self.blue)]
    }

    /// Create a model from 8-bit channels.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        let [red, green, blue] = rgb.map(|v| v as Component / 255.0);
        Self::new(red, green, blue)
    }
}

impl Rgb<encoding::LinearLight> {
    /// Convert this model from linear light to gamma encoded.
    pub fn to_gamma_encoded(&self) -> Rgb<encoding::GammaEncoded> {
        self.to_components()
            .map(|value| {
                let abs = value.abs();

                if abs > 0.0031308 {
                    value.signum() * (1.055 * abs.powf(1.0 / 2.4) - 0.055)
                } else {
                    12.92 * value
                }
            })
            .into()
    }
}

/// Model for a color in the sRGB color space with gamma encoding.
pub type Srgb = Rgb<encoding::GammaEncoded>;

impl HasSpace for Srgb {
    const SPACE: Space = Space::Srgb;
}

/// Model for a color in the sRGB color space with no gamma encoding.
pub type SrgbLinear = Rgb<encoding::LinearLight>;

impl HasSpace for SrgbLinear {
    const SPACE: Space = Space::SrgbLinear;
}

impl From<XyzD65> for SrgbLinear {
    fn from(value: XyzD65) -> Self {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const FROM_XYZ: Transform = transform_3x3(
             3.2409699419045213, -0.9692436362808798,  0.05563007969699361,
            -1.5373831775700935,  1.8759675015077206, -0.20397695888897657,
            -0.4986107602930033,  0.04155505740717561, 1.0569715142428786,
        );

        transform(&FROM_XYZ, value.to_components()).into()
    }
}

impl ToXyz for SrgbLinear {
    fn to_xyz(&self) -> XyzD65 {
        #[rustfmt::skip]
        #[allow(clippy::excessive_precision)]
        const TO_XYZ: Transform = transform_3x3(
            0.4123907992659595,  0.21263900587151036, 0.01933081871559185,
            0.35758433938387796, 0.7151686787677559,  0.11919477979462599,
            0.1804807884018343,  0.07219231536073371, 0.9505321522496606,
        );

        transform(&TO_XYZ, Components(self.red, self.green, self.blue)).into()
    }
}
