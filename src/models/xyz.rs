//! Model a color in the CIE-XYZ color space.

use crate::color::{Component, Components, HasSpace, Space};

/// Reference white of the D65 illuminant.
#[allow(clippy::excessive_precision)]
pub const D65_WHITE_POINT: Components =
    Components(0.9504559270516716, 1.0, 1.0890577507598784);

/// Specify that a color model supports conversion to CIE-XYZ.
pub trait ToXyz {
    /// Convert this color to CIE-XYZ.
    fn to_xyz(&self) -> XyzD65;
}

tinct_macros::gen_model! {
    /// A model for a color in the CIE-XYZ color space with a D65 white point.
    pub struct XyzD65 {
        /// The X component of the color.
        pub x: Component,
        /// The Y component of the color.
        pub y: Component,
        /// The Z component of the color.
        pub z: Component,
    }
}

impl HasSpace for XyzD65 {
    const SPACE: Space = Space::XyzD65;
}
