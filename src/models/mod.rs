//! Models are structs that represent a color in a specified color space or
//! form. Conversions are only implemented on relevant models, making
//! conversion paths explicit.
//!
//! Conversions only operate on the 3 color components (no alpha, missing
//! components).
//!
//! NOTE: When a conversion yields a NaN value, the component is powerless and
//!       is treated as missing once the model is turned into a [`Color`].

use crate::color::{Color, Component};

mod hsl;
mod lab;
mod rgb;
mod xyz;

pub use hsl::Hsl;
pub use lab::{Oklab, Oklch};
pub use rgb::{Srgb, SrgbLinear};
pub use xyz::{ToXyz, XyzD65, D65_WHITE_POINT};

/// A trait implemented for color models that can be converted to and from a
/// generic [`Color`].
pub trait Model {
    /// Convert a model to a generic [`Color`].
    fn to_color(&self, alpha: Option<Component>) -> Color;

    /// Take the components of a generic [`Color`] as this model. No
    /// conversion is done.
    fn from_color(color: &Color) -> Self;
}
