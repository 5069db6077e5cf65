//! Error types for `tinct`.

use thiserror::Error;

use crate::generate::GeneratorKind;

/// Why a string was not accepted as a CSS color.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input was empty or only whitespace.
    #[error("empty color string")]
    Empty,

    /// A `#` color with the wrong length or non hex digits.
    #[error("invalid hex color: #{0}")]
    InvalidHex(String),

    /// A functional notation with a function name that is not supported.
    #[error("unknown color function: {0}()")]
    UnknownFunction(String),

    /// The arguments of a color function could not be split into components.
    #[error("invalid arguments for {0}()")]
    BadArguments(String),

    /// A component that is not valid in its position.
    #[error("invalid component: {0}")]
    BadComponent(String),

    /// A component outside of the range allowed in its position.
    #[error("component out of range: {0}")]
    OutOfRange(String),

    /// Not a known named color.
    #[error("unknown color name: {0}")]
    UnknownName(String),
}

/// Returned by the structured formatter when it cannot render a color. Always
/// recoverable by falling back to [`crate::convert`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The color has a missing (`none`) component.
    #[error("color has missing components")]
    MissingComponent,

    /// The structured formatter only handles rgb and hsl.
    #[error("structured formatting is not supported for {0}")]
    Unsupported(crate::Format),
}

/// Why a color was not added or a color set could not be generated.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The (normalized) input is not a recognized color syntax.
    #[error("please enter a valid color code: {input}")]
    InvalidSyntax {
        /// The normalized input.
        input: String,
        /// What the parser rejected.
        #[source]
        reason: ParseError,
    },

    /// The color is already in the list.
    #[error("this color is already in your list: {color}")]
    Duplicate {
        /// The canonical color string.
        color: String,
    },

    /// A generator was given a base color that is not valid.
    #[error("invalid base color: {input}")]
    InvalidBaseColor {
        /// The base color as given.
        input: String,
    },

    /// Generating colors produced an unusable result.
    #[error("error generating {kind}")]
    GenerationFailure {
        /// The kind of generator that failed.
        kind: GeneratorKind,
    },
}

/// Errors from extracting colors out of an image.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ExtractError {
    /// An extraction is already running.
    #[error("colors are already being extracted")]
    Busy,

    /// The image could not be read or decoded.
    #[error("error loading image: {0}")]
    ImageLoadFailure(#[from] image::ImageError),

    /// No colors could be extracted from the image.
    #[error("error extracting colors, please try a different image")]
    ExtractionFailure,

    /// The extraction was cancelled before it finished.
    #[error("extraction was cancelled")]
    Cancelled,
}
