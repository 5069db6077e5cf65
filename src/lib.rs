//! tinct is the core of a color utility: it turns free-form input into CSS
//! colors, converts them between formats, derives palettes, schemes and
//! swatches from a base color, extracts dominant colors from images and
//! exports color lists as CSS custom properties or a Tailwind config.
//!
//! ```rust
//! use tinct::{formats, ColorList, CssExportOptions, serialize_css_variables};
//!
//! let mut list = ColorList::new();
//! list.add("255, 0, 0").unwrap();
//! list.add("ffffff").unwrap();
//!
//! let first = list.iter().next().unwrap();
//! assert_eq!(formats(&first.code).hex, "#ff0000");
//!
//! let css = serialize_css_variables(&list.codes(), &CssExportOptions::default());
//! assert_eq!(css, ":root {\n  --color-1: #ff0000;\n  --color-2: #ffffff;\n}");
//! ```

#![deny(missing_docs)]

mod code;
mod color;
mod convert;
mod error;
mod export;
mod extract;
mod format;
mod gamut;
mod generate;
mod interpolate;
mod list;
mod math;
pub mod models;
mod named;
mod normalize;
mod parse;

#[cfg(test)]
mod test;

pub use code::ColorCode;
pub use color::{Color, Component, ComponentDetails, Components, Flags, HasSpace, Space};
pub use error::{ExtractError, FormatError, ParseError, Rejection};
pub use export::{serialize_css_variables, serialize_tailwind_config, CssExportOptions};
pub use extract::{
    dominant_colors, filter_distinct, ExtractOptions, ExtractionTask, Extractor, ImageSource,
};
pub use format::{convert, format_css, formats, Format, FormatOptions, Formats};
pub use generate::{
    generate, palette, scheme, swatch, Generator, GeneratorKind, GeneratorRequest,
    PaletteOptions, PaletteType, SchemeType, Swatch, SwatchOptions, SWATCH_KEYS,
};
pub use list::{try_add, ColorId, ColorList, Entry};
pub use normalize::normalize;
pub use parse::{is_valid_color, parse};
