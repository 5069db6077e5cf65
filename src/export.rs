//! Serialize a list of colors into text that can be pasted into a project.

use std::fmt::Write;

use crate::{
    code::ColorCode,
    format::{convert, format_css, Format, FormatOptions},
};

/// Options for [`serialize_css_variables`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct CssExportOptions {
    /// The format each value is written in.
    pub format: Format,
    /// Use the space separated syntax for rgb and hsl.
    pub modern: bool,
    /// Always write the alpha channel for rgb and hsl.
    pub include_alpha: bool,
    /// Custom properties are named `--<prefix>-<n>`.
    pub prefix: String,
}

impl Default for CssExportOptions {
    fn default() -> Self {
        Self {
            format: Format::Hex,
            modern: true,
            include_alpha: false,
            prefix: "color".to_string(),
        }
    }
}

impl CssExportOptions {
    /// Default options writing values in `format`.
    pub fn with_format(format: Format) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    fn format_options(&self) -> FormatOptions {
        FormatOptions {
            modern: self.modern,
            include_alpha: self.include_alpha,
        }
    }
}

fn css_value(code: &ColorCode, options: &CssExportOptions) -> String {
    match options.format {
        Format::Hex | Format::Oklch => convert(code.color(), options.format),
        Format::Rgb | Format::Hsl => {
            match format_css(code.color(), options.format, &options.format_options()) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!(color = %code, %err, "falling back to simple conversion");
                    convert(code.color(), options.format)
                }
            }
        }
    }
}

/// Write the colors as CSS custom properties on `:root`, numbered from 1 in
/// list order. An empty list produces an empty string.
///
/// ```rust
/// use tinct::{serialize_css_variables, ColorCode, CssExportOptions};
/// let colors = [ColorCode::new("#ffffff").unwrap()];
/// assert_eq!(
///     serialize_css_variables(&colors, &CssExportOptions::default()),
///     ":root {\n  --color-1: #ffffff;\n}"
/// );
/// ```
pub fn serialize_css_variables(colors: &[ColorCode], options: &CssExportOptions) -> String {
    if colors.is_empty() {
        return String::new();
    }

    let mut out = String::from(":root {\n");
    for (index, code) in colors.iter().enumerate() {
        // Writing into a String can not fail.
        let _ = writeln!(
            out,
            "  --{}-{}: {};",
            options.prefix,
            index + 1,
            css_value(code, options)
        );
    }
    out.push('}');
    out
}

/// Write the colors as a Tailwind config extending the theme colors. Values
/// are always hex. An empty list produces an empty string.
pub fn serialize_tailwind_config(colors: &[ColorCode]) -> String {
    if colors.is_empty() {
        return String::new();
    }

    let mut out = String::from("module.exports = {\n  theme: {\n    extend: {\n      colors: {\n");
    for (index, code) in colors.iter().enumerate() {
        let _ = writeln!(
            out,
            "        color{}: \"{}\",",
            index + 1,
            convert(code.color(), Format::Hex)
        );
    }
    out.push_str("      },\n    },\n  },\n}");
    out
}
