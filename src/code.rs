//! The canonical color string stored in a color list.

use std::{fmt, hash::Hash, str::FromStr};

use crate::{error::ParseError, normalize::normalize, parse::parse, Color};

/// A validated CSS color string, e.g. `#ff0000` or `oklch(0.7 0.1 200)`.
///
/// The text is kept exactly as it was accepted, so two codes are equal only
/// when their text is equal, even if they describe the same color. The
/// parsed [`Color`] is kept alongside so formatting never has to validate
/// again.
#[derive(Clone, Debug)]
pub struct ColorCode {
    text: String,
    color: Color,
}

impl ColorCode {
    /// Accept `text` (trimmed) if it is a recognized color syntax. No
    /// normalization is applied.
    pub fn new(text: &str) -> Result<Self, ParseError> {
        let text = text.trim();
        let color = parse(text)?;
        Ok(Self {
            text: text.to_string(),
            color,
        })
    }

    /// Normalize free-form input (see [`normalize`]) and accept the result if
    /// it is a recognized color syntax.
    pub fn normalized(raw: &str) -> Result<Self, ParseError> {
        Self::new(&normalize(raw))
    }

    /// Create a code for an sRGB color that is already in gamut, as `#rrggbb`
    /// or `#rrggbbaa`.
    pub(crate) fn from_srgb(color: Color) -> Self {
        Self {
            text: crate::format::to_hex(&color),
            color,
        }
    }

    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The parsed color.
    pub fn color(&self) -> &Color {
        &self.color
    }
}

impl PartialEq for ColorCode {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ColorCode {}

impl Hash for ColorCode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for ColorCode {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl FromStr for ColorCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalized(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ColorCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ColorCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::normalized(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_text() {
        let a = ColorCode::new("#ffffff").unwrap();
        let b = ColorCode::new("white").unwrap();
        let c = ColorCode::new(" #ffffff ").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.color(), b.color());
    }

    #[test]
    fn normalized_codes() {
        let code: ColorCode = "255, 0, 0".parse().unwrap();
        assert_eq!(code.as_str(), "rgb(255 0 0)");
        assert_eq!(code.to_string(), "rgb(255 0 0)");

        assert!(ColorCode::new("ff0000").is_err());
        assert_eq!(ColorCode::normalized("ff0000").unwrap().as_str(), "#ff0000");
    }
}
