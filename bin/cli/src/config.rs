use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tinct::{Component, CssExportOptions, ExtractOptions, PaletteOptions, SwatchOptions};

/// Defaults for the commands, read from a TOML file. Every key is optional.
///
/// ```toml
/// [export]
/// format = "oklch"
/// prefix = "brand"
///
/// [generate]
/// palette_size = 8
///
/// [extract]
/// count = 5
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub export: CssExportOptions,
    pub generate: GenerateConfig,
    pub extract: ExtractOptions,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub palette_size: usize,
    pub min_lightness: Component,
    pub max_lightness: Component,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        let swatch = SwatchOptions::default();
        Self {
            palette_size: PaletteOptions::default().size,
            min_lightness: swatch.min_lightness,
            max_lightness: swatch.max_lightness,
        }
    }
}

impl GenerateConfig {
    pub fn palette(&self) -> PaletteOptions {
        PaletteOptions {
            size: self.palette_size,
        }
    }

    pub fn swatch(&self) -> SwatchOptions {
        SwatchOptions {
            min_lightness: self.min_lightness,
            max_lightness: self.max_lightness,
        }
    }
}

impl Config {
    /// Read the config at `path`, or the defaults without one.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        tracing::debug!(?config, "loaded config");
        Ok(config)
    }

    fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tinct::Format;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.export, CssExportOptions::default());
        assert_eq!(config.generate, GenerateConfig::default());
        assert_eq!(config.extract, ExtractOptions::default());
    }

    #[test]
    fn partial_sections() {
        let config = Config::parse(
            r#"
            [export]
            format = "oklch"
            prefix = "brand"

            [generate]
            palette_size = 8

            [extract]
            count = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.export.format, Format::Oklch);
        assert_eq!(config.export.prefix, "brand");
        assert!(config.export.modern);
        assert_eq!(config.generate.palette().size, 8);
        assert_eq!(config.generate.swatch(), SwatchOptions::default());
        assert_eq!(config.extract.count, 5);
        assert_eq!(config.extract.quality, 10);
    }

    #[test]
    fn unknown_keys_are_errors() {
        assert!(Config::parse("[export]\ncolour = \"hex\"\n").is_err());
        assert!(Config::parse("[export]\nformat = \"cmyk\"\n").is_err());
    }

    #[test]
    fn missing_files_are_errors() {
        assert!(Config::load(Some(Path::new("/does/not/exist.toml"))).is_err());
        assert!(Config::load(None).is_ok());
    }
}
