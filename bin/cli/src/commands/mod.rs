use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use tinct::{ColorList, Format};

use crate::config::Config;

pub mod export;
pub mod extract;
pub mod formats;
pub mod generate;
pub mod normalize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Palette,
    Scheme,
    Swatch,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize raw input and check that it is a valid color
    Normalize {
        /// Raw color input, e.g. "255, 0, 0" or "ff0000"
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Show a color in every supported format
    Formats {
        /// Colors to show
        #[arg(required = true)]
        colors: Vec<String>,
    },

    /// Generate related colors from a base color
    Generate {
        /// Base color
        base: String,

        /// What to generate
        #[arg(short, long, value_enum, default_value_t = Kind::Palette)]
        kind: Kind,

        /// Palette or scheme type (analogous, monochromatic, complementary,
        /// triadic)
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        /// Number of colors in a monochromatic palette
        #[arg(long)]
        size: Option<usize>,

        /// Also render the colors as strips into a PNG file
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Export colors as CSS custom properties or a Tailwind config
    Export {
        /// Colors to export, in order
        colors: Vec<String>,

        /// Write a Tailwind config instead of CSS
        #[arg(long)]
        tailwind: bool,

        /// Value format (hex, rgb, hsl, oklch)
        #[arg(short, long)]
        format: Option<Format>,

        /// Custom property prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Use the legacy comma syntax for rgb and hsl
        #[arg(long)]
        legacy: bool,

        /// Always write the alpha channel for rgb and hsl
        #[arg(long)]
        alpha: bool,
    },

    /// Extract the dominant colors of an image
    Extract {
        /// Image file
        image: PathBuf,

        /// Maximum number of colors to extract
        #[arg(short, long)]
        count: Option<usize>,

        /// Colors already in the list, extracted colors close to them are
        /// skipped
        colors: Vec<String>,
    },
}

impl Commands {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        match self {
            Commands::Normalize { inputs } => normalize::execute(inputs),
            Commands::Formats { colors } => formats::execute(colors),
            Commands::Generate {
                base,
                kind,
                type_name,
                size,
                png,
            } => generate::execute(
                config,
                base,
                *kind,
                type_name.as_deref(),
                *size,
                png.as_deref(),
            ),
            Commands::Export {
                colors,
                tailwind,
                format,
                prefix,
                legacy,
                alpha,
            } => {
                let mut options = config.export.clone();
                if let Some(format) = format {
                    options.format = *format;
                }
                if let Some(prefix) = prefix {
                    options.prefix = prefix.clone();
                }
                if *legacy {
                    options.modern = false;
                }
                if *alpha {
                    options.include_alpha = true;
                }
                export::execute(colors, *tailwind, &options)
            }
            Commands::Extract {
                image,
                count,
                colors,
            } => {
                let mut options = config.extract;
                if let Some(count) = count {
                    options.count = *count;
                }
                extract::execute(image, colors, &options)
            }
        }
    }
}

/// Add each input to a new list, warning about and skipping rejected ones.
pub fn collect_list(inputs: &[String]) -> ColorList {
    let mut list = ColorList::new();
    for input in inputs {
        if let Err(err) = list.add(input) {
            tracing::warn!("Skipping {input:?}: {err}");
        }
    }
    list
}
