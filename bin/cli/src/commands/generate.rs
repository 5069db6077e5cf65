use std::path::Path;

use anyhow::Context;
use image::{Rgba, RgbaImage};
use tinct::{
    generate,
    models::{Model, Srgb},
    ColorCode, Generator, GeneratorRequest, PaletteType, SchemeType,
};

use super::Kind;
use crate::config::Config;

const STRIP_WIDTH: u32 = 100;
const STRIP_HEIGHT: u32 = 100;

pub fn execute(
    config: &Config,
    base: &str,
    kind: Kind,
    type_name: Option<&str>,
    size: Option<usize>,
    png: Option<&Path>,
) -> anyhow::Result<()> {
    let generator = match kind {
        Kind::Palette => Generator::Palette(
            type_name
                .map(PaletteType::from_name)
                .unwrap_or_default(),
        ),
        Kind::Scheme => Generator::Scheme(
            type_name.map(SchemeType::from_name).unwrap_or_default(),
        ),
        Kind::Swatch => Generator::Swatch,
    };

    let mut request = GeneratorRequest::new(tinct::normalize(base), generator);
    request.palette = config.generate.palette();
    request.swatch = config.generate.swatch();
    if let Some(size) = size {
        request.palette.size = size;
    }

    let colors = generate(&request)?;
    for code in &colors {
        println!("{code}");
    }

    if let Some(path) = png {
        render_strips(&colors)
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {} colors to {}", colors.len(), path.display());
    }

    Ok(())
}

/// One vertical strip per color, left to right.
fn render_strips(colors: &[ColorCode]) -> RgbaImage {
    let width = STRIP_WIDTH * colors.len().max(1) as u32;
    let fills = colors
        .iter()
        .map(|code| {
            let srgb = code.color().to_srgb_in_gamut();
            let [r, g, b] = Srgb::from_color(&srgb).to_rgb8();
            let a = (srgb.alpha().unwrap_or(1.0).clamp(0.0, 1.0) * 255.0).round() as u8;
            Rgba([r, g, b, a])
        })
        .collect::<Vec<_>>();

    RgbaImage::from_fn(width, STRIP_HEIGHT, |x, _| {
        fills
            .get((x / STRIP_WIDTH) as usize)
            .copied()
            .unwrap_or(Rgba([0, 0, 0, 0]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_have_the_colors() {
        let colors = ["#ff0000", "#00ff0080"].map(|c| ColorCode::new(c).unwrap());
        let image = render_strips(&colors);
        assert_eq!(image.dimensions(), (200, 100));
        assert_eq!(image.get_pixel(10, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(150, 99), &Rgba([0, 255, 0, 128]));
    }
}
