use std::path::Path;

use anyhow::Context;
use tinct::{filter_distinct, ExtractOptions, Extractor, ImageSource};

use super::collect_list;

pub fn execute(image: &Path, colors: &[String], options: &ExtractOptions) -> anyhow::Result<()> {
    let mut list = collect_list(colors);

    let extractor = Extractor::new(*options);
    let candidates = extractor
        .start(ImageSource::Path(image.to_path_buf()))?
        .wait()
        .with_context(|| format!("Failed to extract colors from {}", image.display()))?;

    let mut added = 0;
    for code in filter_distinct(&candidates, &list.codes(), options.min_distance) {
        let text = code.to_string();
        match list.push(code) {
            Ok(_) => {
                println!("{text}");
                added += 1;
            }
            Err(err) => tracing::debug!("Skipping {text}: {err}"),
        }
    }

    tracing::info!("Extracted {added} colors from {}", image.display());
    Ok(())
}
