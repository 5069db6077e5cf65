use tinct::{serialize_css_variables, serialize_tailwind_config, CssExportOptions};

use super::collect_list;

pub fn execute(
    colors: &[String],
    tailwind: bool,
    options: &CssExportOptions,
) -> anyhow::Result<()> {
    let list = collect_list(colors);
    if list.is_empty() {
        tracing::warn!("No colors to export");
        return Ok(());
    }

    let codes = list.codes();
    let text = if tailwind {
        serialize_tailwind_config(&codes)
    } else {
        serialize_css_variables(&codes, options)
    };
    println!("{text}");

    Ok(())
}
