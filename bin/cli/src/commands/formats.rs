use anyhow::Context;
use tinct::{formats, ColorCode, Format};

pub fn execute(colors: &[String]) -> anyhow::Result<()> {
    for (index, raw) in colors.iter().enumerate() {
        let code = ColorCode::normalized(raw).with_context(|| format!("Invalid color {raw:?}"))?;
        let formats = formats(&code);

        if index > 0 {
            println!();
        }
        println!("{code}");
        for format in Format::ALL {
            println!("  {:<6}{}", format.name(), formats.get(format));
        }
    }
    Ok(())
}
