use tinct::{is_valid_color, normalize};

pub fn execute(inputs: &[String]) -> anyhow::Result<()> {
    for input in inputs {
        let normalized = normalize(input);
        let status = if is_valid_color(&normalized) {
            "valid"
        } else {
            "invalid"
        };
        println!("{normalized}\t{status}");
    }
    Ok(())
}
