//! Turn free-form user input into CSS color syntax.

use std::sync::LazyLock;

use regex::Regex;

/// Three bare numbers: `0.7 0.15 180`.
static OKLCH_VALUES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d*\.?\d+\s+\d*\.?\d+\s+\d*\.?\d+$").expect("Invalid oklch values regex")
});

/// A hue with an optional angle unit and two optional percentages:
/// `120deg 50% 25%`.
static HSL_VALUES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(?:\.\d+)?(?:deg|turn|rad|grad)?\s+\d+(?:\.\d+)?%?\s+\d+(?:\.\d+)?%?$")
        .expect("Invalid hsl values regex")
});

/// Three integers separated by commas and/or whitespace: `255, 0, 0`.
static RGB_VALUES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\s*[,\s]\s*\d+\s*[,\s]\s*\d+$").expect("Invalid rgb values regex")
});

/// Hex digits without the leading `#`.
static HEX_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[0-9a-f]{3,4}|[0-9a-f]{6}|[0-9a-f]{8})$").expect("Invalid hex regex")
});

/// Normalize raw input into a CSS color syntax. The input is trimmed and then
/// checked against these shapes, in order:
///
/// 1. three bare numbers, wrapped as `oklch(...)`
/// 2. a hue (optionally with an angle unit) and two numbers (optionally
///    percentages), wrapped as `hsl(...)`
/// 3. three integers separated by commas and/or whitespace, wrapped as
///    `rgb(r g b)`
/// 4. 3, 4, 6 or 8 hex digits, prefixed with `#`
///
/// Anything else is returned trimmed but otherwise unchanged. This never
/// fails, the result is validated by [`crate::parse`].
///
/// ```rust
/// assert_eq!(tinct::normalize("0.7 0.1 200"), "oklch(0.7 0.1 200)");
/// assert_eq!(tinct::normalize("120deg 50% 25%"), "hsl(120deg 50% 25%)");
/// assert_eq!(tinct::normalize("255, 128, 0"), "rgb(255 128 0)");
/// assert_eq!(tinct::normalize("F0A"), "#F0A");
/// assert_eq!(tinct::normalize(" red "), "red");
/// ```
pub fn normalize(raw: &str) -> String {
    let input = raw.trim();

    if OKLCH_VALUES.is_match(input) {
        format!("oklch({input})")
    } else if HSL_VALUES.is_match(input) {
        format!("hsl({input})")
    } else if RGB_VALUES.is_match(input) {
        let channels = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        format!("rgb({})", channels.join(" "))
    } else if HEX_DIGITS.is_match(input) {
        format!("#{input}")
    } else {
        input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_triplets_are_wrapped_verbatim() {
        assert_eq!(normalize("0.5 0.2 120"), "oklch(0.5 0.2 120)");
        assert_eq!(normalize(".5  .2\t120"), "oklch(.5  .2\t120)");
        assert_eq!(normalize("  1 0 0  "), "oklch(1 0 0)");

        assert_eq!(normalize("120 50% 50%"), "hsl(120 50% 50%)");
        assert_eq!(normalize("0.25turn 10% 90%"), "hsl(0.25turn 10% 90%)");
        assert_eq!(normalize("3rad 10 90%"), "hsl(3rad 10 90%)");
    }

    #[test]
    fn rgb_triplets_lose_their_commas() {
        assert_eq!(normalize("255, 0, 0"), "rgb(255 0 0)");
        assert_eq!(normalize("255,0,0"), "rgb(255 0 0)");
        assert_eq!(normalize("255 ,  0,0"), "rgb(255 0 0)");
    }

    #[test]
    fn hex_digits_get_one_hash() {
        for hex in ["fff", "ffff", "ff0000", "FF000080", "AbC"] {
            assert_eq!(normalize(hex), format!("#{hex}"));
        }
        // Other lengths are left alone.
        assert_eq!(normalize("fffff"), "fffff");
        assert_eq!(normalize("fffffff"), "fffffff");
        assert_eq!(normalize("#fff"), "#fff");
    }

    #[test]
    fn everything_else_passes_through() {
        assert_eq!(normalize("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
        assert_eq!(normalize("  rebeccapurple "), "rebeccapurple");
        assert_eq!(normalize("not a color"), "not a color");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("-1 2 3"), "-1 2 3");
    }

    #[test]
    fn numeric_hex_lookalikes_follow_shape_order() {
        // Three space separated integers are an oklch triplet first.
        assert_eq!(normalize("255 0 0"), "oklch(255 0 0)");
        // A run of digits is a hex color.
        assert_eq!(normalize("123"), "#123");
    }
}
