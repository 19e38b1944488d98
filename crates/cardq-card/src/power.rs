//! Numeric reading of power, toughness, and loyalty strings.

/// Parses a printed power or toughness into a number.
///
/// Handles plain numbers, the `½` glyph, and sums such as `1+*` or `2+½`.
/// Parts that are not numbers (`*`, `X`, `?`) count as zero as long as at
/// least one part is numeric. Returns `None` when nothing numeric remains.
pub fn parse_power(value: &str) -> Option<f32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let mut total = 0.0;
    let mut any = false;
    for part in value.split('+') {
        if let Some(number) = parse_part(part.trim()) {
            total += number;
            any = true;
        }
    }
    any.then_some(total)
}

/// Parses a single summand.
fn parse_part(part: &str) -> Option<f32> {
    if part == "½" {
        return Some(0.5);
    }
    if let Some(whole) = part.strip_suffix('½') {
        return whole.parse::<f32>().ok().map(|n| n + 0.5);
    }
    part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_power("2"), Some(2.0));
        assert_eq!(parse_power("-1"), Some(-1.0));
        assert_eq!(parse_power("12"), Some(12.0));
    }

    #[test]
    fn halves() {
        assert_eq!(parse_power("½"), Some(0.5));
        assert_eq!(parse_power("3½"), Some(3.5));
        assert_eq!(parse_power("2+½"), Some(2.5));
    }

    #[test]
    fn sums_with_stars() {
        assert_eq!(parse_power("1+*"), Some(1.0));
        assert_eq!(parse_power("*"), None);
        assert_eq!(parse_power("X"), None);
        assert_eq!(parse_power(""), None);
    }
}
