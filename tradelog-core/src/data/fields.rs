//! Numeric cell parsing.

/// Parse a numeric export cell.
///
/// Accepts thousands separators, a trailing `%` and the Unicode minus sign
/// some exports use. Non-finite values are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .map(|c| if c == '\u{2212}' { '-' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a trade number cell.
pub fn parse_trade_num(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_signed_numbers() {
        assert_eq!(parse_number("110.5"), Some(110.5));
        assert_eq!(parse_number(" -42 "), Some(-42.0));
        assert_eq!(parse_number("\u{2212}12.25"), Some(-12.25));
    }

    #[test]
    fn separators_and_percent() {
        assert_eq!(parse_number("1,234.50"), Some(1234.5));
        assert_eq!(parse_number("3.75%"), Some(3.75));
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn trade_numbers() {
        assert_eq!(parse_trade_num(" 12 "), Some(12));
        assert_eq!(parse_trade_num("-1"), None);
        assert_eq!(parse_trade_num("1.5"), None);
    }
}
