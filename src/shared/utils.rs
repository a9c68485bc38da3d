//! Utility functions and helpers

/// Upper bound on fraction digits shown for any token.
pub const MAX_DISPLAY_DECIMALS: u8 = 8;

/// Format an amount with `,` thousands separators and at most
/// `max_fraction_digits` fraction digits, trailing zeros trimmed.
pub fn format_grouped(amount: f64, max_fraction_digits: usize) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let rendered = format!("{:.*}", max_fraction_digits, amount.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (rendered.as_str(), ""),
    };

    let mut out = String::with_capacity(rendered.len() + rendered.len() / 3 + 1);
    // "-0" is not a number anyone wants to read
    if amount < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse user-entered amount text, ignoring grouping separators.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Calculate minimum output amount with slippage protection (percent)
pub fn min_received(amount_out: f64, slippage_pct: f64) -> f64 {
    amount_out * (1.0 - slippage_pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(2094.1985, 6), "2,094.1985");
        assert_eq!(format_grouped(1_234_567.123456789, 8), "1,234,567.12345679");
        assert_eq!(format_grouped(1000.0, 6), "1,000");
        assert_eq!(format_grouped(999.0, 2), "999");
        assert_eq!(format_grouped(1.6, 0), "2");
        assert_eq!(format_grouped(0.0, 8), "0");
    }

    #[test]
    fn test_format_grouped_negative() {
        assert_eq!(format_grouped(-12345.5, 2), "-12,345.5");
        assert_eq!(format_grouped(-0.000000001, 8), "0");
    }

    #[test]
    fn test_format_grouped_non_finite() {
        assert_eq!(format_grouped(f64::NAN, 8), "NaN");
        assert_eq!(format_grouped(f64::INFINITY, 8), "inf");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 1,234.5 "), Some(1234.5));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_min_received() {
        assert!((min_received(100.0, 0.5) - 99.5).abs() < 1e-12);
        assert_eq!(min_received(100.0, 0.0), 100.0);
    }
}
