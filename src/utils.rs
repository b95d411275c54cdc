//! Utility functions for the rating engine

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Round to an integer the way the self-play leaderboard does.
///
/// The value is first rounded to one decimal, then the integer part is bumped
/// by one when that decimal is 5 or more. The integer part is truncated toward
/// zero, so negative values never round away from zero.
///
/// The one-decimal step rounds the stored binary value, so `128.45` (held as
/// `128.4499...`) becomes `128.4`. Scaling by ten first would land on `1284.5`.
pub fn round_half_up(value: f64) -> i64 {
    let value = round_to_tenth(value);
    let whole = value.trunc();
    let mut result = whole as i64;
    if (value - whole) * 10.0 >= 5.0 {
        result += 1;
    }
    result
}

/// Correctly rounded conversion to one decimal place
fn round_to_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse::<f64>().unwrap_or(value)
}

/// Parse a decimal number that may use a comma as the separator
pub fn parse_decimal(text: &str) -> Option<f64> {
    let cleaned = text.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extract every run of ASCII digits from a string, in order
pub fn extract_numbers(text: &str) -> Vec<u32> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse::<u32>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.45), 3);
        assert_eq!(round_half_up(2.44), 2);
        assert_eq!(round_half_up(2.0), 2);
        assert_eq!(round_half_up(99.96), 100);
    }

    #[test]
    fn test_round_half_up_uses_stored_value_at_tenth() {
        // The .45 literals are stored just below .45
        assert_eq!(round_half_up(128.45), 128);
        assert_eq!(round_half_up(1.45), 1);
        assert_eq!(round_half_up(8.45), 8);
        assert_eq!(round_half_up(107.46), 108);
        assert_eq!(round_half_up(108.15), 108);
    }

    #[test]
    fn test_round_half_up_truncates_negatives() {
        assert_eq!(round_half_up(-2.7), -2);
        assert_eq!(round_half_up(-0.4), 0);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12,5"), Some(12.5));
        assert_eq!(parse_decimal(" -0.3 "), Some(-0.3));
        assert_eq!(parse_decimal("7"), Some(7.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("n/a"), None);
    }

    #[test]
    fn test_extract_numbers() {
        assert_eq!(extract_numbers("3 / 5"), vec![3, 5]);
        assert_eq!(extract_numbers("wins: 12 of 14"), vec![12, 14]);
        assert!(extract_numbers("none").is_empty());
    }
}
