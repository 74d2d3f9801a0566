//! Best-effort numeric score extraction from noisy score text.

/// Parses a displayed score such as `"1.2k points"`, `"-45"` or `"•"`.
///
/// Everything except digits, sign markers, the decimal point and the `k`
/// (thousand) suffix is discarded. With the suffix, the remainder is read as
/// a decimal and multiplied by 1000, truncating toward zero; without it the
/// remaining digits and signs are read as an integer. Anything unparsable
/// yields `0`.
#[must_use]
pub fn parse_score(text: &str) -> i64 {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'k'))
        .collect();

    if cleaned.contains('k') {
        let number = cleaned.replace('k', "");
        return number
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or(0, |n| {
                #[allow(clippy::cast_possible_truncation)]
                let scaled = (n * 1000.0).trunc() as i64;
                scaled
            });
    }

    let digits: String = cleaned.chars().filter(|c| *c != '.').collect();
    digits.parse::<i64>().unwrap_or(0)
}
