use once_cell::sync::Lazy;
use regex::Regex;

static MAGNITUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]+)(?:[.,]([0-9]+))?\s*([KMB])$").expect("magnitude pattern")
});

/// Converts a human-readable count ("1,234", "12.3K", "1,5M") into an integer.
///
/// Tokens with a K/M/B suffix are scaled, treating `.` or `,` as the decimal
/// point and truncating. Anything else keeps only its digits, so thousand
/// separators of any style disappear. No digits at all yields 0.
pub fn parse_human_count(token: &str) -> u64 {
    let token = token.trim();

    if let Some(caps) = MAGNITUDE.captures(token) {
        let multiplier = match caps[3].to_ascii_uppercase().as_str() {
            "K" => 1_000,
            "M" => 1_000_000,
            _ => 1_000_000_000,
        };
        let fraction = caps.get(2).map_or("", |m| m.as_str());
        return scale(&caps[1], fraction, multiplier);
    }

    let digits: String = token.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

// Decimal arithmetic on the digit strings, so "4.1K" is 4100 and not 4099.
fn scale(whole: &str, fraction: &str, multiplier: u64) -> u64 {
    let whole = whole
        .parse::<u64>()
        .unwrap_or(u64::MAX)
        .saturating_mul(multiplier);

    let places = multiplier.ilog10() as usize;
    let kept: String = fraction.chars().take(places).collect();
    if kept.is_empty() {
        return whole;
    }
    let padding = 10u64.pow((places - kept.len()) as u32);
    let fraction = kept.parse::<u64>().unwrap_or(0) * padding;

    whole.saturating_add(fraction)
}
