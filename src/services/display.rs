//! Display formatting shared by the watchlist, detail and market views

use serde::{Deserialize, Serialize};

/// Placeholder shown for missing numeric fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Direction of the latest price change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

impl Direction {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Direction::Up
        } else if change < 0.0 {
            Direction::Down
        } else {
            Direction::Neutral
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Direction::Up => "🔺",
            Direction::Down => "🔻",
            Direction::Neutral => "🟡",
        }
    }

    /// CSS class used by the templates
    pub fn color_class(&self) -> &'static str {
        match self {
            Direction::Up => "signal-up",
            Direction::Down => "signal-down",
            Direction::Neutral => "signal-neutral",
        }
    }
}

/// `10150.0` -> `"10,150"`, `1234.5` -> `"1,234.5"`
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + 4);
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `1234567` -> `"1,234,567"`
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = group_digits(&digits);
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formatted number or `"N/A"`
pub fn format_optional(value: Option<f64>) -> String {
    value
        .map(format_thousands)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Glyph followed by the absolute change, or `"N/A"`
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(change) => format!(
            "{}{}",
            Direction::from_change(change).glyph(),
            format_thousands(change.abs())
        ),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Change relative to the previous close, in percent.
///
/// `None` when either input is missing or the previous close is zero.
pub fn percentage_change(price: Option<f64>, change: Option<f64>) -> Option<f64> {
    let (price, change) = (price?, change?);
    let previous_close = price - change;
    if previous_close == 0.0 {
        return None;
    }
    Some(change / previous_close * 100.0)
}

/// `-1.9607` -> `"-1.96%"`, `0.5` -> `"+0.50%"`
pub fn format_percentage(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:+.2}%", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(10150.0), "10,150");
        assert_eq!(format_thousands(150.0), "150");
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(1234567.5), "1,234,567.5");
        assert_eq!(format_thousands(-2500.25), "-2,500.25");
        assert_eq!(format_thousands(999.999), "1,000");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12345678), "12,345,678");
        assert_eq!(format_count(-4200), "-4,200");
    }

    #[test]
    fn test_direction_from_change() {
        assert_eq!(Direction::from_change(150.0), Direction::Up);
        assert_eq!(Direction::from_change(-0.5), Direction::Down);
        assert_eq!(Direction::from_change(0.0), Direction::Neutral);
        assert_eq!(Direction::Up.color_class(), "signal-up");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(150.0)), "🔺150");
        assert_eq!(format_change(Some(-1200.0)), "🔻1,200");
        assert_eq!(format_change(Some(0.0)), "🟡0");
        assert_eq!(format_change(None), "N/A");
    }

    #[test]
    fn test_percentage_change() {
        let pct = percentage_change(Some(10_000.0), Some(-200.0)).unwrap();
        assert!((pct - (-200.0 / 10_200.0 * 100.0)).abs() < 1e-9);
        assert_eq!(format_percentage(Some(pct)), "-1.96%");

        assert_eq!(percentage_change(Some(100.0), Some(100.0)), None);
        assert_eq!(percentage_change(None, Some(1.0)), None);
        assert_eq!(percentage_change(Some(1.0), None), None);
        assert_eq!(format_percentage(None), "N/A");
    }
}
