//! Display formatting for metric values.
//!
//! One place owns the dashboard's number formats so the cards, charts, and
//! status line all agree: whole dollars with thousands separators for
//! revenue, plain separated integers for unit counts, two decimals for
//! turnover ratios.

use num_format::{Locale, ToFormattedString};

/// Placeholder shown when a metric has no rows to average over.
pub const EMPTY_METRIC: &str = "—";

/// `$1,234,568` – revenue, rounded to whole dollars.
pub fn currency(value: f64) -> String {
    let whole = value.round() as i64;
    format!("${}", whole.to_formatted_string(&Locale::en))
}

/// `1,400` – unit counts, rounded to whole units.
pub fn count(value: f64) -> String {
    let whole = value.round() as i64;
    whole.to_formatted_string(&Locale::en)
}

/// `4.25` – turnover ratios, two decimals.
pub fn ratio(value: f64) -> String {
    format!("{value:.2}")
}

pub fn maybe_currency(value: Option<f64>) -> String {
    value.map(currency).unwrap_or_else(|| EMPTY_METRIC.to_string())
}

pub fn maybe_count(value: Option<f64>) -> String {
    value.map(count).unwrap_or_else(|| EMPTY_METRIC.to_string())
}

pub fn maybe_ratio(value: Option<f64>) -> String {
    value.map(ratio).unwrap_or_else(|| EMPTY_METRIC.to_string())
}

/// Short form for plot axes: `$1.2M`, `$250k`, `$45`.
pub fn compact_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1_000_000.0 {
        (abs / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (abs / 1_000.0, "k")
    } else {
        return format!("{sign}${abs:.0}");
    };

    let mut digits = format!("{scaled:.1}");
    if let Some(stripped) = digits.strip_suffix(".0") {
        digits = stripped.to_string();
    }
    format!("{sign}${digits}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_rounds_and_separates() {
        assert_eq!(currency(1_234_567.4), "$1,234,567");
        assert_eq!(currency(999.5), "$1,000");
        assert_eq!(currency(0.0), "$0");
    }

    #[test]
    fn count_separates_thousands() {
        assert_eq!(count(1400.0), "1,400");
        assert_eq!(count(12.3), "12");
    }

    #[test]
    fn ratio_keeps_two_decimals() {
        assert_eq!(ratio(4.25), "4.25");
        assert_eq!(ratio(4.0), "4.00");
    }

    #[test]
    fn missing_metrics_render_a_dash() {
        assert_eq!(maybe_currency(None), EMPTY_METRIC);
        assert_eq!(maybe_count(None), EMPTY_METRIC);
        assert_eq!(maybe_ratio(None), EMPTY_METRIC);
        assert_eq!(maybe_currency(Some(1500.0)), "$1,500");
    }

    #[test]
    fn compact_currency_scales_units() {
        assert_eq!(compact_currency(1_200_000.0), "$1.2M");
        assert_eq!(compact_currency(2_000_000.0), "$2M");
        assert_eq!(compact_currency(250_000.0), "$250k");
        assert_eq!(compact_currency(45.0), "$45");
        assert_eq!(compact_currency(-4_500.0), "-$4.5k");
    }
}
