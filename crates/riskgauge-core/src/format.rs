//! Display formatting for scalar metrics.
//!
//! Rendering never fails: missing or non-finite values become the literal
//! `"N/A"` token instead of propagating an error into the display bundle.

const UNAVAILABLE: &str = "N/A";

/// Render a fraction as a percentage with two decimal places, e.g. `12.34%`.
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{:.2}%", value * 100.0),
        _ => String::from(UNAVAILABLE),
    }
}

/// Render a decimal with two decimal places, e.g. `1.23`.
pub fn format_decimal(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:.2}"),
        _ => String::from(UNAVAILABLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_percentages_from_fractions() {
        assert_eq!(format_percentage(Some(0.1234)), "12.34%");
        assert_eq!(format_percentage(Some(-0.05)), "-5.00%");
    }

    #[test]
    fn formats_decimals() {
        assert_eq!(format_decimal(Some(1.236)), "1.24");
        assert_eq!(format_decimal(Some(0.0)), "0.00");
    }

    #[test]
    fn missing_and_non_finite_values_render_na() {
        assert_eq!(format_percentage(None), "N/A");
        assert_eq!(format_percentage(Some(f64::NAN)), "N/A");
        assert_eq!(format_decimal(Some(f64::INFINITY)), "N/A");
        assert_eq!(format_decimal(None), "N/A");
    }
}
