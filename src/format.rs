//! Axis label formatting.

/// Format `value` for an axis label with `prefix` in front of the digits.
///
/// Magnitudes of 100 and above are rounded to integers; smaller ones keep up
/// to two decimals with trailing zeros removed. The sign goes before the
/// prefix, so `-5` with `"$"` reads `-$5`.
#[must_use]
pub fn axis_label(value: f64, prefix: &str) -> String {
    if !value.is_finite() {
        return format!("{prefix}{value}");
    }

    let magnitude = value.abs();
    let digits = if magnitude >= 100.0 {
        format!("{magnitude:.0}")
    } else {
        let fixed = format!("{magnitude:.2}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    };

    if value < 0.0 && digits != "0" {
        format!("-{prefix}{digits}")
    } else {
        format!("{prefix}{digits}")
    }
}
