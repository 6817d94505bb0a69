//! Number helpers for range snapping and tick labels.

/// Values beyond this magnitude (or below its inverse) print in scientific
/// notation.
pub const MAX_POW_10: f64 = 1e4;

/// `|a - b|` as a fraction of `range`.
pub fn range_difference_factor(a: f64, b: f64, range: f64) -> f64 {
    (a - b).abs() / range.abs()
}

pub fn round_to_significant(value: f64, figures: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().ceil() as i32;
    let power = figures - magnitude;
    if power >= 0 {
        let scale = 10f64.powi(power);
        (value * scale).round() / scale
    } else {
        let scale = 10f64.powi(-power);
        (value / scale).round() * scale
    }
}

/// Label for a tick at `value` on an axis spanning `range`.
pub fn format_tick(value: f64, range: f64) -> String {
    let mut val = round_to_significant(value, 4);
    if val == 0.0 || range_difference_factor(val, 0.0, range) < 0.001 {
        val = 0.0;
    }
    if val.abs() > MAX_POW_10 || (val.abs() < 1.0 / MAX_POW_10 && val != 0.0) {
        scientific(val)
    } else {
        format!("{:?}", val)
    }
}

/// `0.###E0` style: up to three decimals in the mantissa.
fn scientific(value: f64) -> String {
    let mut exponent = value.abs().log10().floor() as i32;
    let mut mantissa = (value / 10f64.powi(exponent) * 1000.0).round() / 1000.0;
    if mantissa.abs() >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    let digits = format!("{:.3}", mantissa);
    let digits = digits.trim_end_matches('0').trim_end_matches('.');
    format!("{}E{}", digits, exponent)
}
