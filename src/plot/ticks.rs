/// Axis tick placement and labels, shared by the window and the exporters.
///
/// Values are in projected coordinates: on a log axis `v` means `10^v`.

/// Pick a 1-2-5 step giving roughly `target` ticks over `range`.
pub fn nice_step(range: f64, target: f64) -> f64 {
    if !(range.is_finite() && range > 0.0) {
        return 1.0;
    }
    let raw = range / target.max(1.0);
    let magnitude = 10f64.powf(raw.log10().floor());
    for mult in [1.0, 2.0, 5.0] {
        if mult * magnitude >= raw {
            return mult * magnitude;
        }
    }
    10.0 * magnitude
}

/// Tick positions within `[min, max]` for a linear axis.
///
/// Empty when the range is not finite or too far from zero to index in
/// whole steps.
pub fn linear_ticks(min: f64, max: f64, target: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max < min {
        return Vec::new();
    }
    let step = nice_step(max - min, target);
    let (first, last) = ((min / step).ceil(), (max / step).floor());
    if first.abs() >= I64_LIMIT || last.abs() >= I64_LIMIT {
        return Vec::new();
    }
    (first as i64..=last as i64).map(|k| k as f64 * step).collect()
}

/// Step indices beyond this no longer convert to `i64` exactly.
const I64_LIMIT: f64 = 9.0e18;

/// Integer decades within `[min, max]` for a log axis; falls back to
/// linear spacing in log space when the range covers less than two.
pub fn log_ticks(min: f64, max: f64, target: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) {
        return Vec::new();
    }
    let first = min.ceil() as i64;
    let last = max.floor() as i64;
    if last - first < 1 {
        return linear_ticks(min, max, target);
    }
    let stride = (((last - first) as f64 / target).ceil() as i64).max(1);
    (first..=last)
        .filter(|k| (k - first) % stride == 0)
        .map(|k| k as f64)
        .collect()
}

/// Label for a linear-axis tick at `value` with spacing `step`.
pub fn format_linear(value: f64, step: f64) -> String {
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    if value != 0.0 && (value.abs() >= 1e6 || step < 1e-4) {
        return format_sci(value);
    }
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{:.*}", decimals, value)
}

/// Label for a log-axis tick at projected position `exponent`.
pub fn format_log(exponent: f64) -> String {
    if (exponent - exponent.round()).abs() < 1e-9 {
        format!("1e{}", exponent.round() as i64)
    } else {
        format_sci(10f64.powf(exponent))
    }
}

/// Compact scientific notation, e.g. `2.5e-3`.
pub fn format_sci(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let mut exp = value.abs().log10().floor() as i32;
    let mut mant = format!("{:.2}", value / 10f64.powi(exp));
    // 9.996 rounds to "10.00"
    if mant.trim_start_matches('-').starts_with("10") {
        exp += 1;
        mant = format!("{:.2}", value / 10f64.powi(exp));
    }
    let mant = mant.trim_end_matches('0').trim_end_matches('.');
    format!("{}e{}", mant, exp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(10.0, 5.0), 2.0);
        assert_eq!(nice_step(100.0, 10.0), 10.0);
        assert!((nice_step(0.7, 6.0) - 0.2).abs() < 1e-12);
        assert_eq!(nice_step(0.0, 6.0), 1.0);
    }

    #[test]
    fn test_linear_ticks_inside_range() {
        let ticks = linear_ticks(0.3, 9.7, 5.0);
        assert_eq!(ticks, vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_log_ticks_are_decades() {
        assert_eq!(log_ticks(-0.5, 3.2, 6.0), vec![0.0, 1.0, 2.0, 3.0]);
        let wide = log_ticks(0.0, 40.0, 5.0);
        assert_eq!(wide.first(), Some(&0.0));
        assert!(wide.len() <= 6);
    }

    #[test]
    fn test_log_ticks_narrow_range_fallback() {
        let ticks = log_ticks(0.1, 0.9, 4.0);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|&t| (0.1..=0.9).contains(&t)));
    }

    #[test]
    fn test_labels() {
        assert_eq!(format_linear(4.0, 2.0), "4");
        assert_eq!(format_linear(0.25, 0.05), "0.25");
        assert_eq!(format_linear(2.0e7, 1.0e7), "2e7");
        assert_eq!(format_log(3.0), "1e3");
        assert_eq!(format_log(-2.0), "1e-2");
        assert_eq!(format_sci(0.0025), "2.5e-3");
    }

    #[test]
    fn test_sci_mantissa_rounding_up_carries_into_exponent() {
        assert_eq!(format_sci(9996.0), "1e4");
        assert_eq!(format_sci(-0.0999999), "-1e-1");
        assert_eq!(format_sci(9.994), "9.99e0");
    }

    #[test]
    fn test_ticks_for_unplaceable_ranges_are_empty() {
        assert!(linear_ticks(f64::NEG_INFINITY, f64::INFINITY, 6.0).is_empty());
        assert!(linear_ticks(0.0, f64::NAN, 6.0).is_empty());
        assert!(linear_ticks(-f64::MAX, f64::MAX, 6.0).is_empty());
        assert!(log_ticks(f64::NEG_INFINITY, 3.0, 6.0).is_empty());
    }

    #[test]
    fn test_flat_range_far_from_zero_has_no_ticks() {
        assert!(linear_ticks(1.0e20, 1.0e20, 6.0).is_empty());
        assert_eq!(linear_ticks(3.0, 3.0, 6.0), vec![3.0]);
    }
}
