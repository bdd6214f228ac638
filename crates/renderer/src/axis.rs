//! Value-axis scaling: zero-based ranges with "nice" tick steps.

/// Steps tried per decade, in ascending order.
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Headroom added above the largest value.
const HEADROOM: f64 = 1.05;

/// Upper bound on tick intervals whatever the input.
const MAX_INTERVALS: usize = 100;

/// A value axis running from 0 to `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScale {
    pub max: f64,
    pub step: f64,
    pub ticks: Vec<f64>,
    /// Digits after the decimal point needed to label `step` exactly.
    pub decimals: usize,
}

impl AxisScale {
    /// Map a value to a pixel row, `bottom` being 0 and `top` being `max`.
    pub fn to_pixel(&self, value: f64, bottom: i32, top: i32) -> i32 {
        let t = if self.max > 0.0 {
            (value / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        bottom - ((bottom - top) as f64 * t).round() as i32
    }

    pub fn labels(&self) -> Vec<String> {
        self.ticks
            .iter()
            .map(|&t| format_tick(t, self.decimals))
            .collect()
    }
}

/// Choose a zero-based axis covering `max_value` with roughly `target_ticks`
/// intervals.
///
/// A non-positive or non-finite maximum yields the unit axis 0..1, as does
/// one so small that its tick step would be subnormal.
pub fn nice_axis(max_value: f64, target_ticks: usize) -> AxisScale {
    let target = target_ticks.clamp(1, MAX_INTERVALS) as f64;
    let padded = max_value * HEADROOM;
    let span = if max_value > 0.0 && padded.is_finite() {
        padded
    } else if max_value > 0.0 && max_value.is_finite() {
        max_value
    } else {
        1.0
    };
    let span = if (span / target).is_normal() { span } else { 1.0 };

    let raw_step = span / target;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = NICE_STEPS
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let intervals = ((span / step).ceil().max(1.0) as usize).min(MAX_INTERVALS);
    let max = intervals as f64 * step;
    let ticks = (0..=intervals).map(|i| i as f64 * step).collect();

    AxisScale {
        max: if max.is_finite() { max } else { span },
        step,
        ticks,
        decimals: decimals_for(step),
    }
}

fn decimals_for(step: f64) -> usize {
    (0..=12)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-9 * scaled.abs().max(1.0)
        })
        .unwrap_or(12)
}

/// Format a tick value with a fixed number of decimals.
pub fn format_tick(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subnormal_maximum_uses_unit_axis() {
        for max in [5e-324, f64::MIN_POSITIVE / 4.0] {
            let axis = nice_axis(max, 5);
            assert_eq!(axis, nice_axis(0.0, 5), "{}", max);
            assert_eq!(axis.max, 1.0);
        }
        let axis = nice_axis(1e-300, 5);
        assert!(axis.step > 0.0);
        assert!(axis.ticks.len() <= MAX_INTERVALS + 1);
        assert!(axis.max >= 1e-300);
    }

    #[test]
    fn test_nice_axis_round_numbers() {
        let axis = nice_axis(1000.0, 5);
        assert_eq!(axis.step, 250.0);
        assert_eq!(axis.max, 1250.0);
        assert_eq!(axis.ticks.len(), 6);
        assert_eq!(axis.labels(), vec!["0", "250", "500", "750", "1000", "1250"]);
    }

    #[test]
    fn test_nice_axis_covers_headroom() {
        for max in [0.3, 7.0, 42.0, 99.0, 12_345.0, 1e9] {
            let axis = nice_axis(max, 5);
            assert!(axis.max >= max * HEADROOM - 1e-9, "{} -> {:?}", max, axis);
            assert!(axis.ticks.len() <= 12);
            assert_eq!(axis.ticks[0], 0.0);
        }
    }

    #[test]
    fn test_nice_axis_fractional_step() {
        let axis = nice_axis(0.3, 5);
        assert_eq!(axis.decimals, 1);
        assert_eq!(axis.labels(), vec!["0.0", "0.1", "0.2", "0.3", "0.4"]);

        let axis = nice_axis(2.2, 5);
        assert!((axis.step - 0.5).abs() < 1e-12);
        assert_eq!(axis.labels()[1], "0.5");
    }

    #[test]
    fn test_nice_axis_zero_and_degenerate() {
        let axis = nice_axis(0.0, 5);
        assert!(axis.max >= 1.0);
        assert_eq!(axis.decimals, 1);
        assert!(nice_axis(f64::MAX, 5).max.is_finite());
        assert!(nice_axis(f64::NAN, 5).max >= 1.0);
    }

    #[test]
    fn test_to_pixel() {
        let axis = nice_axis(100.0, 5);
        assert_eq!(axis.to_pixel(0.0, 500, 100), 500);
        assert_eq!(axis.to_pixel(axis.max, 500, 100), 100);
        assert_eq!(axis.to_pixel(axis.max * 2.0, 500, 100), 100);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(2.5, 1), "2.5");
        assert_eq!(format_tick(1500.0, 0), "1500");
    }
}
