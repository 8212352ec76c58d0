//! Axis range and its normalization rules.

/// Smallest positive bound a log axis accepts when its range is set
const LOG_RANGE_EPSILON: f64 = 1e-306;
/// Range widths below this are considered degenerate
const DEGENERATE_WIDTH: f64 = 1e-308;
/// Smallest positive bound a log axis uses when its scale is computed
const LOG_SCALE_EPSILON: f64 = 1e-5;
/// Range a log axis falls back to when both bounds collapse
const LOG_FALLBACK: (f64, f64) = (0.1, 10.0);

/// The data interval displayed by an axis, with its clamping constraints.
///
/// `min <= max` always holds after any setter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    min: f64,
    max: f64,
    absolute_min: f64,
    absolute_max: f64,
    min_width: Option<f64>,
}

impl Default for AxisRange {
    fn default() -> Self {
        AxisRange {
            min: -10.0,
            max: 10.0,
            absolute_min: -f64::MAX / 100.0,
            absolute_max: f64::MAX / 100.0,
            min_width: None,
        }
    }
}

impl AxisRange {
    /// The lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The upper bound
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The width of the range
    pub fn width(&self) -> f64 {
        (self.max - self.min).abs()
    }

    /// The bounds that [`AxisRange::min`] and [`AxisRange::max`] are clamped into
    pub fn absolute(&self) -> (f64, f64) {
        (self.absolute_min, self.absolute_max)
    }

    /// The minimum width constraint, if any
    pub fn min_width(&self) -> Option<f64> {
        self.min_width
    }

    /// Normalize a requested range against the constraints of `self`.
    ///
    /// The bounds may be given in any order.
    /// The result is ordered, clamped into the absolute range, positive if `log`,
    /// at least `min_width` wide when that is possible, and never degenerate.
    pub fn normalize(&self, new_min: f64, new_max: f64, log: bool) -> (f64, f64) {
        let mut min = new_min.min(new_max);
        let mut max = new_min.max(new_max);
        if let Some(mw) = self.min_width {
            if (max - min).abs() < mw {
                max = min + mw;
            }
        }

        if min < self.absolute_min {
            min = self.absolute_min;
        }
        if max > self.absolute_max {
            max = self.absolute_max;
        }
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }

        if log {
            if min <= 0.0 {
                min = LOG_RANGE_EPSILON;
            }
            if max <= 0.0 {
                max = LOG_RANGE_EPSILON;
            }
            if (min - max).abs() < LOG_RANGE_EPSILON {
                (min, max) = LOG_FALLBACK;
            }
        }

        if let Some(mw) = self.min_width {
            if (max - min).abs() < mw {
                max = min + mw;
            }
        }
        if (max - min).abs() < DEGENERATE_WIDTH {
            max = min + 1.0;
        }
        (min, max)
    }

    /// Set the range, normalized by [`AxisRange::normalize`].
    /// Returns whether the stored range changed.
    pub fn set(&mut self, new_min: f64, new_max: f64, log: bool) -> bool {
        let (min, max) = self.normalize(new_min, new_max, log);
        let changed = min != self.min || max != self.max;
        self.min = min;
        self.max = max;
        changed
    }

    /// Set the absolute range and re-normalize the current range into it.
    /// Returns whether the current range changed.
    pub fn set_absolute(&mut self, a: f64, b: f64, log: bool) -> bool {
        self.absolute_min = a.min(b);
        self.absolute_max = a.max(b);
        if self.absolute_min == self.absolute_max {
            self.absolute_max = self.absolute_min + 1.0;
        }
        self.set(self.min, self.max, log)
    }

    /// Remove the absolute range constraint.
    /// Returns whether the current range changed.
    pub fn clear_absolute(&mut self, log: bool) -> bool {
        self.absolute_min = -f64::MAX;
        self.absolute_max = f64::MAX;
        self.set(self.min, self.max, log)
    }

    /// Set the minimum width constraint (non-positive widths clear it)
    /// and re-normalize the current range.
    /// Returns whether the current range changed.
    pub fn set_min_width(&mut self, min_width: Option<f64>, log: bool) -> bool {
        self.min_width = min_width.filter(|w| *w > 0.0);
        self.set(self.min, self.max, log)
    }

    /// Move the bounds out of the log domain's forbidden values when switching an axis to log.
    /// A negative bound is replaced by a power of ten derived from the range width.
    pub(crate) fn adjust_for_log(&mut self) {
        let w = (self.max - self.min).log10();
        if self.min < 0.0 {
            self.min = 10f64.powf((w - 1.0).floor());
        }
        if self.max < 0.0 {
            self.max = 10f64.powf((w + 1.0).floor());
        }
    }

    /// The bounds actually used to compute the scale.
    ///
    /// The range is re-ordered and pushed apart when degenerate,
    /// and log ranges are made positive (falling back to `min * base²` for the upper bound).
    pub fn calc_bounds(&self, log: bool, base: f64) -> (f64, f64) {
        let (mut min, mut max) = (self.min, self.max);
        if min > max {
            std::mem::swap(&mut min, &mut max);
        } else if min == max {
            max = min + 1.0;
        }

        if log {
            if min < 0.0 {
                min = if max > 0.0 {
                    max / (base * base)
                } else {
                    LOG_SCALE_EPSILON
                };
            }
            if max <= min {
                max = min * base * base;
            }
            if min <= 0.0 {
                min = LOG_SCALE_EPSILON;
            }
            let decade = || 10f64.powf(min.log10().trunc());
            if max <= 0.0 {
                max = min + decade();
            }
            if max < min {
                std::mem::swap(&mut min, &mut max);
            } else if max == min {
                max = min + decade();
            }
        }

        if min > max {
            std::mem::swap(&mut min, &mut max);
        } else if min == max {
            max = min + 1.0;
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::tests::{Near, assert_near, rng};

    #[test]
    fn test_default() {
        let r = AxisRange::default();
        assert_eq!((r.min(), r.max()), (-10.0, 10.0));
        assert_eq!(r.width(), 20.0);
        assert_eq!(r.min_width(), None);
    }

    #[test]
    fn test_degenerate_linear() {
        let mut r = AxisRange::default();
        assert!(r.set(5.0, 5.0, false));
        assert_eq!((r.min(), r.max()), (5.0, 6.0));
    }

    #[test]
    fn test_swapped_input() {
        let mut r = AxisRange::default();
        r.set(10.0, -3.0, false);
        assert_eq!((r.min(), r.max()), (-3.0, 10.0));
    }

    #[test]
    fn test_log_clamps_negative_min() {
        let mut r = AxisRange::default();
        r.set(-1.0, 10.0, true);
        assert!(r.min() > 0.0);
        assert!(r.min() <= 1e-300);
        assert_eq!(r.max(), 10.0);
    }

    #[test]
    fn test_log_fallback_window() {
        let mut r = AxisRange::default();
        r.set(-1.0, -2.0, true);
        assert_eq!((r.min(), r.max()), (0.1, 10.0));
    }

    #[test]
    fn test_idempotent() {
        let mut r = AxisRange::default();
        assert!(r.set(1.0, 3.0, false));
        assert!(!r.set(1.0, 3.0, false));
        assert!(!r.set(3.0, 1.0, false));
    }

    #[test]
    fn test_absolute_range() {
        let mut r = AxisRange::default();
        r.set(-5.0, 50.0, false);
        assert!(r.set_absolute(0.0, 20.0, false));
        assert_eq!((r.min(), r.max()), (0.0, 20.0));

        r.set(-100.0, 100.0, false);
        assert_eq!((r.min(), r.max()), (0.0, 20.0));

        r.set_absolute(3.0, 3.0, false);
        assert_eq!(r.absolute(), (3.0, 4.0));
        assert_eq!((r.min(), r.max()), (3.0, 4.0));

        r.clear_absolute(false);
        r.set(-100.0, 100.0, false);
        assert_eq!((r.min(), r.max()), (-100.0, 100.0));
    }

    #[test]
    fn test_min_width() {
        let mut r = AxisRange::default();
        r.set_min_width(Some(2.0), false);
        r.set(1.0, 1.5, false);
        assert_eq!((r.min(), r.max()), (1.0, 3.0));

        r.set_min_width(Some(-1.0), false);
        assert_eq!(r.min_width(), None);
        r.set(1.0, 1.5, false);
        assert_eq!((r.min(), r.max()), (1.0, 1.5));
    }

    #[test]
    fn test_ordering_invariant() {
        let mut rng = rng(3);
        let mut r = AxisRange::default();
        for _ in 0..1000 {
            let a = rng.random_range(-1e6..1e6);
            let b = if rng.random_bool(0.1) {
                a
            } else {
                rng.random_range(-1e6..1e6)
            };
            let log = rng.random_bool(0.3);
            if rng.random_bool(0.05) {
                let c = rng.random_range(-1e6..1e6);
                let d = rng.random_range(-1e6..1e6);
                r.set_absolute(c, d, log);
            } else if rng.random_bool(0.05) {
                r.clear_absolute(log);
            } else {
                r.set(a, b, log);
            }
            assert!(r.min() <= r.max(), "{} > {}", r.min(), r.max());
        }
    }

    #[test]
    fn test_calc_bounds() {
        let r = AxisRange::default();
        let (min, max) = r.calc_bounds(true, 10.0);
        assert_near!(rel, min, 0.1);
        assert_eq!(max, 10.0);

        let mut r = AxisRange::default();
        r.set(2.0, 2.0 + 1e-309, false);
        assert_eq!(r.calc_bounds(false, 10.0), (r.min(), r.max()));
    }

    #[test]
    fn test_adjust_for_log() {
        let mut r = AxisRange::default();
        r.set(-10.0, 990.0, false);
        r.adjust_for_log();
        assert_near!(rel, r.min(), 100.0);
        assert_eq!(r.max(), 990.0);
    }
}
