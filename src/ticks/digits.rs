//! Label precision estimation.

use crate::limits::LABEL_DIGITS;

/// Number of offsets sampled on each side of the first tick
const SAMPLES: i32 = 10;

/// Smallest precision that makes neighbouring tick labels distinguishable.
///
/// Labels are produced by `format(value, precision)` for the ticks at
/// `tick_start + i * tick_spacing`, `i` in `-10..=10`.
/// The returned precision is `d + 2` for the smallest `d` such that no two adjacent labels are equal.
/// `d` is tried up to 20. This is a heuristic: ticks outside the sampled window are not checked.
pub fn label_digits<F>(tick_start: f64, tick_spacing: f64, format: F) -> usize
where
    F: Fn(f64, usize) -> String,
{
    let tick = |i: i32| tick_start + i as f64 * tick_spacing;

    for digits in 0..=LABEL_DIGITS {
        let prec = digits + 2;
        let mut prev = format(tick(-SAMPLES), prec);
        let mut distinct = true;
        for i in -SAMPLES..SAMPLES {
            let next = format(tick(i + 1), prec);
            if next == prev {
                distinct = false;
                break;
            }
            prev = next;
        }
        if distinct {
            return prec;
        }
    }
    LABEL_DIGITS + 2
}
