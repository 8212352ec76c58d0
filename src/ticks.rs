//! Tick spacing searches.
//!
//! Each search picks a "nice" interval between major ticks so that at least
//! `min_ticks` ticks fit in a given width (in data units).
//! Linear axes use intervals of the form `f * 10^e` with `f` in {1, 2, 2.5, 5}.
//! Calendar axes (date, time, date-time) cascade from coarse to fine calendar units.
//! All searches are bounded and fall back to `width / min_ticks`.

use crate::limits::SPACING_SEARCH_ITER;

pub mod digits;

pub use digits::label_digits;

const DAY_MS: f64 = 86_400_000.0;
const HOUR_MS: f64 = 3_600_000.0;
const MINUTE_MS: f64 = 60_000.0;
const SECOND_MS: f64 = 1000.0;
const MONTH_MS: f64 = 31.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;

const LIN_STEPS: &[f64] = &[1.0, 2.0, 2.5, 5.0, 10.0];

const COARSE_MULTS: &[f64] = &[1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0];
const CALENDAR_MULTS: &[f64] = &[1.0, 2.0, 6.0, 12.0];
const HOUR_MULTS: &[f64] = &[1.0, 2.0, 6.0, 12.0, 24.0];
const SEXAGESIMAL_MULTS: &[f64] = &[1.0, 2.0, 5.0, 15.0, 20.0, 30.0, 45.0, 60.0, 120.0];

const DATE_LEVELS: &[Level] = &[
    Level::new(YEAR_MS, COARSE_MULTS),
    Level::new(MONTH_MS, CALENDAR_MULTS),
    Level::new(DAY_MS, CALENDAR_MULTS),
];

const TIME_LEVELS: &[Level] = &[
    Level::new(HOUR_MS, COARSE_MULTS),
    Level::new(MINUTE_MS, SEXAGESIMAL_MULTS),
    Level::new(SECOND_MS, SEXAGESIMAL_MULTS),
];

const DATETIME_LEVELS: &[Level] = &[
    Level::new(YEAR_MS, COARSE_MULTS),
    Level::new(MONTH_MS, CALENDAR_MULTS),
    Level::new(DAY_MS, CALENDAR_MULTS),
    Level::new(HOUR_MS, HOUR_MULTS),
    Level::new(MINUTE_MS, SEXAGESIMAL_MULTS),
    Level::new(SECOND_MS, SEXAGESIMAL_MULTS),
];

fn min_ticks_f64(min_ticks: u32) -> f64 {
    min_ticks.max(1) as f64
}

/// Whether `spacing` yields at least `min_ticks` ticks over `width`.
/// NaN counts never satisfy the target.
fn reaches(width: f64, spacing: f64, min_ticks: f64) -> bool {
    (width / spacing).round() >= min_ticks
}

fn fallback(width: f64, min_ticks: f64, search: &str) -> f64 {
    let spacing = width / min_ticks;
    log::warn!(
        "{} tick spacing search did not converge for width {}, falling back to {}",
        search,
        width,
        spacing
    );
    spacing
}

/// Walks `f * 10^e` downwards, `f` going through [`LIN_STEPS`] from the largest
#[derive(Debug, Clone, Copy)]
struct LinStepper {
    idx: usize,
    exp: i32,
}

impl LinStepper {
    fn new(exp: i32) -> Self {
        LinStepper {
            idx: LIN_STEPS.len() - 1,
            exp,
        }
    }

    fn step(&self) -> f64 {
        LIN_STEPS[self.idx] * 10f64.powi(self.exp)
    }

    fn next_smaller(&mut self) {
        if self.idx == 0 {
            self.idx = LIN_STEPS.len();
            self.exp = self.exp.saturating_sub(1);
        }
        self.idx -= 1;
    }
}

/// Spacing of a linear axis spanning `width` data units.
///
/// The search starts three decades above the width and walks down until
/// `round(width / spacing) >= min_ticks`.
pub fn linear_spacing(width: f64, min_ticks: u32) -> f64 {
    let min_ticks = min_ticks_f64(min_ticks);
    let start_exp = (width.log10().floor() as i32).saturating_add(3);

    let mut stepper = LinStepper::new(start_exp);
    for _ in 0..SPACING_SEARCH_ITER {
        let spacing = stepper.step();
        if reaches(width, spacing, min_ticks) {
            return spacing;
        }
        stepper.next_smaller();
    }
    fallback(width, min_ticks, "linear")
}

/// Multiplicative spacing of a log axis over `[min, max]`.
///
/// This is `base` unless the range spans more than `2 * min_ticks` powers of the base,
/// in which case the smallest integer power of the base that brings the count under that limit is used.
pub fn log_spacing(min: f64, max: f64, base: f64, min_ticks: u32) -> f64 {
    let limit = 2.0 * min_ticks_f64(min_ticks);
    let decades = (max.ln() - min.ln()).abs() / base.ln();
    if !(decades > limit) {
        return base;
    }

    let mut power = 1.0;
    for _ in 0..SPACING_SEARCH_ITER {
        if decades / power <= limit {
            return base.powf(power);
        }
        power += 1.0;
    }
    log::warn!(
        "log tick spacing search did not converge for {} decades, falling back to {}",
        decades,
        base
    );
    base
}

/// A calendar granularity and the multiples of it that are tried
#[derive(Debug, Clone, Copy)]
struct Level {
    unit_ms: f64,
    mults: &'static [f64],
}

impl Level {
    const fn new(unit_ms: f64, mults: &'static [f64]) -> Self {
        Level { unit_ms, mults }
    }
}

/// Walks calendar spacings from the coarsest to the finest.
///
/// Within a level, multipliers are consumed from the largest to the smallest.
/// When they are exhausted the stepper drops to the next finer level.
#[derive(Debug, Clone, Copy)]
struct Cascade {
    levels: &'static [Level],
    level: usize,
    idx: usize,
}

impl Cascade {
    fn new(levels: &'static [Level]) -> Self {
        Cascade {
            levels,
            level: 0,
            idx: levels[0].mults.len() - 1,
        }
    }

    fn step(&self) -> f64 {
        let level = &self.levels[self.level];
        level.mults[self.idx] * level.unit_ms
    }

    /// Move to the next smaller spacing.
    /// Returns false when the finest spacing was already reached.
    fn next_smaller(&mut self) -> bool {
        if self.idx > 0 {
            self.idx -= 1;
            true
        } else if self.level + 1 < self.levels.len() {
            self.level += 1;
            self.idx = self.levels[self.level].mults.len() - 1;
            true
        } else {
            false
        }
    }
}

fn cascade_spacing(levels: &'static [Level], width: f64, min_ticks: u32, search: &str) -> f64 {
    let min_ticks = min_ticks_f64(min_ticks);
    let mut cascade = Cascade::new(levels);
    for _ in 0..SPACING_SEARCH_ITER {
        let spacing = cascade.step();
        if reaches(width, spacing, min_ticks) || !cascade.next_smaller() {
            return spacing;
        }
    }
    fallback(width, min_ticks, search)
}

/// Spacing of a date axis spanning `width_ms` milliseconds.
/// Cascades through years, months and days.
pub fn date_spacing(width_ms: f64, min_ticks: u32) -> f64 {
    cascade_spacing(DATE_LEVELS, width_ms, min_ticks, "date")
}

/// Spacing of a time axis spanning `width_ms` milliseconds.
/// Cascades through hours, minutes and seconds.
pub fn time_spacing(width_ms: f64, min_ticks: u32) -> f64 {
    cascade_spacing(TIME_LEVELS, width_ms, min_ticks, "time")
}

/// Spacing of a date-time axis spanning `width_ms` milliseconds.
/// Cascades through years, months, days, hours, minutes and seconds.
pub fn datetime_spacing(width_ms: f64, min_ticks: u32) -> f64 {
    cascade_spacing(DATETIME_LEVELS, width_ms, min_ticks, "date-time")
}
