#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
/*!
 * # plotaxis
 * _coordinate axes for scientific plots_.
 *
 * plotaxis implements the part of a plotting library that everything else depends on:
 * the coordinate axis. An [`Axis`] owns a data range, maps data values to pixels and back,
 * picks "nice" tick spacings for linear, logarithmic, date, time and date-time axes,
 * chooses how many digits labels need, and draws itself (line, ticks, labels, grid)
 * on any [`render::Surface`].
 *
 * ## Get started
 *
 * ```
 * use plotaxis::{Axis, CoordMap, Orientation, PlotGeometry};
 *
 * let mut x = Axis::new(Orientation::Horizontal);
 * // the owner of the axis tells where the plot area lies, in pixels
 * x.set_geometry(PlotGeometry {
 *     offset: 50.0,
 *     width: 400.0,
 *     ..Default::default()
 * });
 * x.set_range(0.0, 100.0);
 *
 * assert_eq!(x.to_pixel(0.0), 50.0);
 * assert_eq!(x.to_pixel(100.0), 450.0);
 * assert_eq!(x.tick_spacing(), 20.0);
 *
 * let positions: Vec<f64> = x.ticks().map(|t| t.pos).collect();
 * assert_eq!(positions, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
 * ```
 *
 * ## Organization
 *
 *  - [`scale`]: the data to pixel transform ([`scale::ScaleLaw`]) and the [`CoordMap`] trait
 *    through which graph renderers consume axes.
 *  - [`range`]: the axis range and its normalization rules.
 *  - [`ticks`]: the tick spacing searches and the label precision estimator.
 *  - [`format`]: tick label formatting (decimal, exponent, SI suffix, date/time).
 *  - [`time`]: a small date/time type and its `strftime`-like formatting.
 *  - [`style`]: presentation properties of an axis.
 *  - [`settings`]: diff-based persistence of axis and style properties.
 *  - [`axis`]: the axis engine itself, its tick iteration, drawing and measurement.
 *  - [`plot`]: a pair of axes sharing a plot area.
 *  - [`render`]: the surface abstraction that axes draw on.
 *
 * Axes log their recomputations through the [`log`](https://docs.rs/log) facade.
 */
// Plotaxis is released under the MIT License with the following copyright:
// Copyright (c) 2025-2026 Rémi Thebault

use std::fmt;

pub mod axis;
pub mod format;
pub mod plot;
pub mod range;
pub mod render;
pub mod scale;
pub mod settings;
pub mod style;
pub mod ticks;
pub mod time;

pub use axis::{Axis, Orientation, PlotGeometry, Tick};
pub use format::LabelType;
pub use scale::CoordMap;
pub use style::AxisStyle;

/// Rexports of [`plotaxis_base::color`]` items
pub mod color {
    pub use plotaxis_base::color::*;
}
pub use color::ColorU8;

/// Rexports of [`plotaxis_base::geom`]` items
pub mod geom {
    pub use plotaxis_base::geom::*;
}

/// Safety limits shared by the tick searches and the draw routines
mod limits {
    /// Iteration cap of all tick spacing searches
    pub const SPACING_SEARCH_ITER: usize = 1000;
    /// Maximum number of major ticks visited in a draw pass
    pub const DRAWN_TICKS: usize = 200;
    /// Maximum number of labels measured to reserve layout space
    pub const MEASURED_LABELS: usize = 50;
    /// Maximum number of extra digits tried by the label precision estimator
    pub const LABEL_DIGITS: usize = 20;
    /// Lowest pen width handed to the surface, in pixels
    pub const MIN_LINE_WIDTH: f32 = 0.02;
}

/// Errors raised at the edges of the axis engine:
/// decoding persisted settings and parsing strings.
///
/// The engine itself never fails: degenerate ranges and spacings fall back to defined values.
#[derive(Debug)]
pub enum Error {
    /// A persisted value could not be decoded
    Settings {
        /// Full key of the value
        key: String,
        /// The raw value
        value: String,
        /// What went wrong
        reason: String,
    },
    /// A string doesn't name a variant of an enumeration
    UnknownEnumValue {
        /// Name of the enumeration
        kind: &'static str,
        /// The unrecognized string
        value: String,
    },
    /// A date/time string doesn't match its format
    Time(time::ParseError),
    /// A string is not a number
    Number(std::num::ParseFloatError),
}

impl From<time::ParseError> for Error {
    fn from(err: time::ParseError) -> Self {
        Error::Time(err)
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Self {
        Error::Number(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Settings { key, value, reason } => {
                write!(f, "Invalid setting {}={:?}: {}", key, value, reason)
            }
            Error::UnknownEnumValue { kind, value } => {
                write!(f, "Unknown {} value: {:?}", kind, value)
            }
            Error::Time(err) => write!(f, "Date/time error: {}", err),
            Error::Number(err) => write!(f, "Number error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Time(err) => Some(err),
            Error::Number(err) => Some(err),
            _ => None,
        }
    }
}
