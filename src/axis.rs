//! The coordinate axis engine.
//!
//! An [`Axis`] owns its data range, its style and the pixel geometry pushed by its owner.
//! From these it derives, lazily, the data to pixel transform ([`ScaleLaw`]),
//! the tick spacing and start, and the number of digits of the tick labels.
//! Any setter invalidates the derived state, which is recomputed on the next read.
use crate::format::{LabelFormat, LabelType};
use crate::range::AxisRange;
use crate::scale::{CoordMap, ScaleKind, ScaleLaw, Sign};
use crate::settings::{self, Field, Settings, field};
use crate::style::AxisStyle;
use crate::time::DateTime;
use crate::{Error, ticks};

mod cached;
mod draw;
mod iter;

use cached::Cached;
pub use draw::LabelExtent;
pub use iter::{Tick, Ticks};

/// Direction of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// X axis: data grows to the right, side 1 is the bottom
    Horizontal,
    /// Y axis: data grows upward, side 1 is the left
    Vertical,
}

impl Orientation {
    /// Direction of increasing pixels for increasing data
    pub const fn sign(&self) -> Sign {
        match self {
            Orientation::Horizontal => Sign::Positive,
            Orientation::Vertical => Sign::Negative,
        }
    }
}

/// Pixel geometry of the plot area, as seen from one axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlotGeometry {
    /// Pixel coordinate where the axis starts (left for X, top for Y)
    pub offset: f64,
    /// Pixel length of the axis
    pub width: f64,
    /// Pixel coordinate where the perpendicular axis starts
    pub other_offset: f64,
    /// Pixel length of the perpendicular axis
    pub other_width: f64,
    /// Whether the perpendicular axis is inverted
    pub other_inverted: bool,
}

impl PlotGeometry {
    /// Pixel span of the perpendicular axis, ordered
    pub fn other_span(&self) -> (f64, f64) {
        if self.other_inverted {
            (self.other_offset - self.other_width, self.other_offset)
        } else {
            (self.other_offset, self.other_offset + self.other_width)
        }
    }
}

/// Axis properties that are not presentation
#[derive(Debug, Clone, PartialEq)]
struct Params {
    auto_spacing: bool,
    log: bool,
    inverted: bool,
    log_base: f64,
    user_tick_spacing: f64,
    user_log_tick_spacing: f64,
    axis_label: String,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            auto_spacing: true,
            log: false,
            inverted: false,
            log_base: 10.0,
            user_tick_spacing: 1.0,
            user_log_tick_spacing: 10.0,
            axis_label: String::new(),
        }
    }
}

static PARAMS_FIELDS: &[Field<Params>] = &[
    field!(Params, "auto_spacing", auto_spacing),
    field!(Params, "log", log),
    field!(Params, "inverted", inverted),
    field!(Params, "log_base", log_base),
    field!(Params, "tick_spacing", user_tick_spacing),
    field!(Params, "log_tick_spacing", user_log_tick_spacing),
    field!(Params, "axis_label", axis_label),
];

/// State derived from the range, the parameters, the style and the geometry
#[derive(Debug, Clone)]
pub(crate) struct Derived {
    min: f64,
    max: f64,
    width: f64,
    law: ScaleLaw,
    tick_spacing: f64,
    tick_spacing_log: f64,
    tick_start: f64,
    label_digits: usize,
}

/// A coordinate axis.
///
/// The axis maps data values to pixels through [`CoordMap`], iterates over its ticks
/// and draws itself on a [`render::Surface`](crate::render::Surface).
#[derive(Debug, Clone)]
pub struct Axis {
    orientation: Orientation,
    geometry: PlotGeometry,
    range: AxisRange,
    params: Params,
    style: AxisStyle,
    tick_labels: Vec<(f64, String)>,
    debug_region_boxes: bool,
    derived: Cached<Derived>,
    revision: u64,
}

impl Axis {
    /// Create an axis with the default style, on the range `[-10, 10]`
    pub fn new(orientation: Orientation) -> Self {
        Axis {
            orientation,
            geometry: PlotGeometry::default(),
            range: AxisRange::default(),
            params: Params::default(),
            style: AxisStyle::default(),
            tick_labels: Vec::new(),
            debug_region_boxes: false,
            derived: Cached::default(),
            revision: 0,
        }
    }

    /// Create an axis that is not attached to a plot area, like the axis of a color bar.
    /// Its geometry is given explicitly and it uses [`AxisStyle::colorbar`].
    pub fn independent(orientation: Orientation, geometry: PlotGeometry) -> Self {
        Axis {
            geometry,
            style: AxisStyle::colorbar(),
            ..Axis::new(orientation)
        }
    }

    fn touch(&mut self) {
        self.derived.invalidate();
        self.revision += 1;
    }

    /// The direction of the axis
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Counter incremented by every change of state.
    /// Owners redraw when it differs from the revision they last drew.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The pixel geometry
    pub fn geometry(&self) -> &PlotGeometry {
        &self.geometry
    }

    /// Set the pixel geometry of the plot area
    pub fn set_geometry(&mut self, geometry: PlotGeometry) {
        if geometry != self.geometry {
            self.geometry = geometry;
            self.touch();
        }
    }

    /// The range, with its constraints
    pub fn range(&self) -> &AxisRange {
        &self.range
    }

    /// Set the displayed range.
    ///
    /// The bounds may be given in any order. They are clamped into the absolute range,
    /// made positive on log axes and pushed apart when degenerate.
    /// Setting the current range again changes nothing.
    pub fn set_range(&mut self, min: f64, max: f64) {
        if self.range.set(min, max, self.params.log) {
            self.touch();
        }
    }

    /// Set the bounds the range is clamped into
    pub fn set_absolute_range(&mut self, min: f64, max: f64) {
        self.range.set_absolute(min, max, self.params.log);
        self.touch();
    }

    /// Remove the bounds the range is clamped into
    pub fn set_no_absolute_range(&mut self) {
        self.range.clear_absolute(self.params.log);
        self.touch();
    }

    /// Set the minimum width of the range. `None` or a non-positive width removes the constraint.
    pub fn set_min_width(&mut self, min_width: Option<f64>) {
        self.range.set_min_width(min_width, self.params.log);
        self.touch();
    }

    /// Whether the axis is logarithmic
    pub fn is_log(&self) -> bool {
        self.params.log
    }

    /// Switch between linear and logarithmic scale.
    /// Negative bounds are moved to positive powers of ten when switching to log.
    pub fn set_log(&mut self, log: bool) {
        if log == self.params.log {
            return;
        }
        self.params.log = log;
        if log {
            self.range.adjust_for_log();
            let (min, max) = (self.range.min(), self.range.max());
            self.range.set(min, max, true);
        }
        self.touch();
    }

    /// Base of the logarithm
    pub fn log_base(&self) -> f64 {
        self.params.log_base
    }

    /// Set the base of the logarithm.
    /// Bases that are not finite, not positive or equal to 1 are ignored.
    pub fn set_log_base(&mut self, base: f64) {
        if !base.is_finite() || base <= 0.0 || base == 1.0 {
            log::warn!("Ignoring invalid log base {base}");
            return;
        }
        if base != self.params.log_base {
            self.params.log_base = base;
            self.touch();
        }
    }

    /// Whether pixels are mirrored relative to the default direction
    pub fn is_inverted(&self) -> bool {
        self.params.inverted
    }

    /// Mirror the pixel direction
    pub fn set_inverted(&mut self, inverted: bool) {
        if inverted != self.params.inverted {
            self.params.inverted = inverted;
            self.touch();
        }
    }

    /// Whether the tick spacing is searched automatically
    pub fn auto_spacing(&self) -> bool {
        self.params.auto_spacing
    }

    /// Select automatic or user tick spacing
    pub fn set_auto_spacing(&mut self, auto: bool) {
        self.params.auto_spacing = auto;
        self.touch();
    }

    /// Linear tick spacing used when auto spacing is off
    pub fn set_user_tick_spacing(&mut self, spacing: f64) {
        self.params.user_tick_spacing = spacing;
        self.touch();
    }

    /// Log tick spacing (a factor) used when auto spacing is off
    pub fn set_user_log_tick_spacing(&mut self, spacing: f64) {
        self.params.user_log_tick_spacing = spacing;
        self.touch();
    }

    /// Set a fixed number of label digits, disabling their estimation
    pub fn set_label_digits(&mut self, digits: usize) {
        self.style.label_digits = digits;
        self.style.auto_label_digits = false;
        self.touch();
    }

    /// The axis label
    pub fn axis_label(&self) -> &str {
        &self.params.axis_label
    }

    /// Set the axis label
    pub fn set_axis_label(&mut self, label: impl Into<String>) {
        self.params.axis_label = label.into();
        self.touch();
    }

    /// The presentation properties
    pub fn style(&self) -> &AxisStyle {
        &self.style
    }

    /// Replace the presentation properties
    pub fn set_style(&mut self, style: AxisStyle) {
        self.style = style;
        self.touch();
    }

    /// Mutable access to the presentation properties
    pub fn style_mut(&mut self) -> &mut AxisStyle {
        self.touch();
        &mut self.style
    }

    /// Draw the boxes of the regions reserved around the plot area
    pub fn set_debug_region_boxes(&mut self, enabled: bool) {
        self.debug_region_boxes = enabled;
        self.revision += 1;
    }

    /// Recompute the scale and tick state.
    /// This is a no-op if nothing changed since the last computation, unless `force` is set.
    pub fn calc_plot_scaling(&mut self, force: bool) {
        if force || !self.derived.is_valid() {
            let derived = self.compute();
            self.derived.set(derived);
        }
    }

    fn derived(&self) -> &Derived {
        self.derived.get_or_init(|| self.compute())
    }

    fn compute(&self) -> Derived {
        let log = self.params.log;
        let base = self.params.log_base;
        let (min, max) = self.range.calc_bounds(log, base);
        let width = (max - min).abs();

        let kind = if log {
            ScaleKind::Log { base }
        } else {
            ScaleKind::Linear
        };
        let law = ScaleLaw::new(
            min,
            max,
            self.geometry.offset,
            self.geometry.width,
            self.orientation.sign(),
            kind,
            self.params.inverted,
        );

        let auto = self.params.auto_spacing;
        let min_ticks = self.style.min_ticks;
        let (tick_spacing, tick_spacing_log, tick_start) = if self.style.tick_mode.is_power(log) {
            // user spacings only apply to linear ticks
            let spacing_log = ticks::log_spacing(min, max, base, min_ticks);
            let start = base.powf((min.ln() / base.ln()).floor());
            (1.0, spacing_log, start)
        } else {
            let (spacing, spacing_log) = if auto {
                (self.linear_spacing(width), 10.0)
            } else {
                (
                    self.params.user_tick_spacing,
                    self.params.user_log_tick_spacing,
                )
            };
            (spacing, spacing_log, (min / spacing).floor() * spacing)
        };

        let label_digits = if self.style.auto_label_digits && !self.style.tick_label_type.is_calendar()
        {
            let fmt = self.label_format(0, 0.0);
            ticks::label_digits(tick_start, tick_spacing, |x, digits| {
                fmt.format_with(x, digits, 1e-300)
            })
        } else {
            self.style.label_digits
        };

        log::debug!(
            "{:?} axis scaling: range=[{min}, {max}] scale={} offset={} spacing={tick_spacing} (log {tick_spacing_log}) start={tick_start} digits={label_digits}",
            self.orientation,
            law.scale(),
            law.offset(),
        );

        Derived {
            min,
            max,
            width,
            law,
            tick_spacing,
            tick_spacing_log,
            tick_start,
            label_digits,
        }
    }

    fn linear_spacing(&self, width: f64) -> f64 {
        let min_ticks = self.style.min_ticks;
        match self.style.tick_label_type {
            LabelType::Date => ticks::date_spacing(width, min_ticks),
            LabelType::Time => ticks::time_spacing(width, min_ticks),
            LabelType::DateTime => ticks::datetime_spacing(width, min_ticks),
            _ => ticks::linear_spacing(width, min_ticks),
        }
    }

    /// Lower bound of the range used by the scale
    pub fn min(&self) -> f64 {
        self.derived().min
    }

    /// Upper bound of the range used by the scale
    pub fn max(&self) -> f64 {
        self.derived().max
    }

    /// Width of the range used by the scale
    pub fn width(&self) -> f64 {
        self.derived().width
    }

    /// The data to pixel transform
    pub fn scale_law(&self) -> ScaleLaw {
        self.derived().law
    }

    /// Linear distance between major ticks (1 in power mode)
    pub fn tick_spacing(&self) -> f64 {
        self.derived().tick_spacing
    }

    /// Factor between major ticks in power mode
    pub fn tick_spacing_log(&self) -> f64 {
        self.derived().tick_spacing_log
    }

    /// Position of the first major tick, at or below the minimum
    pub fn tick_start(&self) -> f64 {
        self.derived().tick_start
    }

    /// Number of decimals of the tick labels
    pub fn label_digits(&self) -> usize {
        self.derived().label_digits
    }

    /// Iterate over the major ticks
    pub fn ticks(&self) -> Ticks<'_> {
        Ticks::new(self)
    }

    fn is_power_mode(&self) -> bool {
        self.style.tick_mode.is_power(self.params.log)
    }

    fn advance(&self, derived: &Derived, pos: f64) -> f64 {
        if self.is_power_mode() {
            pos * derived.tick_spacing_log
        } else {
            pos + derived.tick_spacing
        }
    }

    /// Distance from the major tick at `x` to the next one
    pub fn next_label_distance(&self, x: f64) -> f64 {
        let d = self.derived();
        if self.is_power_mode() {
            x * d.tick_spacing_log
        } else {
            d.tick_spacing
        }
    }

    /// Positions of the minor ticks following the major tick at `x`, within the range.
    ///
    /// The interval to the next major tick is split in `minor_ticks + 1` equal parts.
    /// On log axes, the first minor tick is placed at the interval step itself when the step
    /// exceeds `x`, otherwise at twice the step, with one less minor tick.
    /// No minor ticks are produced for manual tick labels.
    pub fn minor_ticks(&self, x: f64) -> Vec<f64> {
        let count = self.style.minor_ticks as usize;
        if count == 0 || !self.tick_labels.is_empty() {
            return Vec::new();
        }
        let d = self.derived();
        let step = self.next_label_distance(x) / (count + 1) as f64;
        let (first, count) = if !self.params.log {
            (x + step, count)
        } else if step > x {
            (step, count)
        } else {
            (2.0 * step, count - 1)
        };
        (0..count)
            .map(|i| first + i as f64 * step)
            .filter(|mx| *mx >= d.min && *mx <= d.max)
            .collect()
    }

    fn label_format(&self, digits: usize, below_is_zero: f64) -> LabelFormat<'_> {
        LabelFormat {
            label_type: self.style.tick_label_type,
            digits,
            below_is_zero,
            date_format: &self.style.tick_date_format,
            time_format: &self.style.tick_time_format,
            datetime_format: &self.style.tick_datetime_format,
        }
    }

    /// Format a tick value with the label type and digits of the axis
    pub fn format_label(&self, x: f64) -> String {
        let d = self.derived();
        let below_is_zero = if self.params.log {
            1e-300
        } else {
            d.width * 1e-6
        };
        self.label_format(d.label_digits, below_is_zero).format(x)
    }

    /// Format a tick value with the label type of the axis and the given digits
    pub fn format_label_digits(&self, x: f64, digits: usize) -> String {
        self.label_format(digits, 1e-300).format(x)
    }

    /// Parse a value written the way tick labels are written.
    /// Date and time axes use their label format, other axes accept plain numbers.
    pub fn parse_value(&self, text: &str) -> Result<f64, Error> {
        let fmt = match self.style.tick_label_type {
            LabelType::Date => &self.style.tick_date_format,
            LabelType::Time => &self.style.tick_time_format,
            LabelType::DateTime => &self.style.tick_datetime_format,
            _ => return Ok(text.trim().parse()?),
        };
        let dt = DateTime::fmt_parse(text.trim(), fmt)?;
        Ok(dt.millis() as f64)
    }

    /// Add a manual tick label.
    /// While manual labels exist, they replace the generated ticks.
    pub fn add_tick_label(&mut self, x: f64, label: impl Into<String>) {
        self.tick_labels.push((x, label.into()));
        self.revision += 1;
    }

    /// Add several manual tick labels
    pub fn add_tick_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = (f64, S)>,
        S: Into<String>,
    {
        self.tick_labels
            .extend(labels.into_iter().map(|(x, l)| (x, l.into())));
        self.revision += 1;
    }

    /// Remove the manual tick labels, returning to generated ticks
    pub fn clear_tick_labels(&mut self) {
        self.tick_labels.clear();
        self.revision += 1;
    }

    /// The manual tick labels
    pub fn tick_labels(&self) -> &[(f64, String)] {
        &self.tick_labels
    }

    /// Write the axis and style properties differing from the defaults under `group`
    pub fn save_settings<S>(&self, settings: &mut S, group: &str)
    where
        S: Settings + ?Sized,
    {
        settings::save_fields(
            PARAMS_FIELDS,
            &self.params,
            &Params::default(),
            settings,
            group,
        );
        settings::save_style(&self.style, &AxisStyle::default(), settings, group);
    }

    /// Read the axis and style properties present under `group`.
    ///
    /// Absent keys keep their current value.
    /// Undecodable values are skipped, and the first of them is reported.
    pub fn load_settings<S>(&mut self, settings: &S, group: &str) -> Result<(), Error>
    where
        S: Settings + ?Sized,
    {
        let mut params = self.params.clone();
        let params_res = settings::load_fields(PARAMS_FIELDS, &mut params, settings, group);
        let mut style = self.style.clone();
        let style_res = settings::load_style(&mut style, settings, group);

        self.set_log_base(params.log_base);
        self.set_log(params.log);
        self.params = Params {
            log: self.params.log,
            log_base: self.params.log_base,
            ..params
        };
        self.style = style;
        self.touch();

        params_res.and(style_res)
    }
}

impl CoordMap for Axis {
    fn to_pixel(&self, x: f64) -> f64 {
        self.derived().law.to_pixel(x)
    }

    fn to_data(&self, p: f64) -> f64 {
        self.derived().law.to_data(p)
    }

    fn is_log(&self) -> bool {
        self.params.log
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::settings::MemSettings;
    use crate::style::TickMode;
    use crate::tests::{Near, assert_near, rng};

    fn x_axis(min: f64, max: f64) -> Axis {
        let mut axis = Axis::new(Orientation::Horizontal);
        axis.set_geometry(PlotGeometry {
            offset: 50.0,
            width: 400.0,
            other_offset: 20.0,
            other_width: 300.0,
            other_inverted: false,
        });
        axis.set_range(min, max);
        axis
    }

    fn positions(axis: &Axis) -> Vec<f64> {
        axis.ticks().map(|t| t.pos).collect()
    }

    #[test]
    fn test_defaults() {
        let axis = Axis::new(Orientation::Vertical);
        assert_eq!((axis.min(), axis.max()), (-10.0, 10.0));
        assert!(!axis.is_log());
        assert!(!axis.is_inverted());
        assert!(axis.auto_spacing());
        assert_eq!(axis.log_base(), 10.0);
        assert_eq!(axis.revision(), 0);
    }

    #[test]
    fn test_linear_ticks() {
        let axis = x_axis(0.0, 100.0);
        assert_eq!(axis.tick_spacing(), 20.0);
        assert_eq!(axis.tick_start(), 0.0);
        assert_eq!(positions(&axis), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        let labels: Vec<String> = axis.ticks().map(|t| t.label).collect();
        assert_eq!(labels, vec!["0", "20", "40", "60", "80", "100"]);
    }

    #[test]
    fn test_tick_start_below_min() {
        let axis = x_axis(1.0, 99.0);
        let ticks: Vec<Tick> = axis.ticks().collect();
        assert_eq!(ticks[0].pos, 0.0);
        assert_eq!(ticks[0].label, "");
        assert_eq!(ticks[1].label, "20");
        assert_eq!(ticks.last().unwrap().pos, 80.0);
    }

    #[test]
    fn test_vertical_transform() {
        let mut axis = Axis::new(Orientation::Vertical);
        axis.set_geometry(PlotGeometry {
            offset: 10.0,
            width: 200.0,
            ..Default::default()
        });
        axis.set_range(0.0, 10.0);
        assert_near!(abs, axis.to_pixel(0.0), 210.0);
        assert_near!(abs, axis.to_pixel(10.0), 10.0);
        assert_near!(abs, axis.to_data(110.0), 5.0);
    }

    #[test]
    fn test_inverted() {
        let mut axis = Axis::new(Orientation::Horizontal);
        axis.set_geometry(PlotGeometry {
            offset: 0.0,
            width: 100.0,
            ..Default::default()
        });
        axis.set_range(0.0, 10.0);
        axis.set_inverted(true);
        assert_near!(abs, axis.to_pixel(0.0), 100.0);
        assert_near!(abs, axis.to_pixel(10.0), 0.0);
        assert_near!(abs, axis.to_data(25.0), 7.5);
    }

    #[test]
    fn test_log_ticks() {
        let mut axis = x_axis(1.0, 1000.0);
        axis.set_log(true);
        axis.style_mut().min_ticks = 3;
        assert_eq!(axis.tick_spacing_log(), 10.0);
        assert_eq!(axis.tick_start(), 1.0);
        let pos = positions(&axis);
        assert_eq!(pos.len(), 4);
        for (p, e) in pos.iter().zip([1.0, 10.0, 100.0, 1000.0]) {
            assert_near!(rel, *p, e, 1e-12);
        }
        assert_near!(abs, axis.to_pixel(10.0), 50.0 + 400.0 / 3.0, 1e-9);
    }

    #[test]
    fn test_log_wide_range() {
        let mut axis = x_axis(1.0, 1e12);
        axis.set_log(true);
        axis.style_mut().min_ticks = 3;
        assert_eq!(axis.tick_spacing_log(), 100.0);
        assert_eq!(positions(&axis).len(), 7);

        axis.set_auto_spacing(false);
        axis.set_user_log_tick_spacing(10.0);
        assert_eq!(axis.tick_spacing_log(), 100.0);
        assert_eq!(positions(&axis).len(), 7);

        axis.style_mut().tick_mode = TickMode::Power;
        assert_eq!(axis.tick_spacing_log(), 100.0);
    }

    #[test]
    fn test_set_log_moves_negative_min() {
        let mut axis = x_axis(-10.0, 990.0);
        axis.set_log(true);
        assert_near!(rel, axis.min(), 100.0);
        assert_eq!(axis.max(), 990.0);
        assert!(axis.to_pixel(-5.0).is_finite());
    }

    #[test]
    fn test_log_range_clamped() {
        let mut axis = x_axis(1.0, 10.0);
        axis.set_log(true);
        axis.set_range(-1.0, 10.0);
        assert!(axis.range().min() > 0.0);
        assert!(axis.min() > 0.0);
    }

    #[test]
    fn test_set_range_idempotent() {
        let mut axis = x_axis(0.0, 100.0);
        let rev = axis.revision();
        axis.set_range(0.0, 100.0);
        assert_eq!(axis.revision(), rev);
        axis.set_range(100.0, 0.0);
        assert_eq!(axis.revision(), rev);
        axis.set_range(0.0, 50.0);
        assert_eq!(axis.revision(), rev + 1);
    }

    #[test]
    fn test_degenerate_range() {
        let axis = x_axis(5.0, 5.0);
        assert_eq!((axis.min(), axis.max()), (5.0, 6.0));
    }

    #[test]
    fn test_absolute_range() {
        let mut axis = x_axis(0.0, 100.0);
        axis.set_absolute_range(10.0, 50.0);
        assert_eq!((axis.min(), axis.max()), (10.0, 50.0));
        axis.set_no_absolute_range();
        axis.set_range(-1e300, 1e300);
        assert_eq!((axis.min(), axis.max()), (-1e300, 1e300));
    }

    #[test]
    fn test_min_width() {
        let mut axis = x_axis(0.0, 100.0);
        axis.set_min_width(Some(10.0));
        axis.set_range(3.0, 4.0);
        assert_eq!((axis.min(), axis.max()), (3.0, 13.0));
    }

    #[test]
    fn test_lazy_recompute() {
        let mut axis = x_axis(0.0, 100.0);
        assert_eq!(axis.tick_spacing(), 20.0);
        axis.set_range(0.0, 10.0);
        assert_eq!(axis.tick_spacing(), 2.0);
        axis.style_mut().min_ticks = 10;
        assert_eq!(axis.tick_spacing(), 1.0);
        axis.calc_plot_scaling(true);
        assert_eq!(axis.tick_spacing(), 1.0);
    }

    #[test]
    fn test_user_spacing() {
        let mut axis = x_axis(0.0, 10.0);
        axis.set_auto_spacing(false);
        axis.set_user_tick_spacing(3.0);
        assert_eq!(positions(&axis), vec![0.0, 3.0, 6.0, 9.0]);

        axis.style_mut().tick_mode = TickMode::Lin;
        axis.set_range(-4.0, 4.0);
        assert_eq!(axis.tick_start(), -6.0);
    }

    #[test]
    fn test_zero_spacing_terminates() {
        let mut axis = x_axis(0.0, 10.0);
        axis.set_auto_spacing(false);
        axis.set_user_tick_spacing(0.0);
        assert!(axis.ticks().count() <= 1);
    }

    #[test]
    fn test_label_digits() {
        let axis = x_axis(1.0, 1.01);
        assert_near!(rel, axis.tick_spacing(), 0.002);
        assert_eq!(axis.label_digits(), 3);
        let labels: Vec<String> = axis.ticks().map(|t| t.label).collect();
        for l in ["1.002", "1.004", "1.006", "1.008"] {
            assert!(labels.iter().any(|label| label == l), "{l} not in {labels:?}");
        }

        let mut axis = x_axis(0.0, 1.0);
        axis.set_label_digits(5);
        assert!(!axis.style().auto_label_digits);
        assert_eq!(axis.label_digits(), 5);
    }

    #[test]
    fn test_adjacent_labels_differ() {
        let mut rng = rng(11);
        let mut axis = x_axis(0.0, 1.0);
        axis.style_mut().tick_label_type = LabelType::Default;
        for _ in 0..200 {
            let min = rng.random_range(-100.0..100.0);
            let width = 10f64.powf(rng.random_range(-5.0..2.0));
            axis.set_range(min, min + width);
            if axis.label_digits() >= 22 {
                continue;
            }
            let labels: Vec<String> = axis.ticks().map(|t| t.label).filter(|l| !l.is_empty()).collect();
            for pair in labels.windows(2) {
                assert_ne!(pair[0], pair[1], "range [{}, {}]", axis.min(), axis.max());
            }
        }
    }

    #[test]
    fn test_date_ticks() {
        let mut axis = x_axis(0.0, 1.0);
        axis.style_mut().tick_label_type = LabelType::Date;
        // 2024-01-01 to 2024-01-11
        let start = 1_704_067_200_000.0;
        axis.set_range(start, start + 10.0 * 86_400_000.0);
        assert_eq!(axis.tick_spacing(), 2.0 * 86_400_000.0);
        let labels: Vec<String> = axis.ticks().map(|t| t.label).filter(|l| !l.is_empty()).collect();
        // the first tick falls on 2023-12-31, out of range
        assert_eq!(labels[0], "2024-01-02");
        assert_eq!(labels[1], "2024-01-04");
    }

    #[test]
    fn test_manual_labels() {
        let mut axis = x_axis(0.0, 10.0);
        axis.add_tick_label(1.0, "one");
        axis.add_tick_labels([(5.0, "five"), (20.0, "twenty"), (7.0, "seven")]);
        let ticks: Vec<Tick> = axis.ticks().collect();
        // the walk stops at the first out of range label
        assert_eq!(
            ticks,
            vec![
                Tick { pos: 1.0, label: "one".into() },
                Tick { pos: 5.0, label: "five".into() },
            ]
        );
        assert!(axis.minor_ticks(1.0).is_empty());

        axis.clear_tick_labels();
        assert_eq!(axis.ticks().count(), 6);
    }

    #[test]
    fn test_manual_labels_first_out_of_range() {
        let mut axis = x_axis(0.0, 10.0);
        axis.add_tick_labels([(-5.0, "neg"), (5.0, "five"), (8.0, "eight")]);
        let labels: Vec<String> = axis.ticks().map(|t| t.label).collect();
        assert_eq!(labels, vec!["neg", "five", "eight"]);

        let mut axis = x_axis(0.0, 10.0);
        axis.add_tick_labels([(-5.0, "neg"), (-2.0, "minus two"), (5.0, "five")]);
        assert_eq!(axis.ticks().count(), 1);
    }

    #[test]
    fn test_minor_ticks() {
        let mut axis = x_axis(0.0, 100.0);
        axis.style_mut().minor_ticks = 3;
        assert_eq!(axis.minor_ticks(20.0), vec![25.0, 30.0, 35.0]);
        assert!(axis.minor_ticks(100.0).is_empty());

        let mut axis = x_axis(1.0, 1000.0);
        axis.set_log(true);
        axis.style_mut().minor_ticks = 9;
        let minor = axis.minor_ticks(10.0);
        assert_eq!(minor.len(), 8);
        for (m, e) in minor.iter().zip(2..=9) {
            assert_near!(rel, *m, e as f64 * 10.0);
        }

        axis.style_mut().minor_ticks = 1;
        assert_eq!(axis.minor_ticks(10.0), vec![50.0]);
    }

    #[test]
    fn test_format_label() {
        let mut axis = x_axis(0.0, 1e6);
        assert_eq!(axis.format_label(2e5), "2{\\cdot}10^{5}");
        axis.style_mut().tick_label_type = LabelType::ExponentCharacter;
        assert_eq!(axis.format_label(2e5), "200k");
        assert_eq!(axis.format_label_digits(0.126, 2), "126m");
        axis.style_mut().tick_label_type = LabelType::Default;
        assert_eq!(axis.format_label_digits(0.126, 2), "0.13");
    }

    #[test]
    fn test_parse_value() {
        let mut axis = x_axis(0.0, 1.0);
        assert_eq!(axis.parse_value(" 2.5 ").unwrap(), 2.5);
        assert!(matches!(axis.parse_value("abc"), Err(Error::Number(_))));

        axis.style_mut().tick_label_type = LabelType::Date;
        let ms = axis.parse_value("2024-01-02").unwrap();
        assert_eq!(ms, 1_704_153_600_000.0);
        assert_eq!(axis.format_label(ms), "2024-01-02");
        assert!(matches!(axis.parse_value("2024/01/02"), Err(Error::Time(_))));
    }

    #[test]
    fn test_power_mode_on_linear_axis() {
        let mut axis = x_axis(1.0, 1000.0);
        axis.style_mut().tick_mode = TickMode::Power;
        axis.style_mut().min_ticks = 3;
        assert_eq!(axis.tick_spacing(), 1.0);
        assert_eq!(axis.next_label_distance(10.0), 100.0);
        assert_eq!(positions(&axis).len(), 4);
    }

    #[test]
    fn test_invalid_log_base() {
        let mut axis = x_axis(1.0, 100.0);
        axis.set_log_base(1.0);
        axis.set_log_base(-2.0);
        axis.set_log_base(f64::NAN);
        assert_eq!(axis.log_base(), 10.0);
        axis.set_log_base(2.0);
        assert_eq!(axis.log_base(), 2.0);
    }

    #[test]
    fn test_round_trip() {
        let mut rng = rng(17);
        let mut axis = x_axis(0.0, 1.0);
        for _ in 0..200 {
            let a = rng.random_range(-1e4..1e4);
            let b = a + rng.random_range(1e-3..1e4);
            axis.set_range(a, b);
            axis.set_inverted(rng.random_bool(0.5));
            for _ in 0..10 {
                let x = rng.random_range(a..b);
                assert_near!(abs, axis.to_data(axis.to_pixel(x)), x, (b - a) * 1e-9);
            }
        }
    }

    #[test]
    fn test_settings_round_trip() {
        let mut axis = x_axis(1.0, 100.0);
        axis.set_log(true);
        axis.set_log_base(2.0);
        axis.set_axis_label("Voltage [V]");
        axis.set_auto_spacing(false);
        axis.style_mut().min_ticks = 8;

        let mut settings = MemSettings::new();
        axis.save_settings(&mut settings, "x");
        assert_eq!(settings.value("x/log"), Some("true"));
        assert_eq!(settings.value("x/log_base"), Some("2"));
        assert_eq!(settings.value("x/axis_label"), Some("Voltage [V]"));
        assert_eq!(settings.value("x/min_ticks"), Some("8"));
        assert_eq!(settings.value("x/inverted"), None);

        let mut loaded = x_axis(-5.0, 100.0);
        loaded.load_settings(&settings, "x").unwrap();
        assert!(loaded.is_log());
        assert!(loaded.min() > 0.0);
        assert_eq!(loaded.log_base(), 2.0);
        assert_eq!(loaded.axis_label(), "Voltage [V]");
        assert!(!loaded.auto_spacing());
        assert_eq!(loaded.style(), axis.style());
    }

    #[test]
    fn test_load_settings_error() {
        let mut settings = MemSettings::new();
        settings.set_value("y/log", "maybe".to_string());
        settings.set_value("y/tick_mode", "power".to_string());

        let mut axis = Axis::new(Orientation::Vertical);
        let rev = axis.revision();
        assert!(axis.load_settings(&settings, "y").is_err());
        assert!(!axis.is_log());
        assert_eq!(axis.style().tick_mode, TickMode::Power);
        assert!(axis.revision() > rev);
    }

    #[test]
    fn test_independent_axis() {
        let geometry = PlotGeometry {
            offset: 100.0,
            width: 50.0,
            other_offset: 10.0,
            other_width: 20.0,
            other_inverted: false,
        };
        let mut axis = Axis::independent(Orientation::Vertical, geometry);
        axis.set_range(0.0, 1.0);
        assert_eq!(axis.geometry(), &geometry);
        assert_eq!(axis.style(), &AxisStyle::colorbar());
        assert_near!(abs, axis.to_pixel(0.0), 150.0);
        assert_near!(abs, axis.to_pixel(1.0), 100.0);
    }
}
