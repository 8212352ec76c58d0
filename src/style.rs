//! Presentation properties of an axis.
//!
//! Distances, line widths and font sizes are in typographic points.
//! They are converted to pixels by the surface at draw time.
use std::fmt;
use std::str::FromStr;

use crate::format::LabelType;
use crate::{ColorU8, color, render};

fn unknown(kind: &'static str, s: &str) -> crate::Error {
    crate::Error::UnknownEnumValue {
        kind,
        value: s.to_string(),
    }
}

/// Which parts of an axis are drawn on one side of the plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// Line, ticks, tick labels and axis label
    All,
    /// Ticks, tick labels and axis label
    TicksLabelsAxisLabel,
    /// Ticks and tick labels
    TicksLabels,
    /// Ticks only
    Ticks,
    /// Line, ticks and tick labels
    LineTicksLabels,
    /// Tick labels and axis label
    LabelsAxisLabel,
    /// Tick labels only
    Labels,
    /// Line and ticks
    LineTicks,
    /// Line only
    Line,
    /// Nothing
    None,
}

impl DrawMode {
    /// Whether the axis line is drawn
    pub const fn has_line(&self) -> bool {
        matches!(
            self,
            DrawMode::All | DrawMode::LineTicksLabels | DrawMode::LineTicks | DrawMode::Line
        )
    }

    /// Whether the ticks are drawn
    pub const fn has_ticks(&self) -> bool {
        matches!(
            self,
            DrawMode::All
                | DrawMode::TicksLabelsAxisLabel
                | DrawMode::TicksLabels
                | DrawMode::Ticks
                | DrawMode::LineTicksLabels
                | DrawMode::LineTicks
        )
    }

    /// Whether the tick labels are drawn
    pub const fn has_tick_labels(&self) -> bool {
        matches!(
            self,
            DrawMode::All
                | DrawMode::TicksLabelsAxisLabel
                | DrawMode::TicksLabels
                | DrawMode::LineTicksLabels
                | DrawMode::LabelsAxisLabel
                | DrawMode::Labels
        )
    }

    /// Whether the axis label is drawn
    pub const fn has_axis_label(&self) -> bool {
        matches!(
            self,
            DrawMode::All | DrawMode::TicksLabelsAxisLabel | DrawMode::LabelsAxisLabel
        )
    }

    /// Name of the mode in persisted settings
    pub const fn as_str(&self) -> &'static str {
        match self {
            DrawMode::All => "all",
            DrawMode::TicksLabelsAxisLabel => "ticks+labels+axislabel",
            DrawMode::TicksLabels => "ticks+labels",
            DrawMode::Ticks => "ticks",
            DrawMode::LineTicksLabels => "line+ticks+labels",
            DrawMode::LabelsAxisLabel => "labels+axislabel",
            DrawMode::Labels => "labels",
            DrawMode::LineTicks => "line+ticks",
            DrawMode::Line => "line",
            DrawMode::None => "none",
        }
    }
}

impl FromStr for DrawMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "complete" | "line+ticks+labels+axislabel" => Ok(DrawMode::All),
            "ticks+labels+axislabel" => Ok(DrawMode::TicksLabelsAxisLabel),
            "ticks+labels" => Ok(DrawMode::TicksLabels),
            "ticks" => Ok(DrawMode::Ticks),
            "line+ticks+labels" => Ok(DrawMode::LineTicksLabels),
            "labels+axislabel" => Ok(DrawMode::LabelsAxisLabel),
            "labels" => Ok(DrawMode::Labels),
            "line+ticks" => Ok(DrawMode::LineTicks),
            "line" => Ok(DrawMode::Line),
            "none" => Ok(DrawMode::None),
            _ => Err(unknown("DrawMode", s)),
        }
    }
}

/// How major tick positions progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TickMode {
    /// Linear spacing on linear axes, powers of the base on log axes
    #[default]
    LinOrPower,
    /// Always linear spacing
    Lin,
    /// Always powers of the log base
    Power,
}

impl TickMode {
    /// Name of the mode in persisted settings
    pub const fn as_str(&self) -> &'static str {
        match self {
            TickMode::LinOrPower => "lin_or_power",
            TickMode::Lin => "lin",
            TickMode::Power => "power",
        }
    }

    /// Whether ticks are powers of the log base on an axis that is log or not
    pub const fn is_power(&self, log_axis: bool) -> bool {
        match self {
            TickMode::LinOrPower => log_axis,
            TickMode::Lin => false,
            TickMode::Power => true,
        }
    }
}

impl FromStr for TickMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lin_or_power" => Ok(TickMode::LinOrPower),
            "lin" => Ok(TickMode::Lin),
            "power" => Ok(TickMode::Power),
            _ => Err(unknown("TickMode", s)),
        }
    }
}

/// Where the axis label sits along the axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LabelPosition {
    /// Next to the minimum
    Min,
    /// Centered
    #[default]
    Center,
    /// Next to the maximum
    Max,
}

impl LabelPosition {
    /// Name of the position in persisted settings
    pub const fn as_str(&self) -> &'static str {
        match self {
            LabelPosition::Min => "min",
            LabelPosition::Center => "center",
            LabelPosition::Max => "max",
        }
    }
}

impl FromStr for LabelPosition {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" => Ok(LabelPosition::Min),
            "center" => Ok(LabelPosition::Center),
            "max" => Ok(LabelPosition::Max),
            _ => Err(unknown("LabelPosition", s)),
        }
    }
}

/// Line pattern defines how the line is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinePattern {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line
    Dash,
    /// Dotted line
    Dot,
    /// Alternating dashes and dots
    DashDot,
    /// A dash followed by two dots
    DashDotDot,
}

const DASH: &[f32] = &[4.0, 2.0];
const DOT: &[f32] = &[1.0, 2.0];
const DASH_DOT: &[f32] = &[4.0, 2.0, 1.0, 2.0];
const DASH_DOT_DOT: &[f32] = &[4.0, 2.0, 1.0, 2.0, 1.0, 2.0];

impl LinePattern {
    /// Name of the pattern in persisted settings
    pub const fn as_str(&self) -> &'static str {
        match self {
            LinePattern::Solid => "solid",
            LinePattern::Dash => "dash",
            LinePattern::Dot => "dot",
            LinePattern::DashDot => "dash_dot",
            LinePattern::DashDotDot => "dash_dot_dot",
        }
    }

    /// The render pattern, relative to the line width
    pub const fn to_render(self) -> render::LinePattern<'static> {
        match self {
            LinePattern::Solid => render::LinePattern::Solid,
            LinePattern::Dash => render::LinePattern::Dash(DASH),
            LinePattern::Dot => render::LinePattern::Dash(DOT),
            LinePattern::DashDot => render::LinePattern::Dash(DASH_DOT),
            LinePattern::DashDotDot => render::LinePattern::Dash(DASH_DOT_DOT),
        }
    }
}

impl FromStr for LinePattern {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(LinePattern::Solid),
            "dash" => Ok(LinePattern::Dash),
            "dot" => Ok(LinePattern::Dot),
            "dash_dot" => Ok(LinePattern::DashDot),
            "dash_dot_dot" => Ok(LinePattern::DashDotDot),
            _ => Err(unknown("LinePattern", s)),
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(DrawMode, TickMode, LabelPosition, LinePattern);

/// Line style definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Line color
    pub color: ColorU8,
    /// Line width in points
    pub width: f32,
    /// Line pattern
    pub pattern: LinePattern,
}

impl Line {
    /// Set the line width in points, returning self for chaining
    pub fn with_width(self, width: f32) -> Self {
        Line { width, ..self }
    }

    /// Set the line pattern, returning self for chaining
    pub fn with_pattern(self, pattern: LinePattern) -> Self {
        Line { pattern, ..self }
    }

    /// Convert to a renderable stroke.
    /// The width is scaled by `pt_to_px` and floored at the minimal pen width.
    pub fn as_stroke(&self, pt_to_px: f32) -> render::Stroke<'static> {
        render::Stroke {
            color: self.color,
            width: (self.width * pt_to_px).max(crate::limits::MIN_LINE_WIDTH),
            pattern: self.pattern.to_render(),
        }
    }
}

impl From<(ColorU8, f32)> for Line {
    fn from((color, width): (ColorU8, f32)) -> Self {
        Line {
            color,
            width,
            pattern: LinePattern::default(),
        }
    }
}

impl From<(ColorU8, f32, LinePattern)> for Line {
    fn from((color, width, pattern): (ColorU8, f32, LinePattern)) -> Self {
        Line {
            color,
            width,
            pattern,
        }
    }
}

/// Grid lines drawn across the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    /// Whether the grid is drawn
    pub enabled: bool,
    /// The grid line
    pub line: Line,
}

/// Presentation properties of an axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStyle {
    /// Label digits used when `auto_label_digits` is false
    pub label_digits: usize,
    /// Estimate the label digits from the tick spacing
    pub auto_label_digits: bool,
    /// Draw labels on minor ticks
    pub minor_tick_labels_enabled: bool,
    /// Textual rendering of tick values
    pub tick_label_type: LabelType,
    /// How major ticks progress
    pub tick_mode: TickMode,
    /// Position of the axis label
    pub label_position: LabelPosition,
    /// Font size of the axis label
    pub label_font_size: f32,
    /// Font size of the tick labels
    pub tick_label_font_size: f32,
    /// Font size of the minor tick labels
    pub minor_tick_label_font_size: f32,
    /// Minor tick labels show the full value, instead of the leading digit only
    pub minor_tick_label_full_number: bool,
    /// Draw a line at zero when it lies inside the range
    pub show_zero_axis: bool,
    /// Persisted but not drawn
    pub draw_mode0: DrawMode,
    /// What is drawn on the bottom (horizontal) or left (vertical) side
    pub draw_mode1: DrawMode,
    /// What is drawn on the top (horizontal) or right (vertical) side
    pub draw_mode2: DrawMode,
    /// Color of the major ticks
    pub tick_color: ColorU8,
    /// Color of the minor ticks
    pub minor_tick_color: ColorU8,
    /// Color of the axis line
    pub axis_color: ColorU8,
    /// Color of the axis label
    pub label_color: ColorU8,
    /// Color of the tick labels
    pub tick_label_color: ColorU8,
    /// Color of the minor tick labels
    pub minor_tick_label_color: ColorU8,
    /// Width of the minor ticks
    pub minor_tick_width: f32,
    /// Width of the major ticks
    pub tick_width: f32,
    /// Width of the axis line
    pub line_width: f32,
    /// Width of the zero line
    pub line_width_zero_axis: f32,
    /// Persisted but not drawn
    pub arrow_size_factor: f32,
    /// Format of time labels
    pub tick_time_format: String,
    /// Format of date labels
    pub tick_date_format: String,
    /// Format of date-time labels
    pub tick_datetime_format: String,
    /// Persisted but not used for formatting
    pub tick_printf_format: String,
    /// Minimal number of major ticks targeted by the spacing search
    pub min_ticks: u32,
    /// Number of minor ticks between two major ticks
    pub minor_ticks: u32,
    /// Length of the major ticks outside the plot area
    pub tick_outside_length: f32,
    /// Length of the major ticks inside the plot area
    pub tick_inside_length: f32,
    /// Length of the minor ticks outside the plot area
    pub minor_tick_outside_length: f32,
    /// Length of the minor ticks inside the plot area
    pub minor_tick_inside_length: f32,
    /// Distance between the ticks and their labels
    pub tick_label_distance: f32,
    /// Distance between the tick labels and the axis label
    pub label_distance: f32,
    /// Rotation of the tick labels, in degrees
    pub tick_label_angle: f32,
    /// Grid on major ticks
    pub major_grid: GridStyle,
    /// Grid on minor ticks
    pub minor_grid: GridStyle,
    /// Color of the zero line
    pub zero_axis_color: ColorU8,
    /// Pattern of the zero line
    pub zero_axis_pattern: LinePattern,
    /// Distance between the plot area and the axis lines
    pub axis_line_offset: f32,
}

impl Default for AxisStyle {
    fn default() -> Self {
        AxisStyle {
            label_digits: 3,
            auto_label_digits: true,
            minor_tick_labels_enabled: false,
            tick_label_type: LabelType::Exponent,
            tick_mode: TickMode::LinOrPower,
            label_position: LabelPosition::Center,
            label_font_size: 10.0,
            tick_label_font_size: 10.0,
            minor_tick_label_font_size: 8.0,
            minor_tick_label_full_number: true,
            show_zero_axis: true,
            draw_mode0: DrawMode::None,
            draw_mode1: DrawMode::All,
            draw_mode2: DrawMode::LineTicks,
            tick_color: color::BLACK,
            minor_tick_color: color::BLACK,
            axis_color: color::BLACK,
            label_color: color::BLACK,
            tick_label_color: color::BLACK,
            minor_tick_label_color: color::BLACK,
            minor_tick_width: 1.0,
            tick_width: 1.5,
            line_width: 1.5,
            line_width_zero_axis: 1.5,
            arrow_size_factor: 8.0,
            tick_time_format: "%H:%M:%S".to_string(),
            tick_date_format: "%Y-%m-%d".to_string(),
            tick_datetime_format: "%Y-%m-%d %H:%M:%S".to_string(),
            tick_printf_format: "%f".to_string(),
            min_ticks: 5,
            minor_ticks: 1,
            tick_outside_length: 3.0,
            tick_inside_length: 3.0,
            minor_tick_outside_length: 1.5,
            minor_tick_inside_length: 1.5,
            tick_label_distance: 4.0,
            label_distance: 5.0,
            tick_label_angle: 0.0,
            major_grid: GridStyle {
                enabled: true,
                line: (color::GRAY, 0.75, LinePattern::Dash).into(),
            },
            minor_grid: GridStyle {
                enabled: false,
                line: (color::LIGHTGRAY, 0.5, LinePattern::Dot).into(),
            },
            zero_axis_color: color::BLACK,
            zero_axis_pattern: LinePattern::Solid,
            axis_line_offset: 0.0,
        }
    }
}

impl AxisStyle {
    /// Style of an axis drawn next to a color bar:
    /// a plain line on side 1, everything on side 2, no minor ticks.
    pub fn colorbar() -> Self {
        AxisStyle {
            draw_mode1: DrawMode::Line,
            draw_mode2: DrawMode::All,
            minor_ticks: 0,
            tick_outside_length: 0.0,
            minor_tick_outside_length: 0.0,
            show_zero_axis: false,
            ..Default::default()
        }
    }

    /// The axis line
    pub fn axis_line(&self) -> Line {
        (self.axis_color, self.line_width).into()
    }

    /// The major tick line
    pub fn tick_line(&self) -> Line {
        (self.tick_color, self.tick_width).into()
    }

    /// The minor tick line
    pub fn minor_tick_line(&self) -> Line {
        (self.minor_tick_color, self.minor_tick_width).into()
    }

    /// The zero line
    pub fn zero_axis_line(&self) -> Line {
        (
            self.zero_axis_color,
            self.line_width_zero_axis,
            self.zero_axis_pattern,
        )
            .into()
    }
}
