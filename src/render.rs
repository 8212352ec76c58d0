//! Render module: abstraction over the surfaces axes draw on, like SVG or GUI canvases.
//!
//! All rendering surfaces must implement the [`Surface`] trait.
//! See the `plotaxis-svg` crate for an example.
//!
//! Every length handed to a surface (coordinates, line widths, font sizes) is in surface pixels.
//! Axes convert their point-based style values with [`TextMeasure::pt_to_px`].

use crate::{ColorU8, geom};

/// Measures text, so that axes can reserve room for their labels
pub trait TextMeasure {
    /// Metrics of `text` rendered with a font of `font_size` pixels
    fn text_metrics(&self, text: &str, font_size: f32) -> TextMetrics;

    /// Number of surface pixels in a typographic point
    fn pt_to_px(&self) -> f32 {
        1.0
    }
}

/// Surface trait: defines the rendering surface API
pub trait Surface: TextMeasure {
    /// Prepare the surface for drawing, with the given size in pixels
    fn prepare(&mut self, size: geom::Size);

    /// Fill the entire surface with the given fill pattern
    fn fill(&mut self, fill: Paint);

    /// Draw a rectangle
    ///
    /// Default implementation converts the rectangle to a path and call [`draw_path`](Surface::draw_path)
    fn draw_rect(&mut self, rect: &Rect) {
        let Some(path) = rect.rect.to_path() else {
            return;
        };
        let rpath = self::Path {
            path: &path,
            fill: rect.fill,
            stroke: rect.stroke,
            transform: rect.transform,
        };
        self.draw_path(&rpath);
    }

    /// Draw a path
    fn draw_path(&mut self, path: &Path);

    /// Draw a single line of text
    fn draw_text(&mut self, text: &Text);
}

/// Size of a piece of text, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Advance width
    pub width: f32,
    /// Height above the baseline
    pub ascent: f32,
    /// Depth below the baseline (positive)
    pub descent: f32,
    /// Height of the strike-out line above the baseline
    pub strikeout_pos: f32,
}

impl TextMetrics {
    /// Total height of the text
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Paint pattern, used for fill operations
#[derive(Debug, Clone, Copy)]
pub enum Paint {
    /// Solid color fill
    Solid(ColorU8),
}

impl From<ColorU8> for Paint {
    fn from(value: ColorU8) -> Self {
        Paint::Solid(value)
    }
}

/// Line pattern defines how the line is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LinePattern<'a> {
    /// Solid line
    #[default]
    Solid,
    /// Dashed line. The pattern is relative to the line width.
    Dash(&'a [f32]),
}

/// Stroke style definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    /// Line color
    pub color: ColorU8,
    /// Line width in pixels
    pub width: f32,
    /// Line pattern
    pub pattern: LinePattern<'a>,
}

/// Rectangle to draw
#[derive(Debug, Clone)]
pub struct Rect<'a> {
    /// Rectangle geometry
    pub rect: geom::Rect,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the rectangle
    pub transform: Option<&'a geom::Transform>,
}

/// Path to draw
#[derive(Debug, Clone)]
pub struct Path<'a> {
    /// Path geometry
    pub path: &'a geom::Path,
    /// Fill style
    pub fill: Option<Paint>,
    /// Stroke style
    pub stroke: Option<Stroke<'a>>,
    /// Optional transform to apply to the path
    pub transform: Option<&'a geom::Transform>,
}

/// Horizontal alignment of a text relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// The anchor is at the start of the text
    #[default]
    Start,
    /// The anchor is at the middle of the text
    Middle,
    /// The anchor is at the end of the text
    End,
}

/// A single line of text to draw.
///
/// The text is laid out with its anchor at the origin, on the baseline,
/// then mapped by `transform`.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    /// The text
    pub text: &'a str,
    /// Font size in pixels
    pub font_size: f32,
    /// Text color
    pub color: ColorU8,
    /// Horizontal alignment
    pub anchor: TextAnchor,
    /// Placement of the anchor point
    pub transform: geom::Transform,
}
