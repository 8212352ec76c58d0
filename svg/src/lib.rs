//! SVG rendering of plotaxis axes.
//!
//! [`SvgSurface`] implements [`render::Surface`] by appending SVG elements to a document.
//! Text is not shaped: its metrics are estimated from the font size,
//! which is enough to lay out tick labels of digits and short words.
use std::path::Path;
use std::{fmt, io};

use plotaxis::geom::{self, Transform};
use plotaxis::plot::AxisPair;
use plotaxis::render::{self, Surface, TextMeasure, TextMetrics};
use svg::Node;
use svg::node::element;

/// Average advance of a glyph, relative to the font size
const CHAR_WIDTH: f32 = 0.6;
const ASCENT: f32 = 0.75;
const DESCENT: f32 = 0.25;
const STRIKEOUT: f32 = 0.3;

/// Error returned when saving a document
#[derive(Debug)]
pub enum Error {
    /// Writing the document failed
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
        }
    }
}

/// Parameters needed for saving axes as SVG
#[derive(Debug, Clone)]
pub struct DrawingParams {
    /// Size of the document, in pixels
    pub size: geom::Size,
    /// Number of pixels in a typographic point
    pub pt_to_px: f32,
    /// Place the plot area so that the axes fit in the document
    pub fit: bool,
}

impl Default for DrawingParams {
    fn default() -> Self {
        Self {
            size: geom::Size::new(600.0, 400.0),
            pt_to_px: 1.0,
            fit: true,
        }
    }
}

/// Save to an SVG file
pub trait SaveSvg {
    /// Render into a document of `params.size` and write it to `path`
    fn save_svg<P>(&mut self, path: P, params: &DrawingParams) -> Result<(), Error>
    where
        P: AsRef<Path>;
}

impl SaveSvg for AxisPair {
    fn save_svg<P>(&mut self, path: P, params: &DrawingParams) -> Result<(), Error>
    where
        P: AsRef<Path>,
    {
        let surface = render_axes(self, params);
        surface.save_svg(path)?;
        Ok(())
    }
}

/// Draw a pair of axes on a new SVG surface, with a white background.
///
/// With `params.fit`, the plot area is placed so that the axes fit in the document.
/// If they don't, the plot area is left where it is.
pub fn render_axes(axes: &mut AxisPair, params: &DrawingParams) -> SvgSurface {
    let width = params.size.width() as u32;
    let height = params.size.height() as u32;
    let mut surface = SvgSurface::new(width, height).with_pt_to_px(params.pt_to_px);
    surface.prepare(params.size);
    surface.fill(plotaxis::color::WHITE.into());

    if params.fit && !axes.fit_into(params.size, &surface) {
        log::warn!(
            "Axes don't fit in {}x{}, keeping the plot area at {:?}",
            width,
            height,
            axes.plot_rect()
        );
    }
    axes.draw(&mut surface);
    surface
}

/// A surface drawing to an SVG document
#[derive(Debug)]
pub struct SvgSurface {
    doc: svg::Document,
    font_family: String,
    pt_to_px: f32,
}

impl SvgSurface {
    /// Create an empty document of `width` by `height` pixels
    pub fn new(width: u32, height: u32) -> Self {
        let doc = svg::Document::new()
            .set("width", width)
            .set("height", height);
        SvgSurface {
            doc,
            font_family: "sans-serif".to_string(),
            pt_to_px: 1.0,
        }
    }

    /// Set the number of pixels in a typographic point
    pub fn with_pt_to_px(self, pt_to_px: f32) -> Self {
        SvgSurface { pt_to_px, ..self }
    }

    /// Set the font family of the text elements
    pub fn with_font_family(self, font_family: impl Into<String>) -> Self {
        SvgSurface {
            font_family: font_family.into(),
            ..self
        }
    }

    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        svg::save(path, &self.doc)
    }

    pub fn write<W>(&self, dest: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        svg::write(dest, &self.doc)
    }

    fn append_node<T>(&mut self, node: T)
    where
        T: Node,
    {
        self.doc.append(node);
    }
}

impl TextMeasure for SvgSurface {
    fn text_metrics(&self, text: &str, font_size: f32) -> TextMetrics {
        TextMetrics {
            width: CHAR_WIDTH * font_size * text.chars().count() as f32,
            ascent: ASCENT * font_size,
            descent: DESCENT * font_size,
            strikeout_pos: STRIKEOUT * font_size,
        }
    }

    fn pt_to_px(&self) -> f32 {
        self.pt_to_px
    }
}

impl Surface for SvgSurface {
    /// Prepare the surface for drawing, with the given width and height in pixels
    fn prepare(&mut self, size: geom::Size) {
        self.doc
            .assign("viewBox", (0, 0, size.width(), size.height()));
    }

    /// Fill the entire surface with the given color
    fn fill(&mut self, fill: render::Paint) {
        let mut node = element::Rectangle::new()
            .set("width", "100%")
            .set("height", "100%");
        match fill {
            render::Paint::Solid(color) => node.assign("fill", color.html()),
        }
        self.append_node(node);
    }

    fn draw_rect(&mut self, rect: &render::Rect) {
        let mut node = rectangle_node(&rect.rect);
        assign_fill(&mut node, rect.fill.as_ref());
        assign_stroke(&mut node, rect.stroke.as_ref());
        assign_transform(&mut node, rect.transform);
        self.append_node(node);
    }

    fn draw_path(&mut self, path: &render::Path) {
        let mut node = element::Path::new();
        assign_fill(&mut node, path.fill.as_ref());
        assign_stroke(&mut node, path.stroke.as_ref());
        assign_transform(&mut node, path.transform);
        node.assign("d", path_data(path.path));
        self.append_node(node);
    }

    fn draw_text(&mut self, text: &render::Text) {
        let anchor = match text.anchor {
            render::TextAnchor::Start => "start",
            render::TextAnchor::Middle => "middle",
            render::TextAnchor::End => "end",
        };
        let mut node = element::Text::new(text.text)
            .set("font-family", self.font_family.as_str())
            .set("font-size", text.font_size)
            .set("text-anchor", anchor);
        assign_fill(&mut node, Some(&render::Paint::Solid(text.color)));
        assign_transform(&mut node, Some(&text.transform));
        self.append_node(node);
    }
}

fn assign_transform<N>(node: &mut N, transform: Option<&geom::Transform>)
where
    N: Node,
{
    if let Some(Transform {
        sx,
        kx,
        ky,
        sy,
        tx,
        ty,
    }) = transform
    {
        node.assign(
            "transform",
            format!("matrix({sx} {ky} {kx} {sy} {tx} {ty})"),
        );
    }
}

fn assign_fill<N>(node: &mut N, fill: Option<&render::Paint>)
where
    N: Node,
{
    if let Some(render::Paint::Solid(color)) = fill {
        node.assign("fill", color.html());
        if let Some(opacity) = color.opacity() {
            node.assign("fill-opacity", opacity);
        }
    } else {
        node.assign("fill", "none");
    }
}

fn assign_stroke<N>(node: &mut N, stroke: Option<&render::Stroke>)
where
    N: Node,
{
    if let Some(stroke) = stroke {
        let w = stroke.width;
        node.assign("stroke", stroke.color.html());
        node.assign("stroke-width", w);
        if let Some(opacity) = stroke.color.opacity() {
            node.assign("stroke-opacity", opacity);
        }
        match stroke.pattern {
            render::LinePattern::Solid => (),
            render::LinePattern::Dash(dash) => {
                let array: Vec<f32> = dash.iter().map(|d| d * w).collect();
                node.assign("stroke-dasharray", array)
            }
        }
    } else {
        node.assign("stroke", "none");
    }
}

fn path_data(path: &geom::Path) -> element::path::Data {
    let mut data = element::path::Data::new();
    for segment in path.segments() {
        match segment {
            geom::PathSegment::MoveTo(p) => {
                data = data.move_to((p.x, p.y));
            }
            geom::PathSegment::LineTo(p) => {
                data = data.line_to((p.x, p.y));
            }
            geom::PathSegment::QuadTo(p1, p2) => {
                data = data.quadratic_curve_to((p1.x, p1.y, p2.x, p2.y));
            }
            geom::PathSegment::CubicTo(p1, p2, p3) => {
                data = data.cubic_curve_to((p1.x, p1.y, p2.x, p2.y, p3.x, p3.y));
            }
            geom::PathSegment::Close => {
                data = data.close();
            }
        }
    }
    data
}

fn rectangle_node(rect: &geom::Rect) -> element::Rectangle {
    element::Rectangle::new()
        .set("x", rect.x())
        .set("y", rect.y())
        .set("width", rect.width())
        .set("height", rect.height())
}

#[cfg(test)]
mod tests {
    use plotaxis::{LabelType, color};

    use super::*;

    fn render_to_string(axes: &mut AxisPair, params: &DrawingParams) -> String {
        let surface = render_axes(axes, params);
        let mut buf = Vec::new();
        surface.write(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    /// Opening tags and contents of the text elements
    fn texts(svg: &str) -> Vec<(&str, &str)> {
        svg.split("<text")
            .skip(1)
            .filter_map(|part| {
                let (tag, rest) = part.split_once('>')?;
                let (content, _) = rest.split_once("</text>")?;
                Some((tag, content.trim()))
            })
            .collect()
    }

    fn axes() -> AxisPair {
        let rect = geom::Rect::from_xywh(0.0, 0.0, 600.0, 400.0).unwrap();
        let mut axes = AxisPair::new(rect);
        axes.x_mut().set_range(0.0, 100.0);
        axes.y_mut().set_range(0.0, 1.0);
        axes.y_mut().set_axis_label("Amplitude");
        axes
    }

    #[test]
    fn test_text_metrics() {
        let surface = SvgSurface::new(100, 100).with_pt_to_px(2.0);
        let m = surface.text_metrics("100", 10.0);
        assert_eq!(m.width, 18.0);
        assert_eq!(m.height(), 10.0);
        assert_eq!(surface.pt_to_px(), 2.0);
    }

    #[test]
    fn test_render_axes() {
        let mut axes = axes();
        let svg = render_to_string(&mut axes, &DrawingParams::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 600 400\""));
        let texts = texts(&svg);
        let label = texts.iter().find(|(_, c)| *c == "Amplitude").unwrap();
        assert!(label.0.contains("text-anchor=\"middle\""));
        let tick = texts.iter().find(|(_, c)| *c == "100").unwrap();
        assert!(tick.0.contains("text-anchor=\"middle\""));
        let tick = texts.iter().find(|(_, c)| *c == "0.2").unwrap();
        assert!(tick.0.contains("text-anchor=\"end\""));
        // the major grid is dashed
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains(&color::GRAY.html()));

        // the plot area leaves room for the axes
        let r = axes.plot_rect();
        assert!(r.left() > 0.0);
        assert!(r.bottom() < 400.0);
    }

    #[test]
    fn test_date_axis() {
        let mut axes = axes();
        axes.x_mut().style_mut().tick_label_type = LabelType::Date;
        // 2024-01-01 to 2024-01-11
        let start = 1_704_067_200_000.0;
        axes.x_mut().set_range(start, start + 10.0 * 86_400_000.0);
        let svg = render_to_string(&mut axes, &DrawingParams::default());
        assert!(texts(&svg).iter().any(|(_, c)| *c == "2024-01-02"));
    }

    #[test]
    fn test_rotated_label() {
        let mut axes = axes();
        let svg = render_to_string(
            &mut axes,
            &DrawingParams {
                fit: false,
                ..Default::default()
            },
        );
        // the y axis label is rotated by -90°
        let texts = texts(&svg);
        let (tag, _) = texts
            .iter()
            .find(|(_, c)| *c == "Amplitude")
            .expect("axis label");
        assert!(tag.contains(" -1 1 "), "{tag}");
        let (tag, _) = texts.iter().find(|(_, c)| *c == "100").unwrap();
        assert!(tag.contains("matrix(1 0 0 1 "), "{tag}");
    }

    #[test]
    fn test_too_small_to_fit() {
        let mut axes = axes();
        let before = *axes.plot_rect();
        let svg = render_to_string(
            &mut axes,
            &DrawingParams {
                size: geom::Size::new(20.0, 20.0),
                ..Default::default()
            },
        );
        assert_eq!(*axes.plot_rect(), before);
        assert!(svg.contains("viewBox=\"0 0 20 20\""));
    }
}
