//! Measurement and drawing of axes.
//!
//! An axis draws on the two sides of the plot area it is attached to.
//! Side 1 is the bottom of horizontal axes and the left of vertical axes,
//! side 2 is the opposite one. What each side shows is controlled by
//! [`AxisStyle::draw_mode1`](crate::AxisStyle::draw_mode1) and
//! [`AxisStyle::draw_mode2`](crate::AxisStyle::draw_mode2).
use super::{Axis, Orientation, Tick};
use crate::color;
use crate::geom;
use crate::limits::{DRAWN_TICKS, MEASURED_LABELS};
use crate::render::{self, Surface, TextAnchor, TextMeasure};
use crate::scale::CoordMap;
use crate::style::{DrawMode, GridStyle};
use crate::ColorU8;

/// Bounding box of the largest tick label, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelExtent {
    /// Largest width
    pub width: f32,
    /// Largest height
    pub height: f32,
    /// Largest ascent
    pub ascent: f32,
    /// `height - ascent`
    pub descent: f32,
}

impl LabelExtent {
    /// Extent perpendicular to an axis of the given orientation
    pub fn across(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.height,
            Orientation::Vertical => self.width,
        }
    }
}

/// Pixel extents of the plot area
#[derive(Debug, Clone, Copy)]
struct Frame {
    start: f32,
    end: f32,
    other: (f32, f32),
}

/// One side of the axis: where it lies across the plot area and in which direction is the outside
#[derive(Debug, Clone, Copy)]
struct Side {
    mode: DrawMode,
    across: f32,
    out: f32,
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font_size: f32,
    color: ColorU8,
}

impl Axis {
    fn point(&self, along: f32, across: f32) -> (f32, f32) {
        match self.orientation {
            Orientation::Horizontal => (along, across),
            Orientation::Vertical => (across, along),
        }
    }

    fn frame(&self) -> Option<Frame> {
        let p0 = self.to_pixel(self.min()) as f32;
        let p1 = self.to_pixel(self.max()) as f32;
        let (o0, o1) = self.geometry.other_span();
        let frame = Frame {
            start: p0.min(p1),
            end: p0.max(p1),
            other: (o0 as f32, o1 as f32),
        };
        let finite = [frame.start, frame.end, frame.other.0, frame.other.1]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            log::debug!("{:?} axis: non-finite plot frame {frame:?}", self.orientation);
            return None;
        }
        Some(frame)
    }

    fn sides(&self, frame: &Frame, pt_to_px: f32) -> [Side; 2] {
        let off = self.style.axis_line_offset * pt_to_px;
        let (o0, o1) = frame.other;
        match self.orientation {
            Orientation::Horizontal => [
                Side {
                    mode: self.style.draw_mode1,
                    across: o1 + off,
                    out: 1.0,
                },
                Side {
                    mode: self.style.draw_mode2,
                    across: o0 - off,
                    out: -1.0,
                },
            ],
            Orientation::Vertical => [
                Side {
                    mode: self.style.draw_mode1,
                    across: o0 - off,
                    out: -1.0,
                },
                Side {
                    mode: self.style.draw_mode2,
                    across: o1 + off,
                    out: 1.0,
                },
            ],
        }
    }

    fn in_range(&self, x: f64) -> bool {
        x >= self.min() && x <= self.max()
    }

    /// Bounding box of the largest tick label, rotated by the tick label angle.
    /// Only the first labels inside the range are measured.
    pub fn max_tick_label_extent<M>(&self, measure: &M) -> LabelExtent
    where
        M: TextMeasure + ?Sized,
    {
        let font_size = self.style.tick_label_font_size * measure.pt_to_px();
        let mut ext = LabelExtent::default();
        for tick in self
            .ticks()
            .filter(|t| !t.label.is_empty() && self.in_range(t.pos))
            .take(MEASURED_LABELS)
        {
            let m = measure.text_metrics(&tick.label, font_size);
            let sz = geom::Size::new(m.width, m.height()).rotated(self.style.tick_label_angle);
            ext.width = ext.width.max(sz.width());
            ext.height = ext.height.max(sz.height());
            ext.ascent = ext.ascent.max(m.ascent);
        }
        ext.descent = (ext.height - ext.ascent).max(0.0);
        ext
    }

    /// Room needed outside the plot area on side 1 (bottom or left), in pixels
    pub fn size1<M>(&self, measure: &M) -> f32
    where
        M: TextMeasure + ?Sized,
    {
        self.side_size(self.style.draw_mode1, measure)
    }

    /// Room needed outside the plot area on side 2 (top or right), in pixels
    pub fn size2<M>(&self, measure: &M) -> f32
    where
        M: TextMeasure + ?Sized,
    {
        self.side_size(self.style.draw_mode2, measure)
    }

    fn side_size<M>(&self, mode: DrawMode, measure: &M) -> f32
    where
        M: TextMeasure + ?Sized,
    {
        let px = measure.pt_to_px();
        let mut size = self.style.axis_line_offset * px;
        if mode.has_ticks() {
            size += self.style.tick_outside_length * px;
        }
        if mode.has_tick_labels() {
            size += self.style.tick_label_distance * px;
            size += self.max_tick_label_extent(measure).across(self.orientation);
        }
        if mode.has_axis_label() && !self.params.axis_label.is_empty() {
            let m = measure.text_metrics(&self.params.axis_label, self.style.label_font_size * px);
            size += self.style.label_distance * px + m.height();
        }
        size
    }

    /// Draw the axis lines, the ticks, the tick labels, the zero line and the axis label
    pub fn draw_axes<S>(&self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        let Some(frame) = self.frame() else {
            return;
        };
        let px = surface.pt_to_px();
        let sides = self.sides(&frame, px);
        let (min, max) = (self.min(), self.max());
        let ticks: Vec<Tick> = self.ticks().take(DRAWN_TICKS).collect();

        if self.style.show_zero_axis && min < 0.0 && 0.0 < max {
            let p = self.to_pixel(0.0) as f32;
            let ext = self.style.tick_outside_length * px;
            let a = sides[0].across.min(sides[1].across) - ext;
            let b = sides[0].across.max(sides[1].across) + ext;
            let mut pb = geom::PathBuilder::new();
            self.segment(&mut pb, p, a, b);
            stroke_path(surface, pb, self.style.zero_axis_line().as_stroke(px));
        }

        let extent = self.max_tick_label_extent(&*surface);

        for side in sides.iter() {
            if side.mode.has_ticks() {
                self.draw_side_ticks(surface, side, &ticks, px);
            }
            if side.mode.has_tick_labels() {
                self.draw_side_tick_labels(surface, side, &ticks, &extent, px);
            }
            if side.mode.has_line() {
                let mut pb = geom::PathBuilder::new();
                let (x0, y0) = self.point(frame.start, side.across);
                let (x1, y1) = self.point(frame.end, side.across);
                pb.move_to(x0, y0);
                pb.line_to(x1, y1);
                stroke_path(surface, pb, self.style.axis_line().as_stroke(px));
            }
            if side.mode.has_axis_label() && !self.params.axis_label.is_empty() {
                self.draw_axis_label(surface, side, &frame, &extent, px);
            }
        }

        if self.debug_region_boxes {
            self.draw_debug_boxes(surface, &frame, &sides);
        }
    }

    /// Draw the major and minor grids across the plot area.
    /// Grid lines are drawn strictly inside the range.
    pub fn draw_grids<S>(&self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        let Some(frame) = self.frame() else {
            return;
        };
        let px = surface.pt_to_px();
        let (min, max) = (self.min(), self.max());
        let inside = |x: &f64| *x > min && *x < max;

        let major = &self.style.major_grid;
        let minor = &self.style.minor_grid;
        let with_minor =
            minor.enabled && self.tick_labels.is_empty() && self.style.minor_ticks > 0;
        if !major.enabled && !with_minor {
            return;
        }

        let ticks: Vec<f64> = self.ticks().take(DRAWN_TICKS).map(|t| t.pos).collect();
        if with_minor {
            let locs = ticks
                .iter()
                .flat_map(|x| self.minor_ticks(*x))
                .filter(inside);
            self.draw_grid(surface, minor, locs, &frame, px);
        }
        if major.enabled {
            let locs = ticks.iter().copied().filter(inside);
            self.draw_grid(surface, major, locs, &frame, px);
        }
    }

    fn draw_grid<S, I>(&self, surface: &mut S, grid: &GridStyle, locs: I, frame: &Frame, px: f32)
    where
        S: Surface + ?Sized,
        I: Iterator<Item = f64>,
    {
        let mut pb = geom::PathBuilder::new();
        for x in locs {
            self.segment(&mut pb, self.to_pixel(x) as f32, frame.other.0, frame.other.1);
        }
        stroke_path(surface, pb, grid.line.as_stroke(px));
    }

    fn segment(&self, pb: &mut geom::PathBuilder, along: f32, across0: f32, across1: f32) {
        let (x0, y0) = self.point(along, across0);
        let (x1, y1) = self.point(along, across1);
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
    }

    fn draw_side_ticks<S>(&self, surface: &mut S, side: &Side, ticks: &[Tick], px: f32)
    where
        S: Surface + ?Sized,
    {
        let s = &self.style;

        let inside = side.across - side.out * s.tick_inside_length * px;
        let outside = side.across + side.out * s.tick_outside_length * px;
        let mut pb = geom::PathBuilder::new();
        for t in ticks.iter().filter(|t| self.in_range(t.pos)) {
            self.segment(&mut pb, self.to_pixel(t.pos) as f32, inside, outside);
        }
        stroke_path(surface, pb, s.tick_line().as_stroke(px));

        let inside = side.across - side.out * s.minor_tick_inside_length * px;
        let outside = side.across + side.out * s.minor_tick_outside_length * px;
        let mut pb = geom::PathBuilder::new();
        for t in ticks.iter() {
            for mx in self.minor_ticks(t.pos) {
                self.segment(&mut pb, self.to_pixel(mx) as f32, inside, outside);
            }
        }
        stroke_path(surface, pb, s.minor_tick_line().as_stroke(px));
    }

    fn draw_side_tick_labels<S>(
        &self,
        surface: &mut S,
        side: &Side,
        ticks: &[Tick],
        extent: &LabelExtent,
        px: f32,
    ) where
        S: Surface + ?Sized,
    {
        let s = &self.style;
        let major = TextStyle {
            font_size: s.tick_label_font_size * px,
            color: s.tick_label_color,
        };
        let dist = (s.tick_outside_length + s.tick_label_distance) * px;
        for t in ticks.iter().filter(|t| !t.label.is_empty() && self.in_range(t.pos)) {
            self.draw_tick_label(surface, side, t.pos, &t.label, &major, dist, extent);
        }

        if !(side.mode.has_tick_labels() && s.minor_tick_labels_enabled) {
            return;
        }
        let minor = TextStyle {
            font_size: s.minor_tick_label_font_size * px,
            color: s.minor_tick_label_color,
        };
        let dist = (s.minor_tick_outside_length + s.tick_label_distance) * px;
        for t in ticks.iter() {
            for mx in self.minor_ticks(t.pos) {
                let label = self.format_label(self.minor_label_value(mx));
                self.draw_tick_label(surface, side, mx, &label, &minor, dist, extent);
            }
        }
    }

    /// Minor tick labels of log axes show the leading digit only,
    /// unless the full number is requested.
    fn minor_label_value(&self, mx: f64) -> f64 {
        if self.style.minor_tick_label_full_number || !self.params.log {
            return mx;
        }
        let base = self.params.log_base;
        mx / base.powf((mx.ln() / base.ln()).floor())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_tick_label<S>(
        &self,
        surface: &mut S,
        side: &Side,
        pos: f64,
        label: &str,
        style: &TextStyle,
        dist: f32,
        extent: &LabelExtent,
    ) where
        S: Surface + ?Sized,
    {
        let p = self.to_pixel(pos) as f32;
        let angle = self.style.tick_label_angle;
        let m = surface.text_metrics(label, style.font_size);

        let (anchor, transform) = match self.orientation {
            Orientation::Horizontal if angle != 0.0 => {
                let anchor = if (angle < 0.0) == (side.out > 0.0) {
                    TextAnchor::End
                } else {
                    TextAnchor::Start
                };
                let y = side.across + side.out * dist;
                let transform = geom::Transform::from_translate(p, y)
                    .pre_rotate(angle)
                    .pre_translate(0.0, m.strikeout_pos);
                (anchor, transform)
            }
            Orientation::Horizontal => {
                let y = if side.out > 0.0 {
                    side.across + dist + extent.ascent
                } else {
                    side.across - dist - extent.descent
                };
                (TextAnchor::Middle, geom::Transform::from_translate(p, y))
            }
            Orientation::Vertical => {
                let anchor = if side.out > 0.0 {
                    TextAnchor::Start
                } else {
                    TextAnchor::End
                };
                let x = side.across + side.out * dist;
                let transform = geom::Transform::from_translate(x, p)
                    .pre_rotate(angle)
                    .pre_translate(0.0, m.strikeout_pos);
                (anchor, transform)
            }
        };

        surface.draw_text(&render::Text {
            text: label,
            font_size: style.font_size,
            color: style.color,
            anchor,
            transform,
        });
    }

    fn draw_axis_label<S>(
        &self,
        surface: &mut S,
        side: &Side,
        frame: &Frame,
        extent: &LabelExtent,
        px: f32,
    ) where
        S: Surface + ?Sized,
    {
        use crate::style::LabelPosition;

        let s = &self.style;
        let label = self.params.axis_label.as_str();
        let font_size = s.label_font_size * px;
        let m = surface.text_metrics(label, font_size);

        let mut dist = s.label_distance * px;
        if side.mode.has_ticks() {
            dist += s.tick_outside_length * px;
        }
        if side.mode.has_tick_labels() {
            dist += s.tick_label_distance * px + extent.across(self.orientation);
        }
        let mut across = side.across + side.out * dist;
        if side.out > 0.0 {
            across += m.ascent;
        } else {
            across -= m.descent;
        }

        let middle = (frame.start + frame.end) / 2.0;
        let (along, anchor) = match (self.orientation, s.label_position) {
            (_, LabelPosition::Center) => (middle, TextAnchor::Middle),
            (Orientation::Horizontal, LabelPosition::Min) => (frame.start, TextAnchor::Start),
            (Orientation::Horizontal, LabelPosition::Max) => (frame.end, TextAnchor::End),
            // rotated text reads upward, from the bottom (the minimum) of the plot area
            (Orientation::Vertical, LabelPosition::Min) => (frame.end, TextAnchor::Start),
            (Orientation::Vertical, LabelPosition::Max) => (frame.start, TextAnchor::End),
        };

        let transform = match self.orientation {
            Orientation::Horizontal => geom::Transform::from_translate(along, across),
            Orientation::Vertical => geom::Transform::from_translate(across, along).pre_rotate(-90.0),
        };
        surface.draw_text(&render::Text {
            text: label,
            font_size,
            color: s.label_color,
            anchor,
            transform,
        });
    }

    fn draw_debug_boxes<S>(&self, surface: &mut S, frame: &Frame, sides: &[Side; 2])
    where
        S: Surface + ?Sized,
    {
        let px = surface.pt_to_px();
        for (side, size) in sides.iter().zip([self.size1(&*surface), self.size2(&*surface)]) {
            let (x0, y0) = self.point(frame.start, side.across);
            let (x1, y1) = self.point(frame.end, side.across + side.out * size);
            let Some(rect) =
                geom::Rect::from_corners(geom::Point::from_xy(x0, y0), geom::Point::from_xy(x1, y1))
            else {
                continue;
            };
            surface.draw_rect(&render::Rect {
                rect,
                fill: None,
                stroke: Some(render::Stroke {
                    color: color::RED,
                    width: px,
                    pattern: render::LinePattern::Solid,
                }),
                transform: None,
            });
        }
    }
}

fn stroke_path<S>(surface: &mut S, pb: geom::PathBuilder, stroke: render::Stroke)
where
    S: Surface + ?Sized,
{
    // empty builders finish to None
    let Some(path) = pb.finish() else {
        return;
    };
    surface.draw_path(&render::Path {
        path: &path,
        fill: None,
        stroke: Some(stroke),
        transform: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::PlotGeometry;
    use crate::render::TextMetrics;
    use crate::style::LabelPosition;
    use crate::tests::{Near, assert_near};

    #[derive(Debug, Clone, PartialEq)]
    struct DrawnText {
        text: String,
        font_size: f32,
        anchor: TextAnchor,
        pos: (f32, f32),
        rotated: bool,
    }

    #[derive(Debug, Clone)]
    struct DrawnPath {
        color: ColorU8,
        width: f32,
        segments: Vec<((f32, f32), (f32, f32))>,
    }

    /// Records drawing calls, with text advancing half the font size per character
    #[derive(Debug, Default)]
    struct Recorder {
        pt_to_px: f32,
        paths: Vec<DrawnPath>,
        texts: Vec<DrawnText>,
    }

    impl Recorder {
        fn new(pt_to_px: f32) -> Self {
            Recorder {
                pt_to_px,
                ..Default::default()
            }
        }

        fn texts(&self) -> Vec<&str> {
            self.texts.iter().map(|t| t.text.as_str()).collect()
        }

        fn paths_of(&self, color: ColorU8, width: f32) -> Vec<&DrawnPath> {
            self.paths
                .iter()
                .filter(|p| p.color == color && p.width == width)
                .collect()
        }
    }

    impl TextMeasure for Recorder {
        fn text_metrics(&self, text: &str, font_size: f32) -> TextMetrics {
            TextMetrics {
                width: 0.5 * font_size * text.chars().count() as f32,
                ascent: 0.8 * font_size,
                descent: 0.2 * font_size,
                strikeout_pos: 0.3 * font_size,
            }
        }

        fn pt_to_px(&self) -> f32 {
            self.pt_to_px
        }
    }

    impl Surface for Recorder {
        fn prepare(&mut self, _size: geom::Size) {}

        fn fill(&mut self, _fill: render::Paint) {}

        fn draw_path(&mut self, path: &render::Path) {
            let stroke = path.stroke.expect("axes only stroke");
            let mut segments = Vec::new();
            let mut last = (0.0, 0.0);
            for seg in path.path.segments() {
                match seg {
                    geom::PathSegment::MoveTo(p) => last = (p.x, p.y),
                    geom::PathSegment::LineTo(p) => {
                        segments.push((last, (p.x, p.y)));
                        last = (p.x, p.y);
                    }
                    _ => {}
                }
            }
            self.paths.push(DrawnPath {
                color: stroke.color,
                width: stroke.width,
                segments,
            });
        }

        fn draw_text(&mut self, text: &render::Text) {
            self.texts.push(DrawnText {
                text: text.text.to_string(),
                font_size: text.font_size,
                anchor: text.anchor,
                pos: (text.transform.tx, text.transform.ty),
                rotated: text.transform.kx != 0.0,
            });
        }
    }

    const GEOMETRY: PlotGeometry = PlotGeometry {
        offset: 50.0,
        width: 400.0,
        other_offset: 20.0,
        other_width: 300.0,
        other_inverted: false,
    };

    fn axis(orientation: Orientation, min: f64, max: f64) -> Axis {
        let mut axis = Axis::new(orientation);
        axis.set_geometry(GEOMETRY);
        axis.set_range(min, max);
        axis
    }

    #[test]
    fn test_label_extent() {
        let rec = Recorder::new(1.0);
        let axis = axis(Orientation::Horizontal, 0.0, 100.0);
        let ext = axis.max_tick_label_extent(&rec);
        // "100" is the widest label
        assert_eq!(ext.width, 15.0);
        assert_eq!(ext.height, 10.0);
        assert_eq!(ext.ascent, 8.0);
        assert_near!(abs, ext.descent, 2.0_f32, 1e-5);

        let mut axis = axis;
        axis.style_mut().tick_label_angle = 90.0;
        let ext = axis.max_tick_label_extent(&rec);
        assert_near!(abs, ext.width, 10.0_f32, 1e-4);
        assert_near!(abs, ext.height, 15.0_f32, 1e-4);
    }

    #[test]
    fn test_sizes() {
        let rec = Recorder::new(1.0);
        let mut x = axis(Orientation::Horizontal, 0.0, 100.0);
        assert_eq!(x.size1(&rec), 3.0 + 4.0 + 10.0);
        assert_eq!(x.size2(&rec), 3.0);

        x.set_axis_label("Time");
        assert_eq!(x.size1(&rec), 3.0 + 4.0 + 10.0 + 5.0 + 10.0);

        let y = axis(Orientation::Vertical, 0.0, 100.0);
        assert_eq!(y.size1(&rec), 3.0 + 4.0 + 15.0);

        let rec = Recorder::new(2.0);
        assert_eq!(y.size1(&rec), 2.0 * (3.0 + 4.0 + 15.0));

        let mut y = y;
        y.style_mut().draw_mode1 = DrawMode::None;
        y.style_mut().axis_line_offset = 2.0;
        assert_eq!(y.size1(&rec), 4.0);
    }

    #[test]
    fn test_draw_horizontal() {
        let mut rec = Recorder::new(1.0);
        let axis = axis(Orientation::Horizontal, 0.0, 100.0);
        axis.draw_axes(&mut rec);

        assert_eq!(rec.texts(), vec!["0", "20", "40", "60", "80", "100"]);
        let t20 = &rec.texts[1];
        assert_eq!(t20.anchor, TextAnchor::Middle);
        assert_eq!(t20.pos, (130.0, 320.0 + 3.0 + 4.0 + 8.0));

        // major ticks of both sides
        let ticks = rec.paths_of(color::BLACK, 1.5);
        let bottom = ticks
            .iter()
            .find(|p| p.segments.len() == 6 && p.segments[0].0.1 == 317.0)
            .expect("bottom ticks");
        assert_eq!(bottom.segments[0], ((50.0, 317.0), (50.0, 323.0)));
        let top = ticks
            .iter()
            .find(|p| p.segments.len() == 6 && p.segments[0].0.1 == 23.0)
            .expect("top ticks");
        assert_eq!(top.segments[5], ((450.0, 23.0), (450.0, 17.0)));

        // axis lines on both sides
        assert!(ticks.iter().any(|p| p.segments == vec![((50.0, 320.0), (450.0, 320.0))]));
        assert!(ticks.iter().any(|p| p.segments == vec![((50.0, 20.0), (450.0, 20.0))]));

        // one minor tick between each pair of major ticks
        let minor = rec.paths_of(color::BLACK, 1.0);
        assert_eq!(minor.len(), 2);
        assert_eq!(minor[0].segments.len(), 5);
        assert_eq!(minor[0].segments[0], ((90.0, 318.5), (90.0, 321.5)));
    }

    #[test]
    fn test_draw_vertical() {
        let mut rec = Recorder::new(1.0);
        let mut y = Axis::new(Orientation::Vertical);
        y.set_geometry(PlotGeometry {
            offset: 20.0,
            width: 300.0,
            other_offset: 50.0,
            other_width: 400.0,
            other_inverted: false,
        });
        y.set_range(0.0, 10.0);
        y.style_mut().draw_mode2 = DrawMode::All;
        y.draw_axes(&mut rec);

        let left: Vec<&DrawnText> = rec
            .texts
            .iter()
            .filter(|t| t.anchor == TextAnchor::End)
            .collect();
        let right: Vec<&DrawnText> = rec
            .texts
            .iter()
            .filter(|t| t.anchor == TextAnchor::Start)
            .collect();
        assert_eq!(left.len(), 6);
        assert_eq!(right.len(), 6);
        // 0 is at the bottom, the baseline is shifted by the strikeout height
        assert_eq!(left[0].text, "0");
        assert_near!(abs, left[0].pos, (50.0_f32 - 7.0, 320.0 + 3.0), 1e-4);
        assert_near!(abs, right[0].pos, (450.0_f32 + 7.0, 320.0 + 3.0), 1e-4);
    }

    #[test]
    fn test_zero_axis() {
        let mut rec = Recorder::new(1.0);
        let mut axis = axis(Orientation::Horizontal, -50.0, 50.0);
        axis.style_mut().zero_axis_color = color::BLUE;
        axis.draw_axes(&mut rec);
        let zero = rec.paths_of(color::BLUE, 1.5);
        assert_eq!(zero.len(), 1);
        assert_eq!(zero[0].segments, vec![((250.0, 17.0), (250.0, 323.0))]);

        let mut rec = Recorder::new(1.0);
        axis.set_range(10.0, 50.0);
        axis.draw_axes(&mut rec);
        assert!(rec.paths_of(color::BLUE, 1.5).is_empty());
    }

    #[test]
    fn test_axis_label() {
        let mut rec = Recorder::new(1.0);
        let mut axis = axis(Orientation::Horizontal, 0.0, 100.0);
        axis.set_axis_label("Time");
        axis.draw_axes(&mut rec);
        let label = rec.texts.iter().find(|t| t.text == "Time").unwrap();
        assert_eq!(label.anchor, TextAnchor::Middle);
        assert_eq!(label.pos, (250.0, 320.0 + 3.0 + 4.0 + 10.0 + 5.0 + 8.0));
        assert!(!label.rotated);

        let mut rec = Recorder::new(1.0);
        axis.style_mut().label_position = LabelPosition::Max;
        axis.draw_axes(&mut rec);
        let label = rec.texts.iter().find(|t| t.text == "Time").unwrap();
        assert_eq!(label.anchor, TextAnchor::End);
        assert_eq!(label.pos.0, 450.0);

        let mut rec = Recorder::new(1.0);
        let mut y = Axis::new(Orientation::Vertical);
        y.set_geometry(GEOMETRY);
        y.set_axis_label("Voltage");
        y.draw_axes(&mut rec);
        let label = rec.texts.iter().find(|t| t.text == "Voltage").unwrap();
        assert!(label.rotated);
        assert_eq!(label.anchor, TextAnchor::Middle);
        assert!(label.pos.0 < 20.0);
    }

    #[test]
    fn test_grids() {
        let mut rec = Recorder::new(1.0);
        let mut axis = axis(Orientation::Horizontal, 0.0, 100.0);
        axis.draw_grids(&mut rec);
        assert_eq!(rec.paths.len(), 1);
        let grid = &rec.paths[0];
        assert_eq!(grid.color, color::GRAY);
        let xs: Vec<f32> = grid.segments.iter().map(|s| s.0.0).collect();
        assert_eq!(xs, vec![130.0, 210.0, 290.0, 370.0]);
        assert_eq!(grid.segments[0], ((130.0, 20.0), (130.0, 320.0)));

        let mut rec = Recorder::new(1.0);
        axis.style_mut().minor_grid.enabled = true;
        axis.draw_grids(&mut rec);
        assert_eq!(rec.paths.len(), 2);
        assert_eq!(rec.paths[0].color, color::LIGHTGRAY);
        assert_eq!(rec.paths[0].segments.len(), 5);

        // manual labels have no minor ticks
        let mut rec = Recorder::new(1.0);
        axis.add_tick_label(50.0, "half");
        axis.draw_grids(&mut rec);
        assert_eq!(rec.paths.len(), 1);
        assert_eq!(rec.paths[0].segments.len(), 1);
    }

    #[test]
    fn test_minor_tick_labels() {
        let mut rec = Recorder::new(1.0);
        let mut axis = axis(Orientation::Horizontal, 1.0, 1000.0);
        axis.set_log(true);
        axis.style_mut().minor_ticks = 9;
        axis.style_mut().minor_tick_labels_enabled = true;
        axis.style_mut().minor_tick_label_full_number = false;
        axis.draw_axes(&mut rec);

        let minor: Vec<&str> = rec
            .texts
            .iter()
            .filter(|t| t.font_size == 8.0)
            .map(|t| t.text.as_str())
            .collect();
        // 2..9 for each of the three decades
        assert_eq!(minor.len(), 24);
        assert_eq!(&minor[..8], &["2", "3", "4", "5", "6", "7", "8", "9"]);
    }

    #[test]
    fn test_non_finite_frame() {
        let mut rec = Recorder::new(1.0);
        let mut axis = axis(Orientation::Horizontal, 0.0, 100.0);
        axis.set_geometry(PlotGeometry {
            width: f64::NAN,
            ..GEOMETRY
        });
        axis.draw_axes(&mut rec);
        axis.draw_grids(&mut rec);
        assert!(rec.paths.is_empty());
        assert!(rec.texts.is_empty());
    }

    #[test]
    fn test_debug_boxes() {
        let mut rec = Recorder::new(1.0);
        let mut axis = axis(Orientation::Horizontal, 0.0, 100.0);
        axis.set_debug_region_boxes(true);
        axis.draw_axes(&mut rec);
        let boxes = rec.paths_of(color::RED, 1.0);
        assert_eq!(boxes.len(), 2);
    }

    #[test]
    fn test_out_of_range_labels_skipped() {
        let mut rec = Recorder::new(1.0);
        let mut axis = axis(Orientation::Horizontal, 0.0, 10.0);
        axis.add_tick_labels([(-5.0, "negative five"), (5.0, "five")]);
        axis.draw_axes(&mut rec);
        assert_eq!(rec.texts(), vec!["five"]);
        assert_eq!(rec.texts[0].pos.0, 250.0);

        let ext = axis.max_tick_label_extent(&rec);
        assert_eq!(ext.width, 20.0);
    }

    #[derive(Debug, Default)]
    struct CountingMeasure(std::cell::Cell<usize>);

    impl TextMeasure for CountingMeasure {
        fn text_metrics(&self, text: &str, font_size: f32) -> TextMetrics {
            self.0.set(self.0.get() + 1);
            TextMetrics {
                width: 0.5 * font_size * text.len() as f32,
                ascent: 0.8 * font_size,
                descent: 0.2 * font_size,
                strikeout_pos: 0.3 * font_size,
            }
        }
    }

    #[test]
    fn test_dense_ticks_capped() {
        let mut axis = axis(Orientation::Horizontal, 0.0, 1000.0);
        axis.set_auto_spacing(false);
        axis.set_user_tick_spacing(1.0);
        assert_eq!(axis.ticks().count(), 1001);

        let measure = CountingMeasure::default();
        axis.max_tick_label_extent(&measure);
        assert_eq!(measure.0.get(), MEASURED_LABELS);

        let mut rec = Recorder::new(1.0);
        axis.draw_axes(&mut rec);
        let ticks = rec.paths_of(color::BLACK, 1.5);
        assert!(ticks.iter().all(|p| p.segments.len() <= DRAWN_TICKS));
        assert!(ticks.iter().any(|p| p.segments.len() == DRAWN_TICKS));
        let labels = rec.texts.iter().filter(|t| t.font_size == 10.0).count();
        assert_eq!(labels, DRAWN_TICKS);
    }

    #[test]
    fn test_minor_tick_labels_without_ticks() {
        let mut rec = Recorder::new(1.0);
        let mut axis = axis(Orientation::Horizontal, 0.0, 100.0);
        axis.style_mut().draw_mode1 = DrawMode::Labels;
        axis.style_mut().minor_tick_labels_enabled = true;
        axis.draw_axes(&mut rec);

        let minor: Vec<&str> = rec
            .texts
            .iter()
            .filter(|t| t.font_size == 8.0)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(minor, vec!["10", "30", "50", "70", "90"]);
    }
}
