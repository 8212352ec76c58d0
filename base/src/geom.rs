/*!
 * Geometric primitives.
 *
 * Paths and transforms are publicly imported from tiny-skia-path.
 *
 * Y low coordinates are at the top.
 */

use strict_num::{FiniteF32, PositiveF32};
pub use tiny_skia_path::{Path, PathBuilder, PathSegment, Point, Transform};

/// A size in 2D space reprensented by width and height
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    w: f32,
    h: f32,
}

impl Size {
    /// Build a size from width and height
    pub const fn new(w: f32, h: f32) -> Self {
        Size { w, h }
    }

    /// The width
    pub const fn width(&self) -> f32 {
        self.w
    }

    /// The height
    pub const fn height(&self) -> f32 {
        self.h
    }

    /// Size of the bounding box of a `w x h` rectangle rotated by `angle_deg` degrees.
    pub fn rotated(&self, angle_deg: f32) -> Size {
        if angle_deg == 0.0 {
            return *self;
        }
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        Size {
            w: self.w * cos + self.h * sin,
            h: self.w * sin + self.h * cos,
        }
    }
}

/// A rectangle in 2D space reprensented by x, y, width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    x: FiniteF32,
    y: FiniteF32,
    w: PositiveF32,
    h: PositiveF32,
}

impl Rect {
    /// Build a rectangle from x, y, width and height.
    /// Returns None if a coordinate is not finite or a dimension is negative.
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Option<Self> {
        Some(Rect {
            x: FiniteF32::new(x)?,
            y: FiniteF32::new(y)?,
            w: PositiveF32::new(w)?,
            h: PositiveF32::new(h)?,
        })
    }

    /// Build a rectangle from two corner points
    pub fn from_corners(p1: Point, p2: Point) -> Option<Self> {
        Rect::from_xywh(
            p1.x.min(p2.x),
            p1.y.min(p2.y),
            (p1.x - p2.x).abs(),
            (p1.y - p2.y).abs(),
        )
    }

    /// The X coordinate of the left side
    pub const fn x(&self) -> f32 {
        self.x.get()
    }

    /// The Y coordinate of the top side
    pub const fn y(&self) -> f32 {
        self.y.get()
    }

    /// The width of the rectangle
    pub const fn width(&self) -> f32 {
        self.w.get()
    }

    /// The height of the rectangle
    pub const fn height(&self) -> f32 {
        self.h.get()
    }

    /// The size of the rectangle
    pub const fn size(&self) -> Size {
        Size {
            w: self.width(),
            h: self.height(),
        }
    }

    /// The top Y coordinate
    pub const fn top(&self) -> f32 {
        self.y.get()
    }

    /// The right X coordinate
    pub const fn right(&self) -> f32 {
        self.x.get() + self.w.get()
    }

    /// The bottom Y coordinate
    pub const fn bottom(&self) -> f32 {
        self.y.get() + self.h.get()
    }

    /// The left X coordinate
    pub const fn left(&self) -> f32 {
        self.x.get()
    }

    /// Test if the rectangle contains a point
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Build a path from the rectangle.
    /// Returns None for empty rectangles.
    pub fn to_path(&self) -> Option<Path> {
        let rect = tiny_skia_path::Rect::from_xywh(
            self.x.get(),
            self.y.get(),
            self.w.get(),
            self.h.get(),
        )?;
        Some(PathBuilder::from_rect(rect))
    }
}

/// Build a path made of a single segment
pub fn line_path(x1: f32, y1: f32, x2: f32, y2: f32) -> Option<Path> {
    let mut pb = PathBuilder::with_capacity(2, 2);
    pb.move_to(x1, y1);
    pb.line_to(x2, y2);
    pb.finish()
}
