//! A pair of axes sharing a plot area.
//!
//! [`AxisPair`] is the smallest owner of axes: it places the plot area,
//! pushes its pixel geometry to both axes and draws them.
use crate::axis::{Axis, Orientation, PlotGeometry};
use crate::geom;
use crate::render::{Surface, TextMeasure};
use crate::scale::CoordMapXy;

/// An X and a Y axis drawn around a rectangular plot area
#[derive(Debug, Clone)]
pub struct AxisPair {
    x: Axis,
    y: Axis,
    plot_rect: geom::Rect,
}

impl AxisPair {
    /// Create a pair of default axes around `plot_rect`
    pub fn new(plot_rect: geom::Rect) -> Self {
        let mut pair = AxisPair {
            x: Axis::new(Orientation::Horizontal),
            y: Axis::new(Orientation::Vertical),
            plot_rect,
        };
        pair.sync_geometry();
        pair
    }

    /// Create a pair of axes, placing the plot area inside `size`
    /// so that the room needed by the axes is left around it.
    ///
    /// Returns `None` if the axes don't fit.
    pub fn fit<M>(size: geom::Size, measure: &M) -> Option<Self>
    where
        M: TextMeasure + ?Sized,
    {
        let rect = geom::Rect::from_xywh(0.0, 0.0, size.width(), size.height())?;
        let mut pair = AxisPair::new(rect);
        pair.fit_into(size, measure).then_some(pair)
    }

    /// Place the plot area inside `size`, leaving the room needed by the axes around it.
    /// Returns false, leaving the plot area unchanged, if the axes don't fit.
    pub fn fit_into<M>(&mut self, size: geom::Size, measure: &M) -> bool
    where
        M: TextMeasure + ?Sized,
    {
        let left = self.y.size1(measure);
        let right = self.y.size2(measure);
        let top = self.x.size2(measure);
        let bottom = self.x.size1(measure);
        let w = size.width() - left - right;
        let h = size.height() - top - bottom;
        if !(w > 0.0 && h > 0.0) {
            log::debug!("Axes need {left}+{right} x {top}+{bottom} pixels, not fitting in {size:?}");
            return false;
        }
        match geom::Rect::from_xywh(left, top, w, h) {
            Some(rect) => {
                self.set_plot_rect(rect);
                true
            }
            None => false,
        }
    }

    /// The X axis
    pub fn x(&self) -> &Axis {
        &self.x
    }

    /// The Y axis
    pub fn y(&self) -> &Axis {
        &self.y
    }

    /// Mutable access to the X axis.
    ///
    /// The geometry pushed to the axes is refreshed by [`AxisPair::draw`].
    pub fn x_mut(&mut self) -> &mut Axis {
        &mut self.x
    }

    /// Mutable access to the Y axis
    pub fn y_mut(&mut self) -> &mut Axis {
        &mut self.y
    }

    /// The plot area, in pixels
    pub fn plot_rect(&self) -> &geom::Rect {
        &self.plot_rect
    }

    /// Move the plot area
    pub fn set_plot_rect(&mut self, plot_rect: geom::Rect) {
        self.plot_rect = plot_rect;
        self.sync_geometry();
    }

    /// Sum of the revisions of both axes.
    /// A change means the pair must be redrawn.
    pub fn revision(&self) -> u64 {
        self.x.revision() + self.y.revision()
    }

    /// Maps data points to pixels and back through both axes
    pub fn coord_map(&self) -> CoordMapXy<'_> {
        CoordMapXy {
            x: &self.x,
            y: &self.y,
        }
    }

    fn sync_geometry(&mut self) {
        let r = &self.plot_rect;
        let (left, top) = (r.left() as f64, r.top() as f64);
        let (width, height) = (r.width() as f64, r.height() as f64);

        // the span across an axis is the plot area, whatever the direction of the other axis
        let y_inverted = self.y.is_inverted();
        self.x.set_geometry(PlotGeometry {
            offset: left,
            width,
            other_offset: if y_inverted { top + height } else { top },
            other_width: height,
            other_inverted: y_inverted,
        });
        let x_inverted = self.x.is_inverted();
        self.y.set_geometry(PlotGeometry {
            offset: top,
            width: height,
            other_offset: if x_inverted { left + width } else { left },
            other_width: width,
            other_inverted: x_inverted,
        });
    }

    /// Draw the grids of both axes, then the axes themselves
    pub fn draw<S>(&mut self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        self.sync_geometry();
        self.x.draw_grids(surface);
        self.y.draw_grids(surface);
        self.x.draw_axes(surface);
        self.y.draw_axes(surface);
    }
}
