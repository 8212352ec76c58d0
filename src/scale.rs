//! Data to pixel transform.
//!
//! A [`ScaleLaw`] is the pure function pair that maps data values to pixel coordinates and back.
//! It is derived by the axis from its range and from the pixel geometry of the plot area,
//! and is consumed by graph renderers through the [`CoordMap`] trait.

/// Maps coordinates between data space and pixel space.
///
/// This is the contract through which graph renderers consume axes.
pub trait CoordMap: std::fmt::Debug {
    /// Map a data value to a pixel coordinate
    fn to_pixel(&self, x: f64) -> f64;

    /// Map a pixel coordinate to a data value
    fn to_data(&self, p: f64) -> f64;

    /// Whether the mapping is logarithmic
    fn is_log(&self) -> bool;
}

/// A pair of coordinate maps, one per plot dimension
#[derive(Debug, Clone, Copy)]
pub struct CoordMapXy<'a> {
    /// The horizontal map
    pub x: &'a dyn CoordMap,
    /// The vertical map
    pub y: &'a dyn CoordMap,
}

impl<'a> CoordMapXy<'a> {
    /// Map a data point to a pixel point
    pub fn to_pixel(&self, dp: (f64, f64)) -> (f64, f64) {
        (self.x.to_pixel(dp.0), self.y.to_pixel(dp.1))
    }

    /// Map a pixel point to a data point
    pub fn to_data(&self, pp: (f64, f64)) -> (f64, f64) {
        (self.x.to_data(pp.0), self.y.to_data(pp.1))
    }
}

/// Whether the transform is linear or logarithmic
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleKind {
    /// `pixel = offset + sign * x * scale`
    Linear,
    /// `pixel = offset + sign * log_base(x) * scale`
    Log {
        /// Base of the logarithm
        base: f64,
    },
}

impl ScaleKind {
    /// Whether this is a logarithmic scale
    pub fn is_log(&self) -> bool {
        matches!(self, ScaleKind::Log { .. })
    }

    fn fwd(&self, x: f64) -> f64 {
        match self {
            ScaleKind::Linear => x,
            ScaleKind::Log { base } => x.ln() / base.ln(),
        }
    }

    fn inv(&self, x: f64) -> f64 {
        match self {
            ScaleKind::Linear => x,
            ScaleKind::Log { base } => (base.ln() * x).exp(),
        }
    }
}

/// The direction of increasing pixel coordinates relative to increasing data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Increasing data maps to increasing pixels (horizontal axes)
    Positive,
    /// Increasing data maps to decreasing pixels (vertical axes, pixel Y grows downward)
    Negative,
}

impl Sign {
    /// The sign as a factor
    pub const fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// The data to pixel transform of an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLaw {
    scale: f64,
    offset: f64,
    sign: Sign,
    kind: ScaleKind,
    axis_min: f64,
    mirror: Option<(f64, f64)>,
}

impl ScaleLaw {
    /// Derive the transform of the range `[min, max]` spanning `plot_width` pixels from `plot_offset`.
    /// `min < max` is expected, and both must be positive for log scales.
    /// With `inverted`, pixels are reflected about the plot area midline.
    pub fn new(
        min: f64,
        max: f64,
        plot_offset: f64,
        plot_width: f64,
        sign: Sign,
        kind: ScaleKind,
        inverted: bool,
    ) -> Self {
        let (lmin, lmax) = (kind.fwd(min), kind.fwd(max));
        let scale = plot_width / (lmax - lmin);
        let offset = match sign {
            Sign::Positive => plot_offset - lmin * scale,
            Sign::Negative => plot_offset + lmax * scale,
        };
        ScaleLaw {
            scale,
            offset,
            sign,
            kind,
            axis_min: min,
            mirror: inverted.then_some((plot_offset, plot_width)),
        }
    }

    /// Pixels per data unit (or per power of the base for log scales)
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixel coordinate of the data origin (or of 1 for log scales), before mirroring
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The sign convention
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Linear or logarithmic
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// Whether pixels are mirrored about the plot area midline
    pub fn is_inverted(&self) -> bool {
        self.mirror.is_some()
    }

    fn reflect(&self, p: f64) -> f64 {
        match self.mirror {
            Some((plot_offset, plot_width)) => 2.0 * plot_offset + plot_width - p,
            None => p,
        }
    }
}

impl CoordMap for ScaleLaw {
    fn to_pixel(&self, x: f64) -> f64 {
        // values out of the log domain are drawn at the axis minimum
        let x = if self.kind.is_log() && x <= 0.0 {
            self.axis_min
        } else {
            x
        };
        let p = self.offset + self.sign.factor() * self.kind.fwd(x) * self.scale;
        self.reflect(p)
    }

    fn to_data(&self, p: f64) -> f64 {
        let p = self.reflect(p) - self.offset;
        self.kind.inv(p / (self.sign.factor() * self.scale))
    }

    fn is_log(&self) -> bool {
        self.kind.is_log()
    }
}
