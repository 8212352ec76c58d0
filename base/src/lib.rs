//! Base primitives shared by `plotaxis` and its rendering surfaces.
//!
//! - [`geom`]: sizes, rectangles and the path types of `tiny-skia-path`
//! - [`color`]: 8-bit RGBA colors, parsed from and written to strings

pub mod color;
pub mod geom;

pub use color::ColorU8;
