//! Planar geometry used to turn a sketched road graph into road surfaces, building footprints and
//! the like. Everything here works in plain world-space units; there's no notion of GPS or map
//! scale.

#[macro_use]
extern crate log;

mod angle;
mod bounds;
mod envelope;
mod error;
mod line;
mod polygon;
mod pt;

pub use crate::angle::Angle;
pub use crate::bounds::Bounds;
pub use crate::envelope::Envelope;
pub use crate::error::GeomError;
pub use crate::line::{Intersection, Line};
pub use crate::polygon::Polygon;
pub use crate::pt::{HashablePt2D, Pt2D};

/// Below this, the determinant of two segments is treated as zero and the segments as parallel.
pub const EPSILON_DETERMINANT: f64 = 0.001;

/// Linear interpolation between two scalars.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
