use std::fmt;
use std::ops::{Add, Sub};

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::{lerp, Angle};

/// A point in world-space, or a vector between two of them. Equality is exact; there's no
/// epsilon.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        Pt2D { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn scale(self, factor: f64) -> Pt2D {
        Pt2D::new(self.x * factor, self.y * factor)
    }

    pub fn dot(self, other: Pt2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Treating this point as a vector, its length.
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns a unit vector in the same direction. The zero vector stays zero.
    pub fn normalize(self) -> Pt2D {
        let len = self.magnitude();
        if len == 0.0 {
            return self;
        }
        self.scale(1.0 / len)
    }

    pub fn dist_to(self, to: Pt2D) -> f64 {
        (self.x - to.x).hypot(self.y - to.y)
    }

    /// Treating this point as a vector, the angle it makes with the positive X axis.
    pub fn angle(self) -> Angle {
        Angle::new_rads(self.y.atan2(self.x))
    }

    pub fn angle_to(self, to: Pt2D) -> Angle {
        (to - self).angle()
    }

    /// Moves `dist` away from this point in the direction of `theta`. A negative distance moves
    /// the opposite way.
    pub fn project_away(self, dist: f64, theta: Angle) -> Pt2D {
        let (sin, cos) = theta.normalized_radians().sin_cos();
        Pt2D::new(self.x + dist * cos, self.y + dist * sin)
    }

    pub fn lerp(self, to: Pt2D, t: f64) -> Pt2D {
        Pt2D::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }

    pub fn average(pts: &[Pt2D]) -> Pt2D {
        if pts.is_empty() {
            return Pt2D::new(0.0, 0.0);
        }
        let (x, y) = pts
            .iter()
            .fold((0.0, 0.0), |(x, y), pt| (x + pt.x, y + pt.y));
        let len = pts.len() as f64;
        Pt2D::new(x / len, y / len)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Panics on NaN, which no caller should be producing.
    pub fn to_hashable(self) -> HashablePt2D {
        HashablePt2D::new(self.x, self.y)
    }
}

impl Add for Pt2D {
    type Output = Pt2D;

    fn add(self, other: Pt2D) -> Pt2D {
        Pt2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Pt2D {
    type Output = Pt2D;

    fn sub(self, other: Pt2D) -> Pt2D {
        Pt2D::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x, self.y)
    }
}

/// The exact bits of a point, usable as a map key or for sorting.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HashablePt2D {
    x_nan: NotNan<f64>,
    y_nan: NotNan<f64>,
}

impl HashablePt2D {
    pub fn new(x: f64, y: f64) -> HashablePt2D {
        HashablePt2D {
            x_nan: NotNan::new(x).unwrap(),
            y_nan: NotNan::new(y).unwrap(),
        }
    }

    pub fn to_pt2d(self) -> Pt2D {
        Pt2D::new(self.x_nan.into_inner(), self.y_nan.into_inner())
    }
}
