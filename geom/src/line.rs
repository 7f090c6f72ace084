use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Angle, GeomError, Pt2D, EPSILON_DETERMINANT};

/// A directed segment between two distinct points. Equality ignores direction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

/// Where two segments cross. `t` is the fraction along the first segment, `u` along the second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub pt: Pt2D,
    pub t: f64,
    pub u: f64,
}

impl Line {
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Result<Line, GeomError> {
        if !pt1.is_finite() || !pt2.is_finite() {
            return Err(GeomError::InvalidGeometry(format!(
                "Line between non-finite points {} and {}",
                pt1, pt2
            )));
        }
        if pt1 == pt2 {
            return Err(GeomError::InvalidGeometry(format!(
                "Zero-length line at {}",
                pt1
            )));
        }
        Ok(Line(pt1, pt2))
    }

    /// Only for callers that already know the points differ.
    pub fn must_new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line::new(pt1, pt2).unwrap()
    }

    pub fn maybe_new(pt1: Pt2D, pt2: Pt2D) -> Option<Line> {
        Line::new(pt1, pt2).ok()
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn length(&self) -> f64 {
        self.0.dist_to(self.1)
    }

    pub fn angle(&self) -> Angle {
        self.0.angle_to(self.1)
    }

    /// Unit vector from pt1 towards pt2.
    pub fn dir_vector(&self) -> Pt2D {
        (self.1 - self.0).normalize()
    }

    pub fn middle(&self) -> Pt2D {
        self.0.lerp(self.1, 0.5)
    }

    /// Is the point one of the endpoints?
    pub fn includes(&self, pt: Pt2D) -> bool {
        self.0 == pt || self.1 == pt
    }

    /// Projects the point onto the infinite line through this segment. Returns the foot of the
    /// projection and how far along the segment it is, as a fraction (unbounded).
    pub fn project_pt(&self, pt: Pt2D) -> (Pt2D, f64) {
        let a = pt - self.0;
        let b = self.1 - self.0;
        let dir = b.normalize();
        let scalar = a.dot(dir);
        (self.0 + dir.scale(scalar), scalar / b.magnitude())
    }

    /// Shortest distance from the point to any part of this segment.
    pub fn dist_to_pt(&self, pt: Pt2D) -> f64 {
        let (proj, offset) = self.project_pt(pt);
        if offset > 0.0 && offset < 1.0 {
            pt.dist_to(proj)
        } else {
            pt.dist_to(self.0).min(pt.dist_to(self.1))
        }
    }

    /// Where this segment crosses another, including their endpoints. Parallel (or nearly so)
    /// segments never intersect.
    pub fn intersection(&self, other: &Line) -> Option<Intersection> {
        let (a, b, c, d) = (self.0, self.1, other.0, other.1);
        let t_top = (d.x() - c.x()) * (a.y() - c.y()) - (d.y() - c.y()) * (a.x() - c.x());
        let u_top = (c.y() - a.y()) * (a.x() - b.x()) - (c.x() - a.x()) * (a.y() - b.y());
        let bottom = (d.y() - c.y()) * (b.x() - a.x()) - (d.x() - c.x()) * (b.y() - a.y());

        if bottom.abs() <= EPSILON_DETERMINANT {
            return None;
        }
        let t = t_top / bottom;
        let u = u_top / bottom;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(Intersection {
                pt: a.lerp(b, t),
                t,
                u,
            })
        } else {
            None
        }
    }

    /// Like `intersection`, but ignores hits at the endpoints of either segment.
    pub fn interior_intersection(&self, other: &Line) -> Option<Intersection> {
        let hit = self.intersection(other)?;
        if hit.t == 0.0 || hit.t == 1.0 || hit.u == 0.0 || hit.u == 1.0 {
            return None;
        }
        if self.includes(hit.pt) || other.includes(hit.pt) {
            return None;
        }
        Some(hit)
    }

    pub fn intersects(&self, other: &Line) -> bool {
        self.intersection(other).is_some()
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Line) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line({} to {})", self.0, self.1)
    }
}
