use serde::{Deserialize, Serialize};

use crate::Pt2D;

/// An axis-aligned bounding box.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// An empty box, which contains nothing until it's updated.
    pub fn new() -> Bounds {
        Bounds {
            min_x: f64::MAX,
            min_y: f64::MAX,
            max_x: f64::MIN,
            max_y: f64::MIN,
        }
    }

    pub fn from(pts: &[Pt2D]) -> Bounds {
        let mut b = Bounds::new();
        for pt in pts {
            b.update(*pt);
        }
        b
    }

    pub fn update(&mut self, pt: Pt2D) {
        self.min_x = self.min_x.min(pt.x());
        self.max_x = self.max_x.max(pt.x());
        self.min_y = self.min_y.min(pt.y());
        self.max_y = self.max_y.max(pt.y());
    }

    pub fn union(&mut self, other: &Bounds) {
        if other.is_empty() {
            return;
        }
        self.update(Pt2D::new(other.min_x, other.min_y));
        self.update(Pt2D::new(other.max_x, other.max_y));
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }


    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// A point strictly outside this box. The offsets are lopsided, so a ray from here to a
    /// point inside won't run along an axis-aligned edge.
    pub fn outside_pt(&self) -> Pt2D {
        let margin = 1.0 + self.width().max(self.height());
        Pt2D::new(
            self.min_x - margin * std::f64::consts::E,
            self.min_y - margin * std::f64::consts::PI,
        )
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds::new()
    }
}
