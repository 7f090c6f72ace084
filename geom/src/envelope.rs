use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{Angle, GeomError, Line, Polygon, Pt2D};

/// A stadium-shaped buffer around a skeleton segment: two half-circle caps joined by straight
/// sides. Roads, lanes and building footprints are all built from these.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub skeleton: Line,
    /// The full width; the caps have half of this as their radius.
    pub width: f64,
    pub poly: Polygon,
}

impl Envelope {
    /// `roundness` is how many steps each half-circle cap is sampled with. 1 gives a rectangle;
    /// anything lower is treated as 1.
    pub fn new(skeleton: Line, width: f64, roundness: usize) -> Result<Envelope, GeomError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(GeomError::InvalidGeometry(format!(
                "Envelope around {} needs a positive width, not {}",
                skeleton, width
            )));
        }
        if skeleton.length() == 0.0 {
            return Err(GeomError::InvalidGeometry(format!(
                "Envelope around zero-length {}",
                skeleton
            )));
        }

        let radius = width / 2.0;
        // Each cap faces away from the skeleton
        let facing = (skeleton.pt1() - skeleton.pt2()).angle();
        let step = PI / (roundness.max(1) as f64);
        let eps = step / 2.0;

        let mut pts = Vec::new();
        let mut sample_cap = |center: Pt2D, facing: Angle| {
            let mut theta = -PI / 2.0;
            while theta <= PI / 2.0 + eps {
                pts.push(center.project_away(radius, facing.rotate_rads(theta)));
                theta += step;
            }
        };
        sample_cap(skeleton.pt1(), facing);
        sample_cap(skeleton.pt2(), facing.opposite());

        Ok(Envelope {
            skeleton,
            width,
            poly: Polygon::new(pts),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skeleton(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::must_new(Pt2D::new(x1, y1), Pt2D::new(x2, y2))
    }

    #[test]
    fn roundness_controls_cap_samples() {
        let rect = Envelope::new(skeleton(0.0, 0.0, 100.0, 0.0), 20.0, 1).unwrap();
        assert_eq!(rect.poly.points().len(), 4);
        // Each corner is half the width away from an endpoint
        for pt in rect.poly.points() {
            let d = pt
                .dist_to(Pt2D::new(0.0, 0.0))
                .min(pt.dist_to(Pt2D::new(100.0, 0.0)));
            assert!((d - 10.0).abs() < 1e-9);
        }

        let round = Envelope::new(skeleton(0.0, 0.0, 100.0, 0.0), 20.0, 10).unwrap();
        assert_eq!(round.poly.points().len(), 22);
        // Roundness 0 is clamped
        let zero = Envelope::new(skeleton(0.0, 0.0, 100.0, 0.0), 20.0, 0).unwrap();
        assert_eq!(zero.poly.points().len(), 4);
    }

    #[test]
    fn contains_skeleton() {
        let env = Envelope::new(skeleton(0.0, 0.0, 100.0, 40.0), 20.0, 8).unwrap();
        assert!(env.poly.contains_pt(Pt2D::new(50.0, 20.0)));
        assert!(env.poly.contains_pt(Pt2D::new(-9.0, 0.0)));
        assert!(!env.poly.contains_pt(Pt2D::new(50.0, 40.0)));
        assert!(!env.poly.contains_pt(Pt2D::new(-11.0, 0.0)));
    }

    #[test]
    fn rejects_degenerate_width() {
        let skel = skeleton(0.0, 0.0, 10.0, 0.0);
        assert!(matches!(
            Envelope::new(skel, 0.0, 5),
            Err(GeomError::InvalidGeometry(_))
        ));
        assert!(Envelope::new(skel, -3.0, 5).is_err());
        assert!(Envelope::new(skel, f64::NAN, 5).is_err());
    }

    #[test]
    fn union_of_overlapping_envelopes() {
        let e1 = Envelope::new(skeleton(0.0, 0.0, 100.0, 0.0), 20.0, 6).unwrap();
        let e2 = Envelope::new(skeleton(50.0, 0.0, 150.0, 0.0), 20.0, 6).unwrap();
        let total = e1.poly.segments().len() + e2.poly.segments().len();
        let kept = Polygon::union(vec![e1.poly.clone(), e2.poly.clone()]);
        assert!(kept.len() < total);
        assert!(!kept.is_empty());
        // Nothing kept lies strictly inside either envelope
        for seg in &kept {
            let mid = seg.middle();
            assert!(mid.y().abs() > 9.0 || mid.x() < 0.0 || mid.x() > 150.0);
        }
    }
}
