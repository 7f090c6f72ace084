use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Bounds, Line, Pt2D};

/// A closed ring of points. The boundary segments are derived once from the points when the
/// polygon is built; breaking a polygon against others splits those segments without touching
/// the points.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Pt2D>,
    segments: Vec<Line>,
}

impl Polygon {
    /// The ring closes itself; don't repeat the first point at the end. Consecutive duplicate
    /// points don't produce a boundary segment.
    pub fn new(points: Vec<Pt2D>) -> Polygon {
        let n = points.len();
        let segments = if n < 2 {
            Vec::new()
        } else {
            (0..n)
                .filter_map(|i| Line::maybe_new(points[i], points[(i + 1) % n]))
                .collect()
        };
        Polygon { points, segments }
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.points
    }

    pub fn segments(&self) -> &Vec<Line> {
        &self.segments
    }

    pub fn get_bounds(&self) -> Bounds {
        Bounds::from(&self.points)
    }

    /// The average of the points. Good enough for the convex shapes built here.
    pub fn center(&self) -> Pt2D {
        Pt2D::average(&self.points)
    }

    /// Ray casting: counts how many boundary segments a ray from far outside to the point
    /// crosses. The ray's origin is derived from the polygon's bounds, so it works at any scale.
    pub fn contains_pt(&self, pt: Pt2D) -> bool {
        if self.segments.len() < 3 || !pt.is_finite() {
            return false;
        }
        let mut bounds = self.get_bounds();
        bounds.update(pt);
        let ray = Line::must_new(bounds.outside_pt(), pt);
        let crossings = self
            .segments
            .iter()
            .filter(|seg| ray.intersection(seg).is_some())
            .count();
        crossings % 2 == 1
    }

    /// A segment counts as inside if its midpoint is.
    pub fn contains_segment(&self, seg: &Line) -> bool {
        self.contains_pt(seg.middle())
    }

    /// Do any of the boundary segments cross or touch?
    pub fn intersects_poly(&self, other: &Polygon) -> bool {
        self.segments
            .iter()
            .any(|s1| other.segments.iter().any(|s2| s1.intersects(s2)))
    }

    /// Distance from the point to the nearest part of the boundary. Zero for an empty polygon is
    /// not meaningful, so that returns infinity.
    pub fn dist_to_pt(&self, pt: Pt2D) -> f64 {
        self.segments
            .iter()
            .map(|seg| seg.dist_to_pt(pt))
            .fold(f64::INFINITY, f64::min)
    }

    /// Smallest distance from any of this polygon's points to the other's boundary.
    pub fn dist_to_poly(&self, other: &Polygon) -> f64 {
        self.points
            .iter()
            .map(|pt| other.dist_to_pt(*pt))
            .fold(f64::INFINITY, f64::min)
    }

    /// Splits the boundary segments of both polygons wherever they cross each other. Hits at an
    /// existing endpoint are ignored, so no zero-length pieces appear. Every intersection is
    /// found against the original segments first, then each segment is replaced by its pieces,
    /// in order along the segment.
    pub fn break_pair(poly1: &mut Polygon, poly2: &mut Polygon) {
        let mut cuts1: Vec<Vec<(f64, Pt2D)>> = vec![Vec::new(); poly1.segments.len()];
        let mut cuts2: Vec<Vec<(f64, Pt2D)>> = vec![Vec::new(); poly2.segments.len()];
        for (i, seg1) in poly1.segments.iter().enumerate() {
            for (j, seg2) in poly2.segments.iter().enumerate() {
                if let Some(hit) = seg1.interior_intersection(seg2) {
                    // Both sides share the exact same split point
                    cuts1[i].push((hit.t, hit.pt));
                    cuts2[j].push((hit.u, hit.pt));
                }
            }
        }
        poly1.segments = split_at_cuts(&poly1.segments, cuts1);
        poly2.segments = split_at_cuts(&poly2.segments, cuts2);
    }

    /// Breaks every pair of polygons against each other.
    pub fn multi_break(polygons: &mut [Polygon]) {
        for j in 1..polygons.len() {
            let (before, after) = polygons.split_at_mut(j);
            for poly in before.iter_mut() {
                Polygon::break_pair(poly, &mut after[0]);
            }
        }
    }

    /// The outer boundary of overlapping polygons: after breaking them all against each other,
    /// keep only the segments that no other polygon contains.
    pub fn union(mut polygons: Vec<Polygon>) -> Vec<Line> {
        Polygon::multi_break(&mut polygons);

        let mut kept = Vec::new();
        for (i, poly) in polygons.iter().enumerate() {
            for seg in &poly.segments {
                let inside_other = polygons
                    .iter()
                    .enumerate()
                    .any(|(j, other)| i != j && other.contains_segment(seg));
                if !inside_other {
                    kept.push(*seg);
                }
            }
        }
        debug!(
            "Union of {} polygons kept {} segments",
            polygons.len(),
            kept.len()
        );
        kept
    }
}

fn split_at_cuts(segments: &[Line], all_cuts: Vec<Vec<(f64, Pt2D)>>) -> Vec<Line> {
    let mut output = Vec::with_capacity(segments.len());
    for (seg, mut cuts) in segments.iter().zip(all_cuts) {
        cuts.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut from = seg.pt1();
        for (_, pt) in cuts {
            // Repeated cuts at the same spot produce nothing
            if let Some(piece) = Line::maybe_new(from, pt) {
                output.push(piece);
                from = pt;
            }
        }
        if let Some(piece) = Line::maybe_new(from, seg.pt2()) {
            output.push(piece);
        }
    }
    output
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Polygon) -> bool {
        self.points == other.points
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Polygon with {} points and {} segments",
            self.points.len(),
            self.segments.len()
        )?;
        for (idx, pt) in self.points.iter().enumerate() {
            writeln!(f, "  {}: {}", idx, pt)?;
        }
        Ok(())
    }
}
