use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::{Line, Pt2D};

/// Stable handle to a point owned by a `Graph`. IDs are never reused, even after `clear`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointID(pub usize);

impl fmt::Display for PointID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Point #{}", self.0)
    }
}

/// An undirected edge between two graph points, stored by ID. Moving a point moves every segment
/// touching it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub p1: PointID,
    pub p2: PointID,
}

impl Segment {
    pub fn new(p1: PointID, p2: PointID) -> Segment {
        Segment { p1, p2 }
    }

    pub fn includes(&self, pt: PointID) -> bool {
        self.p1 == pt || self.p2 == pt
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Segment) -> bool {
        (self.p1 == other.p1 && self.p2 == other.p2) || (self.p1 == other.p2 && self.p2 == other.p1)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Segment({} to {})", self.p1.0, self.p2.0)
    }
}

/// The road sketch: unique points joined by unique segments. Every mutation is permissive; an
/// invalid edit is reported by the return value and otherwise ignored.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    // Ordered by ID, which is insertion order
    points: BTreeMap<PointID, Pt2D>,
    segments: Vec<Segment>,
    next_id: usize,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Adds the point without checking for duplicates.
    pub fn add_point(&mut self, pt: Pt2D) -> PointID {
        let id = PointID(self.next_id);
        self.next_id += 1;
        self.points.insert(id, pt);
        id
    }

    /// Adds the point unless one already exists at the same coordinates.
    pub fn try_add_point(&mut self, pt: Pt2D) -> Option<PointID> {
        if !pt.is_finite() || self.contains_point(pt) {
            return None;
        }
        Some(self.add_point(pt))
    }

    pub fn contains_point(&self, pt: Pt2D) -> bool {
        self.find_point(pt).is_some()
    }

    pub fn find_point(&self, pt: Pt2D) -> Option<PointID> {
        self.points
            .iter()
            .find(|(_, existing)| **existing == pt)
            .map(|(id, _)| *id)
    }

    pub fn maybe_get_pt(&self, id: PointID) -> Option<Pt2D> {
        self.points.get(&id).copied()
    }

    pub fn points(&self) -> impl Iterator<Item = (PointID, Pt2D)> + '_ {
        self.points.iter().map(|(id, pt)| (*id, *pt))
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Relocates a point, dragging every attached segment along. Refuses to stack the point on
    /// top of another one.
    pub fn move_point(&mut self, id: PointID, pt: Pt2D) -> bool {
        if !pt.is_finite() || !self.points.contains_key(&id) {
            return false;
        }
        if let Some(other) = self.find_point(pt) {
            return other == id;
        }
        self.points.insert(id, pt);
        true
    }

    /// Removes the point and every segment touching it.
    pub fn remove_point(&mut self, id: PointID) {
        self.segments.retain(|seg| !seg.includes(id));
        self.points.remove(&id);
    }

    /// Adds the segment without any validation.
    pub fn add_segment(&mut self, seg: Segment) {
        self.segments.push(seg);
    }

    /// Adds the segment if both endpoints exist, are different, and the segment isn't already
    /// present in either direction.
    pub fn try_add_segment(&mut self, seg: Segment) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        let (pt1, pt2) = match (self.maybe_get_pt(seg.p1), self.maybe_get_pt(seg.p2)) {
            (Some(pt1), Some(pt2)) => (pt1, pt2),
            _ => return false,
        };
        if seg.p1 == seg.p2 || pt1 == pt2 || self.contains_segment(&seg) {
            return false;
        }
        self.add_segment(seg);
        true
    }

    pub fn contains_segment(&self, seg: &Segment) -> bool {
        self.segments.contains(seg)
    }

    pub fn remove_segment(&mut self, seg: &Segment) {
        if let Some(idx) = self.segments.iter().position(|s| s == seg) {
            self.segments.remove(idx);
        }
    }

    pub fn segments(&self) -> &Vec<Segment> {
        &self.segments
    }

    pub fn segments_with_point(&self, id: PointID) -> Vec<Segment> {
        self.segments
            .iter()
            .filter(|seg| seg.includes(id))
            .cloned()
            .collect()
    }

    /// Empties the graph in place.
    pub fn clear(&mut self) {
        self.points.clear();
        self.segments.clear();
    }

    /// The geometry of a segment. None if an endpoint is gone or both endpoints coincide, which
    /// only happens for segments added without validation.
    pub fn segment_line(&self, seg: &Segment) -> Option<Line> {
        Line::maybe_new(self.maybe_get_pt(seg.p1)?, self.maybe_get_pt(seg.p2)?)
    }

    /// The closest point to `loc`, if it's strictly within `threshold`.
    pub fn nearest_point(&self, loc: Pt2D, threshold: f64) -> Option<PointID> {
        let mut best: Option<(PointID, f64)> = None;
        for (id, pt) in self.points() {
            let dist = pt.dist_to(loc);
            if dist < threshold && best.map(|(_, min)| dist < min).unwrap_or(true) {
                best = Some((id, dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// The closest segment to `loc`, if it's strictly within `threshold`.
    pub fn nearest_segment(&self, loc: Pt2D, threshold: f64) -> Option<Segment> {
        let mut best: Option<(Segment, f64)> = None;
        for seg in &self.segments {
            let line = match self.segment_line(seg) {
                Some(line) => line,
                None => continue,
            };
            let dist = line.dist_to_pt(loc);
            if dist < threshold && best.map(|(_, min)| dist < min).unwrap_or(true) {
                best = Some((*seg, dist));
            }
        }
        best.map(|(seg, _)| seg)
    }

    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            points: self.points.values().cloned().collect(),
            segments: self
                .segments
                .iter()
                .filter_map(|seg| {
                    Some(SegmentSnapshot {
                        p1: self.maybe_get_pt(seg.p1)?,
                        p2: self.maybe_get_pt(seg.p2)?,
                    })
                })
                .collect(),
        }
    }

    /// Rebuilds a graph from coordinates. Segment endpoints are matched to points by exact
    /// coordinates; endpoints that weren't listed as points are added. Duplicates and invalid
    /// segments are dropped with a warning.
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Result<Graph> {
        let mut graph = Graph::new();
        for pt in &snapshot.points {
            if !pt.is_finite() {
                bail!("Snapshot has a non-finite point {}", pt);
            }
            if graph.try_add_point(*pt).is_none() {
                warn!("Snapshot has a duplicate point {}; skipping", pt);
            }
        }
        for seg in &snapshot.segments {
            let mut ids = Vec::new();
            for pt in [seg.p1, seg.p2] {
                if !pt.is_finite() {
                    bail!("Snapshot has a segment with non-finite endpoint {}", pt);
                }
                let id = match graph.find_point(pt) {
                    Some(id) => id,
                    None => {
                        warn!("Snapshot segment endpoint {} isn't a point; adding it", pt);
                        graph.add_point(pt)
                    }
                };
                ids.push(id);
            }
            if !graph.try_add_segment(Segment::new(ids[0], ids[1])) {
                warn!(
                    "Snapshot has an invalid or duplicate segment from {} to {}; skipping",
                    seg.p1, seg.p2
                );
            }
        }
        Ok(graph)
    }
}

/// The persisted form of a graph: plain coordinates, no IDs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub points: Vec<Pt2D>,
    pub segments: Vec<SegmentSnapshot>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub p1: Pt2D,
    pub p2: Pt2D,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Pt2D {
        Pt2D::new(x, y)
    }

    #[test]
    fn points_are_unique() {
        let mut graph = Graph::new();
        assert!(graph.try_add_point(pt(1.0, 2.0)).is_some());
        assert!(graph.try_add_point(pt(1.0, 2.0)).is_none());
        assert!(graph.try_add_point(pt(f64::NAN, 2.0)).is_none());
        assert_eq!(graph.num_points(), 1);
        // The unchecked version doesn't care
        graph.add_point(pt(1.0, 2.0));
        assert_eq!(graph.num_points(), 2);
    }

    #[test]
    fn try_add_segment_needs_two_points() {
        let mut graph = Graph::new();
        let a = graph.add_point(pt(0.0, 0.0));
        assert!(!graph.try_add_segment(Segment::new(a, a)));
        assert!(!graph.try_add_segment(Segment::new(a, PointID(99))));
        assert!(graph.segments().is_empty());
    }

    #[test]
    fn try_add_segment_rejects_loops_and_duplicates() {
        let mut graph = Graph::new();
        let a = graph.add_point(pt(0.0, 0.0));
        let b = graph.add_point(pt(10.0, 0.0));
        assert!(!graph.try_add_segment(Segment::new(a, a)));
        assert!(graph.try_add_segment(Segment::new(a, b)));
        assert!(!graph.try_add_segment(Segment::new(a, b)));
        assert!(!graph.try_add_segment(Segment::new(b, a)));
        assert_eq!(graph.segments().len(), 1);
        assert!(graph.contains_segment(&Segment::new(b, a)));
    }

    #[test]
    fn remove_point_cascades() {
        let mut graph = Graph::new();
        let hub = graph.add_point(pt(0.0, 0.0));
        let spokes: Vec<PointID> = (1..=3)
            .map(|i| graph.add_point(pt(10.0 * i as f64, 5.0)))
            .collect();
        for s in &spokes {
            assert!(graph.try_add_segment(Segment::new(hub, *s)));
        }
        let far1 = graph.add_point(pt(100.0, 100.0));
        let far2 = graph.add_point(pt(200.0, 100.0));
        assert!(graph.try_add_segment(Segment::new(far1, far2)));
        assert!(graph.try_add_segment(Segment::new(spokes[0], spokes[1])));

        assert_eq!(graph.segments_with_point(hub).len(), 3);
        graph.remove_point(hub);
        assert!(graph.maybe_get_pt(hub).is_none());
        assert_eq!(graph.num_points(), 5);
        assert_eq!(
            graph.segments(),
            &vec![Segment::new(far1, far2), Segment::new(spokes[0], spokes[1])]
        );
    }

    #[test]
    fn remove_segment_and_clear() {
        let mut graph = Graph::new();
        let a = graph.add_point(pt(0.0, 0.0));
        let b = graph.add_point(pt(10.0, 0.0));
        assert!(graph.try_add_segment(Segment::new(a, b)));
        graph.remove_segment(&Segment::new(b, a));
        assert!(graph.segments().is_empty());
        assert_eq!(graph.num_points(), 2);
        // Removing something that's not there is fine
        graph.remove_segment(&Segment::new(b, a));

        graph.clear();
        assert_eq!(graph.num_points(), 0);
        // IDs aren't recycled
        assert_ne!(graph.add_point(pt(0.0, 0.0)), a);
    }

    #[test]
    fn move_point_drags_segments() {
        let mut graph = Graph::new();
        let a = graph.add_point(pt(0.0, 0.0));
        let b = graph.add_point(pt(10.0, 0.0));
        let seg = Segment::new(a, b);
        assert!(graph.try_add_segment(seg));
        assert!(graph.move_point(b, pt(10.0, 10.0)));
        assert_eq!(
            graph.segment_line(&seg),
            Some(Line::must_new(pt(0.0, 0.0), pt(10.0, 10.0)))
        );
        assert!(!graph.move_point(b, pt(0.0, 0.0)));
        assert!(graph.move_point(b, pt(10.0, 10.0)));
    }

    #[test]
    fn nearest() {
        let mut graph = Graph::new();
        let a = graph.add_point(pt(0.0, 0.0));
        let b = graph.add_point(pt(100.0, 0.0));
        assert!(graph.try_add_segment(Segment::new(a, b)));
        assert_eq!(graph.nearest_point(pt(3.0, 4.0), 10.0), Some(a));
        assert_eq!(graph.nearest_point(pt(3.0, 4.0), 5.0), None);
        assert_eq!(graph.nearest_point(pt(60.0, 0.0), 100.0), Some(b));
        assert_eq!(
            graph.nearest_segment(pt(50.0, 8.0), 10.0),
            Some(Segment::new(a, b))
        );
        assert_eq!(graph.nearest_segment(pt(50.0, 18.0), 10.0), None);
    }

    #[test]
    fn snapshot_round_trip() {
        let raw = r#"{
            "points": [{"x": 0, "y": 0}, {"x": 100, "y": 0}, {"x": 100, "y": 0}],
            "segments": [
                {"p1": {"x": 0, "y": 0}, "p2": {"x": 100, "y": 0}},
                {"p1": {"x": 100, "y": 0}, "p2": {"x": 0, "y": 0}},
                {"p1": {"x": 100, "y": 0}, "p2": {"x": 100, "y": 50}}
            ]
        }"#;
        let snapshot: GraphSnapshot = serde_json::from_str(raw).unwrap();
        let graph = Graph::from_snapshot(&snapshot).unwrap();
        // The duplicate point and reversed segment are dropped; the dangling endpoint is added
        assert_eq!(graph.num_points(), 3);
        assert_eq!(graph.segments().len(), 2);

        let again = Graph::from_snapshot(&graph.to_snapshot()).unwrap();
        assert_eq!(again.to_snapshot(), graph.to_snapshot());
    }
}
