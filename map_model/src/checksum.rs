use serde::Serialize;

use geom::{HashablePt2D, Pt2D};

use crate::Graph;

#[derive(Serialize)]
struct NormalizedGraph {
    points: Vec<HashablePt2D>,
    segments: Vec<(HashablePt2D, HashablePt2D)>,
}

impl NormalizedGraph {
    /// Points sorted, each segment's endpoints sorted, then segments sorted, so insertion order
    /// and segment direction don't matter.
    fn new(graph: &Graph) -> NormalizedGraph {
        let mut points: Vec<HashablePt2D> = graph.points().map(|(_, pt)| pt.to_hashable()).collect();
        points.sort();

        let mut segments: Vec<(HashablePt2D, HashablePt2D)> = graph
            .segments()
            .iter()
            .filter_map(|seg| {
                let pt1 = graph.maybe_get_pt(seg.p1)?.to_hashable();
                let pt2 = graph.maybe_get_pt(seg.p2)?.to_hashable();
                Some(if pt1 <= pt2 { (pt1, pt2) } else { (pt2, pt1) })
            })
            .collect();
        segments.sort();

        NormalizedGraph { points, segments }
    }

    /// Used if JSON serialization ever fails. Weaker, but it still changes whenever a coordinate
    /// does.
    fn plain_fingerprint(&self) -> String {
        let fmt = |pt: &HashablePt2D| {
            let pt: Pt2D = pt.to_pt2d();
            format!("{:?},{:?}", pt.x(), pt.y())
        };
        let mut out = String::new();
        for pt in &self.points {
            out.push_str(&fmt(pt));
            out.push(';');
        }
        out.push('|');
        for (pt1, pt2) in &self.segments {
            out.push_str(&fmt(pt1));
            out.push('-');
            out.push_str(&fmt(pt2));
            out.push(';');
        }
        out
    }
}

/// An md5sum of the graph's contents. Only meant to detect edits; collisions aren't defended
/// against.
pub fn checksum(graph: &Graph) -> String {
    let normalized = NormalizedGraph::new(graph);
    match serde_json::to_vec(&normalized) {
        Ok(bytes) => {
            let mut context = md5::Context::new();
            context.consume(&bytes);
            format!("{:x}", context.compute())
        }
        Err(err) => {
            warn!("Couldn't serialize graph for checksum, using a plain fingerprint: {}", err);
            normalized.plain_fingerprint()
        }
    }
}

/// Remembers the last checksum seen, to skip regenerating when nothing changed.
#[derive(Clone, Debug, Default)]
pub struct ChangeDetector {
    last: Option<String>,
}

impl ChangeDetector {
    pub fn new() -> ChangeDetector {
        ChangeDetector::default()
    }

    /// True the first time, and whenever the graph differs from the previous call.
    pub fn changed(&mut self, graph: &Graph) -> bool {
        let current = checksum(graph);
        if self.last.as_ref() == Some(&current) {
            return false;
        }
        self.last = Some(current);
        true
    }

    /// Remember the graph as already seen, so the next `changed` on the same graph is false.
    pub fn record(&mut self, graph: &Graph) {
        self.last = Some(checksum(graph));
    }

    /// Forget the last checksum, so the next call reports a change.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
