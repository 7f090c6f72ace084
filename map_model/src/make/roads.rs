use abstutil::Timer;
use geom::{Envelope, Line, Polygon};

use crate::Graph;

/// One envelope per graph segment. Segments whose envelope can't be built are skipped with a
/// warning.
pub fn make_envelopes(graph: &Graph, width: f64, roundness: usize, timer: &mut Timer) -> Vec<Envelope> {
    let mut envelopes = Vec::new();
    for seg in graph.segments() {
        let line = match graph.segment_line(seg) {
            Some(line) => line,
            None => {
                timer.warn(format!("Skipping degenerate {}", seg));
                continue;
            }
        };
        match Envelope::new(line, width, roundness) {
            Ok(env) => envelopes.push(env),
            Err(err) => timer.warn(format!("Skipping envelope around {}: {}", seg, err)),
        }
    }
    envelopes
}

/// The outer boundary of all the envelopes merged together.
pub fn union_envelopes(envelopes: &[Envelope]) -> Vec<Line> {
    Polygon::union(envelopes.iter().map(|env| env.poly.clone()).collect())
}

/// Road borders and lane guides are only traced once there's more than one road to merge.
pub fn make_borders(graph: &Graph, envelopes: &[Envelope]) -> Vec<Line> {
    if graph.segments().len() < 2 {
        return Vec::new();
    }
    union_envelopes(envelopes)
}

/// The centerlines of each travel lane: the merged boundary of envelopes half as wide as the
/// road.
pub fn make_lane_guides(
    graph: &Graph,
    road_width: f64,
    roundness: usize,
    timer: &mut Timer,
) -> Vec<Line> {
    let envelopes = make_envelopes(graph, road_width / 2.0, roundness, timer);
    make_borders(graph, &envelopes)
}
