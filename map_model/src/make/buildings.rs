use abstutil::Timer;
use geom::{Envelope, Line, Polygon};

use crate::make::roads::{make_envelopes, union_envelopes};
use crate::{Building, Graph, WorldConfig};

/// Lines the roads with building footprints. Oversized envelopes around every road are merged;
/// the resulting outline is cut into equal frontages, each frontage grows a rectangular
/// footprint, and footprints crowding an earlier one are dropped.
pub fn make_all_buildings(graph: &Graph, cfg: &WorldConfig, timer: &mut Timer) -> Vec<Building> {
    timer.start("make buildings");

    let envelopes = make_envelopes(
        graph,
        cfg.road_width + cfg.building_width + cfg.spacing * 2.0,
        cfg.road_roundness,
        timer,
    );
    let mut guides = union_envelopes(&envelopes);
    let num_guides = guides.len();
    guides.retain(|guide| guide.length() >= cfg.building_min_length);
    debug!(
        "{} of {} building guides are long enough",
        guides.len(),
        num_guides
    );

    let mut supports = Vec::new();
    for guide in &guides {
        supports.extend(subdivide(guide, cfg.building_min_length, cfg.spacing));
    }

    let mut bases = Vec::new();
    for support in supports {
        match Envelope::new(support, cfg.building_width, 1) {
            Ok(env) => bases.push(env.poly),
            Err(err) => timer.warn(format!("Skipping building footprint: {}", err)),
        }
    }
    let num_bases = bases.len();
    let bases = prune_crowded(bases, cfg.spacing);
    if bases.len() != num_bases {
        timer.note(format!(
            "Dropped {} of {} building footprints that crowd another",
            num_bases - bases.len(),
            num_bases
        ));
    }

    timer.stop("make buildings");
    bases
        .into_iter()
        .map(|base| Building::new(base, cfg.building_height_coef))
        .collect()
}

/// Splits a guide into as many equal pieces as possible, each at least `min_length` long, with
/// `spacing` between consecutive pieces.
pub fn subdivide(guide: &Line, min_length: f64, spacing: f64) -> Vec<Line> {
    let len = guide.length() + spacing;
    let count = (len / (min_length + spacing)).floor() as usize;
    if count == 0 {
        return Vec::new();
    }
    let piece_length = len / (count as f64) - spacing;
    let dir = guide.dir_vector();

    let mut pieces = Vec::new();
    let mut start = guide.pt1();
    for _ in 0..count {
        let end = start + dir.scale(piece_length);
        if let Some(piece) = Line::maybe_new(start, end) {
            pieces.push(piece);
        }
        start = end + dir.scale(spacing);
    }
    pieces
}

/// Keeps footprints in order, dropping any that overlap or come within `spacing` of one already
/// kept. First come, first served.
pub fn prune_crowded(bases: Vec<Polygon>, spacing: f64) -> Vec<Polygon> {
    // Footprints cut from the same guide sit exactly `spacing` apart
    let eps = 0.001;
    let mut kept: Vec<Polygon> = Vec::new();
    for candidate in bases {
        let crowded = kept.iter().any(|base| {
            base.intersects_poly(&candidate) || base.dist_to_poly(&candidate) < spacing - eps
        });
        if !crowded {
            kept.push(candidate);
        }
    }
    kept
}
