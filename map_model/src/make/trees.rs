use rand::Rng;
use rand_xorshift::XorShiftRng;

use abstutil::{prettyprint_usize, Timer};
use geom::{lerp, Bounds, Line, Polygon, Pt2D};

use crate::{Tree, WorldConfig};

/// Scatters trees by rejection sampling inside the bounding box of the developed area. A
/// candidate must stay clear of every footprint and road, keep its distance from other trees,
/// yet sit close enough to something built that trees hug development instead of filling open
/// space. Stops after `max_tries` rejections in a row.
pub fn make_all_trees(
    road_borders: &[Line],
    building_bases: &[&Polygon],
    road_polys: &[&Polygon],
    cfg: &WorldConfig,
    rng: &mut XorShiftRng,
    timer: &mut Timer,
) -> Vec<Tree> {
    timer.start("make trees");

    let mut bounds = Bounds::new();
    for line in road_borders {
        bounds.update(line.pt1());
        bounds.update(line.pt2());
    }
    for base in building_bases {
        bounds.union(&base.get_bounds());
    }
    if bounds.is_empty() {
        timer.stop("make trees");
        return Vec::new();
    }

    let illegal: Vec<&Polygon> = building_bases
        .iter()
        .chain(road_polys.iter())
        .cloned()
        .collect();

    let mut trees: Vec<Tree> = Vec::new();
    let mut candidates = 0;
    let mut tries = 0;
    while tries < cfg.max_tries {
        candidates += 1;
        let pt = Pt2D::new(
            lerp(bounds.min_x, bounds.max_x, rng.gen::<f64>()),
            lerp(bounds.min_y, bounds.max_y, rng.gen::<f64>()),
        );
        if is_good_spot(pt, &illegal, &trees, cfg.tree_size) {
            trees.push(Tree::new(pt, cfg.tree_size, cfg.tree_height_coef));
            tries = 0;
        } else {
            tries += 1;
        }
    }

    timer.note(format!(
        "Placed {} trees after {} candidates",
        prettyprint_usize(trees.len()),
        prettyprint_usize(candidates)
    ));
    timer.stop("make trees");
    trees
}

fn is_good_spot(pt: Pt2D, illegal: &[&Polygon], trees: &[Tree], tree_size: f64) -> bool {
    if illegal
        .iter()
        .any(|poly| poly.contains_pt(pt) || poly.dist_to_pt(pt) < tree_size / 2.0)
    {
        return false;
    }
    if trees.iter().any(|tree| tree.center.dist_to(pt) < tree_size) {
        return false;
    }
    illegal
        .iter()
        .any(|poly| poly.dist_to_pt(pt) < tree_size * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_rules() {
        let block = Polygon::new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(100.0, 0.0),
            Pt2D::new(100.0, 100.0),
            Pt2D::new(0.0, 100.0),
        ]);
        let illegal = vec![&block];
        // Inside
        assert!(!is_good_spot(Pt2D::new(50.0, 50.0), &illegal, &[], 20.0));
        // Too close to the edge
        assert!(!is_good_spot(Pt2D::new(105.0, 50.0), &illegal, &[], 20.0));
        // Hugging the block
        assert!(is_good_spot(Pt2D::new(120.0, 50.0), &illegal, &[], 20.0));
        // Out in the wilderness
        assert!(!is_good_spot(Pt2D::new(500.0, 50.0), &illegal, &[], 20.0));
        // Crowding another tree
        let existing = vec![Tree::new(Pt2D::new(125.0, 55.0), 20.0, 0.3)];
        assert!(!is_good_spot(Pt2D::new(120.0, 50.0), &illegal, &existing, 20.0));
    }
}
