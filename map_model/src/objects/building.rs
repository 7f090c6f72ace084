use serde::{Deserialize, Serialize};

use geom::{Polygon, Pt2D};

/// A building standing on a footprint. Height is faked for a 2D view: the roof is the footprint
/// pushed away from the viewer by `height_coef` of its distance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Building {
    pub base: Polygon,
    pub height_coef: f64,
}

impl Building {
    pub fn new(base: Polygon, height_coef: f64) -> Building {
        Building { base, height_coef }
    }

    fn roof_pts(&self, view_pt: Pt2D) -> Vec<Pt2D> {
        self.base
            .points()
            .iter()
            .map(|pt| *pt + (*pt - view_pt).scale(self.height_coef))
            .collect()
    }

    pub fn ceiling(&self, view_pt: Pt2D) -> Polygon {
        Polygon::new(self.roof_pts(view_pt))
    }

    /// One quad per footprint edge, joining it to the roof. Sorted farthest from the viewer
    /// first, so drawing in order paints nearer walls over farther ones.
    pub fn sides(&self, view_pt: Pt2D) -> Vec<Polygon> {
        let base = self.base.points();
        let roof = self.roof_pts(view_pt);
        let n = base.len();
        let mut sides: Vec<(f64, Polygon)> = (0..n)
            .map(|i| {
                let next = (i + 1) % n;
                let side = Polygon::new(vec![base[i], base[next], roof[next], roof[i]]);
                (side.dist_to_pt(view_pt), side)
            })
            .collect();
        sides.sort_by(|a, b| b.0.total_cmp(&a.0));
        sides.into_iter().map(|(_, side)| side).collect()
    }
}
