use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use geom::{lerp, Angle, Polygon, Pt2D};

const LEVELS: usize = 8;
const TOP_LEVEL_SIZE: f64 = 40.0;

/// A tree, drawn as stacked irregular discs shrinking towards a top displaced away from the
/// viewer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tree {
    pub center: Pt2D,
    pub size: f64,
    pub height_coef: f64,
    pub base: Polygon,
}

impl Tree {
    pub fn new(center: Pt2D, size: f64, height_coef: f64) -> Tree {
        Tree {
            center,
            size,
            height_coef,
            base: rugged_circle(center, size, center),
        }
    }

    /// The canopy layers from the ground up.
    pub fn levels(&self, view_pt: Pt2D) -> Vec<Polygon> {
        let top = self.center + (self.center - view_pt).scale(self.height_coef);
        (0..LEVELS)
            .map(|level| {
                let t = level as f64 / (LEVELS - 1) as f64;
                rugged_circle(
                    self.center.lerp(top, t),
                    lerp(self.size, TOP_LEVEL_SIZE, t),
                    self.center,
                )
            })
            .collect()
    }
}

/// A circle of the given diameter whose radius wobbles between half and full. The wobble depends
/// only on the tree's anchor, so every level of a tree has the same silhouette.
fn rugged_circle(center: Pt2D, size: f64, anchor: Pt2D) -> Polygon {
    let radius = size / 2.0;
    let pts = (0..32)
        .map(|i| {
            let a = (i as f64) * PI / 16.0;
            let wobble = (((a + anchor.x()) * size) % 17.0).cos().powi(2);
            let noised = radius * lerp(0.5, 1.0, wobble * 0.5);
            center.project_away(noised, Angle::new_rads(a))
        })
        .collect();
    Polygon::new(pts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_stays_within_size() {
        let center = Pt2D::new(300.0, -20.0);
        let tree = Tree::new(center, 200.0, 0.3);
        assert_eq!(tree.base.points().len(), 32);
        for pt in tree.base.points() {
            let d = pt.dist_to(center);
            assert!(d >= 50.0 - 1e-9 && d <= 75.0 + 1e-9);
        }
        assert!(tree.base.contains_pt(center));
        // Deterministic
        assert_eq!(tree.base, Tree::new(center, 200.0, 0.3).base);
    }

    #[test]
    fn levels_rise_away_from_viewer() {
        let tree = Tree::new(Pt2D::new(0.0, 0.0), 200.0, 0.5);
        let levels = tree.levels(Pt2D::new(0.0, -100.0));
        assert_eq!(levels.len(), LEVELS);
        assert!(levels[LEVELS - 1].center().y() > 40.0);
    }
}
