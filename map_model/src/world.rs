use anyhow::Result;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde::Serialize;

use abstutil::Timer;
use geom::{Envelope, Line, Polygon, Pt2D};

use crate::{
    checksum, make, Building, ChangeDetector, Graph, GraphSnapshot, StopMarking, Tree, WorldConfig,
    STOP_MARKING_HEIGHT,
};

/// Everything derived from the road graph. The editor mutates `graph` directly; `generate`
/// throws away the derived state and rebuilds it from scratch.
pub struct World {
    pub graph: Graph,
    config: WorldConfig,

    envelopes: Vec<Envelope>,
    road_borders: Vec<Line>,
    lane_guides: Vec<Line>,
    buildings: Vec<Building>,
    trees: Vec<Tree>,
    // Placed by hand, so they survive regeneration
    markings: Vec<StopMarking>,

    change_detector: ChangeDetector,
}

impl World {
    /// Nothing is generated yet; call `generate` or `update`.
    pub fn new(graph: Graph, config: WorldConfig) -> Result<World> {
        config.validate()?;
        Ok(World {
            graph,
            config,
            envelopes: Vec::new(),
            road_borders: Vec::new(),
            lane_guides: Vec::new(),
            buildings: Vec::new(),
            trees: Vec::new(),
            markings: Vec::new(),
            change_detector: ChangeDetector::new(),
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Rebuilds all derived state, in order: road envelopes, road borders, lane guides,
    /// buildings, then trees. Tree placement is seeded from the config, so the same graph always
    /// produces the same world. Afterwards `update` won't regenerate until the graph changes.
    pub fn generate(&mut self, timer: &mut Timer) {
        timer.start("generate world");
        let cfg = &self.config;

        timer.start("make road envelopes");
        self.envelopes =
            make::make_envelopes(&self.graph, cfg.road_width, cfg.road_roundness, timer);
        timer.stop("make road envelopes");

        timer.start("trace road borders");
        self.road_borders = make::make_borders(&self.graph, &self.envelopes);
        timer.stop("trace road borders");

        timer.start("trace lane guides");
        self.lane_guides =
            make::make_lane_guides(&self.graph, cfg.road_width, cfg.road_roundness, timer);
        timer.stop("trace lane guides");

        self.buildings = make::make_all_buildings(&self.graph, cfg, timer);

        let mut rng = XorShiftRng::seed_from_u64(cfg.rng_seed);
        let building_bases: Vec<&Polygon> = self.buildings.iter().map(|b| &b.base).collect();
        let road_polys: Vec<&Polygon> = self.envelopes.iter().map(|e| &e.poly).collect();
        self.trees = make::make_all_trees(
            &self.road_borders,
            &building_bases,
            &road_polys,
            cfg,
            &mut rng,
            timer,
        );

        info!(
            "Generated {} envelopes, {} road borders, {} lane guides, {} buildings, {} trees",
            self.envelopes.len(),
            self.road_borders.len(),
            self.lane_guides.len(),
            self.buildings.len(),
            self.trees.len()
        );
        timer.stop("generate world");
        self.change_detector.record(&self.graph);
    }

    /// Regenerates only if the graph changed since the last generation. Returns true if it did.
    pub fn update(&mut self, timer: &mut Timer) -> bool {
        if !self.change_detector.changed(&self.graph) {
            return false;
        }
        self.generate(timer);
        true
    }

    pub fn checksum(&self) -> String {
        checksum(&self.graph)
    }

    pub fn envelopes(&self) -> &Vec<Envelope> {
        &self.envelopes
    }

    pub fn road_borders(&self) -> &Vec<Line> {
        &self.road_borders
    }

    pub fn lane_guides(&self) -> &Vec<Line> {
        &self.lane_guides
    }

    pub fn buildings(&self) -> &Vec<Building> {
        &self.buildings
    }

    pub fn trees(&self) -> &Vec<Tree> {
        &self.trees
    }

    pub fn markings(&self) -> &Vec<StopMarking> {
        &self.markings
    }

    /// The lane guide closest to `pt`, if it's strictly within `threshold`.
    pub fn nearest_lane_guide(&self, pt: Pt2D, threshold: f64) -> Option<Line> {
        let mut best: Option<(Line, f64)> = None;
        for guide in &self.lane_guides {
            let dist = guide.dist_to_pt(pt);
            if dist < threshold && best.map(|(_, min)| dist < min).unwrap_or(true) {
                best = Some((*guide, dist));
            }
        }
        best.map(|(guide, _)| guide)
    }

    /// Places a stop marking on the lane guide nearest to `pt`, facing along it. The marking is
    /// centered on the closest spot of that guide. Fails if no lane is close enough.
    pub fn add_stop_marking(&mut self, pt: Pt2D) -> bool {
        let half_road = self.config.road_width / 2.0;
        let guide = match self.nearest_lane_guide(pt, half_road) {
            Some(guide) => guide,
            None => return false,
        };
        let (proj, offset) = guide.project_pt(pt);
        let center = if offset <= 0.0 {
            guide.pt1()
        } else if offset >= 1.0 {
            guide.pt2()
        } else {
            proj
        };
        match StopMarking::new(center, guide.dir_vector(), half_road, STOP_MARKING_HEIGHT) {
            Ok(marking) => {
                self.markings.push(marking);
                true
            }
            Err(err) => {
                warn!("Couldn't place stop marking at {}: {}", pt, err);
                false
            }
        }
    }

    /// Removes the first marking covering `pt`.
    pub fn remove_marking_at(&mut self, pt: Pt2D) -> bool {
        if let Some(idx) = self.markings.iter().position(|m| m.poly.contains_pt(pt)) {
            self.markings.remove(idx);
            true
        } else {
            false
        }
    }

    /// A copy of everything a renderer or exporter needs.
    pub fn to_snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            checksum: self.checksum(),
            config: self.config.clone(),
            graph: self.graph.to_snapshot(),
            envelopes: self.envelopes.iter().map(|e| e.poly.clone()).collect(),
            road_borders: self.road_borders.clone(),
            lane_guides: self.lane_guides.clone(),
            buildings: self.buildings.clone(),
            trees: self.trees.clone(),
            markings: self.markings.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct WorldSnapshot {
    pub checksum: String,
    pub config: WorldConfig,
    pub graph: GraphSnapshot,
    pub envelopes: Vec<Polygon>,
    pub road_borders: Vec<Line>,
    pub lane_guides: Vec<Line>,
    pub buildings: Vec<Building>,
    pub trees: Vec<Tree>,
    pub markings: Vec<StopMarking>,
}
