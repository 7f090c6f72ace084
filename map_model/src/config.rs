use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Tuning knobs for world generation, fixed for the lifetime of a `World`. Fields missing from
/// JSON take their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Full width of a road surface
    pub road_width: f64,
    /// How many steps each rounded road end is sampled with
    pub road_roundness: usize,
    /// Depth of a building footprint, measured away from the road
    pub building_width: f64,
    /// Shortest allowed building frontage
    pub building_min_length: f64,
    /// Gap between roads, buildings and each other
    pub spacing: f64,
    pub tree_size: f64,
    /// Tree placement gives up after this many consecutive rejected candidates
    pub max_tries: usize,
    pub rng_seed: u64,
    pub building_height_coef: f64,
    pub tree_height_coef: f64,
}

impl Default for WorldConfig {
    fn default() -> WorldConfig {
        WorldConfig {
            road_width: 100.0,
            road_roundness: 10,
            building_width: 150.0,
            building_min_length: 150.0,
            spacing: 50.0,
            tree_size: 200.0,
            max_tries: 100,
            rng_seed: 42,
            building_height_coef: 0.2,
            tree_height_coef: 0.3,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("road_width", self.road_width),
            ("building_width", self.building_width),
            ("building_min_length", self.building_min_length),
            ("spacing", self.spacing),
            ("tree_size", self.tree_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                bail!("{} must be positive, not {}", name, value);
            }
        }
        for (name, value) in [
            ("building_height_coef", self.building_height_coef),
            ("tree_height_coef", self.tree_height_coef),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("{} can't be negative, not {}", name, value);
            }
        }
        if self.road_roundness == 0 {
            bail!("road_roundness must be at least 1");
        }
        if self.max_tries == 0 {
            bail!("max_tries must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = WorldConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.road_width, 100.0);
        assert_eq!(cfg.road_roundness, 10);
        assert_eq!(cfg.building_width, 150.0);
        assert_eq!(cfg.building_min_length, 150.0);
        assert_eq!(cfg.spacing, 50.0);
        assert_eq!(cfg.tree_size, 200.0);
        assert_eq!(cfg.max_tries, 100);
    }

    #[test]
    fn partial_json() {
        let cfg: WorldConfig = serde_json::from_str(r#"{"road_width": 60, "rng_seed": 7}"#).unwrap();
        assert_eq!(cfg.road_width, 60.0);
        assert_eq!(cfg.rng_seed, 7);
        assert_eq!(cfg.spacing, 50.0);
    }

    #[test]
    fn rejects_bad_values() {
        let mut cfg = WorldConfig::default();
        cfg.spacing = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = WorldConfig::default();
        cfg.tree_size = f64::INFINITY;
        assert!(cfg.validate().is_err());

        let mut cfg = WorldConfig::default();
        cfg.max_tries = 0;
        assert!(cfg.validate().is_err());
    }
}
