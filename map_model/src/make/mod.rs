mod buildings;
mod roads;
mod trees;

pub use self::buildings::make_all_buildings;
pub use self::roads::{make_borders, make_envelopes, make_lane_guides};
pub use self::trees::make_all_trees;
