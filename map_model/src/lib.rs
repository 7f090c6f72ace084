//! The road graph an editor manipulates, and the world procedurally generated from it: road
//! surfaces and borders, lane guides, buildings lining the roads, and trees filling the gaps.
//!
//! Everything derived lives in a `World`; `World::generate` rebuilds it from the graph in a fixed
//! order, and `World::update` only does so when the graph's checksum changed.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod checksum;
mod config;
mod graph;
mod make;
mod objects;
mod world;

pub use crate::checksum::{checksum, ChangeDetector};
pub use crate::config::WorldConfig;
pub use crate::graph::{Graph, GraphSnapshot, PointID, Segment, SegmentSnapshot};
pub use crate::objects::building::Building;
pub use crate::objects::stop_marking::{StopMarking, STOP_MARKING_HEIGHT};
pub use crate::objects::tree::Tree;
pub use crate::world::{World, WorldSnapshot};
