pub mod aggregation;
pub mod detail_shape;
mod region_service;

pub use region_service::{MapLevel, RegionInfo, RegionService, VoteOutcome};
