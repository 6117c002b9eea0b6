mod feeling;
mod region;

pub use feeling::{Feeling, FeelingTotals};
pub use region::{FeelingCounter, RegionRecord};
