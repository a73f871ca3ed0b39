//! Line-crossing detection and the running count.

mod aggregator;
mod crossing;
mod lines;

pub use aggregator::{CountEvent, CountingAggregator};
pub use crossing::{Crossing, CrossingDetector, Direction};
pub use lines::ReferenceLines;
