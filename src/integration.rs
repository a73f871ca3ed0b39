//! Integration module for connecting object detection backends to the counter.
//!
//! Detection itself lives outside this crate; this module provides the
//! `DetectionSource` seam, box conversion and size filtering, and a pipeline
//! that runs detection on a subsample of frames.

mod builder;
mod detector;
mod filter;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::DetectionSource;
pub use filter::SizeFilter;
pub use pipeline::{CountingPipeline, PipelineConfig, PipelineError};
