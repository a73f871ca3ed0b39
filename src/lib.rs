//! Centroid tracking with directional line-crossing counting.
//!
//! Detections come in one frame at a time, get associated to persistent
//! tracks by centroid proximity, and every track is counted at most once
//! when its centroid crosses one of the configured reference lines.

pub mod config;
pub mod counting;
pub mod error;
pub mod integration;
pub mod session;
pub mod tracker;

pub use config::{AgingCadence, LinePlacement, MatchingStrategy, SessionConfig};
pub use counting::{CountEvent, CountingAggregator, Direction, ReferenceLines};
pub use error::{ConfigError, SessionError};
pub use integration::{CountingPipeline, DetectionSource, PipelineConfig, PipelineError};
pub use session::{CountingSession, FrameResult, FrameSize, TrackSnapshot};
pub use tracker::{Centroid, Detection, Rect, Track, TrackId, TrackRegistry, TrackState};
