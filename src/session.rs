//! Per-session tracking and counting: the single entry point for frames.

use tracing::{debug, info};

use crate::config::{AgingCadence, SessionConfig};
use crate::counting::{CountEvent, CountingAggregator, CrossingDetector, ReferenceLines};
use crate::error::{ConfigError, SessionError};
use crate::tracker::{
    AssociationGate, Centroid, Detection, Rect, Track, TrackId, TrackRegistry, TrackState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Read-only view of a track for render/report sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSnapshot {
    pub id: TrackId,
    pub bbox: Rect,
    pub centroid: Centroid,
    pub counted: bool,
    pub disappeared_frames: u32,
    pub state: TrackState,
}

impl TrackSnapshot {
    fn from_track(track: &Track, max_disappeared: u32) -> Self {
        Self {
            id: track.id(),
            bbox: track.bbox(),
            centroid: track.centroid(),
            counted: track.is_counted(),
            disappeared_frames: track.disappeared_frames(),
            state: track.state(max_disappeared),
        }
    }
}

/// Session state after one processed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    pub frame_index: u64,
    pub detection_pass: bool,
    /// Live tracks in creation order
    pub tracks: Vec<TrackSnapshot>,
    /// Running total after this frame
    pub total: u64,
    /// Tracks that became counted on this frame
    pub events: Vec<CountEvent>,
    pub created: Vec<TrackId>,
    pub removed: Vec<TrackId>,
}

impl FrameResult {
    pub fn active_tracks(&self) -> usize {
        self.tracks.len()
    }

    pub fn track(&self, id: TrackId) -> Option<&TrackSnapshot> {
        self.tracks.iter().find(|t| t.id == id)
    }
}

/// One tracking-and-counting session over a single video stream.
///
/// Frames must be fed one at a time in strictly increasing frame order.
/// All state is dropped with the session.
#[derive(Debug)]
pub struct CountingSession {
    config: SessionConfig,
    frame_size: FrameSize,
    registry: TrackRegistry,
    crossing: CrossingDetector,
    aggregator: CountingAggregator,
    last_frame: Option<u64>,
}

impl CountingSession {
    pub fn new(config: SessionConfig, frame_size: FrameSize) -> Result<Self, ConfigError> {
        config.validate()?;
        if frame_size.width == 0 || frame_size.height == 0 {
            return Err(ConfigError::EmptyFrame {
                width: frame_size.width,
                height: frame_size.height,
            });
        }

        let lines = ReferenceLines::from_placement(&config.lines, frame_size.height)?;
        let gate = AssociationGate {
            max_distance: config.max_distance,
            max_disappeared: config.max_disappeared,
        };
        let registry = TrackRegistry::new(gate, config.history_capacity, config.matching.matcher());

        info!(
            width = frame_size.width,
            height = frame_size.height,
            lines = ?lines.ys(),
            max_distance = config.max_distance,
            max_disappeared = config.max_disappeared,
            matching = ?config.matching,
            aging = ?config.aging,
            "counting session started"
        );

        Ok(Self {
            config,
            frame_size,
            registry,
            crossing: CrossingDetector::new(lines),
            aggregator: CountingAggregator::new(),
            last_frame: None,
        })
    }

    pub fn with_default_config(frame_size: FrameSize) -> Result<Self, ConfigError> {
        Self::new(SessionConfig::default(), frame_size)
    }

    /// Process one frame.
    ///
    /// `detections` must be empty unless `detection_pass` is set. The frame is
    /// rejected without touching any state if it breaks frame order or
    /// carries a degenerate box or one reaching past the `i32` pixel range.
    pub fn process_frame(
        &mut self,
        detections: &[Detection],
        frame_index: u64,
        detection_pass: bool,
    ) -> Result<FrameResult, SessionError> {
        self.check_frame(detections, frame_index, detection_pass)?;
        self.last_frame = Some(frame_index);

        let mut events = Vec::new();
        let (created, removed) = if detection_pass {
            let update = self.registry.associate(detections, frame_index);
            for &id in &update.matched {
                let Some(crossing) = self.registry.get(id).and_then(|t| self.crossing.evaluate(t))
                else {
                    continue;
                };
                if self.registry.mark_counted(id) {
                    let event = self.aggregator.record(id, crossing);
                    info!(
                        track_id = id,
                        frame = frame_index,
                        line = crossing.line_y,
                        direction = ?crossing.direction,
                        total = event.total,
                        "track counted"
                    );
                    events.push(event);
                }
            }
            (update.created, update.removed)
        } else {
            match self.config.aging {
                AgingCadence::EveryFrame => (Vec::new(), self.registry.age_all()),
                AgingCadence::DetectionPassesOnly => (Vec::new(), Vec::new()),
            }
        };

        if !removed.is_empty() {
            debug!(frame = frame_index, removed = ?removed, "tracks evicted");
        }

        Ok(FrameResult {
            frame_index,
            detection_pass,
            tracks: self.snapshot(),
            total: self.aggregator.total(),
            events,
            created,
            removed,
        })
    }

    fn check_frame(
        &self,
        detections: &[Detection],
        frame_index: u64,
        detection_pass: bool,
    ) -> Result<(), SessionError> {
        if let Some(previous) = self.last_frame {
            if frame_index <= previous {
                return Err(SessionError::OutOfOrderFrame {
                    previous,
                    received: frame_index,
                });
            }
        }
        if !detection_pass && !detections.is_empty() {
            return Err(SessionError::DetectionsWithoutPass {
                frame_index,
                count: detections.len(),
            });
        }
        for (index, det) in detections.iter().enumerate() {
            let bbox = det.bbox;
            if bbox.is_degenerate() {
                return Err(SessionError::DegenerateDetection {
                    index,
                    width: bbox.width,
                    height: bbox.height,
                });
            }
            if bbox.bottom_right().is_none() {
                return Err(SessionError::DetectionOutOfRange {
                    index,
                    x: bbox.x,
                    y: bbox.y,
                    width: bbox.width,
                    height: bbox.height,
                });
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<TrackSnapshot> {
        self.registry
            .tracks()
            .iter()
            .map(|t| TrackSnapshot::from_track(t, self.config.max_disappeared))
            .collect()
    }

    /// Running total; authoritative once the session stops.
    pub fn total(&self) -> u64 {
        self.aggregator.total()
    }

    /// End the session and return the final total.
    pub fn finish(self) -> u64 {
        info!(
            total = self.aggregator.total(),
            tracks_created = self.registry.next_id(),
            "counting session finished"
        );
        self.aggregator.total()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    pub fn reference_lines(&self) -> &ReferenceLines {
        self.crossing.lines()
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }
}
