//! Single object track.

use crate::tracker::history::CentroidHistory;
use crate::tracker::rect::{Centroid, Rect};
use crate::tracker::track_state::TrackState;

/// Session-scoped track identifier, assigned in strictly increasing order from 0.
pub type TrackId = u64;

/// Detection input for the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// Bounding box in TLWH format
    pub bbox: Rect,
}

impl Detection {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            bbox: Rect::new(x, y, width, height),
        }
    }

    pub fn from_rect(bbox: Rect) -> Self {
        Self { bbox }
    }

    #[inline]
    pub fn centroid(&self) -> Centroid {
        self.bbox.centroid()
    }
}

impl From<Rect> for Detection {
    fn from(bbox: Rect) -> Self {
        Self::from_rect(bbox)
    }
}

/// A persisted identity for one physical object.
///
/// Only the registry mutates tracks; everything else sees them by reference.
#[derive(Debug, Clone)]
pub struct Track {
    id: TrackId,
    bbox: Rect,
    history: CentroidHistory,
    disappeared_frames: u32,
    counted: bool,
}

impl Track {
    pub(crate) fn new(id: TrackId, detection: &Detection, history_capacity: Option<usize>) -> Self {
        Self {
            id,
            bbox: detection.bbox,
            history: CentroidHistory::new(detection.centroid(), history_capacity),
            disappeared_frames: 0,
            counted: false,
        }
    }

    /// Take a matched detection: new box, new centroid, counter reset.
    pub(crate) fn update(&mut self, detection: &Detection) {
        self.bbox = detection.bbox;
        self.history.push(detection.centroid());
        self.disappeared_frames = 0;
    }

    pub(crate) fn mark_missed(&mut self) {
        self.disappeared_frames = self.disappeared_frames.saturating_add(1);
    }

    /// Flip `counted` to true. Returns false if it already was.
    pub(crate) fn mark_counted(&mut self) -> bool {
        if self.counted {
            return false;
        }
        self.counted = true;
        true
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    pub fn centroid(&self) -> Centroid {
        self.history.last()
    }

    pub fn history(&self) -> &CentroidHistory {
        &self.history
    }

    pub fn disappeared_frames(&self) -> u32 {
        self.disappeared_frames
    }

    pub fn is_counted(&self) -> bool {
        self.counted
    }

    pub fn state(&self, max_disappeared: u32) -> TrackState {
        TrackState::from_disappeared(self.disappeared_frames, max_disappeared)
    }
}
