/// Track state enumeration for object tracking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Matched a detection on the most recent pass
    #[default]
    Tracked,
    /// Missed one or more passes but still inside the disappearance budget
    Lost,
    /// Exceeded the disappearance budget; evicted at the end of the pass
    Removed,
}

impl TrackState {
    /// Derive the state from a disappearance counter and the eviction threshold.
    pub fn from_disappeared(disappeared_frames: u32, max_disappeared: u32) -> Self {
        if disappeared_frames == 0 {
            TrackState::Tracked
        } else if disappeared_frames <= max_disappeared {
            TrackState::Lost
        } else {
            TrackState::Removed
        }
    }
}
