//! Track registry: association, creation, aging and eviction.

use tracing::{debug, trace};

use crate::tracker::matching::{AssignmentResult, AssociationGate, Matcher};
use crate::tracker::track::{Detection, Track, TrackId};

/// What a single pass did to the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryUpdate {
    /// Existing tracks that took a detection, in detection order
    pub matched: Vec<TrackId>,
    /// Tracks created from unmatched detections, ascending
    pub created: Vec<TrackId>,
    /// Tracks evicted at the end of the pass
    pub removed: Vec<TrackId>,
}

/// Owns every live track of a session.
///
/// Not reentrant: passes must be fed one at a time in frame order.
#[derive(Debug)]
pub struct TrackRegistry {
    tracks: Vec<Track>,
    next_id: TrackId,
    gate: AssociationGate,
    history_capacity: Option<usize>,
    matcher: Box<dyn Matcher>,
}

impl TrackRegistry {
    pub fn new(
        gate: AssociationGate,
        history_capacity: Option<usize>,
        matcher: Box<dyn Matcher>,
    ) -> Self {
        Self {
            tracks: Vec::new(),
            next_id: 0,
            gate,
            history_capacity,
            matcher,
        }
    }

    /// Run a detection pass.
    ///
    /// Matched tracks take their detection, unmatched detections become new
    /// tracks, every other track ages by one, and tracks past the
    /// disappearance budget are evicted.
    pub fn associate(&mut self, detections: &[Detection], frame_index: u64) -> RegistryUpdate {
        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = self.matcher.assign(&self.tracks, detections, &self.gate);

        let mut matched = Vec::with_capacity(matches.len());
        let mut ordered = matches;
        ordered.sort_unstable_by_key(|&(_, idet)| idet);
        for (itrack, idet) in ordered {
            let track = &mut self.tracks[itrack];
            track.update(&detections[idet]);
            debug!(
                track_id = track.id(),
                frame = frame_index,
                x = track.centroid().x,
                y = track.centroid().y,
                "track matched"
            );
            matched.push(track.id());
        }

        for itrack in unmatched_tracks {
            let track = &mut self.tracks[itrack];
            track.mark_missed();
            trace!(track_id = track.id(), disappeared = track.disappeared_frames(), "track missed");
        }

        let mut created = Vec::with_capacity(unmatched_detections.len());
        for idet in unmatched_detections {
            let id = self.next_id;
            self.next_id += 1;
            let track = Track::new(id, &detections[idet], self.history_capacity);
            debug!(
                track_id = id,
                frame = frame_index,
                x = track.centroid().x,
                y = track.centroid().y,
                "track created"
            );
            self.tracks.push(track);
            created.push(id);
        }

        let removed = self.evict();
        RegistryUpdate {
            matched,
            created,
            removed,
        }
    }

    /// Age every track without matching anything, then evict.
    pub fn age_all(&mut self) -> Vec<TrackId> {
        for track in &mut self.tracks {
            track.mark_missed();
            trace!(track_id = track.id(), disappeared = track.disappeared_frames(), "track aged");
        }
        self.evict()
    }

    fn evict(&mut self) -> Vec<TrackId> {
        let max_disappeared = self.gate.max_disappeared;
        let mut removed = Vec::new();
        self.tracks.retain(|track| {
            let keep = track.disappeared_frames() <= max_disappeared;
            if !keep {
                debug!(
                    track_id = track.id(),
                    disappeared = track.disappeared_frames(),
                    counted = track.is_counted(),
                    "track evicted"
                );
                removed.push(track.id());
            }
            keep
        });
        removed
    }

    /// Flip a track's `counted` flag. Returns true only on the first flip.
    pub fn mark_counted(&mut self, id: TrackId) -> bool {
        self.tracks
            .iter_mut()
            .find(|t| t.id() == id)
            .is_some_and(Track::mark_counted)
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    /// Live tracks in insertion order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// The id the next created track will receive.
    pub fn next_id(&self) -> TrackId {
        self.next_id
    }

    pub fn gate(&self) -> &AssociationGate {
        &self.gate
    }
}
