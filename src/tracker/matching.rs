//! Matching utilities for associating detections to tracks.

use ndarray::Array2;
use tracing::warn;

use crate::tracker::rect::{Centroid, centroid_distance};
use crate::tracker::track::{Detection, Track};

/// Cost given to track/detection pairs the gate rejects.
const GATED_COST: f64 = 1e6;

/// Eligibility rule shared by every matcher.
#[derive(Debug, Clone, Copy)]
pub struct AssociationGate {
    /// A match requires a centroid distance strictly below this.
    pub max_distance: f64,
    /// Tracks missing for longer than this are never matched.
    pub max_disappeared: u32,
}

impl AssociationGate {
    /// Distance between the track's last centroid and `centroid`, if the pair may match.
    pub fn admits(&self, track: &Track, centroid: &Centroid) -> Option<f64> {
        if track.disappeared_frames() > self.max_disappeared {
            return None;
        }
        let distance = centroid_distance(&track.centroid(), centroid);
        (distance < self.max_distance).then_some(distance)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    /// `(track index, detection index)` pairs
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    /// Ascending detection indices
    pub unmatched_detections: Vec<usize>,
}

/// Strategy for pairing this pass's detections with existing tracks.
///
/// Each detection matches at most one track and each track at most one
/// detection. Implementations must be deterministic for identical inputs.
pub trait Matcher: std::fmt::Debug + Send {
    fn assign(
        &self,
        tracks: &[Track],
        detections: &[Detection],
        gate: &AssociationGate,
    ) -> AssignmentResult;
}

/// First-fit matching in track iteration order.
///
/// For each detection, in order, the first unconsumed track inside the gate
/// wins even when a closer one exists further down the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatcher;

impl Matcher for GreedyMatcher {
    fn assign(
        &self,
        tracks: &[Track],
        detections: &[Detection],
        gate: &AssociationGate,
    ) -> AssignmentResult {
        let mut consumed = vec![false; tracks.len()];
        let mut matches = Vec::new();
        let mut unmatched_detections = Vec::new();

        for (idet, det) in detections.iter().enumerate() {
            let centroid = det.centroid();
            let hit = tracks
                .iter()
                .enumerate()
                .find(|(itrack, track)| !consumed[*itrack] && gate.admits(track, &centroid).is_some())
                .map(|(itrack, _)| itrack);

            match hit {
                Some(itrack) => {
                    consumed[itrack] = true;
                    matches.push((itrack, idet));
                }
                None => unmatched_detections.push(idet),
            }
        }

        let unmatched_tracks = consumed
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| if c { None } else { Some(i) })
            .collect();

        AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        }
    }
}

/// Minimum total distance assignment over gated pairs, solved with LAPJV.
#[derive(Debug, Clone, Copy, Default)]
pub struct HungarianMatcher;

impl Matcher for HungarianMatcher {
    fn assign(
        &self,
        tracks: &[Track],
        detections: &[Detection],
        gate: &AssociationGate,
    ) -> AssignmentResult {
        let cost_matrix = centroid_distance_matrix(tracks, detections, gate);
        linear_assignment(&cost_matrix, gate.max_distance)
    }
}

/// Distance matrix between tracks (rows) and detections (columns).
///
/// Pairs outside the gate get `GATED_COST`.
pub fn centroid_distance_matrix(
    tracks: &[Track],
    detections: &[Detection],
    gate: &AssociationGate,
) -> Array2<f64> {
    let mut dists = Array2::from_elem((tracks.len(), detections.len()), GATED_COST);
    for (i, track) in tracks.iter().enumerate() {
        for (j, det) in detections.iter().enumerate() {
            if let Some(distance) = gate.admits(track, &det.centroid()) {
                dists[[i, j]] = distance;
            }
        }
    }
    dists
}

/// Solve the assignment and keep pairs whose cost is strictly below `thresh`.
pub fn linear_assignment(cost_matrix: &Array2<f64>, thresh: f64) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: vec![],
            unmatched_detections: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: vec![],
        };
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), GATED_COST);
    padded
        .slice_mut(ndarray::s![..num_rows, ..num_cols])
        .assign(cost_matrix);

    let mut matches = vec![];
    let mut unmatched_tracks = vec![];
    let mut unmatched_detections_mask: Vec<bool> = vec![true; num_cols];

    match lapjv::lapjv(&padded) {
        Ok((row_to_col, _)) => {
            for (row_idx, &col_idx) in row_to_col.iter().enumerate().take(num_rows) {
                if col_idx < num_cols && cost_matrix[[row_idx, col_idx]] < thresh {
                    matches.push((row_idx, col_idx));
                    unmatched_detections_mask[col_idx] = false;
                } else {
                    unmatched_tracks.push(row_idx);
                }
            }
        }
        Err(err) => {
            warn!(?err, "linear assignment failed, leaving every pair unmatched");
            unmatched_tracks = (0..num_rows).collect();
        }
    }

    let unmatched_detections: Vec<usize> = unmatched_detections_mask
        .iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { Some(i) } else { None })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}
