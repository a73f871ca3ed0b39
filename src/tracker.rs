mod history;
mod matching;
mod rect;
mod registry;
mod track;
mod track_state;

pub use history::CentroidHistory;
pub use matching::{
    AssignmentResult, AssociationGate, GreedyMatcher, HungarianMatcher, Matcher,
    centroid_distance_matrix, linear_assignment,
};
pub use rect::{Centroid, Rect, centroid_distance};
pub use registry::{RegistryUpdate, TrackRegistry};
pub use track::{Detection, Track, TrackId};
pub use track_state::TrackState;
