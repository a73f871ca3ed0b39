//! Immutable session configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tracker::{GreedyMatcher, HungarianMatcher, Matcher};

/// Where the reference lines sit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinePlacement {
    /// Fractions of the frame height, truncated to a pixel row
    Fractions(Vec<f64>),
    /// Pixel rows
    Absolute(Vec<i32>),
}

impl Default for LinePlacement {
    fn default() -> Self {
        LinePlacement::Fractions(vec![0.4, 0.6])
    }
}

/// When unmatched tracks accumulate disappearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingCadence {
    /// Every processed frame, including frames without a detection pass
    #[default]
    EveryFrame,
    /// Only frames on which detection ran
    DetectionPassesOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingStrategy {
    /// First-fit in track insertion order
    #[default]
    Greedy,
    /// Minimum total distance assignment
    Hungarian,
}

impl MatchingStrategy {
    pub fn matcher(self) -> Box<dyn Matcher> {
        match self {
            MatchingStrategy::Greedy => Box::new(GreedyMatcher),
            MatchingStrategy::Hungarian => Box::new(HungarianMatcher),
        }
    }
}

/// Configuration for a `CountingSession`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Association gate in pixels; matches need a strictly smaller distance.
    pub max_distance: f64,
    /// Tracks are evicted once they miss more than this many frames.
    pub max_disappeared: u32,
    pub lines: LinePlacement,
    pub aging: AgingCadence,
    pub matching: MatchingStrategy,
    /// `None` keeps every centroid; `Some(n)` keeps the last `n`.
    pub history_capacity: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_distance: 70.0,
            max_disappeared: 10,
            lines: LinePlacement::default(),
            aging: AgingCadence::default(),
            matching: MatchingStrategy::default(),
            history_capacity: None,
        }
    }
}

impl SessionConfig {
    /// Check everything that does not depend on the frame size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(ConfigError::NonPositiveMaxDistance(self.max_distance));
        }
        match &self.lines {
            LinePlacement::Fractions(f) if f.is_empty() => return Err(ConfigError::NoReferenceLines),
            LinePlacement::Absolute(ys) if ys.is_empty() => return Err(ConfigError::NoReferenceLines),
            LinePlacement::Fractions(f) => {
                if let Some(&bad) = f.iter().find(|f| !(0.0..=1.0).contains(*f)) {
                    return Err(ConfigError::LineFractionOutOfRange(bad));
                }
            }
            LinePlacement::Absolute(_) => {}
        }
        if let Some(cap) = self.history_capacity {
            if cap < 2 {
                return Err(ConfigError::HistoryCapacityTooSmall(cap));
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
