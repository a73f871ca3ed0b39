use tracing::trace;

use crate::tracker::Detection;

/// Drops detections that are not strictly larger than the minimum size.
///
/// Minimums are clamped to zero, so no degenerate box passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFilter {
    min_width: i32,
    min_height: i32,
}

impl Default for SizeFilter {
    fn default() -> Self {
        Self {
            min_width: 50,
            min_height: 50,
        }
    }
}

impl SizeFilter {
    pub fn new(min_width: i32, min_height: i32) -> Self {
        Self {
            min_width: min_width.max(0),
            min_height: min_height.max(0),
        }
    }

    #[inline]
    pub fn accepts(&self, det: &Detection) -> bool {
        det.bbox.width > self.min_width && det.bbox.height > self.min_height
    }

    pub fn apply(&self, detections: Vec<Detection>) -> Vec<Detection> {
        let before = detections.len();
        let kept: Vec<Detection> = detections.into_iter().filter(|d| self.accepts(d)).collect();
        if kept.len() != before {
            trace!(dropped = before - kept.len(), "small detections filtered");
        }
        kept
    }
}
