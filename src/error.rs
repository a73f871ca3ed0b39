use thiserror::Error;

/// Rejected session or pipeline configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_distance must be a positive finite number, got {0}")]
    NonPositiveMaxDistance(f64),
    #[error("at least one reference line is required")]
    NoReferenceLines,
    #[error("reference line fraction {0} is outside [0, 1]")]
    LineFractionOutOfRange(f64),
    #[error("history capacity must hold at least 2 centroids, got {0}")]
    HistoryCapacityTooSmall(usize),
    #[error("frame dimensions must be positive, got {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },
    #[error("detection interval must be at least 1")]
    ZeroDetectionInterval,
}

/// Caller contract violations detected by `CountingSession::process_frame`.
///
/// A rejected frame leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("frame {received} arrived after frame {previous}; frames must be strictly increasing")]
    OutOfOrderFrame { previous: u64, received: u64 },
    #[error("frame {frame_index} carries {count} detections but no detection pass occurred")]
    DetectionsWithoutPass { frame_index: u64, count: usize },
    #[error("detection {index} has degenerate size {width}x{height}")]
    DegenerateDetection { index: usize, width: i32, height: i32 },
    #[error("detection {index} at ({x}, {y}) with size {width}x{height} extends past the pixel coordinate range")]
    DetectionOutOfRange {
        index: usize,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}
