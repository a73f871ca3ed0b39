//! CountingPipeline for combining detection with tracking and counting.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::{ConfigError, SessionError};
use crate::session::{CountingSession, FrameResult};

use super::{DetectionSource, SizeFilter};

/// Detection cadence and size filtering for a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run the detector on every Nth frame (1 = every frame).
    pub detection_interval: u64,
    /// Detections must be strictly wider than this.
    pub min_width: i32,
    /// Detections must be strictly taller than this.
    pub min_height: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            detection_interval: 3,
            min_width: 50,
            min_height: 50,
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError<E>
where
    E: std::error::Error + 'static,
{
    #[error("detection failed")]
    Detection(#[source] E),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Bundles a `DetectionSource` with a `CountingSession`.
///
/// Frames are numbered from 1. Detection runs on frames divisible by the
/// interval; every other frame goes to the session as an aging-only frame.
pub struct CountingPipeline<D: DetectionSource> {
    detector: D,
    session: CountingSession,
    filter: SizeFilter,
    detection_interval: u64,
    frame_count: u64,
}

impl<D: DetectionSource> CountingPipeline<D> {
    /// Create a new pipeline with the given detector, session and cadence.
    pub fn new(
        detector: D,
        session: CountingSession,
        config: PipelineConfig,
    ) -> Result<Self, ConfigError> {
        if config.detection_interval == 0 {
            return Err(ConfigError::ZeroDetectionInterval);
        }
        Ok(Self {
            detector,
            session,
            filter: SizeFilter::new(config.min_width, config.min_height),
            detection_interval: config.detection_interval,
            frame_count: 0,
        })
    }

    /// Process the next video frame.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes, handed to the detector on detection frames
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameResult, PipelineError<D::Error>> {
        self.frame_count += 1;
        let detection_pass = self.frame_count % self.detection_interval == 0;

        let detections = if detection_pass {
            let raw = self
                .detector
                .detect(input, width, height)
                .map_err(PipelineError::Detection)?;
            if !raw.is_empty() {
                debug!(frame = self.frame_count, count = raw.len(), "detections received");
            }
            self.filter.apply(raw)
        } else {
            Vec::new()
        };

        Ok(self
            .session
            .process_frame(&detections, self.frame_count, detection_pass)?)
    }

    /// Number of frames pushed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying session.
    pub fn session(&self) -> &CountingSession {
        &self.session
    }

    /// Stop and return the final total.
    pub fn finish(self) -> u64 {
        self.session.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FrameSize;
    use crate::tracker::Detection;

    struct MockDetector {
        calls: usize,
        detections: Vec<Detection>,
    }

    impl DetectionSource for MockDetector {
        type Error = std::convert::Infallible;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<Detection>, Self::Error> {
            self.calls += 1;
            Ok(self.detections.clone())
        }
    }

    fn pipeline(detections: Vec<Detection>) -> CountingPipeline<MockDetector> {
        let session = CountingSession::with_default_config(FrameSize::new(640, 480)).unwrap();
        CountingPipeline::new(
            MockDetector {
                calls: 0,
                detections,
            },
            session,
            PipelineConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_detects_every_third_frame() {
        let mut pipeline = pipeline(vec![Detection::new(100, 100, 60, 60)]);
        let mut passes = vec![];
        for _ in 0..9 {
            let result = pipeline.process_frame(&[], 640, 480).unwrap();
            passes.push(result.detection_pass);
        }
        assert_eq!(
            passes,
            vec![false, false, true, false, false, true, false, false, true]
        );
        assert_eq!(pipeline.detector().calls, 3);
        assert_eq!(pipeline.frame_count(), 9);
    }

    #[test]
    fn test_small_detections_never_reach_the_session() {
        let mut pipeline = pipeline(vec![
            Detection::new(100, 100, 40, 40),
            Detection::new(300, 100, 60, 60),
        ]);
        pipeline.process_frame(&[], 640, 480).unwrap();
        pipeline.process_frame(&[], 640, 480).unwrap();
        let result = pipeline.process_frame(&[], 640, 480).unwrap();
        assert_eq!(result.created, vec![0]);
        assert_eq!(result.tracks[0].bbox.x, 300);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let session = CountingSession::with_default_config(FrameSize::new(640, 480)).unwrap();
        let config = PipelineConfig {
            detection_interval: 0,
            ..Default::default()
        };
        let detector = MockDetector {
            calls: 0,
            detections: vec![],
        };
        assert!(matches!(
            CountingPipeline::new(detector, session, config),
            Err(ConfigError::ZeroDetectionInterval)
        ));
    }
}
