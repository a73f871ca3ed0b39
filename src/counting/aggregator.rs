use crate::counting::crossing::{Crossing, Direction};
use crate::tracker::TrackId;

/// A track flipped to counted during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CountEvent {
    pub track_id: TrackId,
    pub line_index: usize,
    pub line_y: i32,
    pub direction: Direction,
    /// Running total after this event
    pub total: u64,
}

/// Monotonic running total of counted tracks.
#[derive(Debug, Clone, Default)]
pub struct CountingAggregator {
    total: u64,
}

impl CountingAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment by one for a track that just transitioned to counted.
    pub(crate) fn record(&mut self, track_id: TrackId, crossing: Crossing) -> CountEvent {
        self.total += 1;
        CountEvent {
            track_id,
            line_index: crossing.line_index,
            line_y: crossing.line_y,
            direction: crossing.direction,
            total: self.total,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_increments_by_one() {
        let mut agg = CountingAggregator::new();
        let crossing = Crossing {
            line_index: 1,
            line_y: 288,
            direction: Direction::Upward,
        };
        let event = agg.record(7, crossing);
        assert_eq!(event.total, 1);
        assert_eq!(event.track_id, 7);
        assert_eq!(event.direction, Direction::Upward);
        assert_eq!(agg.record(8, crossing).total, 2);
        assert_eq!(agg.total(), 2);
    }
}
