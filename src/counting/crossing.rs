//! Directional crossing of reference lines between two consecutive centroids.

use crate::counting::lines::ReferenceLines;
use crate::tracker::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// y grew across the line (`prev < line <= curr`)
    Downward,
    /// y shrank across the line (`curr < line <= prev`)
    Upward,
}

/// The first line a step crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub line_index: usize,
    pub line_y: i32,
    pub direction: Direction,
}

/// Direction of the crossing of `line` between `prev_y` and `curr_y`, if any.
#[inline]
pub fn crossing_direction(prev_y: i32, curr_y: i32, line: i32) -> Option<Direction> {
    if prev_y < line && curr_y >= line {
        Some(Direction::Downward)
    } else if prev_y >= line && curr_y < line {
        Some(Direction::Upward)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct CrossingDetector {
    lines: ReferenceLines,
}

impl CrossingDetector {
    pub fn new(lines: ReferenceLines) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &ReferenceLines {
        &self.lines
    }

    /// Check the track's latest step against every line in order.
    ///
    /// Counted tracks and tracks with a single observation never cross.
    /// Only the first crossed line is reported, so a step spanning both
    /// lines still yields a single crossing.
    pub fn evaluate(&self, track: &Track) -> Option<Crossing> {
        if track.is_counted() {
            return None;
        }
        let (prev, curr) = track.history().last_step()?;
        self.lines
            .ys()
            .iter()
            .enumerate()
            .find_map(|(line_index, &line_y)| {
                crossing_direction(prev.y, curr.y, line_y).map(|direction| Crossing {
                    line_index,
                    line_y,
                    direction,
                })
            })
    }
}
