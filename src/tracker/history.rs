//! Append-only centroid history of a track.

use std::collections::VecDeque;

use crate::tracker::rect::Centroid;

/// Ordered centroid observations, oldest first.
///
/// With a capacity, the oldest points are dropped once the buffer is full.
/// Crossing checks only ever read the last two points, so any capacity of
/// at least 2 preserves counting behaviour.
#[derive(Debug, Clone)]
pub struct CentroidHistory {
    points: VecDeque<Centroid>,
    capacity: Option<usize>,
}

impl CentroidHistory {
    /// A history seeded with its first observation.
    pub fn new(first: Centroid, capacity: Option<usize>) -> Self {
        let mut points = VecDeque::with_capacity(capacity.unwrap_or(4));
        points.push_back(first);
        Self { points, capacity }
    }

    /// Append a point, returning the evicted oldest point if the buffer was full.
    pub fn push(&mut self, point: Centroid) -> Option<Centroid> {
        let dropped = match self.capacity {
            Some(cap) if self.points.len() >= cap => self.points.pop_front(),
            _ => None,
        };
        self.points.push_back(point);
        dropped
    }

    /// The current centroid.
    #[inline]
    pub fn last(&self) -> Centroid {
        // Never empty: seeded on construction and `push` appends after popping.
        self.points[self.points.len() - 1]
    }

    /// The centroid before the current one, if any.
    #[inline]
    pub fn previous(&self) -> Option<Centroid> {
        let len = self.points.len();
        (len >= 2).then(|| self.points[len - 2])
    }

    /// The two most recent points as `(previous, current)`.
    pub fn last_step(&self) -> Option<(Centroid, Centroid)> {
        self.previous().map(|prev| (prev, self.last()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Centroid> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_keeps_everything() {
        let mut history = CentroidHistory::new(Centroid::new(0, 0), None);
        for i in 1..100 {
            assert_eq!(history.push(Centroid::new(i, i)), None);
        }
        assert_eq!(history.len(), 100);
        assert_eq!(history.iter().next(), Some(&Centroid::new(0, 0)));
        assert_eq!(history.last(), Centroid::new(99, 99));
    }

    #[test]
    fn test_bounded_drops_oldest() {
        let mut history = CentroidHistory::new(Centroid::new(0, 0), Some(2));
        assert_eq!(history.push(Centroid::new(1, 1)), None);
        assert_eq!(history.push(Centroid::new(2, 2)), Some(Centroid::new(0, 0)));
        assert_eq!(history.len(), 2);
        assert_eq!(
            history.last_step(),
            Some((Centroid::new(1, 1), Centroid::new(2, 2)))
        );
    }

    #[test]
    fn test_single_point_has_no_step() {
        let history = CentroidHistory::new(Centroid::new(5, 7), Some(2));
        assert!(!history.is_empty());
        assert_eq!(history.previous(), None);
        assert_eq!(history.last_step(), None);
    }
}
