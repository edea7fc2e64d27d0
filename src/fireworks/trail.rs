use crate::surface::Point;
use std::collections::VecDeque;

/// Sliding window over the most recent positions. Pushing onto a full trail
/// drops the oldest point, so the length can never exceed the capacity.
#[derive(Clone, Debug)]
pub struct Trail {
    points: VecDeque<Point>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self { points: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, point: Point) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let mut trail = Trail::new(3);
        for i in 0..5 {
            trail.push(Point::new(i as f32, 0.0));
            assert!(trail.len() <= trail.capacity());
        }
        let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_capacity_stays_empty() {
        let mut trail = Trail::new(0);
        trail.push(Point::new(1.0, 1.0));
        assert_eq!(trail.len(), 0);
    }
}
