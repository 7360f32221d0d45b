//! Contour type and closest-point search.

use nalgebra::Point2;

/// A point in pixel space.
pub type PixelPoint = Point2<f64>;

/// A closed loop of pixel-space points.
///
/// Traversal is cyclic: the point after the last one is the first one.
/// The same type is used for raw contours and for their simplified
/// approximations.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Vertices in traversal order.
    pub points: Vec<PixelPoint>,
}

impl Contour {
    /// Create a new contour from points.
    pub fn new(points: Vec<PixelPoint>) -> Self {
        Self { points }
    }

    /// Build a contour from `(x, y)` pairs.
    pub fn from_xy(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| PixelPoint::new(x, y)).collect())
    }

    /// Check if the contour is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Point at a cyclic index.
    pub fn at(&self, index: usize) -> PixelPoint {
        self.points[index % self.points.len()]
    }

    /// Closed arc length, including the edge from the last point back to
    /// the first.
    pub fn arc_length(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        let mut length = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            length += nalgebra::distance(&self.points[i], &self.points[j]);
        }
        length
    }

    /// Index of the first vertex exactly equal to `point`.
    pub fn index_of(&self, point: &PixelPoint) -> Option<usize> {
        self.points.iter().position(|p| p == point)
    }
}

/// The nearest pair of points between two point sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    /// Point taken from the first sequence.
    pub from: PixelPoint,
    /// Point taken from the second sequence.
    pub to: PixelPoint,
    /// Euclidean distance between `from` and `to` (pixels).
    pub distance: f64,
}

/// Brute-force all-pairs search for the closest points of two sequences.
///
/// Ties keep the first pair in nested order (outer loop over `first`,
/// inner loop over `second`). Returns `None` if either sequence is empty.
pub fn closest_points(first: &[PixelPoint], second: &[PixelPoint]) -> Option<ClosestPair> {
    let mut best: Option<ClosestPair> = None;
    let mut closest_dist = f64::INFINITY;

    for point in first {
        for other in second {
            let dist = nalgebra::distance(point, other);
            if dist < closest_dist {
                closest_dist = dist;
                best = Some(ClosestPair {
                    from: *point,
                    to: *other,
                    distance: dist,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_points() {
        let a = [PixelPoint::new(0.0, 0.0)];
        let b = [PixelPoint::new(3.0, 4.0)];
        let pair = closest_points(&a, &b).unwrap();
        assert_eq!(pair.from, a[0]);
        assert_eq!(pair.to, b[0]);
        assert_eq!(pair.distance, 5.0);
    }

    #[test]
    fn test_closest_pair_among_many() {
        let a = Contour::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let b = Contour::from_xy(&[(30.0, 30.0), (12.0, 1.0), (40.0, 0.0)]);
        let pair = closest_points(&a.points, &b.points).unwrap();
        assert_eq!(pair.from, PixelPoint::new(10.0, 0.0));
        assert_eq!(pair.to, PixelPoint::new(12.0, 1.0));
        assert_relative_eq!(pair.distance, 5.0_f64.sqrt());
    }

    #[test]
    fn test_tie_keeps_first_pair() {
        // (0,0)-(1,0) and (0,0)-(-1,0) and (2,0)-(1,0) all tie at 1.0
        let a = [PixelPoint::new(0.0, 0.0), PixelPoint::new(2.0, 0.0)];
        let b = [PixelPoint::new(1.0, 0.0), PixelPoint::new(-1.0, 0.0)];
        let pair = closest_points(&a, &b).unwrap();
        assert_eq!(pair.from, PixelPoint::new(0.0, 0.0));
        assert_eq!(pair.to, PixelPoint::new(1.0, 0.0));
    }

    #[test]
    fn test_empty_sequence() {
        let a = [PixelPoint::new(0.0, 0.0)];
        assert!(closest_points(&a, &[]).is_none());
        assert!(closest_points(&[], &a).is_none());
    }

    #[test]
    fn test_arc_length_closed() {
        let square = Contour::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        assert_relative_eq!(square.arc_length(), 8.0);
        assert_eq!(Contour::from_xy(&[(1.0, 1.0)]).arc_length(), 0.0);
    }

    #[test]
    fn test_index_of_exact_match() {
        let c = Contour::from_xy(&[(0.0, 0.0), (1.0, 2.0), (1.0, 2.0)]);
        assert_eq!(c.index_of(&PixelPoint::new(1.0, 2.0)), Some(1));
        assert_eq!(c.index_of(&PixelPoint::new(1.0, 2.000001)), None);
    }
}
