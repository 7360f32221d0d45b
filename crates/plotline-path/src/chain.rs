//! Contour chaining.
//!
//! Orders a set of closed contours into a single open path that greedily
//! minimizes pen-up travel. Contours, not points, are the units of travel:
//! from the current contour the next one visited is the unvisited contour
//! whose closest point pair is nearest. The path starts at contour 0 and
//! never returns to it.

use log::debug;

use crate::contour::{closest_points, Contour, PixelPoint};
use crate::error::{PathError, Result};

/// Nearest-point bridge between two consecutively visited contours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainLink {
    /// Index of the contour the pen leaves.
    pub from_contour: usize,
    /// Index of the contour the pen enters.
    pub to_contour: usize,
    /// Departure point, a vertex of `from_contour`.
    pub from_point: PixelPoint,
    /// Arrival point, a vertex of `to_contour`.
    pub to_point: PixelPoint,
    /// Travel distance between the two points (pixels).
    pub distance: f64,
}

/// Visiting order over contours plus the links joining consecutive visits.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    /// Permutation of contour indices, always starting at 0.
    pub order: Vec<usize>,
    /// `links[i]` bridges `order[i]` to `order[i + 1]`.
    pub links: Vec<ChainLink>,
}

impl Chain {
    /// Total pen-up travel along the chain (pixels).
    pub fn travel_distance(&self) -> f64 {
        self.links.iter().map(|l| l.distance).sum()
    }
}

/// Chain contours with a nearest-neighbor heuristic.
///
/// Candidates are scanned in index order and replaced only on a strictly
/// smaller distance, so ties go to the lowest index. A single contour
/// yields the order `[0]` with no links.
pub fn chain_contours(contours: &[Contour]) -> Result<Chain> {
    if contours.is_empty() {
        return Err(PathError::InvalidInput);
    }
    if let Some(idx) = contours.iter().position(Contour::is_empty) {
        return Err(PathError::EmptyContour(idx));
    }

    let n = contours.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut links = Vec::with_capacity(n - 1);

    let mut current = 0;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let mut best: Option<ChainLink> = None;
        let mut min_dist = f64::INFINITY;

        for (idx, candidate) in contours.iter().enumerate() {
            if visited[idx] {
                continue;
            }
            let Some(pair) = closest_points(&contours[current].points, &candidate.points) else {
                continue;
            };
            if pair.distance < min_dist {
                min_dist = pair.distance;
                best = Some(ChainLink {
                    from_contour: current,
                    to_contour: idx,
                    from_point: pair.from,
                    to_point: pair.to,
                    distance: pair.distance,
                });
            }
        }

        // Every remaining contour is non-empty, so a candidate always exists.
        let Some(link) = best else {
            return Err(PathError::InvalidInput);
        };

        debug!(
            "chain: contour {} -> {} ({:.2} px)",
            link.from_contour, link.to_contour, link.distance
        );

        visited[link.to_contour] = true;
        order.push(link.to_contour);
        links.push(link);
        current = link.to_contour;
    }

    Ok(Chain { order, links })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> Contour {
        Contour::from_xy(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(chain_contours(&[]), Err(PathError::InvalidInput));
    }

    #[test]
    fn test_empty_contour_rejected() {
        let contours = vec![square(0.0, 0.0, 1.0), Contour::new(Vec::new())];
        assert_eq!(chain_contours(&contours), Err(PathError::EmptyContour(1)));
    }

    #[test]
    fn test_single_contour() {
        let chain = chain_contours(&[square(0.0, 0.0, 5.0)]).unwrap();
        assert_eq!(chain.order, vec![0]);
        assert!(chain.links.is_empty());
        assert_eq!(chain.travel_distance(), 0.0);
    }

    #[test]
    fn test_nearer_contour_visited_first() {
        // A at origin, C far away at index 1, B close to A at index 2.
        let contours = vec![
            square(0.0, 0.0, 10.0),
            square(100.0, 0.0, 10.0),
            square(15.0, 0.0, 10.0),
        ];
        let chain = chain_contours(&contours).unwrap();
        assert_eq!(chain.order, vec![0, 2, 1]);

        assert_eq!(chain.links.len(), 2);
        let first = chain.links[0];
        assert_eq!((first.from_contour, first.to_contour), (0, 2));
        assert_eq!(first.from_point, PixelPoint::new(10.0, 0.0));
        assert_eq!(first.to_point, PixelPoint::new(15.0, 0.0));
        assert_eq!(first.distance, 5.0);

        // From B, the nearest point of C is 75 px away.
        let second = chain.links[1];
        assert_eq!((second.from_contour, second.to_contour), (2, 1));
        assert_eq!(second.distance, 75.0);
        assert_eq!(chain.travel_distance(), 80.0);
    }

    #[test]
    fn test_greedy_follows_current_contour() {
        // From 0 the nearest is 1; from 1 the nearest remaining is 3, not 2.
        let contours = vec![
            square(0.0, 0.0, 1.0),
            square(10.0, 0.0, 1.0),
            square(-20.0, 0.0, 1.0),
            square(20.0, 0.0, 1.0),
        ];
        let chain = chain_contours(&contours).unwrap();
        assert_eq!(chain.order, vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let contours = vec![
            square(0.0, 0.0, 1.0),
            square(-11.0, 0.0, 1.0),
            square(11.0, 0.0, 1.0),
        ];
        // Both candidates are exactly 10 px away.
        let chain = chain_contours(&contours).unwrap();
        assert_eq!(chain.order, vec![0, 1, 2]);
    }

    #[test]
    fn test_every_contour_visited_once() {
        let contours: Vec<Contour> = (0..12)
            .map(|i| square(((i * 37) % 11) as f64 * 9.0, ((i * 17) % 7) as f64 * 13.0, 3.0))
            .collect();
        let chain = chain_contours(&contours).unwrap();
        assert_eq!(chain.order[0], 0);
        let mut sorted = chain.order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..12).collect::<Vec<_>>());
        assert_eq!(chain.links.len(), 11);
        for (i, link) in chain.links.iter().enumerate() {
            assert_eq!(link.from_contour, chain.order[i]);
            assert_eq!(link.to_contour, chain.order[i + 1]);
        }
    }
}
