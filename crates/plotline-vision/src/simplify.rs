//! Douglas-Peucker polygon approximation.

use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point;
use plotline_path::{Contour, PixelPoint, PolygonApproximator};

/// Closed-curve Douglas-Peucker on the integer pixel grid.
///
/// The loop is split at the point farthest from its first point and both
/// halves are simplified as open chains, so the result starts at the same
/// point and keeps the input orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DouglasPeucker;

impl PolygonApproximator for DouglasPeucker {
    fn approximate(&self, contour: &Contour, tolerance: f64) -> Contour {
        if contour.len() < 3 || !(tolerance > 0.0) {
            return contour.clone();
        }
        let curve: Vec<Point<i32>> = contour
            .points
            .iter()
            .map(|p| Point::new(p.x.round() as i32, p.y.round() as i32))
            .collect();

        let first = curve[0];
        let split = farthest_from(&curve, first);
        if split == 0 {
            return Contour::new(vec![to_pixel(first)]);
        }

        let mut simplified = approximate_polygon_dp(&curve[..=split], tolerance, false);
        simplified.pop();
        let mut back: Vec<Point<i32>> = curve[split..].to_vec();
        back.push(first);
        simplified.extend(approximate_polygon_dp(&back, tolerance, false));
        simplified.pop();

        Contour::new(simplified.into_iter().map(to_pixel).collect())
    }
}

fn farthest_from(curve: &[Point<i32>], origin: Point<i32>) -> usize {
    let mut best = 0;
    let mut best_d = 0i64;
    for (i, p) in curve.iter().enumerate() {
        let dx = i64::from(p.x - origin.x);
        let dy = i64::from(p.y - origin.y);
        let d = dx * dx + dy * dy;
        if d > best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

fn to_pixel(p: Point<i32>) -> PixelPoint {
    PixelPoint::new(f64::from(p.x), f64::from(p.y))
}
