//! Whole-image path planning.

use log::{debug, trace};

use crate::chain::{chain_contours, Chain};
use crate::contour::Contour;
use crate::error::Result;
use crate::scale::{UnitScaler, Waypoint};
use crate::sequence::{emit_points, sequence_contours, ContourPlan, EmissionMode};

/// Totals reported after planning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanStats {
    /// Number of approximations planned.
    pub contour_count: usize,
    /// Sum of approximation vertex counts.
    pub approximation_points: usize,
    /// Number of waypoints emitted across the whole traversal.
    pub emitted_points: usize,
    /// Pen-up travel between contours (pixels).
    pub travel_px: f64,
}

/// A complete traversal of an image's approximations.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPlan {
    /// Visiting order and bridges.
    pub chain: Chain,
    /// Start/end indices per visited contour, in visiting order.
    pub contours: Vec<ContourPlan>,
    /// Millimetre waypoints in drawing order.
    pub waypoints: Vec<Waypoint>,
    /// Totals.
    pub stats: PlanStats,
}

/// Chain, sequence and scale a set of approximations.
///
/// Fails before producing any waypoint if the input is empty or a bridging
/// point cannot be located in its contour.
pub fn plan_path(
    approximations: &[Contour],
    scaler: &UnitScaler,
    mode: EmissionMode,
) -> Result<PathPlan> {
    let chain = chain_contours(approximations)?;
    let plans = sequence_contours(approximations, &chain)?;

    let mut waypoints = Vec::new();
    for plan in &plans {
        let points = emit_points(&approximations[plan.contour], plan.start, plan.end, mode);
        debug!(
            "contour {}: {} points from {} to {}",
            plan.contour,
            points.len(),
            plan.start,
            plan.end
        );
        for point in &points {
            let wp = scaler.to_waypoint(point);
            trace!("{wp}");
            waypoints.push(wp);
        }
    }

    let stats = PlanStats {
        contour_count: approximations.len(),
        approximation_points: approximations.iter().map(Contour::len).sum(),
        emitted_points: waypoints.len(),
        travel_px: chain.travel_distance(),
    };

    Ok(PathPlan {
        chain,
        contours: plans,
        waypoints,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::scale::PaperSize;
    use approx::assert_relative_eq;

    fn scaler() -> UnitScaler {
        UnitScaler::from_image(850, 1100, &PaperSize::letter()).unwrap()
    }

    fn three_shapes() -> Vec<Contour> {
        vec![
            // Triangle at the origin.
            Contour::from_xy(&[(0.0, 0.0), (40.0, 0.0), (20.0, 30.0)]),
            // Square far to the right.
            Contour::from_xy(&[(300.0, 0.0), (340.0, 0.0), (340.0, 40.0), (300.0, 40.0)]),
            // Pentagon just right of the triangle.
            Contour::from_xy(&[
                (60.0, 0.0),
                (80.0, 0.0),
                (90.0, 20.0),
                (70.0, 35.0),
                (50.0, 20.0),
            ]),
        ]
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            plan_path(&[], &scaler(), EmissionMode::Span),
            Err(PathError::InvalidInput)
        );
    }

    #[test]
    fn test_single_contour_covers_all_points() {
        let square = Contour::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let plan = plan_path(std::slice::from_ref(&square), &scaler(), EmissionMode::Span).unwrap();
        assert_eq!(plan.chain.order, vec![0]);
        assert!(plan.chain.links.is_empty());
        assert_eq!(plan.stats.emitted_points, 5);
        let ppmm = scaler().pixels_per_mm();
        for p in &square.points {
            assert!(plan
                .waypoints
                .iter()
                .any(|w| (w.x_mm * ppmm - p.x).abs() < 1e-9 && (w.y_mm * ppmm - p.y).abs() < 1e-9));
        }
    }

    #[test]
    fn test_three_shapes_span() {
        let shapes = three_shapes();
        let plan = plan_path(&shapes, &scaler(), EmissionMode::Span).unwrap();
        assert_eq!(plan.chain.order, vec![0, 2, 1]);
        // Triangle (40,0) -> pentagon (60,0), then pentagon (90,20) -> square (300,0).
        assert_eq!(
            plan.contours,
            vec![
                ContourPlan { contour: 0, start: 0, end: 1 },
                ContourPlan { contour: 2, start: 0, end: 2 },
                ContourPlan { contour: 1, start: 0, end: 0 },
            ]
        );
        // 2 + 3 + 5 points.
        assert_eq!(plan.stats.emitted_points, 10);
        assert_eq!(plan.stats.approximation_points, 12);
        assert_relative_eq!(plan.stats.travel_px, 20.0 + 44_500.0_f64.sqrt());
    }

    #[test]
    fn test_three_shapes_reference() {
        let shapes = three_shapes();
        let plan = plan_path(&shapes, &scaler(), EmissionMode::Reference).unwrap();
        // Each contour: n + steps(start -> end) + 1.
        // Triangle 3 + 1 + 1, pentagon 5 + 2 + 1, square 4 + 0 + 1.
        assert_eq!(plan.stats.emitted_points, 5 + 8 + 5);
    }

    #[test]
    fn test_span_draws_partial_arcs() {
        let shapes = three_shapes();
        let s = scaler();
        let covered = |mode| {
            let plan = plan_path(&shapes, &s, mode).unwrap();
            shapes[0]
                .points
                .iter()
                .filter(|p| plan.waypoints.contains(&s.to_waypoint(p)))
                .count()
        };
        // The triangle's apex (20,30) lies off the (0,0) -> (40,0) arc.
        assert_eq!(covered(EmissionMode::Span), 2);
        assert_eq!(covered(EmissionMode::Reference), 3);
    }

    #[test]
    fn test_reproducible() {
        let shapes = three_shapes();
        let a = plan_path(&shapes, &scaler(), EmissionMode::Span).unwrap();
        let b = plan_path(&shapes, &scaler(), EmissionMode::Span).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_waypoints_are_scaled() {
        let shapes = three_shapes();
        let plan = plan_path(&shapes, &scaler(), EmissionMode::Span).unwrap();
        let last = plan.waypoints.last().unwrap();
        assert_relative_eq!(last.x_mm, 300.0 / scaler().pixels_per_mm());
        assert_relative_eq!(last.y_mm, 0.0);
    }
}
