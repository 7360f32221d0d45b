#![warn(missing_docs)]

//! Pen-plotter path planning for plotline.
//!
//! This crate turns a set of closed polygon approximations into one ordered
//! sequence of millimetre waypoints: contours are chained to minimize pen-up
//! travel, each contour is rotated so consecutive contours join at their
//! closest points, and pixel coordinates are scaled to the target paper.
//!
//! # Example
//!
//! ```
//! use plotline_path::{plan_path, Contour, EmissionMode, PaperSize, UnitScaler};
//!
//! let contours = vec![
//!     Contour::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]),
//!     Contour::from_xy(&[(20.0, 0.0), (30.0, 0.0), (30.0, 10.0)]),
//! ];
//! let scaler = UnitScaler::from_image(850, 1100, &PaperSize::letter()).unwrap();
//! let plan = plan_path(&contours, &scaler, EmissionMode::Span).unwrap();
//!
//! assert_eq!(plan.chain.order, vec![0, 1]);
//! println!("{} waypoints", plan.stats.emitted_points);
//! ```

pub mod chain;
pub mod contour;
pub mod error;
pub mod plan;
pub mod scale;
pub mod sequence;
pub mod source;

pub use chain::{chain_contours, Chain, ChainLink};
pub use contour::{closest_points, ClosestPair, Contour, PixelPoint};
pub use error::{PathError, Result};
pub use plan::{plan_path, PathPlan, PlanStats};
pub use scale::{fit_to_paper, PaperSize, UnitScaler, Waypoint, MM_PER_INCH};
pub use sequence::{emit_points, sequence_contours, ContourPlan, EmissionMode};
pub use source::{approximate_all, Complexity, ContourSource, PolygonApproximator};
