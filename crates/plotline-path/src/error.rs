//! Error types for path planning.

use thiserror::Error;

/// Errors that can occur while planning a plotter path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// No contour to start the chain from.
    #[error("invalid input: no contours to chain")]
    InvalidInput,

    /// A contour has no points.
    #[error("contour {0} has no points")]
    EmptyContour(usize),

    /// Image has zero width or height (before or after fitting to paper).
    #[error("degenerate image: {width}x{height} pixels")]
    DegenerateImage {
        /// Pixel width.
        width: u32,
        /// Pixel height.
        height: u32,
    },

    /// Paper size is not strictly positive.
    #[error("invalid paper size: {0}")]
    InvalidPaper(String),

    /// A bridging point does not belong to the contour it was computed from.
    #[error("bridging point ({x}, {y}) not found in contour {contour}")]
    PointNotFound {
        /// Index of the contour that was searched.
        contour: usize,
        /// X coordinate of the missing point (pixels).
        x: f64,
        /// Y coordinate of the missing point (pixels).
        y: f64,
    },

    /// Complexity selector is neither `simple` nor `complex`.
    #[error("unsupported complexity: {0:?} (expected \"simple\" or \"complex\")")]
    UnsupportedComplexity(String),
}

/// Result type for path planning operations.
pub type Result<T> = std::result::Result<T, PathError>;
