//! Error types for image tracing.

use plotline_path::PathError;
use thiserror::Error;

/// Errors that can occur while tracing an image.
#[derive(Error, Debug)]
pub enum VisionError {
    /// Image could not be read or decoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Sizing or selector error from the planning layer.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Clarity outside `(0, 1]`.
    #[error("invalid clarity {0}: must be in (0, 1]")]
    InvalidClarity(f64),

    /// Tracing produced no usable contour.
    #[error("no contours found in image")]
    NoContours,
}

/// Result type for tracing operations.
pub type Result<T> = std::result::Result<T, VisionError>;
