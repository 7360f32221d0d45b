#![warn(missing_docs)]

//! Raster contour extraction for plotline.
//!
//! Two extraction strategies turn a grayscale image into closed contours:
//! - [`SkeletonSource`] for line art, which thins dark strokes to
//!   one-pixel lines before tracing
//! - [`EdgeSource`] for shaded images, which traces Canny edges
//!
//! Either result is simplified with [`DouglasPeucker`] at a tolerance
//! proportional to each contour's length.
//!
//! # Example
//!
//! ```no_run
//! use plotline_path::Complexity;
//! use plotline_vision::{trace_file, TraceSettings};
//!
//! let traced = trace_file("flower.png", Complexity::Simple, &TraceSettings::default())?;
//! println!("{} contours", traced.approximations.len());
//! # Ok::<(), plotline_vision::VisionError>(())
//! ```

pub mod edges;
pub mod error;
pub mod simplify;
pub mod skeleton;
pub mod trace;

pub use edges::EdgeSource;
pub use error::{Result, VisionError};
pub use simplify::DouglasPeucker;
pub use skeleton::{thin, SkeletonSource};
pub use trace::{fit_image, trace_file, trace_image, TraceSettings, TracedImage};
