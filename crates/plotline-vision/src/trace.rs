//! Image loading, paper fitting and contour tracing.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::GrayImage;
use log::{debug, info};
use plotline_path::{
    approximate_all, fit_to_paper, Complexity, Contour, ContourSource, PaperSize, UnitScaler,
};

use crate::edges::EdgeSource;
use crate::error::{Result, VisionError};
use crate::simplify::DouglasPeucker;
use crate::skeleton::SkeletonSource;

/// Tracing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSettings {
    /// Target paper.
    pub paper: PaperSize,
    /// Approximation tolerance as a fraction of each contour's arc length.
    /// Smaller keeps more detail.
    pub clarity: f64,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            paper: PaperSize::letter(),
            clarity: 0.01,
        }
    }
}

impl TraceSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        self.paper.validate()?;
        if !(self.clarity > 0.0 && self.clarity <= 1.0) {
            return Err(VisionError::InvalidClarity(self.clarity));
        }
        Ok(())
    }
}

/// The approximated contours of an image fitted to paper.
#[derive(Debug, Clone)]
pub struct TracedImage {
    /// Fitted width (px).
    pub width: u32,
    /// Fitted height (px).
    pub height: u32,
    /// Pixel to millimetre scale of the fitted image.
    pub scaler: UnitScaler,
    /// Polygon approximations in extraction order.
    pub approximations: Vec<Contour>,
}

impl TracedImage {
    /// Total points across all approximations.
    pub fn point_count(&self) -> usize {
        self.approximations.iter().map(Contour::len).sum()
    }
}

/// Shrink an image to the paper's aspect ratio.
pub fn fit_image(image: &GrayImage, paper: &PaperSize) -> Result<GrayImage> {
    let (width, height) = fit_to_paper(image.width(), image.height(), paper)?;
    if (width, height) == image.dimensions() {
        return Ok(image.clone());
    }
    debug!(
        "resizing {}x{} to {}x{}",
        image.width(),
        image.height(),
        width,
        height
    );
    Ok(imageops::resize(image, width, height, FilterType::Triangle))
}

/// Fit, extract and approximate contours from a grayscale image.
pub fn trace_image(
    image: &GrayImage,
    complexity: Complexity,
    settings: &TraceSettings,
) -> Result<TracedImage> {
    settings.validate()?;
    let fitted = fit_image(image, &settings.paper)?;
    let (width, height) = fitted.dimensions();
    let scaler = UnitScaler::from_image(width, height, &settings.paper)?;

    let contours = match complexity {
        Complexity::Simple => SkeletonSource::default().extract(&fitted),
        Complexity::Complex => EdgeSource::default().extract(&fitted),
    };
    let approximations = approximate_all(&DouglasPeucker, &contours, settings.clarity);
    if approximations.is_empty() {
        return Err(VisionError::NoContours);
    }

    let traced = TracedImage {
        width,
        height,
        scaler,
        approximations,
    };
    info!(
        "traced {} contours ({} points) from {}x{} {} image",
        traced.approximations.len(),
        traced.point_count(),
        width,
        height,
        complexity
    );
    Ok(traced)
}

/// Load an image file as grayscale and trace it.
pub fn trace_file(
    path: impl AsRef<Path>,
    complexity: Complexity,
    settings: &TraceSettings,
) -> Result<TracedImage> {
    settings.validate()?;
    let image = image::open(path.as_ref())?.to_luma8();
    trace_image(&image, complexity, settings)
}
