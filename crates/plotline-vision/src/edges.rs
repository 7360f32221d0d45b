//! Edge-based contour source for shaded images.

use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use plotline_path::{Contour, ContourSource, PixelPoint};

/// Gaussian blur, Canny edge detection, then border following.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSource {
    /// Blur sigma (a 5x5 kernel corresponds to about 1.1).
    pub blur_sigma: f32,
    /// Canny low threshold.
    pub canny_low: f32,
    /// Canny high threshold.
    pub canny_high: f32,
}

impl Default for EdgeSource {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            canny_low: 50.0,
            canny_high: 160.0,
        }
    }
}

impl ContourSource<GrayImage> for EdgeSource {
    fn extract(&self, image: &GrayImage) -> Vec<Contour> {
        let blurred = gaussian_blur_f32(image, self.blur_sigma);
        let edges = canny(&blurred, self.canny_low, self.canny_high);
        trace_contours(&edges)
    }
}

/// Border-follow every non-zero region of a binary image.
pub(crate) fn trace_contours(binary: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| !c.points.is_empty())
        .map(|c| {
            Contour::new(
                c.points
                    .iter()
                    .map(|p| PixelPoint::new(f64::from(p.x), f64::from(p.y)))
                    .collect(),
            )
        })
        .collect()
}
