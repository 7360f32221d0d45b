//! Pixel-to-millimetre scaling and paper fitting.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::contour::PixelPoint;
use crate::error::{PathError, Result};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Target paper size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    /// Paper width (inches).
    pub width: f64,
    /// Paper height (inches).
    pub height: f64,
}

impl Default for PaperSize {
    fn default() -> Self {
        Self::letter()
    }
}

impl PaperSize {
    /// US letter, 8.5 x 11 inches.
    pub fn letter() -> Self {
        Self {
            width: 8.5,
            height: 11.0,
        }
    }

    /// Validate dimensions.
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.width.is_finite()) {
            return Err(PathError::InvalidPaper("width must be positive".into()));
        }
        if !(self.height > 0.0 && self.height.is_finite()) {
            return Err(PathError::InvalidPaper("height must be positive".into()));
        }
        Ok(())
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Pixel dimensions that fit the paper's aspect ratio without upscaling.
///
/// Whichever side would exceed the bound implied by the other side and the
/// paper aspect ratio is shrunk; the other side is kept.
pub fn fit_to_paper(width: u32, height: u32, paper: &PaperSize) -> Result<(u32, u32)> {
    paper.validate()?;
    if width == 0 || height == 0 {
        return Err(PathError::DegenerateImage { width, height });
    }

    let aspect = paper.aspect_ratio();
    let new_width = width.min((f64::from(height) * aspect) as u32);
    let new_height = height.min((f64::from(width) / aspect) as u32);

    if new_width == 0 || new_height == 0 {
        return Err(PathError::DegenerateImage {
            width: new_width,
            height: new_height,
        });
    }
    Ok((new_width, new_height))
}

/// A physical coordinate in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// X (mm).
    pub x_mm: f64,
    /// Y (mm).
    pub y_mm: f64,
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {:.1} mm, Y: {:.1} mm", self.x_mm, self.y_mm)
    }
}

/// Isotropic pixels-per-millimetre conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitScaler {
    pixels_per_inch: f64,
}

impl UnitScaler {
    /// Derive the scale from an image's pixel dimensions and the paper size.
    ///
    /// Pixels per inch are computed per axis and averaged.
    pub fn from_image(width: u32, height: u32, paper: &PaperSize) -> Result<Self> {
        paper.validate()?;
        if width == 0 || height == 0 {
            return Err(PathError::DegenerateImage { width, height });
        }
        let ppi_width = f64::from(width) / paper.width;
        let ppi_height = f64::from(height) / paper.height;
        Ok(Self {
            pixels_per_inch: (ppi_width + ppi_height) / 2.0,
        })
    }

    /// Averaged pixels per inch.
    pub fn pixels_per_inch(&self) -> f64 {
        self.pixels_per_inch
    }

    /// Pixels per millimetre.
    pub fn pixels_per_mm(&self) -> f64 {
        self.pixels_per_inch / MM_PER_INCH
    }

    /// Convert a pixel-space point to millimetres.
    pub fn to_waypoint(&self, point: &PixelPoint) -> Waypoint {
        let ppmm = self.pixels_per_mm();
        Waypoint {
            x_mm: point.x / ppmm,
            y_mm: point.y / ppmm,
        }
    }
}
