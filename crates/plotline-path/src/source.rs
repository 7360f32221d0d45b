//! Collaborator traits for contour extraction and simplification.

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::contour::Contour;
use crate::error::PathError;

/// Which contour extraction strategy an image calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Line art: binarize, invert, skeletonize, then trace.
    Simple,
    /// Photographs and shaded art: blur, detect edges, then trace.
    Complex,
}

impl FromStr for Complexity {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(Complexity::Simple),
            "complex" => Ok(Complexity::Complex),
            _ => Err(PathError::UnsupportedComplexity(s.to_string())),
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.write_str("simple"),
            Self::Complex => f.write_str("complex"),
        }
    }
}

/// Yields closed point loops from a preprocessed image.
pub trait ContourSource<I: ?Sized> {
    /// Extract contours from `image`.
    fn extract(&self, image: &I) -> Vec<Contour>;
}

/// Simplifies a closed contour under a distance tolerance.
///
/// The result must keep the cyclic order and orientation of the input.
pub trait PolygonApproximator {
    /// Approximate `contour` so no dropped point is further than
    /// `tolerance` pixels from the result.
    fn approximate(&self, contour: &Contour, tolerance: f64) -> Contour;
}

/// Approximate every contour with a tolerance of `clarity` times its
/// closed arc length. Contours that simplify to nothing are dropped.
pub fn approximate_all<A: PolygonApproximator + ?Sized>(
    approximator: &A,
    contours: &[Contour],
    clarity: f64,
) -> Vec<Contour> {
    let approximations: Vec<Contour> = contours
        .iter()
        .map(|c| approximator.approximate(c, clarity * c.arc_length()))
        .filter(|a| !a.is_empty())
        .collect();
    debug!(
        "approximated {} contours into {} polygons ({} points)",
        contours.len(),
        approximations.len(),
        approximations.iter().map(Contour::len).sum::<usize>()
    );
    approximations
}
