//! Skeleton-based contour source for line art.
//!
//! Dark strokes on a light background are binarized, inverted so strokes
//! are foreground, thinned to one-pixel-wide lines and border-followed.

use image::{GrayImage, Luma};
use plotline_path::{Contour, ContourSource};

use crate::edges::trace_contours;

/// Binarize, invert, thin, then trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkeletonSource {
    /// Luma values below this are stroke pixels.
    pub threshold: u8,
}

impl Default for SkeletonSource {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl ContourSource<GrayImage> for SkeletonSource {
    fn extract(&self, image: &GrayImage) -> Vec<Contour> {
        let strokes = GrayImage::from_fn(image.width(), image.height(), |x, y| {
            if image.get_pixel(x, y)[0] < self.threshold {
                Luma([255])
            } else {
                Luma([0])
            }
        });
        let skeleton = thin(&strokes);
        let mut contours = trace_contours(&skeleton);
        // A stroke along the whole image border is a frame, not drawing.
        if contours
            .first()
            .is_some_and(|c| spans_image(c, image.width(), image.height()))
        {
            contours.remove(0);
        }
        contours
    }
}

/// Whether the contour's bounding box touches all four image edges.
fn spans_image(contour: &Contour, width: u32, height: u32) -> bool {
    if contour.is_empty() || width == 0 || height == 0 {
        return false;
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in &contour.points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    min_x <= 0.0
        && min_y <= 0.0
        && max_x >= f64::from(width - 1)
        && max_y >= f64::from(height - 1)
}

/// Zhang-Suen thinning of a binary image.
///
/// Non-zero pixels are foreground. Output pixels are `0` or `255`.
pub fn thin(binary: &GrayImage) -> GrayImage {
    let (w, h) = (binary.width() as usize, binary.height() as usize);
    let mut grid: Vec<bool> = binary.pixels().map(|p| p[0] > 0).collect();

    let at = |grid: &[bool], x: isize, y: isize| -> bool {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            false
        } else {
            grid[y as usize * w + x as usize]
        }
    };

    let mut marked = Vec::new();
    loop {
        let mut changed = false;
        for pass in 0..2 {
            marked.clear();
            for y in 0..h as isize {
                for x in 0..w as isize {
                    if !at(&grid, x, y) {
                        continue;
                    }
                    // P2..P9, clockwise from north.
                    let n = [
                        at(&grid, x, y - 1),
                        at(&grid, x + 1, y - 1),
                        at(&grid, x + 1, y),
                        at(&grid, x + 1, y + 1),
                        at(&grid, x, y + 1),
                        at(&grid, x - 1, y + 1),
                        at(&grid, x - 1, y),
                        at(&grid, x - 1, y - 1),
                    ];
                    let b = n.iter().filter(|&&v| v).count();
                    if !(2..=6).contains(&b) {
                        continue;
                    }
                    let a = (0..8).filter(|&i| !n[i] && n[(i + 1) % 8]).count();
                    if a != 1 {
                        continue;
                    }
                    let (p2, p4, p6, p8) = (n[0], n[2], n[4], n[6]);
                    let keep = if pass == 0 {
                        (p2 && p4 && p6) || (p4 && p6 && p8)
                    } else {
                        (p2 && p4 && p8) || (p2 && p6 && p8)
                    };
                    if !keep {
                        marked.push(y as usize * w + x as usize);
                    }
                }
            }
            if !marked.is_empty() {
                changed = true;
                for &idx in &marked {
                    grid[idx] = false;
                }
            }
        }
        if !changed {
            break;
        }
    }

    GrayImage::from_fn(binary.width(), binary.height(), |x, y| {
        if grid[y as usize * w + x as usize] {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}
