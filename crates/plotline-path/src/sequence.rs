//! Per-contour point sequencing.
//!
//! Each visited contour is entered at the arrival point of the link that
//! leads into it and left at the departure point of the link that leads
//! out of it. The first contour is entered at vertex 0 and the last one is
//! left at vertex 0.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::chain::Chain;
use crate::contour::{Contour, PixelPoint};
use crate::error::{PathError, Result};

/// How a contour's points are emitted between its start and end index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmissionMode {
    /// Emit once, cyclically, from the start index through the end index
    /// inclusive. Equal start and end indices produce a full closed lap.
    ///
    /// Only the last visited contour is guaranteed to be closed; the others
    /// are drawn along the start-to-end arc and may leave vertices out.
    /// Use [`EmissionMode::Reference`] when every edge must be drawn.
    #[default]
    Span,
    /// Reproduce the legacy traversal: one full lap from the start index,
    /// then a continuation that keeps the lap's final offset until the
    /// cursor reaches the end index, then one trailing point.
    Reference,
}

/// Emission plan for one visited contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourPlan {
    /// Index of the contour in the input slice.
    pub contour: usize,
    /// Vertex index where the pen enters the contour.
    pub start: usize,
    /// Vertex index where the pen leaves the contour.
    pub end: usize,
}

fn locate(contours: &[Contour], contour: usize, point: &PixelPoint) -> Result<usize> {
    contours[contour]
        .index_of(point)
        .ok_or(PathError::PointNotFound {
            contour,
            x: point.x,
            y: point.y,
        })
}

/// Compute start and end indices for every contour in visiting order.
///
/// A bridging point that cannot be found in its own contour means the chain
/// was not built from `contours`, and is reported as
/// [`PathError::PointNotFound`].
pub fn sequence_contours(contours: &[Contour], chain: &Chain) -> Result<Vec<ContourPlan>> {
    let Some(&first) = chain.order.first() else {
        return Err(PathError::InvalidInput);
    };
    if chain.links.len() + 1 != chain.order.len() {
        return Err(PathError::InvalidInput);
    }
    if chain.order.iter().any(|&idx| idx >= contours.len()) {
        return Err(PathError::InvalidInput);
    }

    let mut plans = Vec::with_capacity(chain.order.len());
    let mut start = 0;
    let mut current = first;

    for (i, link) in chain.links.iter().enumerate() {
        let next = chain.order[i + 1];
        let end = locate(contours, current, &link.from_point)?;
        plans.push(ContourPlan {
            contour: current,
            start,
            end,
        });
        start = locate(contours, next, &link.to_point)?;
        current = next;
    }

    plans.push(ContourPlan {
        contour: current,
        start,
        end: 0,
    });

    for plan in &plans {
        debug!(
            "sequence: contour {} start {} end {}",
            plan.contour, plan.start, plan.end
        );
    }

    Ok(plans)
}

/// Emit a contour's points from `start` to `end` under the given mode.
///
/// Indices are taken modulo the contour length. An empty contour emits
/// nothing.
pub fn emit_points(
    contour: &Contour,
    start: usize,
    end: usize,
    mode: EmissionMode,
) -> Vec<PixelPoint> {
    let n = contour.len();
    if n == 0 {
        return Vec::new();
    }
    let start = start % n;
    let end = end % n;

    match mode {
        EmissionMode::Span => {
            if n == 1 {
                return vec![contour.points[0]];
            }
            let steps = if start == end { n } else { (end + n - start) % n };
            (0..=steps).map(|k| contour.at(start + k)).collect()
        }
        EmissionMode::Reference => {
            let mut out = Vec::with_capacity(2 * n + 1);
            for i in 0..n {
                out.push(contour.at(start + i));
            }
            // The continuation reuses the last lap offset instead of resetting.
            let offset = n - 1;
            let mut cursor = start;
            while cursor != end {
                out.push(contour.at(cursor + offset));
                cursor = (cursor + 1) % n;
            }
            out.push(contour.at(cursor + offset));
            out
        }
    }
}
