//! Room rectangle geometry and the wall-sharing neighbor relation.
//!
//! Pure functions over plain rectangle data — no entity or world
//! dependency. The neighbor relation is evaluated one direction at a time
//! and is cached into each room's neighbor list exactly once, at load.
//!
//! The relation is deliberately reproduced from the reference rule set,
//! quirks included: it is checked per ordered pair, and callers that need
//! symmetry must evaluate both directions rather than assume it.

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Axis-aligned room rectangle on the mansion grid.
///
/// Rows grow downward and columns rightward; `(top_row, top_col)` is the
/// upper-left corner. `top_row < bottom_row` and `top_col < bottom_col`
/// always hold for a constructed rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub top_row: i32,
    pub top_col: i32,
    pub bottom_row: i32,
    pub bottom_col: i32,
}

impl Rect {
    /// Build a rectangle, rejecting negative coordinates and degenerate
    /// spans.
    pub fn new(
        top_row: i32,
        top_col: i32,
        bottom_row: i32,
        bottom_col: i32,
    ) -> Result<Self, WorldError> {
        if top_row < 0 || top_col < 0 || bottom_row < 0 || bottom_col < 0 {
            return Err(WorldError::Load(
                "room coordinates cannot be negative".to_string(),
            ));
        }
        if top_row >= bottom_row {
            return Err(WorldError::Load(format!(
                "room top row {} must be above bottom row {}",
                top_row, bottom_row
            )));
        }
        if top_col >= bottom_col {
            return Err(WorldError::Load(format!(
                "room top column {} must be left of bottom column {}",
                top_col, bottom_col
            )));
        }
        Ok(Self {
            top_row,
            top_col,
            bottom_row,
            bottom_col,
        })
    }
}

// ── Neighbor relation ───────────────────────────────────────────────────

/// Column intervals `[b.top_col, b.bottom_col)` and `[a.top_col,
/// a.bottom_col)` overlap by a positive amount.
fn col_spans_overlap(a: Rect, b: Rect) -> bool {
    (b.top_col <= a.top_col && b.bottom_col > a.top_col)
        || (b.top_col < a.bottom_col && b.bottom_col >= a.bottom_col)
        || (b.top_col <= a.top_col && b.bottom_col >= a.bottom_col)
        || (b.top_col >= a.top_col && b.bottom_col <= a.bottom_col)
}

/// Row-axis mirror of [`col_spans_overlap`].
fn row_spans_overlap(a: Rect, b: Rect) -> bool {
    (b.top_row <= a.top_row && b.bottom_row > a.top_row)
        || (b.top_row < a.bottom_row && b.bottom_row >= a.bottom_row)
        || (b.top_row <= a.top_row && b.bottom_row >= a.bottom_row)
        || (b.top_row >= a.top_row && b.bottom_row <= a.bottom_row)
}

/// True if `b` counts as a neighbor of `a`.
///
/// Evaluated from `a`'s point of view, in this fixed arm order:
/// 1. same top or bottom row band, touching edge-to-edge on columns;
/// 2. stacked row-adjacent, with positive column-interval overlap;
/// 3. same left or right column band, touching edge-to-edge on rows;
/// 4. side-by-side column-adjacent, with positive row-interval overlap.
///
/// The arms are tried in order and only the first whose band condition
/// matches gets to decide.
pub fn touches(a: Rect, b: Rect) -> bool {
    if a.top_row == b.top_row || a.bottom_row == b.bottom_row {
        a.top_col == b.bottom_col || a.bottom_col == b.top_col
    } else if a.top_row == b.bottom_row || a.bottom_row == b.top_row {
        col_spans_overlap(a, b)
    } else if a.top_col == b.top_col || a.bottom_col == b.bottom_col {
        a.top_row == b.bottom_row || a.bottom_row == b.top_row
    } else if a.bottom_col == b.top_col || a.top_col == b.bottom_col {
        row_spans_overlap(a, b)
    } else {
        false
    }
}

/// True if the two rectangles strictly intersect in area, or are exact
/// duplicates.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    (a.bottom_row > b.top_row
        && a.bottom_col > b.top_col
        && a.top_row < b.bottom_row
        && a.top_col < b.bottom_col)
        || a == b
}

// ── Whole-room-set resolution ───────────────────────────────────────────

/// Reject any pair of rooms whose rectangles overlap or duplicate each
/// other. Fatal at load time.
pub fn check_overlaps(rects: &[Rect]) -> Result<(), WorldError> {
    for i in 0..rects.len() {
        for j in 0..rects.len() {
            if i != j && overlaps(rects[i], rects[j]) {
                return Err(WorldError::Load(format!(
                    "rooms {} and {} overlap",
                    i, j
                )));
            }
        }
    }
    Ok(())
}

/// Compute every room's neighbor list by running [`touches`] over all
/// ordered pairs. O(n²), run once at load; each list comes out ascending
/// by id because candidates are scanned in declaration order.
pub fn resolve_neighbors(rects: &[Rect]) -> Vec<Vec<usize>> {
    let mut neighbors = vec![Vec::new(); rects.len()];
    for i in 0..rects.len() {
        for j in 0..rects.len() {
            if i != j && touches(rects[i], rects[j]) {
                neighbors[i].push(j);
            }
        }
    }
    neighbors
}
