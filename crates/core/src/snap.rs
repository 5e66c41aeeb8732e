//! Snap resolver - finds the grid anchor a free-form piece position should snap to
//!
//! Anchors are scanned in cell order and the first match wins. Each anchor is
//! tested against four alignments of the piece's bounding box, in priority
//! order:
//!
//! 1. top-left corner on the anchor
//! 2. right edge on the anchor's cell (piece extends to the left)
//! 3. bottom edge on the anchor's cell (piece extends upward)
//! 4. bottom-right corner on the anchor's cell
//!
//! Only case 1 with no edge flag produces a canonical cell binding. The edge
//! flags are evaluated the way a short-circuiting chain of the four tests sets
//! them, so an earlier case that failed on its second test can leave its flag
//! raised for a later case.

use crate::types::TILE_SIZE;

/// Which far edges of the piece were aligned to the anchor's cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeAlign {
    pub right: bool,
    pub bottom: bool,
}

impl EdgeAlign {
    pub fn any(self) -> bool {
        self.right || self.bottom
    }
}

/// Result of a successful anchor search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapMatch {
    /// Linear index of the matched anchor's cell.
    pub cell: usize,
    /// Top-left pixel position the piece should move to.
    pub target: (f32, f32),
    pub edges: EdgeAlign,
}

impl SnapMatch {
    /// Cell usable for occupancy, `None` for edge-extended matches.
    pub fn canonical_cell(&self) -> Option<usize> {
        (!self.edges.any()).then_some(self.cell)
    }
}

/// Find the first anchor within `threshold` of the piece at `pos` with `size`.
pub fn find_anchor(
    anchors: &[(f32, f32)],
    pos: (f32, f32),
    size: (f32, f32),
    threshold: f32,
) -> Option<SnapMatch> {
    let (px, py) = pos;
    let (w, h) = size;

    for (cell, &(ax, ay)) in anchors.iter().enumerate() {
        let near_x = (px - ax).abs() < threshold;
        let near_y = (py - ay).abs() < threshold;
        let far_x = (px + w - TILE_SIZE - ax).abs() < threshold;
        let far_y = (py + h - TILE_SIZE - ay).abs() < threshold;

        let edges = if near_x && near_y {
            EdgeAlign::default()
        } else if far_x && near_y {
            EdgeAlign {
                right: true,
                bottom: false,
            }
        } else if near_x && far_y {
            EdgeAlign {
                right: far_x,
                bottom: true,
            }
        } else if far_x && far_y {
            EdgeAlign {
                right: true,
                bottom: true,
            }
        } else {
            continue;
        };

        let tx = if edges.right { ax - w + TILE_SIZE } else { ax };
        let ty = if edges.bottom { ay - h + TILE_SIZE } else { ay };

        return Some(SnapMatch {
            cell,
            target: (tx, ty),
            edges,
        });
    }

    None
}
