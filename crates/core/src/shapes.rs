//! Shapes module - polyomino definitions and the rotation lens
//!
//! Every piece type has a bounding box (in cells) and an ordered list of the
//! occupied cells inside it, as row-major indices (`row * width + col`).
//! The table is static and never changes for the lifetime of the process.

use arrayvec::ArrayVec;

use crate::types::{Rotation, TILE_SIZE};

/// Largest number of occupied cells of any shape (the 3x3 nonomino).
pub const MAX_SHAPE_CELLS: usize = 9;

/// Cell offset `(col, row)` inside a piece's bounding box.
pub type CellOffset = (u8, u8);

/// Occupied cells of a shape at one rotation.
pub type Footprint = ArrayVec<CellOffset, MAX_SHAPE_CELLS>;

/// Immutable polyomino definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Bounding box width in cells at rotation 0.
    pub width: u8,
    /// Bounding box height in cells at rotation 0.
    pub height: u8,
    /// Row-major indices of the occupied cells.
    pub cells: &'static [u8],
}

/// The shape table, indexed by piece-type id.
///
/// Ids 0..=2 are 1x1 singletons that only differ in artwork.
pub const SHAPES: [Shape; 9] = [
    Shape { width: 1, height: 1, cells: &[0] },
    Shape { width: 1, height: 1, cells: &[0] },
    Shape { width: 1, height: 1, cells: &[0] },
    Shape { width: 1, height: 3, cells: &[0, 1, 2] },
    Shape { width: 2, height: 1, cells: &[0, 1] },
    Shape { width: 2, height: 2, cells: &[0, 1, 2, 3] },
    Shape { width: 2, height: 3, cells: &[0, 1, 2, 3, 4, 5] },
    Shape { width: 3, height: 2, cells: &[0, 1, 2, 3, 4, 5] },
    Shape { width: 3, height: 3, cells: &[0, 1, 2, 3, 4, 5, 6, 7, 8] },
];

/// Look up a shape by piece-type id.
pub fn get_shape(id: usize) -> Option<&'static Shape> {
    SHAPES.get(id)
}

impl Shape {
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Pixel size at rotation 0.
    pub fn pixel_size(&self) -> (f32, f32) {
        (
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    /// Bounding box `(width, height)` in cells as rotated.
    pub fn rotated_size(&self, rotation: Rotation) -> (u8, u8) {
        if rotation.swaps_axes() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Offset of the `local`-th occupied cell inside the rotated bounding box.
    ///
    /// Returns `None` when `local` is not an index into the occupied-cell list.
    pub fn cell_offset(&self, rotation: Rotation, local: usize) -> Option<CellOffset> {
        let cell = *self.cells.get(local)?;
        let (w, h) = (self.width, self.height);
        let ox = cell % w;
        let oy = cell / w;

        Some(match rotation {
            Rotation::Deg0 => (ox, oy),
            Rotation::Deg90 => (h - oy - 1, ox),
            Rotation::Deg180 => (w - ox - 1, h - oy - 1),
            Rotation::Deg270 => (oy, w - ox - 1),
        })
    }

    /// All occupied cell offsets at `rotation`, in occupied-list order.
    pub fn footprint(&self, rotation: Rotation) -> Footprint {
        (0..self.cells.len())
            .filter_map(|i| self.cell_offset(rotation, i))
            .collect()
    }
}
