//! Grid module - occupancy bitmap and anchor points for one level
//!
//! The grid is `tiles_x * tiles_y` cells stored row-major (`row * tiles_x + col`).
//! Each cell carries a byte flag (0 = empty, 1 = filled) and an anchor point:
//! the canvas pixel of its top-left corner. The grid is centered on the canvas,
//! so anchors move on resize while occupancy stays put.

use arrayvec::ArrayVec;

use crate::shapes::{Shape, MAX_SHAPE_CELLS};
use crate::types::{Rotation, Viewport, BACKDROP_PADDING_TILES, TILE_SIZE};

/// Why a placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The origin cell itself is not part of the grid.
    OriginOutOfGrid,
    /// An occupied cell would land at or past the last column.
    ColumnOverflow,
    /// An occupied cell would land at or past the last row.
    RowOverflow,
    /// An occupied cell would land on a filled cell.
    Overlap { cell: usize },
}

impl PlacementError {
    pub fn code(self) -> &'static str {
        match self {
            PlacementError::Overlap { .. } => "overlap",
            PlacementError::OriginOutOfGrid
            | PlacementError::ColumnOverflow
            | PlacementError::RowOverflow => "out_of_bounds",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlacementError::OriginOutOfGrid => "origin cell is outside the grid",
            PlacementError::ColumnOverflow => "piece would extend past the last column",
            PlacementError::RowOverflow => "piece would extend past the last row",
            PlacementError::Overlap { .. } => "piece would overlap a filled cell",
        }
    }
}

/// Occupancy and anchor table of the active level.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    tiles_x: u16,
    tiles_y: u16,
    occupancy: Vec<u8>,
    anchors: Vec<(f32, f32)>,
    tiles_remaining: u32,
    origin: (f32, f32),
}

impl Grid {
    /// Create an empty grid centered in `viewport`.
    ///
    /// Callers validate that both dimensions are non-zero.
    pub fn new(tiles_x: u16, tiles_y: u16, viewport: Viewport) -> Self {
        let count = tiles_x as usize * tiles_y as usize;
        let mut grid = Self {
            tiles_x,
            tiles_y,
            occupancy: vec![0; count],
            anchors: Vec::with_capacity(count),
            tiles_remaining: count as u32,
            origin: (0.0, 0.0),
        };
        grid.recompute_anchors(viewport);
        grid
    }

    /// Recompute every anchor for a new canvas size.
    ///
    /// Anchors are whole pixels so snapped positions compare exactly.
    pub fn recompute_anchors(&mut self, viewport: Viewport) {
        let (w, h) = self.pixel_size();
        let ox = ((viewport.width - w) * 0.5).floor();
        let oy = ((viewport.height - h) * 0.5).floor();
        self.origin = (ox, oy);

        self.anchors.clear();
        for row in 0..self.tiles_y {
            for col in 0..self.tiles_x {
                self.anchors
                    .push((col as f32 * TILE_SIZE + ox, row as f32 * TILE_SIZE + oy));
            }
        }
    }

    pub fn tiles_x(&self) -> u16 {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> u16 {
        self.tiles_y
    }

    pub fn cell_count(&self) -> usize {
        self.occupancy.len()
    }

    pub fn tiles_remaining(&self) -> u32 {
        self.tiles_remaining
    }

    pub fn is_complete(&self) -> bool {
        self.tiles_remaining == 0
    }

    /// Flat occupancy flags, row-major.
    pub fn occupancy(&self) -> &[u8] {
        &self.occupancy
    }

    pub fn is_filled(&self, cell: usize) -> bool {
        self.occupancy.get(cell).is_some_and(|&v| v != 0)
    }

    /// Anchor points in cell order.
    pub fn anchors(&self) -> &[(f32, f32)] {
        &self.anchors
    }

    pub fn anchor(&self, cell: usize) -> Option<(f32, f32)> {
        self.anchors.get(cell).copied()
    }

    /// Canvas pixel of the grid's top-left corner.
    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Grid size in pixels.
    pub fn pixel_size(&self) -> (f32, f32) {
        (
            self.tiles_x as f32 * TILE_SIZE,
            self.tiles_y as f32 * TILE_SIZE,
        )
    }

    /// Side length of the square backdrop artwork around the grid.
    pub fn backdrop_size(&self) -> f32 {
        backdrop_size(self.tiles_x, self.tiles_y)
    }

    /// Check that `shape` fits at `origin_cell` with `rotation` on empty cells.
    ///
    /// Does not mutate the grid.
    pub fn validate_placement(
        &self,
        shape: &Shape,
        origin_cell: usize,
        rotation: Rotation,
    ) -> Result<(), PlacementError> {
        if origin_cell >= self.cell_count() {
            return Err(PlacementError::OriginOutOfGrid);
        }

        let stride = self.tiles_x as usize;
        let base_col = origin_cell % stride;
        let base_row = origin_cell / stride;

        for (dx, dy) in shape.footprint(rotation) {
            let col = base_col + dx as usize;
            let row = base_row + dy as usize;
            if col >= stride {
                return Err(PlacementError::ColumnOverflow);
            }
            if row >= self.tiles_y as usize {
                return Err(PlacementError::RowOverflow);
            }
            let cell = row * stride + col;
            if self.occupancy[cell] != 0 {
                return Err(PlacementError::Overlap { cell });
            }
        }

        Ok(())
    }

    /// Mark the piece's cells filled and take them off the remaining count.
    pub fn commit(&mut self, shape: &Shape, origin_cell: usize, rotation: Rotation) {
        for cell in self.footprint_cells(shape, origin_cell, rotation) {
            if self.occupancy[cell] == 0 {
                self.occupancy[cell] = 1;
                self.tiles_remaining -= 1;
            }
        }
    }

    /// Mark the piece's cells empty and return them to the remaining count.
    pub fn release(&mut self, shape: &Shape, origin_cell: usize, rotation: Rotation) {
        for cell in self.footprint_cells(shape, origin_cell, rotation) {
            if self.occupancy[cell] != 0 {
                self.occupancy[cell] = 0;
                self.tiles_remaining += 1;
            }
        }
    }

    /// Text dump of the occupancy, one grid row per line.
    pub fn dump(&self) -> String {
        let stride = self.tiles_x as usize;
        let mut out = String::with_capacity(self.occupancy.len() * 2 + self.tiles_y as usize);
        for row in self.occupancy.chunks(stride.max(1)) {
            for v in row {
                out.push(if *v != 0 { '1' } else { '0' });
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    /// In-bounds flat indices of a footprint placed at `origin_cell`.
    fn footprint_cells(
        &self,
        shape: &Shape,
        origin_cell: usize,
        rotation: Rotation,
    ) -> ArrayVec<usize, MAX_SHAPE_CELLS> {
        let stride = self.tiles_x as usize;
        let base_col = origin_cell % stride;
        let base_row = origin_cell / stride;

        shape
            .footprint(rotation)
            .into_iter()
            .filter_map(|(dx, dy)| {
                let col = base_col + dx as usize;
                let row = base_row + dy as usize;
                (col < stride && row < self.tiles_y as usize).then_some(row * stride + col)
            })
            .collect()
    }
}

/// Side length of the backdrop square for a `tiles_x x tiles_y` grid.
pub fn backdrop_size(tiles_x: u16, tiles_y: u16) -> f32 {
    (tiles_x.max(tiles_y) as u32 + BACKDROP_PADDING_TILES) as f32 * TILE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::get_shape;

    fn grid(x: u16, y: u16) -> Grid {
        Grid::new(x, y, Viewport::new(1280.0, 768.0))
    }

    #[test]
    fn anchors_are_centered_and_row_major() {
        let g = grid(5, 5);
        // (1280 - 320) / 2 = 480, (768 - 320) / 2 = 224
        assert_eq!(g.origin(), (480.0, 224.0));
        assert_eq!(g.anchor(0), Some((480.0, 224.0)));
        assert_eq!(g.anchor(1), Some((544.0, 224.0)));
        assert_eq!(g.anchor(5), Some((480.0, 288.0)));
        assert_eq!(g.anchors().len(), 25);
    }

    #[test]
    fn anchors_floor_odd_offsets() {
        let g = Grid::new(1, 1, Viewport::new(101.0, 65.0));
        assert_eq!(g.origin(), (18.0, 0.0));
    }

    #[test]
    fn validate_rejects_column_overflow() {
        let g = grid(3, 3);
        let domino = get_shape(4).unwrap();
        assert_eq!(
            g.validate_placement(domino, 2, Rotation::Deg0),
            Err(PlacementError::ColumnOverflow)
        );
        assert!(g.validate_placement(domino, 2, Rotation::Deg90).is_ok());
    }

    #[test]
    fn validate_uses_row_stride_on_wide_grids() {
        // 4 wide, 2 tall: cell 5 is (col 1, row 1). A vertical domino overflows.
        let g = grid(4, 2);
        let domino = get_shape(4).unwrap();
        assert_eq!(
            g.validate_placement(domino, 5, Rotation::Deg90),
            Err(PlacementError::RowOverflow)
        );
        assert!(g.validate_placement(domino, 1, Rotation::Deg90).is_ok());
    }

    #[test]
    fn validate_rejects_overlap() {
        let mut g = grid(3, 3);
        let single = get_shape(0).unwrap();
        g.commit(single, 4, Rotation::Deg0);

        let square = get_shape(5).unwrap();
        assert_eq!(
            g.validate_placement(square, 0, Rotation::Deg0),
            Err(PlacementError::Overlap { cell: 4 })
        );
        assert!(g.validate_placement(square, 0, Rotation::Deg0).unwrap_err().code() == "overlap");
    }

    #[test]
    fn validate_rejects_origin_outside() {
        let g = grid(2, 2);
        let single = get_shape(0).unwrap();
        assert_eq!(
            g.validate_placement(single, 4, Rotation::Deg0),
            Err(PlacementError::OriginOutOfGrid)
        );
    }

    #[test]
    fn commit_then_release_restores_remaining() {
        let mut g = grid(5, 5);
        let hexomino = get_shape(6).unwrap();
        for _ in 0..3 {
            g.commit(hexomino, 6, Rotation::Deg90);
            assert_eq!(g.tiles_remaining(), 19);
            g.release(hexomino, 6, Rotation::Deg90);
            assert_eq!(g.tiles_remaining(), 25);
        }
        assert!(g.occupancy().iter().all(|&v| v == 0));
    }

    #[test]
    fn dump_prints_rows() {
        let mut g = grid(2, 2);
        g.commit(get_shape(0).unwrap(), 1, Rotation::Deg0);
        assert_eq!(g.dump(), "0 1 \n0 0 \n");
    }

    #[test]
    fn backdrop_is_three_tiles_larger() {
        assert_eq!(backdrop_size(5, 5), 512.0);
        assert_eq!(backdrop_size(1, 3), 384.0);
    }
}
