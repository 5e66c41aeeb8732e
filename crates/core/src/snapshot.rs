use serde::Serialize;

use crate::grid::Grid;
use crate::piece::{ArtworkHandle, Piece};
use crate::types::{PieceId, Rotation};

/// Diagnostic occupancy dump emitted after every release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancySnapshot {
    pub tiles_x: u16,
    pub tiles_y: u16,
    pub cells: Vec<u8>,
    pub tiles_remaining: u32,
}

impl OccupancySnapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            tiles_x: grid.tiles_x(),
            tiles_y: grid.tiles_y(),
            cells: grid.occupancy().to_vec(),
            tiles_remaining: grid.tiles_remaining(),
        }
    }

    /// One line per grid row, cells as `0 ` / `1 `.
    pub fn to_text(&self) -> String {
        let stride = (self.tiles_x as usize).max(1);
        let mut out = String::with_capacity(self.cells.len() * 2 + self.tiles_y as usize);
        for row in self.cells.chunks(stride) {
            for v in row {
                out.push(if *v != 0 { '1' } else { '0' });
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSnapshot {
    pub tiles_x: u16,
    pub tiles_y: u16,
    /// Canvas pixel of the grid's top-left corner.
    pub origin: (f32, f32),
    pub backdrop_origin: (f32, f32),
    pub backdrop_size: f32,
}

impl GridSnapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        let (gw, gh) = grid.pixel_size();
        let size = grid.backdrop_size();
        let (ox, oy) = grid.origin();
        // Backdrop is centered on the grid center.
        let cx = ox + gw * 0.5;
        let cy = oy + gh * 0.5;
        Self {
            tiles_x: grid.tiles_x(),
            tiles_y: grid.tiles_y(),
            origin: (ox, oy),
            backdrop_origin: (cx - size * 0.5, cy - size * 0.5),
            backdrop_size: size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PieceSnapshot {
    #[serde(serialize_with = "ser_piece_id")]
    pub id: PieceId,
    #[serde(skip)]
    pub artwork: ArtworkHandle,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Natural (rotation 0) size; artwork is drawn at this size, rotated by `angle`.
    pub original_w: f32,
    pub original_h: f32,
    pub angle: f32,
    #[serde(serialize_with = "ser_rotation")]
    pub rotation: Rotation,
    pub committed: bool,
    pub selected: bool,
}

impl PieceSnapshot {
    pub fn from_piece(piece: &Piece, selected: bool) -> Self {
        let (x, y) = piece.position();
        let (w, h) = piece.size();
        let (original_w, original_h) = piece.original_size();
        Self {
            id: piece.id(),
            artwork: piece.artwork(),
            x,
            y,
            w,
            h,
            original_w,
            original_h,
            angle: piece.angle(),
            rotation: piece.rotation(),
            committed: piece.is_committed(),
            selected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleSnapshot {
    pub x: f32,
    pub y: f32,
    pub color: u32,
    pub fade: f32,
}

/// Plain-data view of the engine consumed by render collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub in_game: bool,
    pub level_name: Option<String>,
    pub grid: Option<GridSnapshot>,
    pub occupancy: Vec<u8>,
    pub tiles_remaining: u32,
    /// Paint order: back first.
    pub pieces: Vec<PieceSnapshot>,
    pub particles: Vec<ParticleSnapshot>,
    pub completed: bool,
    pub has_backdrop: bool,
}

impl EngineSnapshot {
    /// Reset every field, keeping allocations.
    pub fn clear(&mut self) {
        self.in_game = false;
        self.level_name = None;
        self.grid = None;
        self.occupancy.clear();
        self.tiles_remaining = 0;
        self.pieces.clear();
        self.particles.clear();
        self.completed = false;
        self.has_backdrop = false;
    }

    pub fn playable(&self) -> bool {
        self.in_game && self.grid.is_some() && !self.completed
    }
}

fn ser_piece_id<S: serde::Serializer>(id: &PieceId, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(id.0 as u64)
}

fn ser_rotation<S: serde::Serializer>(r: &Rotation, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(r.as_str())
}
