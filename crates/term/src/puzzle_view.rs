//! PuzzleView: paints an [`EngineSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). Every terminal cell samples the canvas at its
//! pixel center through a [`Projection`], so the same canvas coordinates drive
//! both input mapping and drawing.

use image::RgbaImage;

use crate::core::artwork::sample;
use crate::core::snapshot::{EngineSnapshot, GridSnapshot, PieceSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Projection, BACKDROP_COLOR, TILE_COLOR, TILE_SIZE};

/// Terminal size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub width: u16,
    pub height: u16,
}

impl TermSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const CANVAS: Rgb = Rgb::new(24, 22, 26);
const TEXT: Rgb = Rgb::new(220, 214, 208);

/// How strongly the backdrop square shows through when no artwork is loaded.
const PLAIN_BACKDROP_MIX: f32 = 0.18;

const PIECE_PALETTE: [Rgb; 9] = [
    Rgb::new(0xB5, 0x5D, 0x4C),
    Rgb::new(0x4C, 0x8C, 0xB5),
    Rgb::new(0x7F, 0xA6, 0x5B),
    Rgb::new(0xD9, 0x9A, 0x3E),
    Rgb::new(0x8E, 0x6C, 0xB0),
    Rgb::new(0x3E, 0xA8, 0x9C),
    Rgb::new(0xC9, 0x6B, 0x8E),
    Rgb::new(0x9C, 0x86, 0x5A),
    Rgb::new(0x5A, 0x6E, 0x9C),
];

/// Renders the puzzle scene, a status line and a hint line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PuzzleView {
    projection: Projection,
}

impl PuzzleView {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Render into an existing framebuffer, resizing it to `size`.
    ///
    /// The hot path: callers keep one framebuffer and one snapshot alive
    /// across frames.
    pub fn render_into(
        &self,
        snap: &EngineSnapshot,
        backdrop: Option<&RgbaImage>,
        size: TermSize,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(size.width, size.height);
        fb.clear(CellStyle::solid(CANVAS).into_cell(' '));

        if let Some(grid) = snap.grid.as_ref() {
            self.draw_scene(fb, snap, grid, backdrop, size);
        }
        self.draw_particles(fb, snap);
        self.draw_status(fb, snap, size);

        if !snap.in_game {
            self.draw_overlay_text(fb, size, size.height / 2, "PAUSED");
        } else if snap.completed {
            let row = snap
                .grid
                .as_ref()
                .map(|g| self.grid_center_row(g))
                .unwrap_or(size.height / 2);
            self.draw_overlay_text(fb, size, row, "COMPLETE");
            self.draw_overlay_text(fb, size, row.saturating_add(1), "n: next level");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &EngineSnapshot,
        backdrop: Option<&RgbaImage>,
        size: TermSize,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(size.width, size.height);
        self.render_into(snap, backdrop, size, &mut fb);
        fb
    }

    fn draw_scene(
        &self,
        fb: &mut FrameBuffer,
        snap: &EngineSnapshot,
        grid: &GridSnapshot,
        backdrop: Option<&RgbaImage>,
        size: TermSize,
    ) {
        let (step_x, step_y) = (self.projection.col_px, self.projection.row_px);
        let tile = Rgb::from_hex(TILE_COLOR);

        for row in 0..size.height {
            for col in 0..size.width {
                let (x, y) = self.projection.to_px(col, row);
                let base = backdrop_color(grid, backdrop, x, y).unwrap_or(CANVAS);
                let mut cell = CellStyle::solid(base).into_cell(' ');

                if let Some(t) = grid_tile(grid, x, y) {
                    let right = grid_tile(grid, x + step_x, y) != Some(t);
                    let bottom = grid_tile(grid, x, y + step_y) != Some(t);
                    cell = block(tile, base, right, bottom, false);
                }

                // Front-most piece wins.
                let hit = snap
                    .pieces
                    .iter()
                    .rev()
                    .find_map(|p| piece_tile(p, x, y).map(|t| (p, t)));
                if let Some((piece, t)) = hit {
                    let right = piece_tile(piece, x + step_x, y) != Some(t);
                    let bottom = piece_tile(piece, x, y + step_y) != Some(t);
                    cell = block(piece_color(piece, t), base, right, bottom, piece.selected);
                }

                fb.set(col, row, cell);
            }
        }
    }

    fn draw_particles(&self, fb: &mut FrameBuffer, snap: &EngineSnapshot) {
        for p in &snap.particles {
            let (col, row) = self.projection.to_cell(p.x, p.y);
            if col < 0 || row < 0 || col > u16::MAX as i32 || row > u16::MAX as i32 {
                continue;
            }
            let Some(under) = fb.get(col as u16, row as u16) else {
                continue;
            };
            let bg = under.style.bg;
            let style = CellStyle {
                fg: Rgb::from_hex(p.color).lerp(bg, 1.0 - p.fade),
                bg,
                bold: p.fade > 0.5,
                dim: false,
            };
            fb.set_signed(col, row, style.into_cell('*'));
        }
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &EngineSnapshot, size: TermSize) {
        if size.height == 0 {
            return;
        }
        let bar = CellStyle {
            fg: TEXT,
            bg: Rgb::new(40, 36, 42),
            bold: false,
            dim: false,
        };
        let label = CellStyle { bold: true, ..bar };
        fb.fill_rect(0, 0, size.width, 1, ' ', bar);

        let mut x = 1u16;
        match (snap.level_name.as_deref(), snap.grid.is_some()) {
            (Some(name), true) if !name.is_empty() => {
                fb.put_str(x, 0, name, label);
                x = x.saturating_add(name.chars().count() as u16 + 3);
            }
            (_, true) => {}
            (_, false) => {
                fb.put_str(x, 0, "no level loaded", bar);
                x = x.saturating_add(18);
            }
        }
        if snap.grid.is_some() {
            fb.put_str(x, 0, "tiles left", bar);
            fb.put_u32(x.saturating_add(11), 0, snap.tiles_remaining, label);
        }

        if size.height > 1 {
            let hint = CellStyle { dim: true, ..bar };
            let y = size.height - 1;
            fb.fill_rect(0, y, size.width, 1, ' ', hint);
            fb.put_str(
                1,
                y,
                "drag: left  rotate: right/r  n/p: level  s: restart  q: quit",
                hint,
            );
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, size: TermSize, row: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = size.width.saturating_sub(text_w) / 2;
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, row, text, style);
    }

    fn grid_center_row(&self, grid: &GridSnapshot) -> u16 {
        let cy = grid.origin.1 + grid.tiles_y as f32 * TILE_SIZE * 0.5;
        let (_, row) = self.projection.to_cell(0.0, cy);
        row.clamp(0, u16::MAX as i32) as u16
    }
}

/// Backdrop pixel under canvas point `(x, y)`, blended over the canvas.
fn backdrop_color(grid: &GridSnapshot, art: Option<&RgbaImage>, x: f32, y: f32) -> Option<Rgb> {
    let size = grid.backdrop_size;
    if size <= 0.0 {
        return None;
    }
    let u = (x - grid.backdrop_origin.0) / size;
    let v = (y - grid.backdrop_origin.1) / size;
    match art {
        Some(img) => {
            let [r, g, b, a] = sample(img, u, v)?;
            if a == 0 {
                return None;
            }
            Some(CANVAS.lerp(Rgb::new(r, g, b), a as f32 / 255.0))
        }
        None if (0.0..1.0).contains(&u) && (0.0..1.0).contains(&v) => {
            Some(CANVAS.lerp(Rgb::from_hex(BACKDROP_COLOR), PLAIN_BACKDROP_MIX))
        }
        None => None,
    }
}

/// Grid tile `(col, row)` containing canvas point `(x, y)`.
fn grid_tile(grid: &GridSnapshot, x: f32, y: f32) -> Option<(i32, i32)> {
    let lx = x - grid.origin.0;
    let ly = y - grid.origin.1;
    let w = grid.tiles_x as f32 * TILE_SIZE;
    let h = grid.tiles_y as f32 * TILE_SIZE;
    if lx < 0.0 || ly < 0.0 || lx >= w || ly >= h {
        return None;
    }
    Some(((lx / TILE_SIZE) as i32, (ly / TILE_SIZE) as i32))
}

/// Tile of the piece's unrotated artwork under canvas point `(x, y)`.
///
/// The artwork is drawn at its natural size, rotated by the animated angle
/// about the center of the current bounding box.
fn piece_tile(p: &PieceSnapshot, x: f32, y: f32) -> Option<(i32, i32)> {
    let cx = p.x + p.w * 0.5;
    let cy = p.y + p.h * 0.5;
    let (s, c) = p.angle.to_radians().sin_cos();
    let dx = x - cx;
    let dy = y - cy;
    let u = c * dx + s * dy + p.original_w * 0.5;
    let v = -s * dx + c * dy + p.original_h * 0.5;
    if u < 0.0 || v < 0.0 || u >= p.original_w || v >= p.original_h {
        return None;
    }
    Some(((u / TILE_SIZE) as i32, (v / TILE_SIZE) as i32))
}

fn piece_color(p: &PieceSnapshot, tile: (i32, i32)) -> Rgb {
    let mut color = PIECE_PALETTE[p.artwork.0 as usize % PIECE_PALETTE.len()];
    if (tile.0 + tile.1).rem_euclid(2) == 1 {
        color = color.scale(0.88);
    }
    if p.selected {
        color = color.lerp(Rgb::new(255, 255, 255), 0.3);
    }
    color
}

/// A block glyph leaving a gap on the right and/or bottom where a tile ends.
fn block(fill: Rgb, gap: Rgb, right_edge: bool, bottom_edge: bool, bold: bool) -> Cell {
    let ch = match (right_edge, bottom_edge) {
        (false, false) => '█',
        (true, false) => '▌',
        (false, true) => '▀',
        (true, true) => '▘',
    };
    CellStyle {
        fg: fill,
        bg: gap,
        bold,
        dim: false,
    }
    .into_cell(ch)
}

trait IntoCell {
    fn into_cell(self, ch: char) -> Cell;
}

impl IntoCell for CellStyle {
    fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}
