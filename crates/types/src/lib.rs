//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (placement engine, terminal rendering, input mapping).
//!
//! # Pixel Space
//!
//! The engine works in canvas pixels. A grid cell is a square of [`TILE_SIZE`]
//! pixels (gap included); the painted tile is inset by [`TILE_GAP`] on every side.
//!
//! # Interaction Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STICK_THRESHOLD` | 33px | Max distance for a piece corner to snap onto an anchor |
//! | `UNSTICK_THRESHOLD` | 32px | Distance from the snap target that starts detaching |
//! | `ROTATE_MS` | 200 | Duration of one rotation animation |
//! | `MOVE_MS` | 200 | Duration of snap / detach / rollback tweens |
//! | `MAX_QUEUED_ROTATIONS` | 2 | Cap on quarter turns waiting to animate |
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner (~60 FPS) |
//!
//! `UNSTICK_THRESHOLD` is deliberately not larger than `STICK_THRESHOLD`, so a
//! piece sitting on the boundary cannot oscillate between snapped and free.
//!
//! # Examples
//!
//! ```
//! use tui_tiles_types::{Rotation, RotateDirection, TILE_SIZE};
//!
//! let r = Rotation::Deg0.step(RotateDirection::Clockwise);
//! assert_eq!(r, Rotation::Deg90);
//! assert!(r.swaps_axes());
//!
//! assert_eq!(Rotation::Deg270.rotate_cw(), Rotation::Deg0);
//! assert_eq!(Rotation::Deg180.as_str(), "180");
//! assert_eq!(TILE_SIZE, 64.0);
//! ```

/// Size of one grid cell in pixels, gap included.
pub const TILE_SIZE: f32 = 64.0;

/// Inset of the painted tile inside its cell, per side.
pub const TILE_GAP: f32 = 3.0;

/// Snap entry distance in pixels.
pub const STICK_THRESHOLD: f32 = 33.0;

/// Snap exit distance in pixels.
pub const UNSTICK_THRESHOLD: f32 = 32.0;

/// Duration of a single rotation animation in milliseconds.
pub const ROTATE_MS: u32 = 200;

/// Duration of a position tween in milliseconds.
pub const MOVE_MS: u32 = 200;

/// Maximum number of queued quarter turns per piece.
pub const MAX_QUEUED_ROTATIONS: u8 = 2;

/// Margin around staged pieces, in pixels.
pub const STAGING_MARGIN: f32 = 20.0;

/// Extra tiles around the grid covered by the backdrop artwork.
pub const BACKDROP_PADDING_TILES: u32 = 3;

/// Fill color for black pixels of the grid backdrop artwork (0xRRGGBB).
pub const BACKDROP_COLOR: u32 = 0xDB_CE_C6;

/// Color of an empty grid tile (0xRRGGBB).
pub const TILE_COLOR: u32 = 0xC6_B0_A3;

/// Fixed frame interval of the terminal runner.
pub const TICK_MS: u32 = 16;


/// Index of a piece in the loaded piece catalog (equal to its shape index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

/// Quarter-turn orientation of a piece.
///
/// The numeric index (0..=3) is the number of clockwise quarter turns applied to
/// the shape's natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Quarter-turn index in `0..=3`.
    pub fn index(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Build from any integer, wrapping modulo 4.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(4) as usize]
    }

    pub fn degrees(self) -> f32 {
        self.index() as f32 * 90.0
    }

    /// Odd orientations swap the bounding box width and height.
    pub fn swaps_axes(self) -> bool {
        self.index() % 2 == 1
    }

    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() - 1)
    }

    /// One quarter turn in the given direction.
    pub fn step(self, dir: RotateDirection) -> Self {
        Self::from_index(self.index() + dir.step())
    }

    /// Signed quarter turns from `self` to `target` (`target - self`, not normalized).
    pub fn turns_to(self, target: Rotation) -> i32 {
        target.index() - self.index()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rotation::Deg0 => "0",
            Rotation::Deg90 => "90",
            Rotation::Deg180 => "180",
            Rotation::Deg270 => "270",
        }
    }
}

/// Direction of a plain (secondary action) rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotateDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// Signed quarter-turn increment.
    pub fn step(self) -> i32 {
        match self {
            RotateDirection::Clockwise => 1,
            RotateDirection::CounterClockwise => -1,
        }
    }

    /// Parse "cw"/"clockwise" or "ccw"/"counterclockwise" (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cw" | "clockwise" => Some(RotateDirection::Clockwise),
            "ccw" | "counterclockwise" | "counter-clockwise" => {
                Some(RotateDirection::CounterClockwise)
            }
            _ => None,
        }
    }
}

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Pointer button classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Drags pieces.
    Primary,
    /// Selects without dragging; its click action rotates.
    Secondary,
}

/// Closed set of inputs consumed by the engine.
///
/// Coordinates are normalized to the canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    PointerDown {
        x: f32,
        y: f32,
        button: PointerButton,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp {
        button: PointerButton,
    },
    PointerCancel,
    /// Rotate the selected piece by one quarter turn.
    SecondaryAction,
    Resize(Viewport),
}

/// Mapping between terminal cells and canvas pixels.
///
/// Terminal glyphs are roughly twice as tall as wide, so a row spans twice the
/// pixels of a column. Cells map to their pixel centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub col_px: f32,
    pub row_px: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            col_px: 16.0,
            row_px: 32.0,
        }
    }
}

impl Projection {
    pub fn new(col_px: f32, row_px: f32) -> Self {
        Self { col_px, row_px }
    }

    /// Pixel center of terminal cell `(col, row)`.
    pub fn to_px(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.col_px,
            (row as f32 + 0.5) * self.row_px,
        )
    }

    /// Terminal cell containing pixel `(x, y)`; may be negative.
    pub fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.col_px).floor() as i32,
            (y / self.row_px).floor() as i32,
        )
    }

    /// Canvas size covered by a `cols x rows` terminal.
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(cols as f32 * self.col_px, rows as f32 * self.row_px)
    }
}
