//! Terminal rendering for the tiles puzzle.
//!
//! Scenes are painted into a plain framebuffer of styled cells and flushed to
//! the terminal with run-length diffing; no widget toolkit is involved.
//!
//! - [`fb`]: cells, styles, framebuffer
//! - [`puzzle_view`]: pure snapshot-to-framebuffer painter
//! - [`renderer`]: crossterm output, raw mode, mouse capture
//!
//! Canvas pixels map to terminal cells through a
//! [`Projection`](crate::types::Projection); the same projection is used by the
//! input mapper so clicks land where pieces are drawn.

pub mod fb;
pub mod puzzle_view;
pub mod renderer;

pub use tui_tiles_core as core;
pub use tui_tiles_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use puzzle_view::{PuzzleView, TermSize};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
