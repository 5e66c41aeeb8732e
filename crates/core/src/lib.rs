//! Core placement logic - pure, deterministic, and testable
//!
//! This crate holds the geometry and state of the puzzle: the shape table, piece
//! entities, the grid occupancy model and the snap resolver. It has no
//! dependency on terminal I/O or input devices, and time is always injected as
//! monotonic milliseconds, so the same inputs replay identically.
//!
//! # Module Structure
//!
//! - [`shapes`]: static polyomino table and the rotation lens over it
//! - [`piece`]: per-piece transform, grid binding and animation channels
//! - [`grid`]: occupancy bitmap, anchor table and placement validation
//! - [`snap`]: nearest-anchor search with edge-extended matches
//! - [`animation`]: smoothstep easing and channel state
//! - [`celebration`]: particle burst for level completion
//! - [`artwork`]: backdrop artwork decode and recolor
//! - [`snapshot`]: plain-data views for renderers and diagnostics
//!
//! # Example
//!
//! ```
//! use tui_tiles_core::{find_anchor, get_shape, Grid};
//! use tui_tiles_types::{Rotation, Viewport, STICK_THRESHOLD};
//!
//! let mut grid = Grid::new(3, 3, Viewport::new(640.0, 480.0));
//! let single = get_shape(0).unwrap();
//!
//! let (ax, ay) = grid.anchor(0).unwrap();
//! let m = find_anchor(grid.anchors(), (ax + 5.0, ay - 5.0), (64.0, 64.0), STICK_THRESHOLD).unwrap();
//! assert_eq!(m.canonical_cell(), Some(0));
//!
//! grid.validate_placement(single, 0, Rotation::Deg0).unwrap();
//! grid.commit(single, 0, Rotation::Deg0);
//! assert_eq!(grid.tiles_remaining(), 8);
//! ```

pub mod animation;
pub mod artwork;
pub mod celebration;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod shapes;
pub mod snap;
pub mod snapshot;

pub use tui_tiles_types as types;

pub use animation::{ease, Motion, Timing};
pub use artwork::{load_backdrop, recolor_backdrop, ArtworkError};
pub use celebration::Celebration;
pub use grid::{Grid, PlacementError};
pub use piece::{ArtworkHandle, Piece, Placement};
pub use rng::SimpleRng;
pub use shapes::{get_shape, Shape, SHAPES};
pub use snap::{find_anchor, EdgeAlign, SnapMatch};
pub use snapshot::{EngineSnapshot, GridSnapshot, OccupancySnapshot, ParticleSnapshot, PieceSnapshot};
