//! Puzzle engine - interaction and session layer over the core model
//!
//! [`PuzzleEngine`] is the single entry point for hosts:
//!
//! - feed it [`InputCommand`](tui_tiles_types::InputCommand)s in arrival order,
//! - call [`PuzzleEngine::tick`] once per frame with a monotonic `now_ms`,
//! - drain [`EngineEvent`]s and paint [`PuzzleEngine::snapshot`].
//!
//! Everything runs synchronously on the caller's thread.
//!
//! # Example
//!
//! ```
//! use tui_tiles_core::ArtworkHandle;
//! use tui_tiles_engine::{EngineConfig, PuzzleEngine};
//! use tui_tiles_types::{InputCommand, PointerButton, Viewport};
//!
//! let mut engine = PuzzleEngine::new(EngineConfig::default(), Viewport::new(1280.0, 768.0));
//! let art: Vec<ArtworkHandle> = (0..9).map(ArtworkHandle).collect();
//! engine.init_resources(&art);
//! engine.set_in_game(true);
//! engine.init_level(3, 3, &[0]).unwrap();
//!
//! let piece = engine.roster()[0];
//! let (x, y) = engine.piece(piece).unwrap().position();
//! let (ax, ay) = engine.grid().unwrap().anchor(0).unwrap();
//!
//! engine.handle(InputCommand::PointerDown { x: x + 8.0, y: y + 8.0, button: PointerButton::Primary }, 0);
//! engine.handle(InputCommand::PointerMove { x: ax + 8.0, y: ay + 8.0 }, 16);
//! engine.handle(InputCommand::PointerUp { button: PointerButton::Primary }, 32);
//!
//! assert_eq!(engine.tiles_remaining(), Some(8));
//! ```

pub mod config;
pub mod engine;
pub mod event;
pub mod layout;
pub mod level;

pub use config::EngineConfig;
pub use engine::{DragPhase, Interaction, PuzzleEngine};
pub use event::EngineEvent;
pub use layout::stage_positions;
pub use level::{CatalogError, LevelCatalog, LevelDescriptor, LevelError};
