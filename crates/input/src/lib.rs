//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` mouse,
//! key, resize and focus events into [`crate::types::InputCommand`]s in canvas
//! pixel space, plus a few runner-level key actions (level navigation, quit).

pub mod map;

pub use tui_tiles_types as types;

pub use map::{handle_key_event, should_quit, Commands, EventMapper, KeyAction, Mapped};
