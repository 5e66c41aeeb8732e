//! Terminal tiles puzzle (workspace facade crate).
//!
//! Re-exports the member crates under short names so binaries, integration
//! tests and benches can write `tui_tiles::{core,engine,input,term,types}`.

pub use tui_tiles_core as core;
pub use tui_tiles_engine as engine;
pub use tui_tiles_input as input;
pub use tui_tiles_term as term;
pub use tui_tiles_types as types;
