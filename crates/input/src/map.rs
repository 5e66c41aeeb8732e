//! Mapping from terminal events to engine commands and runner actions.

use arrayvec::ArrayVec;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::types::{InputCommand, PointerButton, Projection};

/// Keyboard actions handled by the runner rather than the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Rotate the selected piece (same as a secondary click).
    Rotate,
    NextLevel,
    PrevLevel,
    Restart,
}

/// Engine commands produced by one terminal event (at most two).
pub type Commands = ArrayVec<InputCommand, 2>;

/// Result of mapping one terminal event.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped {
    Commands(Commands),
    Key(KeyAction),
    Quit,
    Ignored,
}

/// Map keyboard input to runner actions.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyAction> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => Some(KeyAction::Rotate),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Right | KeyCode::PageDown => {
            Some(KeyAction::NextLevel)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Left | KeyCode::PageUp => {
            Some(KeyAction::PrevLevel)
        }
        KeyCode::Char('s') | KeyCode::Char('S') => Some(KeyAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Translates terminal events into canvas-space commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventMapper {
    projection: Projection,
}

impl EventMapper {
    pub fn new(projection: Projection) -> Self {
        Self { projection }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn map(&self, event: &Event) -> Mapped {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(*key) {
                    Mapped::Quit
                } else {
                    handle_key_event(*key).map_or(Mapped::Ignored, Mapped::Key)
                }
            }
            Event::Mouse(mouse) => {
                let cmds = self.map_mouse(*mouse);
                if cmds.is_empty() {
                    Mapped::Ignored
                } else {
                    Mapped::Commands(cmds)
                }
            }
            Event::Resize(cols, rows) => Mapped::Commands(self.single(self.map_resize(*cols, *rows))),
            // Losing focus mid-drag would otherwise leave the piece glued to the pointer.
            Event::FocusLost => Mapped::Commands(self.single(InputCommand::PointerCancel)),
            _ => Mapped::Ignored,
        }
    }

    /// Right button press selects and rotates in one go.
    pub fn map_mouse(&self, mouse: MouseEvent) -> Commands {
        let (x, y) = self.projection.to_px(mouse.column, mouse.row);
        let mut out = Commands::new();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => out.push(InputCommand::PointerDown {
                x,
                y,
                button: PointerButton::Primary,
            }),
            MouseEventKind::Down(MouseButton::Right) => {
                out.push(InputCommand::PointerDown {
                    x,
                    y,
                    button: PointerButton::Secondary,
                });
                out.push(InputCommand::SecondaryAction);
            }
            MouseEventKind::Up(MouseButton::Left) => out.push(InputCommand::PointerUp {
                button: PointerButton::Primary,
            }),
            MouseEventKind::Up(MouseButton::Right) => out.push(InputCommand::PointerUp {
                button: PointerButton::Secondary,
            }),
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                out.push(InputCommand::PointerMove { x, y })
            }
            _ => {}
        }
        out
    }

    pub fn map_resize(&self, cols: u16, rows: u16) -> InputCommand {
        InputCommand::Resize(self.projection.viewport(cols, rows))
    }

    fn single(&self, cmd: InputCommand) -> Commands {
        let mut out = Commands::new();
        out.push(cmd);
        out
    }
}
