//! Editor Commands
//!
//! Intents produced from raw input events and the outcome of applying them.

use canvas_input_core::{InputEvent, KeyCode};

use crate::cursor::Direction;

/// Editor command type
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    InsertChar(char),
    DeleteBackward,
    DeleteForward,
    Move { direction: Direction, extend: bool },
    /// Pointer pressed at an x-coordinate in the widget's local frame
    PointerDown { x: f32 },
    ClearSelection,
    SetFocus(bool),
}

impl Command {
    /// Translate a platform event. Only printable ASCII key presses become
    /// insertions; unrecognized keys produce no command.
    ///
    /// Pointer coordinates are passed through unchanged, the caller is
    /// responsible for converting them into the widget's frame.
    pub fn from_event(event: &InputEvent) -> Option<Command> {
        match *event {
            InputEvent::KeyPress { ch, .. } if is_printable(ch) => Some(Command::InsertChar(ch)),
            InputEvent::KeyPress { .. } => None,
            InputEvent::KeyDown { code, shift } => match code {
                KeyCode::Backspace => Some(Command::DeleteBackward),
                KeyCode::Delete => Some(Command::DeleteForward),
                KeyCode::ArrowLeft => Some(Command::Move {
                    direction: Direction::Left,
                    extend: shift,
                }),
                KeyCode::ArrowRight => Some(Command::Move {
                    direction: Direction::Right,
                    extend: shift,
                }),
                KeyCode::Other(_) => None,
            },
            InputEvent::PointerDown { x, .. } => Some(Command::PointerDown { x }),
            InputEvent::Focus(focused) => Some(Command::SetFocus(focused)),
        }
    }

    /// Whether the command comes from the keyboard
    pub fn is_keyboard(&self) -> bool {
        matches!(
            self,
            Command::InsertChar(_)
                | Command::DeleteBackward
                | Command::DeleteForward
                | Command::Move { .. }
        )
    }
}

/// Space through tilde
fn is_printable(ch: char) -> bool {
    matches!(ch, ' '..='~')
}

/// Why a command left the widget untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Disabled,
    MaxLength,
    NotPrintable,
    AtBoundary,
    NothingSelected,
    /// The event maps to no editing command
    Unrecognized,
    Unfocused,
}

/// Command execution result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Rejected(RejectReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_mapping() {
        let cmd = Command::from_event(&InputEvent::KeyPress { ch: 'q', shift: false });
        assert_eq!(cmd, Some(Command::InsertChar('q')));

        let cmd = Command::from_event(&InputEvent::KeyPress { ch: '~', shift: true });
        assert_eq!(cmd, Some(Command::InsertChar('~')));

        assert_eq!(Command::from_event(&InputEvent::KeyPress { ch: '\r', shift: false }), None);
        assert_eq!(Command::from_event(&InputEvent::KeyPress { ch: 'é', shift: false }), None);
    }

    #[test]
    fn test_key_down_mapping() {
        let shifted_left = InputEvent::KeyDown {
            code: KeyCode::ArrowLeft,
            shift: true,
        };
        assert_eq!(
            Command::from_event(&shifted_left),
            Some(Command::Move {
                direction: Direction::Left,
                extend: true
            })
        );

        let backspace = InputEvent::KeyDown {
            code: KeyCode::from_dom(8),
            shift: false,
        };
        assert_eq!(Command::from_event(&backspace), Some(Command::DeleteBackward));

        let enter = InputEvent::KeyDown {
            code: KeyCode::from_dom(13),
            shift: false,
        };
        assert_eq!(Command::from_event(&enter), None);
    }

    #[test]
    fn test_pointer_and_focus_mapping() {
        let cmd = Command::from_event(&InputEvent::PointerDown { x: 12.5, y: 3.0 });
        assert_eq!(cmd, Some(Command::PointerDown { x: 12.5 }));
        assert!(!cmd.unwrap().is_keyboard());

        let cmd = Command::from_event(&InputEvent::Focus(false));
        assert_eq!(cmd, Some(Command::SetFocus(false)));
    }
}
