//! Input scripts
//!
//! A compact text form for replaying keyboard and pointer input through a
//! widget. Plain characters are typed as-is; braces name special keys:
//!
//! ```text
//! hello{left}{left}{shift+left}{delete}{click 42}{backspace}
//! ```
//!
//! `{{` and `}}` type literal braces.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use canvas_input_core::{InputEvent, KeyCode};

/// Script syntax errors
#[derive(Error, Debug, PartialEq)]
pub enum ScriptError {
    /// `{` without a closing `}`
    #[error("unterminated key name starting at char {0}")]
    Unterminated(usize),

    /// Brace name that is not a known key
    #[error("unknown key {{{0}}}")]
    UnknownKey(String),

    /// `{click X}` where X is not a number
    #[error("invalid click position {0:?}")]
    BadPosition(String),

    /// Unescaped `}` outside a key name
    #[error("stray '}}' at char {0}")]
    StrayBrace(usize),
}

/// Parse a script into events. Clicks are given in the widget's frame and
/// offset by `origin` (scene coordinates of the frame's top-left corner).
pub fn parse(script: &str, origin: (f32, f32)) -> Result<Vec<InputEvent>, ScriptError> {
    let mut events = Vec::new();
    let mut chars = script.chars().peekable();
    let mut pos = 0;

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                pos += 1;
                events.push(type_char('{'));
            }
            '{' => {
                let name = read_key_name(&mut chars, pos)?;
                pos += name.chars().count() + 1;
                events.push(key_event(&name, origin)?);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                pos += 1;
                events.push(type_char('}'));
            }
            '}' => return Err(ScriptError::StrayBrace(pos)),
            ch => events.push(type_char(ch)),
        }
        pos += 1;
    }

    Ok(events)
}

fn type_char(ch: char) -> InputEvent {
    InputEvent::KeyPress {
        ch,
        shift: ch.is_ascii_uppercase(),
    }
}

fn read_key_name(chars: &mut Peekable<Chars<'_>>, start: usize) -> Result<String, ScriptError> {
    let mut name = String::new();
    for ch in chars.by_ref() {
        if ch == '}' {
            return Ok(name);
        }
        name.push(ch);
    }
    Err(ScriptError::Unterminated(start))
}

fn key_event(name: &str, origin: (f32, f32)) -> Result<InputEvent, ScriptError> {
    let key = |code: KeyCode, shift: bool| -> Result<InputEvent, ScriptError> {
        Ok(InputEvent::KeyDown { code, shift })
    };

    match name.trim() {
        "left" => key(KeyCode::ArrowLeft, false),
        "right" => key(KeyCode::ArrowRight, false),
        "shift+left" => key(KeyCode::ArrowLeft, true),
        "shift+right" => key(KeyCode::ArrowRight, true),
        "backspace" | "bs" => key(KeyCode::Backspace, false),
        "delete" | "del" => key(KeyCode::Delete, false),
        "focus" => Ok(InputEvent::Focus(true)),
        "blur" => Ok(InputEvent::Focus(false)),
        other => match other.strip_prefix("click ") {
            Some(x) => {
                let x: f32 = x
                    .trim()
                    .parse()
                    .map_err(|_| ScriptError::BadPosition(x.to_string()))?;
                Ok(InputEvent::PointerDown {
                    x: origin.0 + x,
                    y: origin.1 + 1.0,
                })
            }
            None => Err(ScriptError::UnknownKey(other.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let events = parse("aB", (0.0, 0.0)).unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyPress { ch: 'a', shift: false },
                InputEvent::KeyPress { ch: 'B', shift: true },
            ]
        );
    }

    #[test]
    fn test_special_keys() {
        let events = parse("{shift+left}{bs}{focus}", (0.0, 0.0)).unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown { code: KeyCode::ArrowLeft, shift: true },
                InputEvent::KeyDown { code: KeyCode::Backspace, shift: false },
                InputEvent::Focus(true),
            ]
        );
    }

    #[test]
    fn test_click_is_offset_by_origin() {
        let events = parse("{click 12.5}", (100.0, 40.0)).unwrap();
        assert_eq!(events, vec![InputEvent::PointerDown { x: 112.5, y: 41.0 }]);
    }

    #[test]
    fn test_escaped_braces() {
        let events = parse("{{x}}", (0.0, 0.0)).unwrap();
        let typed: String = events
            .iter()
            .map(|event| match event {
                InputEvent::KeyPress { ch, .. } => *ch,
                _ => '?',
            })
            .collect();
        assert_eq!(typed, "{x}");
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("ab{left", (0.0, 0.0)), Err(ScriptError::Unterminated(2)));
        assert_eq!(
            parse("{home}", (0.0, 0.0)),
            Err(ScriptError::UnknownKey("home".into()))
        );
        assert_eq!(
            parse("{click far}", (0.0, 0.0)),
            Err(ScriptError::BadPosition("far".into()))
        );
        assert_eq!(parse("a}b", (0.0, 0.0)), Err(ScriptError::StrayBrace(1)));
    }
}
