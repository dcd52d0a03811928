//! # Key Mapping
//!
//! Translates typed keys into [`Action`]s.
//!
//! Two tables, mirroring a keypad page:
//! ```text
//! ┌───────────────────────────────┐      ┌────────────────────────────────┐
//! │  BUTTON_LAYOUT (always on)    │      │  KEYBOARD_MAPPINGS (optional)  │
//! │                               │      │                                │
//! │   C    DEL   %    ÷           │      │  *  x        ──► ×             │
//! │   7    8     9    ×           │      │  /           ──► ÷             │
//! │   4    5     6    −           │      │  -           ──► −             │
//! │   1    2     3    +           │      │  enter       ──► =             │
//! │   0          .    =           │      │  backspace   ──► DEL           │
//! │                               │      │  escape  c   ──► C             │
//! └───────────────────────────────┘      └────────────────────────────────┘
//! ```
//!
//! A line is split on whitespace. A token that names a key is one action;
//! any other token is read one character at a time, so `12+3=` works.

use pocketcalc_core::Operator;

use crate::commands::Action;
use crate::error::{AppError, AppResult};

/// Keypad button labels, row by row.
pub const BUTTON_LAYOUT: [[(&str, Action); 4]; 5] = [
    [
        ("C", Action::Clear),
        ("DEL", Action::Delete),
        ("%", Action::Percent),
        ("÷", Action::Operator(Operator::Divide)),
    ],
    [
        ("7", Action::Number('7')),
        ("8", Action::Number('8')),
        ("9", Action::Number('9')),
        ("×", Action::Operator(Operator::Multiply)),
    ],
    [
        ("4", Action::Number('4')),
        ("5", Action::Number('5')),
        ("6", Action::Number('6')),
        ("−", Action::Operator(Operator::Subtract)),
    ],
    [
        ("1", Action::Number('1')),
        ("2", Action::Number('2')),
        ("3", Action::Number('3')),
        ("+", Action::Operator(Operator::Add)),
    ],
    [
        ("0", Action::Number('0')),
        (".", Action::Number('.')),
        ("=", Action::Equals),
        ("AC", Action::Clear),
    ],
];

/// Keyboard shortcuts. Matched case-insensitively.
pub const KEYBOARD_MAPPINGS: [(&str, Action); 12] = [
    ("*", Action::Operator(Operator::Multiply)),
    ("x", Action::Operator(Operator::Multiply)),
    ("/", Action::Operator(Operator::Divide)),
    ("-", Action::Operator(Operator::Subtract)),
    ("enter", Action::Equals),
    ("backspace", Action::Delete),
    ("delete", Action::Delete),
    ("del", Action::Delete),
    ("escape", Action::Clear),
    ("esc", Action::Clear),
    ("clear", Action::Clear),
    ("c", Action::Clear),
];

/// Looks up a single key.
///
/// Button labels always match exactly; keyboard shortcuts only when
/// `keyboard_support` is on.
pub fn parse_key(key: &str, keyboard_support: bool) -> Option<Action> {
    let button = BUTTON_LAYOUT
        .iter()
        .flatten()
        .find(|(label, _)| *label == key)
        .map(|(_, action)| *action);

    if button.is_some() || !keyboard_support {
        return button;
    }

    KEYBOARD_MAPPINGS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, action)| *action)
}

/// Parses a whole input line into actions.
///
/// The whole line is rejected on the first unknown key, so a typo never
/// leaves the engine half-updated.
pub fn parse_line(line: &str, keyboard_support: bool) -> AppResult<Vec<Action>> {
    let mut actions = Vec::new();

    for token in line.split_whitespace() {
        if let Some(action) = parse_key(token, keyboard_support) {
            actions.push(action);
            continue;
        }

        for c in token.chars() {
            let mut buf = [0u8; 4];
            let key: &str = c.encode_utf8(&mut buf);
            let action = parse_key(key, keyboard_support)
                .ok_or_else(|| AppError::UnknownKey(key.to_string()))?;
            actions.push(action);
        }
    }

    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_button_label_parses() {
        for (label, action) in BUTTON_LAYOUT.iter().flatten() {
            assert_eq!(parse_key(label, false), Some(*action), "label {label}");
        }
    }

    #[test]
    fn test_keyboard_shortcuts() {
        assert_eq!(parse_key("*", true), Some(Action::Operator(Operator::Multiply)));
        assert_eq!(parse_key("Enter", true), Some(Action::Equals));
        assert_eq!(parse_key("BACKSPACE", true), Some(Action::Delete));
        assert_eq!(parse_key("Escape", true), Some(Action::Clear));
        assert_eq!(parse_key("c", true), Some(Action::Clear));
    }

    #[test]
    fn test_keyboard_shortcuts_disabled() {
        assert_eq!(parse_key("*", false), None);
        assert_eq!(parse_key("enter", false), None);
        assert_eq!(parse_key("×", false), Some(Action::Operator(Operator::Multiply)));
    }

    #[test]
    fn test_parse_line_splits_characters() {
        let actions = parse_line("12+3 enter", true).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Number('1'),
                Action::Number('2'),
                Action::Operator(Operator::Add),
                Action::Number('3'),
                Action::Equals,
            ]
        );
    }

    #[test]
    fn test_parse_line_named_and_label_tokens() {
        let actions = parse_line("DEL AC backspace", true).unwrap();
        assert_eq!(actions, vec![Action::Delete, Action::Clear, Action::Delete]);
    }

    #[test]
    fn test_parse_line_unknown_key() {
        let err = parse_line("12+q", true).unwrap_err();
        assert!(matches!(err, AppError::UnknownKey(ref key) if key == "q"));

        // '*' is a shortcut, not a button
        assert!(parse_line("2*3", false).is_err());
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(parse_line("   ", true).unwrap().is_empty());
    }
}
