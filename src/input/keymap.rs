//! # Key Mapping
//!
//! Translation between physical key codes and the logical characters handed
//! to behaviors. Letters map to lowercase, arrows to arrow glyphs.

use crate::{StageError, StageResult};
use macroquad::prelude::KeyCode;

const KEY_TABLE: &[(KeyCode, char)] = &[
    (KeyCode::A, 'a'),
    (KeyCode::B, 'b'),
    (KeyCode::C, 'c'),
    (KeyCode::D, 'd'),
    (KeyCode::E, 'e'),
    (KeyCode::F, 'f'),
    (KeyCode::G, 'g'),
    (KeyCode::H, 'h'),
    (KeyCode::I, 'i'),
    (KeyCode::J, 'j'),
    (KeyCode::K, 'k'),
    (KeyCode::L, 'l'),
    (KeyCode::M, 'm'),
    (KeyCode::N, 'n'),
    (KeyCode::O, 'o'),
    (KeyCode::P, 'p'),
    (KeyCode::Q, 'q'),
    (KeyCode::R, 'r'),
    (KeyCode::S, 's'),
    (KeyCode::T, 't'),
    (KeyCode::U, 'u'),
    (KeyCode::V, 'v'),
    (KeyCode::W, 'w'),
    (KeyCode::X, 'x'),
    (KeyCode::Y, 'y'),
    (KeyCode::Z, 'z'),
    (KeyCode::Key0, '0'),
    (KeyCode::Key1, '1'),
    (KeyCode::Key2, '2'),
    (KeyCode::Key3, '3'),
    (KeyCode::Key4, '4'),
    (KeyCode::Key5, '5'),
    (KeyCode::Key6, '6'),
    (KeyCode::Key7, '7'),
    (KeyCode::Key8, '8'),
    (KeyCode::Key9, '9'),
    (KeyCode::Space, ' '),
    (KeyCode::Enter, '\n'),
    (KeyCode::Up, '↑'),
    (KeyCode::Down, '↓'),
    (KeyCode::Left, '←'),
    (KeyCode::Right, '→'),
];

/// Logical character for a key, if the key is recognized.
///
/// # Examples
///
/// ```
/// use macroquad::prelude::KeyCode;
/// use stagehand::key_to_char;
///
/// assert_eq!(key_to_char(KeyCode::A), Some('a'));
/// assert_eq!(key_to_char(KeyCode::F5), None);
/// ```
pub fn key_to_char(code: KeyCode) -> Option<char> {
    KEY_TABLE
        .iter()
        .find(|(key, _)| *key == code)
        .map(|&(_, ch)| ch)
}

/// Physical key for a logical character. Uppercase letters resolve to the
/// same key as lowercase.
pub fn char_to_key(ch: char) -> StageResult<KeyCode> {
    let wanted = ch.to_ascii_lowercase();
    KEY_TABLE
        .iter()
        .find(|(_, c)| *c == wanted)
        .map(|&(key, _)| key)
        .ok_or(StageError::UnknownKey(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_round_trips() {
        for &(key, ch) in KEY_TABLE {
            assert_eq!(key_to_char(key), Some(ch));
            assert_eq!(char_to_key(ch).unwrap(), key);
        }
    }

    #[test]
    fn test_uppercase_resolves() {
        assert_eq!(char_to_key('Q').unwrap(), KeyCode::Q);
    }

    #[test]
    fn test_unknown_key_is_named() {
        match char_to_key('%') {
            Err(StageError::UnknownKey(ch)) => assert_eq!(ch, '%'),
            other => panic!("unexpected result: {:?}", other),
        }
        let message = char_to_key('%').unwrap_err().to_string();
        assert!(message.contains('%'));
    }

    #[test]
    fn test_escape_is_not_a_character() {
        assert_eq!(key_to_char(KeyCode::Escape), None);
    }
}
