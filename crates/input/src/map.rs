//! Key mapping from terminal events to wire keys for two players sharing one keyboard.
//!
//! | | Player 1 | Player 2 |
//! |-|----------|----------|
//! | left / right | `A` / `D` | `←` / `→` |
//! | rotate cw / ccw | `W` / `Q` | `↑` / `,` |
//! | soft drop | `S` | `↓` |
//! | hard drop | `Space` | `/` |
//! | hold | `C` | `.` |
//! | ready | `Tab` | `Enter` |
//!
//! Digits `1`-`5` toggle match mods and are sent as player 1.

use crate::types::{Key, PlayerId};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key to the player and wire key it stands for.
pub fn key_binding(code: KeyCode) -> Option<(PlayerId, Key)> {
    use PlayerId::{One, Two};

    let binding = match code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => (One, Key::Left),
            'd' => (One, Key::Right),
            'w' => (One, Key::RotateCw),
            'q' => (One, Key::RotateCcw),
            's' => (One, Key::SoftDrop),
            ' ' => (One, Key::HardDrop),
            'c' => (One, Key::Hold),
            ',' => (Two, Key::RotateCcw),
            '/' => (Two, Key::HardDrop),
            '.' => (Two, Key::Hold),
            '1' => (One, Key::ToggleDisableHold),
            '2' => (One, Key::ToggleFastGravity),
            '3' => (One, Key::ToggleMessyGarbage),
            '4' => (One, Key::ToggleDisableGarbage),
            '5' => (One, Key::ToggleSinglePlayer),
            _ => return None,
        },
        KeyCode::Tab => (One, Key::Ready),
        KeyCode::Left => (Two, Key::Left),
        KeyCode::Right => (Two, Key::Right),
        KeyCode::Up => (Two, Key::RotateCw),
        KeyCode::Down => (Two, Key::SoftDrop),
        KeyCode::Enter => (Two, Key::Ready),
        _ => return None,
    };
    Some(binding)
}

/// Check if key should quit the simulator.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_one_keys() {
        assert_eq!(key_binding(KeyCode::Char('a')), Some((PlayerId::One, Key::Left)));
        assert_eq!(key_binding(KeyCode::Char('D')), Some((PlayerId::One, Key::Right)));
        assert_eq!(key_binding(KeyCode::Char(' ')), Some((PlayerId::One, Key::HardDrop)));
        assert_eq!(key_binding(KeyCode::Tab), Some((PlayerId::One, Key::Ready)));
    }

    #[test]
    fn test_player_two_keys() {
        assert_eq!(key_binding(KeyCode::Left), Some((PlayerId::Two, Key::Left)));
        assert_eq!(key_binding(KeyCode::Up), Some((PlayerId::Two, Key::RotateCw)));
        assert_eq!(key_binding(KeyCode::Char('.')), Some((PlayerId::Two, Key::Hold)));
        assert_eq!(key_binding(KeyCode::Enter), Some((PlayerId::Two, Key::Ready)));
    }

    #[test]
    fn test_mod_digits() {
        assert_eq!(
            key_binding(KeyCode::Char('5')),
            Some((PlayerId::One, Key::ToggleSinglePlayer))
        );
        assert_eq!(key_binding(KeyCode::Char('6')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
