//! Key mapping from terminal events to engine commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a command.
///
/// Arrow keys, vim (`h j k l`) and WASD all steer; up/`k`/`w` rotates.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Command::MoveDown),

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Command::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('c' | 'C') => Some(Command::Hold),
        KeyCode::Char('p' | 'P') | KeyCode::Esc => Some(Command::Pause),
        KeyCode::Char('m' | 'M') => Some(Command::ToggleMute),

        // Start / restart
        KeyCode::Enter | KeyCode::Char('r' | 'R') => Some(Command::Start),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<Command> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(key(KeyCode::Down), Some(Command::MoveDown));

        assert_eq!(key(KeyCode::Char('H')), Some(Command::MoveLeft));
        assert_eq!(key(KeyCode::Char('l')), Some(Command::MoveRight));
        assert_eq!(key(KeyCode::Char('j')), Some(Command::MoveDown));
        assert_eq!(key(KeyCode::Char('a')), Some(Command::MoveLeft));
        assert_eq!(key(KeyCode::Char('D')), Some(Command::MoveRight));
        assert_eq!(key(KeyCode::Char('s')), Some(Command::MoveDown));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key(KeyCode::Up), Some(Command::Rotate));
        assert_eq!(key(KeyCode::Char('k')), Some(Command::Rotate));
        assert_eq!(key(KeyCode::Char('W')), Some(Command::Rotate));
        // Single rotation direction only.
        assert_eq!(key(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(key(KeyCode::Char('c')), Some(Command::Hold));
        assert_eq!(key(KeyCode::Char('p')), Some(Command::Pause));
        assert_eq!(key(KeyCode::Esc), Some(Command::Pause));
        assert_eq!(key(KeyCode::Char('m')), Some(Command::ToggleMute));
        assert_eq!(key(KeyCode::Enter), Some(Command::Start));
        assert_eq!(key(KeyCode::Char('r')), Some(Command::Start));
    }

    #[test]
    fn test_ctrl_c_is_not_hold() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), None);
        assert!(should_quit(ctrl_c));
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
