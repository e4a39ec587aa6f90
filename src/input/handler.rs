use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction, Level};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => turn(Direction::Up),
            KeyCode::Down => turn(Direction::Down),
            KeyCode::Left => turn(Direction::Left),
            KeyCode::Right => turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => turn(Direction::Right),

            // Difficulty
            KeyCode::Char('1') => KeyAction::Command(Command::SelectLevel(Level::Easy)),
            KeyCode::Char('2') => KeyAction::Command(Command::SelectLevel(Level::Medium)),
            KeyCode::Char('3') => KeyAction::Command(Command::SelectLevel(Level::Hard)),

            // Controls
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::Command(Command::TogglePause)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Command(Command::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

fn turn(direction: Direction) -> KeyAction {
    KeyAction::Command(Command::Turn(direction))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &InputHandler, code: KeyCode) -> KeyAction {
        handler.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Up), turn(Direction::Up));
        assert_eq!(press(&handler, KeyCode::Down), turn(Direction::Down));
        assert_eq!(press(&handler, KeyCode::Left), turn(Direction::Left));
        assert_eq!(press(&handler, KeyCode::Right), turn(Direction::Right));
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('w')), turn(Direction::Up));
        assert_eq!(press(&handler, KeyCode::Char('a')), turn(Direction::Left));
        assert_eq!(press(&handler, KeyCode::Char('s')), turn(Direction::Down));
        assert_eq!(press(&handler, KeyCode::Char('d')), turn(Direction::Right));
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(w_upper), turn(Direction::Up));
    }

    #[test]
    fn test_level_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Char('1')),
            KeyAction::Command(Command::SelectLevel(Level::Easy))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('2')),
            KeyAction::Command(Command::SelectLevel(Level::Medium))
        );
        assert_eq!(
            press(&handler, KeyCode::Char('3')),
            KeyAction::Command(Command::SelectLevel(Level::Hard))
        );
    }

    #[test]
    fn test_pause_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Esc),
            KeyAction::Command(Command::TogglePause)
        );
        assert_eq!(
            press(&handler, KeyCode::Char('p')),
            KeyAction::Command(Command::TogglePause)
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('q')), KeyAction::Quit);

        let q_upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(handler.handle_key_event(q_upper), KeyAction::Quit);
    }

    #[test]
    fn test_restart_key() {
        let handler = InputHandler::new();

        assert_eq!(
            press(&handler, KeyCode::Char('r')),
            KeyAction::Command(Command::Restart)
        );
    }

    #[test]
    fn test_unknown_key() {
        let handler = InputHandler::new();

        assert_eq!(press(&handler, KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
