// input.rs - Maps key presses to simulation commands

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    ToggleHelp,
    Reload,
    Restart,
    Quit,
}

impl Command {
    /// Unrecognised keys map to `None` and are ignored.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
            KeyCode::Char(' ')             => Some(Command::TogglePause),
            KeyCode::Char('h' | 'H' | '?') => Some(Command::ToggleHelp),
            KeyCode::Char('l' | 'L')       => Some(Command::Reload),
            KeyCode::Char('r' | 'R')       => Some(Command::Restart),
            KeyCode::Char('q' | 'Q')       => Some(Command::Quit),
            _ => None,
        }
    }
}
