//! Key bindings: terminal key events to scene commands.

use affine3d_core::Axis;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Translate(Axis, Direction),
    Rotate(Axis, Direction),
    Scale(Direction),
    /// One step around the rotation axis.
    Nudge(Direction),
    SelectAxis(Axis),
    ToggleSpin,
    Reverse,
    Speed(Direction),
    ClearAxis,
    ToggleProjection,
    Reset,
    /// Enter the rotation axis as two typed points.
    PromptAxis,
}

/// Maps a key press to a command, if it is bound.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    use Direction::{Negative, Positive};

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Esc => Command::Quit,

        KeyCode::Up => Command::Rotate(Axis::X, Positive),
        KeyCode::Down => Command::Rotate(Axis::X, Negative),
        KeyCode::Left => Command::Rotate(Axis::Y, Positive),
        KeyCode::Right => Command::Rotate(Axis::Y, Negative),
        KeyCode::PageUp => Command::Rotate(Axis::Z, Positive),
        KeyCode::PageDown => Command::Rotate(Axis::Z, Negative),

        // Shift+F, checked before letters are folded to lowercase
        KeyCode::Char('F') => Command::PromptAxis,

        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Translate(Axis::Y, Positive),
            's' => Command::Translate(Axis::Y, Negative),
            'a' => Command::Translate(Axis::X, Negative),
            'd' => Command::Translate(Axis::X, Positive),
            'q' => Command::Translate(Axis::Z, Positive),
            'e' => Command::Translate(Axis::Z, Negative),

            '+' | '=' => Command::Scale(Positive),
            '-' | '_' => Command::Scale(Negative),

            '.' => Command::Nudge(Positive),
            ',' => Command::Nudge(Negative),

            'x' => Command::SelectAxis(Axis::X),
            'y' => Command::SelectAxis(Axis::Y),
            'z' => Command::SelectAxis(Axis::Z),
            ' ' => Command::ToggleSpin,
            'v' => Command::Reverse,
            ']' => Command::Speed(Positive),
            '[' => Command::Speed(Negative),
            'c' => Command::ClearAxis,

            'p' => Command::ToggleProjection,
            'r' => Command::Reset,
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_translation_keys() {
        assert_eq!(
            command_for_key(key(KeyCode::Char('w'))),
            Some(Command::Translate(Axis::Y, Direction::Positive))
        );
        assert_eq!(
            command_for_key(key(KeyCode::Char('A'))),
            Some(Command::Translate(Axis::X, Direction::Negative))
        );
        assert_eq!(
            command_for_key(key(KeyCode::Char('e'))),
            Some(Command::Translate(Axis::Z, Direction::Negative))
        );
    }

    #[test]
    fn test_axis_keys_select_and_prompt() {
        assert_eq!(
            command_for_key(key(KeyCode::Char('z'))),
            Some(Command::SelectAxis(Axis::Z))
        );
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('F'), KeyModifiers::SHIFT)),
            Some(Command::PromptAxis)
        );
        // lowercase f is unbound
        assert_eq!(command_for_key(key(KeyCode::Char('f'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(command_for_key(key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        // plain c clears the axis instead
        assert_eq!(
            command_for_key(key(KeyCode::Char('c'))),
            Some(Command::ClearAxis)
        );
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(command_for_key(key(KeyCode::Char('k'))), None);
        assert_eq!(command_for_key(key(KeyCode::Tab)), None);
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Positive.sign(), 1.0);
        assert_eq!(Direction::Negative.sign(), -1.0);
    }
}
