//! Terminal session for the native front end

use std::io::{self, Stdout, Write, stdout};

use crossterm::{
    cursor::{self, MoveTo},
    event::KeyCode,
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, disable_raw_mode, enable_raw_mode},
};

use crate::renderer::TextSurface;

/// Raw mode + alternate screen for as long as the guard lives
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        Ok(Self { out })
    }

    /// Draw the field inside a border, followed by status lines
    pub fn present(&mut self, surface: &TextSurface, status: &[String]) -> io::Result<()> {
        let border = format!("+{}+", "-".repeat(surface.cols()));
        let mut row: u16 = 0;

        queue!(self.out, MoveTo(0, row), Print(&border))?;
        for line in surface.lines() {
            row += 1;
            queue!(self.out, MoveTo(0, row), Print(format!("|{}|", line)))?;
        }
        row += 1;
        queue!(self.out, MoveTo(0, row), Print(&border))?;

        for line in status {
            row += 1;
            queue!(
                self.out,
                MoveTo(0, row),
                Print(line),
                Clear(ClearType::UntilNewLine)
            )?;
        }
        self.out.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, terminal::LeaveAlternateScreen, cursor::Show);
        let _ = disable_raw_mode();
    }
}

/// Translate a terminal key into the DOM key name used by `KeyMap`
pub fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Up => Some("ArrowUp".to_owned()),
        KeyCode::Down => Some("ArrowDown".to_owned()),
        KeyCode::Left => Some("ArrowLeft".to_owned()),
        KeyCode::Right => Some("ArrowRight".to_owned()),
        KeyCode::Enter => Some("Enter".to_owned()),
        KeyCode::Esc => Some("Escape".to_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Command, KeyMap};
    use crate::sim::{Direction, Player};

    #[test]
    fn test_key_names_feed_the_keymap() {
        let map = KeyMap::default();
        let lookup = |code| key_name(code).and_then(|name| map.command_for(&name));

        assert_eq!(
            lookup(KeyCode::Up),
            Some(Command::MovePaddle(Player::Player2, Direction::Up))
        );
        assert_eq!(
            lookup(KeyCode::Char('s')),
            Some(Command::MovePaddle(Player::Player1, Direction::Down))
        );
        assert_eq!(lookup(KeyCode::Enter), Some(Command::Start));
        assert_eq!(lookup(KeyCode::Char(' ')), Some(Command::Start));
        assert_eq!(lookup(KeyCode::Tab), None);
    }
}
