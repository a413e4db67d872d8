//! Keyboard input mapping
//!
//! Front ends translate their native key events into DOM-style key names
//! (`"w"`, `"ArrowUp"`, `"Enter"`, `" "`) and look them up in a [`KeyMap`].

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, Player};

/// Abstract action delivered to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MovePaddle(Player, Direction),
    Start,
    Stop,
    Restart,
}

/// Key names bound to each command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMap {
    pub player1_up: Vec<String>,
    pub player1_down: Vec<String>,
    pub player2_up: Vec<String>,
    pub player2_down: Vec<String>,
    pub start: Vec<String>,
    pub stop: Vec<String>,
    pub restart: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            player1_up: keys(&["w"]),
            player1_down: keys(&["s"]),
            player2_up: keys(&["ArrowUp"]),
            player2_down: keys(&["ArrowDown"]),
            start: keys(&["Enter", " "]),
            stop: keys(&["p"]),
            restart: keys(&["r"]),
        }
    }
}

/// Single characters match regardless of case; named keys match exactly
fn key_matches(bound: &str, pressed: &str) -> bool {
    if bound.chars().count() == 1 {
        bound.eq_ignore_ascii_case(pressed)
    } else {
        bound == pressed
    }
}

impl KeyMap {
    /// Resolve a pressed key to a command
    pub fn command_for(&self, key: &str) -> Option<Command> {
        let bindings: [(&Vec<String>, Command); 7] = [
            (
                &self.player1_up,
                Command::MovePaddle(Player::Player1, Direction::Up),
            ),
            (
                &self.player1_down,
                Command::MovePaddle(Player::Player1, Direction::Down),
            ),
            (
                &self.player2_up,
                Command::MovePaddle(Player::Player2, Direction::Up),
            ),
            (
                &self.player2_down,
                Command::MovePaddle(Player::Player2, Direction::Down),
            ),
            (&self.start, Command::Start),
            (&self.stop, Command::Stop),
            (&self.restart, Command::Restart),
        ];

        bindings
            .into_iter()
            .find(|(names, _)| names.iter().any(|name| key_matches(name, key)))
            .map(|(_, command)| command)
    }
}
