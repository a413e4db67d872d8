//! Game engine: the command surface over the simulation
//!
//! Front ends drive a [`GameEngine`] with three kinds of calls:
//! - `tick()` from a fixed-interval timer while the match is running
//! - `move_paddle()` (or `apply()`) from keyboard events between ticks
//! - `start()` / `stop()` / `restart()` from the control buttons
//!
//! After every tick they read a [`Snapshot`] to draw the frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::Command;
use crate::sim::{self, Direction, GameEvent, GameState, MatchPhase, Player, Rules, Winner};

/// Read-only view of everything needed to draw a frame and the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub left_paddle_x: f32,
    pub left_paddle_y: f32,
    pub right_paddle_x: f32,
    pub right_paddle_y: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball: Vec2,
    pub ball_radius: f32,
    pub player1_score: u32,
    pub player2_score: u32,
    pub rounds_played: u32,
    pub phase: MatchPhase,
}

impl Snapshot {
    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            MatchPhase::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    /// Label for the start button
    pub fn start_label(&self) -> &'static str {
        if self.is_running() { "Resume" } else { "Start" }
    }

    /// Score line for one player, e.g. `Player 1: 2`
    pub fn score_line(&self, player: Player) -> String {
        let score = match player {
            Player::Player1 => self.player1_score,
            Player::Player2 => self.player2_score,
        };
        format!("{}: {}", player.label(), score)
    }
}

/// Owns the game state and applies commands to it
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    state: GameState,
}

impl GameEngine {
    /// Create a stopped engine with default positions and zero scores
    pub fn new(rules: Rules) -> Self {
        Self {
            state: GameState::new(rules),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.match_state.is_running()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.match_state.is_game_over()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.state.match_state.winner()
    }

    /// Advance one step. Returns whether a step actually ran.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        sim::tick(&mut self.state);
        true
    }

    /// Move a paddle one step; always clamped, allowed in any phase
    pub fn move_paddle(&mut self, player: Player, direction: Direction) {
        let step = self.state.rules.paddle_step;
        let paddle = self.state.paddle_mut(player);
        paddle.step(direction, step);
        log::trace!("{} paddle {:?} -> y={}", player.label(), direction, paddle.y);
    }

    /// Settle a round outside the physics step. Ignored once the match is over.
    pub fn end_round(&mut self, winner: Player) {
        if self.is_game_over() {
            log::warn!("Ignoring round result for {}: match is over", winner.label());
            return;
        }
        sim::end_round(&mut self.state, winner);
    }

    /// Start or resume. A finished match is reset first.
    pub fn start(&mut self) {
        match self.state.match_state.phase {
            MatchPhase::Running => return,
            MatchPhase::GameOver(_) => {
                log::info!("Starting a new match");
                self.state.reset_match();
            }
            MatchPhase::Stopped => log::info!("Resuming"),
        }
        self.state.match_state.phase = MatchPhase::Running;
    }

    /// Pause. A finished match stays finished.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.state.match_state.phase = MatchPhase::Stopped;
            log::info!("Stopped");
        }
    }

    /// Throw away the current match and start a fresh one
    pub fn restart(&mut self) {
        self.state.reset_match();
        self.state.match_state.phase = MatchPhase::Running;
        log::info!("Restarted");
    }

    /// Dispatch an input or control command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MovePaddle(player, direction) => self.move_paddle(player, direction),
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Restart => self.restart(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            left_paddle_x: state.left.x(Player::Player1),
            left_paddle_y: state.left.y,
            right_paddle_x: state.right.x(Player::Player2),
            right_paddle_y: state.right.y,
            paddle_width: state.left.width,
            paddle_height: state.left.height,
            ball: state.ball.pos,
            ball_radius: state.ball.radius,
            player1_score: state.match_state.player1_score,
            player2_score: state.match_state.player2_score,
            rounds_played: state.match_state.rounds_played,
            phase: state.match_state.phase,
        }
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }
}
