//! Game state and core simulation types
//!
//! Everything the renderer, HUD and tick need lives in [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One of the two human players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Left paddle
    Player1,
    /// Right paddle
    Player2,
}

impl Player {
    pub fn label(&self) -> &'static str {
        match self {
            Player::Player1 => "Player 1",
            Player::Player2 => "Player 2",
        }
    }
}

/// Paddle travel direction for one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Sign applied to the paddle step (screen y grows downward)
    fn sign(&self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
        }
    }
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Player1,
    Player2,
    Tie,
}

impl Winner {
    /// Decide the winner from final scores
    pub fn from_scores(player1_score: u32, player2_score: u32) -> Self {
        use std::cmp::Ordering;
        match player1_score.cmp(&player2_score) {
            Ordering::Greater => Winner::Player1,
            Ordering::Less => Winner::Player2,
            Ordering::Equal => Winner::Tie,
        }
    }

    /// Text shown on the game-over panel
    pub fn banner(&self) -> &'static str {
        match self {
            Winner::Player1 => "Player 1 Wins!",
            Winner::Player2 => "Player 2 Wins!",
            Winner::Tie => "It's a Tie!",
        }
    }
}

impl From<Player> for Winner {
    fn from(player: Player) -> Self {
        match player {
            Player::Player1 => Winner::Player1,
            Player::Player2 => Winner::Player2,
        }
    }
}

/// Current phase of the match.
///
/// Folding `running`, `game over` and `winner` into one enum makes a running
/// game-over state impossible to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Not ticking (fresh session or after Stop)
    #[default]
    Stopped,
    /// Ticking on the fixed interval
    Running,
    /// Match finished; only a (re)start leaves this phase
    GameOver(Winner),
}

/// Tunable match rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Rounds played before the match ends
    pub rounds_per_match: u32,
    /// Distance a paddle moves per key press
    pub paddle_step: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            rounds_per_match: ROUNDS_PER_MATCH,
            paddle_step: PADDLE_STEP,
        }
    }
}

/// A player's paddle. Horizontal position is fixed by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            y: PADDLE_START_Y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }
}

impl Paddle {
    /// Lowest allowed top edge
    pub fn max_y(&self) -> f32 {
        FIELD_HEIGHT - self.height
    }

    /// Move one step in `direction`, clamped to the field
    pub fn step(&mut self, direction: Direction, amount: f32) {
        self.y = (self.y + direction.sign() * amount).clamp(0.0, self.max_y());
    }

    /// Whether `y` lies strictly inside the paddle's vertical span
    pub fn spans(&self, y: f32) -> bool {
        y > self.y && y < self.y + self.height
    }

    /// Left edge of the paddle for the given side
    pub fn x(&self, side: Player) -> f32 {
        match side {
            Player::Player1 => 0.0,
            Player::Player2 => FIELD_WIDTH - self.width,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::new(BALL_START_VX, BALL_START_VY),
            radius: BALL_RADIUS,
        }
    }
}

/// Scores and phase of the current match
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchState {
    pub player1_score: u32,
    pub player2_score: u32,
    pub rounds_played: u32,
    pub phase: MatchPhase,
}

impl MatchState {
    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, MatchPhase::GameOver(_))
    }

    /// Winner of a finished match, `None` while the match is undecided
    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            MatchPhase::GameOver(winner) => Some(winner),
            _ => None,
        }
    }

    /// Credit one round to `player`
    pub fn award(&mut self, player: Player) {
        match player {
            Player::Player1 => self.player1_score += 1,
            Player::Player2 => self.player2_score += 1,
        }
    }
}

/// Something that happened during a tick (for HUD and logging only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball reached the top or bottom wall; vertical velocity flips next tick
    WallBounce,
    /// Ball touched a paddle; horizontal velocity flipped
    PaddleHit(Player),
    /// A round ended
    RoundWon {
        winner: Player,
        player1_score: u32,
        player2_score: u32,
    },
    /// The final round ended
    MatchOver(Winner),
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Player 1 paddle
    pub left: Paddle,
    /// Player 2 paddle
    pub right: Paddle,
    pub ball: Ball,
    pub match_state: MatchState,
    pub rules: Rules,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

impl GameState {
    /// Create a fresh, stopped game with default positions
    pub fn new(rules: Rules) -> Self {
        Self {
            left: Paddle::default(),
            right: Paddle::default(),
            ball: Ball::default(),
            match_state: MatchState::default(),
            rules,
            events: Vec::new(),
        }
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::Player1 => &self.left,
            Player::Player2 => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        match player {
            Player::Player1 => &mut self.left,
            Player::Player2 => &mut self.right,
        }
    }

    /// Put ball and paddles back to their serve positions; scores untouched
    pub fn reset_positions(&mut self) {
        self.left = Paddle::default();
        self.right = Paddle::default();
        self.ball = Ball::default();
    }

    /// Clear scores, rounds and winner and reset positions. Leaves the match stopped.
    pub fn reset_match(&mut self) {
        self.match_state = MatchState::default();
        self.reset_positions();
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
