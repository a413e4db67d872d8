//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Integer-valued positions and velocities (exact in f32)
//! - No rendering, timer or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{BallStep, StepKind, classify_step};
pub use state::{
    Ball, Direction, GameEvent, GameState, MatchPhase, MatchState, Paddle, Player, Rules, Winner,
};
pub use tick::{end_round, tick};
