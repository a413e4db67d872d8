//! Ping Pong - a two-player, best-of-three paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics step, collisions, round accounting)
//! - `engine`: Command surface driving the simulation (start/stop/restart/input)
//! - `clock`: Fixed-interval tick scheduling bound to the running flag
//! - `input`: Key name to command mapping
//! - `renderer`: Drawing surface contract and its canvas/terminal backends
//! - `settings`: Tunables loaded from LocalStorage (web) or a JSON file (native)
//! - `platform`: Scoped browser/terminal resources

pub mod clock;
pub mod engine;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::TickClock;
pub use engine::{GameEngine, Snapshot};
pub use input::{Command, KeyMap};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playing field dimensions (one unit = one canvas pixel)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 400.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Starting top edge for both paddles
    pub const PADDLE_START_Y: f32 = 200.0;
    /// Distance a paddle travels per key press
    pub const PADDLE_STEP: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_X: f32 = 300.0;
    pub const BALL_START_Y: f32 = 200.0;
    /// Serve velocity in field units per tick
    pub const BALL_START_VX: f32 = 5.0;
    pub const BALL_START_VY: f32 = 5.0;

    /// Fixed simulation interval in milliseconds
    pub const TICK_INTERVAL_MS: u32 = 30;
    /// Maximum ticks a single clock advance may run (prevents spiral of death)
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Rounds in a match
    pub const ROUNDS_PER_MATCH: u32 = 3;
}
