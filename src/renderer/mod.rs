//! Rendering module
//!
//! The simulation is drawn through three primitives only (clear, filled
//! rectangle, filled circle). Backends implement [`Surface`]:
//! - `CanvasSurface` draws on an HTML canvas (wasm32)
//! - [`TextSurface`] rasterises the field into a character grid (terminal)

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod text;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use text::TextSurface;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::engine::Snapshot;

/// Minimal drawing capability, in field coordinates
pub trait Surface {
    /// Clear a rectangular region
    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Fill a rectangle given its top-left corner
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Fill a circle given its center
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32);
}

/// Draw one frame from a snapshot. Never touches game state.
pub fn draw_frame<S: Surface + ?Sized>(snapshot: &Snapshot, surface: &mut S) {
    surface.clear(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT);
    surface.fill_rect(
        snapshot.left_paddle_x,
        snapshot.left_paddle_y,
        snapshot.paddle_width,
        snapshot.paddle_height,
    );
    surface.fill_rect(
        snapshot.right_paddle_x,
        snapshot.right_paddle_y,
        snapshot.paddle_width,
        snapshot.paddle_height,
    );
    surface.fill_circle(snapshot.ball.x, snapshot.ball.y, snapshot.ball_radius);
}
