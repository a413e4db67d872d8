//! HTML canvas backend (2D context)

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Colors for game elements
pub mod colors {
    pub const FOREGROUND: &str = "#000";
}

/// Draws on a canvas sized to the field (one unit per pixel)
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_fill_style_str(colors::FOREGROUND);

        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx
            .clear_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.ctx.begin_path();
        if let Err(e) = self
            .ctx
            .arc(x as f64, y as f64, radius as f64, 0.0, TAU)
        {
            log::warn!("Ball draw failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }
}
