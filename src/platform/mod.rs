//! Platform abstraction layer
//!
//! Scoped resources tied to the session lifetime:
//! - `web`: interval timer and DOM event listener guards (wasm32)
//! - `terminal`: raw-mode terminal guard and key translation (native)

#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;
#[cfg(target_arch = "wasm32")]
pub mod web;
