//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (latched, drained once per frame)
//! - The per-frame callback loop and its cancellation
//! - Handing snapshots to a JavaScript renderer

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::InputLatch;

