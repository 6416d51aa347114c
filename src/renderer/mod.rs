//! Rendering module
//!
//! The simulation draws through the `DrawSink` trait: clear the surface, then
//! one filled circle per hero and per spell. The browser build fills a 2D
//! canvas; headless runs record the calls.

pub mod sink;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;
pub use sink::{DrawCall, DrawSink, RecordingSink};
