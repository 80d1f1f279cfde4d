//! Canvas 2D rendering
//!
//! Presentation only: the renderer reads simulation state and emits draw
//! calls; it never mutates the sim.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
