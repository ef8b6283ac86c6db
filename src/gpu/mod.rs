//! GPU rendering of the packed canvas using wgpu.
//!
//! This module provides:
//! - Device, surface and pipeline management
//! - Canvas upload as a nearest-filtered texture
//! - A single fullscreen-quad draw per frame

mod quad;
mod renderer;

pub use quad::{QuadVertex, SCREEN_QUAD};
pub use renderer::Renderer;
