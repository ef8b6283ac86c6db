//! Square RGB canvas built from raw file bytes.
//!
//! This module provides:
//! - `Canvas` - the zero-padded, row-major RGB buffer handed to the renderer
//! - `pack` - the byte packer that sizes and fills a canvas
//! - `canvas_dimension` - the side length policy used by the packer

mod buffer;
mod packer;

pub use buffer::Canvas;
pub use packer::{canvas_dimension, pack, BYTES_PER_PIXEL};
