//! ByteCanvas - view the raw bytes of any file as an RGB image.
//!
//! Every three consecutive bytes become one pixel. The pixels are packed
//! row-major onto a zero-padded square canvas, uploaded once as a
//! nearest-filtered GPU texture and drawn across a fullscreen quad until
//! the window is closed or Escape is pressed.

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

pub mod app;
pub mod canvas;
pub mod error;
pub mod gpu;
pub mod source;
pub mod util;

pub use canvas::{pack, Canvas};
pub use error::{Result, ShaderStage, VizError};
pub use source::SourceBytes;
