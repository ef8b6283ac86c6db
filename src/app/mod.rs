//! Application state and event loop for the viewer.
//!
//! This module contains:
//! - `Viewer` - window, renderer and loop state
//! - `LoopState` / `Signal` - the Running -> Stopped state machine
//! - `KeyState` - key sampling between frames
//! - `run` - the winit entry point

mod event_loop;
mod state;
mod types;

pub use event_loop::run;
pub use state::Viewer;
pub use types::{FrameInput, KeyState, LoopState, Signal, ViewerConfig, WindowSettings};
