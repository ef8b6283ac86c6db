//! Core types for the viewer event loop.

use std::path::PathBuf;

use winit::keyboard::KeyCode;

// =============================================================================
// Window Settings
// =============================================================================

/// Fixed window parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSettings {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "ByteCanvas",
            width: 1024,
            height: 768,
        }
    }
}

/// Everything the viewer needs besides the initial canvas.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// File re-read on an explicit reload.
    pub path: PathBuf,
    pub window: WindowSettings,
}

impl ViewerConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            window: WindowSettings::default(),
        }
    }
}

// =============================================================================
// Loop State
// =============================================================================

/// Run state of the event loop. `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Running,
    Stopped,
}

/// Observations that end the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// The window system asked to close.
    QuitRequested,
    /// Escape was held when key state was sampled.
    EscapePressed,
}

impl LoopState {
    pub fn on_signal(self, signal: Signal) -> Self {
        match signal {
            Signal::QuitRequested | Signal::EscapePressed => Self::Stopped,
        }
    }

    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

// =============================================================================
// Key State
// =============================================================================

/// What a key-state sample asks the loop to do this iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub quit: bool,
    pub reload: bool,
}

/// Keyboard state accumulated from window events between samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyState {
    escape_held: bool,
    reload_pending: bool,
}

impl KeyState {
    pub const QUIT_KEY: KeyCode = KeyCode::Escape;
    pub const RELOAD_KEY: KeyCode = KeyCode::KeyR;

    /// Record a key transition.
    pub fn on_key(&mut self, code: KeyCode, pressed: bool, repeat: bool) {
        match code {
            Self::QUIT_KEY => self.escape_held = pressed,
            Self::RELOAD_KEY if pressed && !repeat => self.reload_pending = true,
            _ => {}
        }
    }

    /// Sample the current state. A pending reload is consumed; a held escape
    /// is reported on every sample until released.
    pub fn sample(&mut self) -> FrameInput {
        FrameInput {
            quit: self.escape_held,
            reload: std::mem::take(&mut self.reload_pending),
        }
    }
}
