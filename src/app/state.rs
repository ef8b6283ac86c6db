//! Viewer state owned by the event loop.

use std::sync::Arc;

use winit::window::Window;

use super::types::{KeyState, LoopState, Signal, ViewerConfig};
use crate::canvas::{pack, Canvas};
use crate::error::{Result, VizError};
use crate::gpu::Renderer;
use crate::source::SourceBytes;

/// Main viewer state.
pub struct Viewer {
    pub config: ViewerConfig,
    /// Canvas waiting for the renderer to exist.
    pub pending_canvas: Option<Canvas>,
    pub window: Option<Arc<Window>>,
    pub renderer: Option<Renderer>,
    pub state: LoopState,
    pub keys: KeyState,
    /// First fatal error, reported once the loop has exited.
    pub error: Option<VizError>,
}

impl Viewer {
    pub fn new(config: ViewerConfig, canvas: Canvas) -> Self {
        Self {
            config,
            pending_canvas: Some(canvas),
            window: None,
            renderer: None,
            state: LoopState::default(),
            keys: KeyState::default(),
            error: None,
        }
    }

    pub fn signal(&mut self, signal: Signal) {
        if self.state.is_running() {
            tracing::info!(?signal, "stopping");
        }
        self.state = self.state.on_signal(signal);
    }

    /// Record a fatal error and stop. Only the first error is kept.
    pub fn fail(&mut self, error: VizError) {
        tracing::debug!("fatal: {error}");
        self.error.get_or_insert(error);
        self.state = LoopState::Stopped;
    }

    /// Bring up the renderer for `window` and upload the pending canvas.
    pub fn attach(&mut self, window: Arc<Window>) -> Result<()> {
        let mut renderer = Renderer::new(Arc::clone(&window))?;
        renderer.initialize()?;
        if let Some(canvas) = self.pending_canvas.take() {
            renderer.upload(canvas)?;
        }
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Re-read the source file and replace the texture.
    ///
    /// Failures keep the current texture on screen.
    pub fn reload(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let result = SourceBytes::load(&self.config.path)
            .and_then(|source| renderer.upload(pack(source.as_bytes())));
        match result {
            Ok(()) => tracing::info!(path = %self.config.path.display(), "reloaded"),
            Err(e) => tracing::warn!("reload failed, keeping current canvas: {e}"),
        }
    }

    /// Release GPU resources before the window goes away.
    pub fn shutdown(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.shutdown();
        }
        self.window = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn viewer() -> Viewer {
        Viewer::new(ViewerConfig::new(PathBuf::from("data.bin")), pack(b"abc"))
    }

    #[test]
    fn test_signal_stops_viewer() {
        let mut viewer = viewer();
        assert!(viewer.state.is_running());
        viewer.signal(Signal::EscapePressed);
        assert_eq!(viewer.state, LoopState::Stopped);
    }

    #[test]
    fn test_first_error_is_kept() {
        let mut viewer = viewer();
        viewer.fail(VizError::Init("no adapter".into()));
        viewer.fail(VizError::Link { log: "late".into() });
        assert!(matches!(viewer.error, Some(VizError::Init(_))));
        assert_eq!(viewer.state, LoopState::Stopped);
    }

    #[test]
    fn test_reload_without_renderer_is_noop() {
        let mut viewer = viewer();
        viewer.reload();
        assert!(viewer.renderer.is_none());
        assert!(viewer.pending_canvas.is_some());
    }
}
