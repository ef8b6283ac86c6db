//! winit event loop driving the viewer.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use super::state::Viewer;
use super::types::{Signal, ViewerConfig};
use crate::canvas::Canvas;
use crate::error::{Result, VizError};

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }

        let settings = &self.config.window;
        let attributes = Window::default_attributes()
            .with_title(settings.title)
            .with_inner_size(LogicalSize::new(settings.width, settings.height))
            .with_resizable(false);

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(VizError::Init(format!("window creation failed: {e}")));
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.attach(Arc::clone(&window)) {
            self.fail(e);
            event_loop.exit();
            return;
        }
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.signal(Signal::QuitRequested),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.keys
                        .on_key(code, event.state == ElementState::Pressed, event.repeat);
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if self.state.is_running() {
                    if let Some(renderer) = self.renderer.as_mut() {
                        renderer.render_frame();
                    }
                }
            }
            _ => {}
        }

        if !self.state.is_running() {
            event_loop.exit();
        }
    }

    /// Pending events are drained; sample keys, then schedule the next frame.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let input = self.keys.sample();
        if input.quit {
            self.signal(Signal::EscapePressed);
        }
        if !self.state.is_running() {
            event_loop.exit();
            return;
        }

        if input.reload {
            self.reload();
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

/// Open the window and display `canvas` until the user quits.
///
/// Returns the first fatal error raised while setting up the window or GPU.
pub fn run(config: ViewerConfig, canvas: Canvas) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|e| VizError::Init(format!("event loop creation failed: {e}")))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(config, canvas);
    let outcome = event_loop
        .run_app(&mut viewer)
        .map_err(|e| VizError::Init(format!("event loop failed: {e}")));
    viewer.shutdown();

    match viewer.error.take() {
        Some(error) => Err(error),
        None => outcome,
    }
}
