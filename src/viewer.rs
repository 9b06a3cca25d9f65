//! Viewer builder and runner

use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::ViewerError;
use crate::gpu::GpuState;
use crate::input::{ChargeCollector, InputHandler};

/// Equipotential viewer builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// Viewer::new()
///     .with_title("Dipole")
///     .with_size(1280, 720)
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Viewer {
    title: String,
    width: u32,
    height: u32,
    clear_color: Vec3,
}

impl Viewer {
    /// Create a viewer with the default 1000x600 window.
    pub fn new() -> Self {
        Self {
            title: "Equipotential surfaces".to_string(),
            width: 1000,
            height: 600,
            clear_color: Vec3::new(0.3, 0.2, 0.4),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the color the frame is cleared to before the quad is drawn.
    pub fn with_clear_color(mut self, color: Vec3) -> Self {
        self.clear_color = color;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn clear_color(&self) -> Vec3 {
        self.clear_color
    }

    /// Open the window and run until it is closed.
    ///
    /// Returns an error if the window, GPU device or shader could not be set up.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    settings: Viewer,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    collector: ChargeCollector,
    error: Option<ViewerError>,
}

impl App {
    fn new(settings: Viewer) -> Self {
        let collector = ChargeCollector::new(settings.height);
        Self {
            settings,
            window: None,
            gpu_state: None,
            collector,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.width,
                self.settings.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let c = self.settings.clear_color;
        let clear_color = wgpu::Color {
            r: c.x as f64,
            g: c.y as f64,
            b: c.z as f64,
            a: 1.0,
        };
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), clear_color))?;

        let (_, height) = gpu_state.size();
        self.collector.set_viewport_height(height);

        window.request_redraw();
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        // Minimized: nothing to draw until the next Resized.
        let window_size = window.inner_size();
        if !is_drawable(window_size) {
            return;
        }
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };

        match gpu_state.render(self.collector.charges()) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if gpu_state.resize(window_size) {
                    self.request_redraw();
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

/// A zero-sized surface cannot be configured or presented.
fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

impl InputHandler for App {
    fn handle_input(&mut self, event: &WindowEvent) -> bool {
        self.collector.handle_event(event)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(()) => log::info!("window '{}' open", self.settings.title),
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                log::debug!("resized to {}x{}", physical_size.width, physical_size.height);
                if is_drawable(physical_size) {
                    self.collector.set_viewport_height(physical_size.height);
                    self.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if self.handle_input(&other) {
                    self.request_redraw();
                }
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Surface must go before the window it was created from.
        self.gpu_state = None;
        self.window = None;
        log::info!(
            "shutting down with {} charge(s)",
            self.collector.charges().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let viewer = Viewer::new();
        assert_eq!(viewer.title(), "Equipotential surfaces");
        assert_eq!(viewer.size(), (1000, 600));
        assert_eq!(viewer.clear_color(), Vec3::new(0.3, 0.2, 0.4));
    }

    #[test]
    fn test_builder_overrides() {
        let viewer = Viewer::new()
            .with_title("Dipole")
            .with_size(640, 480)
            .with_clear_color(Vec3::ZERO);
        assert_eq!(viewer.title(), "Dipole");
        assert_eq!(viewer.size(), (640, 480));
        assert_eq!(viewer.clear_color(), Vec3::ZERO);
    }

    #[test]
    fn test_minimized_size_is_not_drawable() {
        assert!(!is_drawable(PhysicalSize::new(0, 0)));
        assert!(!is_drawable(PhysicalSize::new(1000, 0)));
        assert!(!is_drawable(PhysicalSize::new(0, 600)));
        assert!(is_drawable(PhysicalSize::new(1, 1)));
    }

    #[test]
    fn test_app_starts_empty_with_configured_height() {
        let app = App::new(Viewer::new().with_size(800, 450));
        assert!(app.collector.charges().is_empty());
        assert_eq!(app.collector.viewport_height(), 450);
        assert!(app.window.is_none());
        assert!(app.error.is_none());
    }
}
