//! Error types for torus_life.

use thiserror::Error;

/// Errors raised by a renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing a text frame failed.
    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),

    /// The window event loop could not be created.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// wgpu could not create a surface for the window.
    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No GPU adapter can present to the window.
    #[error("no suitable graphics adapter found")]
    NoAdapter,

    /// The adapter refused to create a device.
    #[error("device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// Acquiring the next frame failed fatally.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_from_io() {
        let err: RenderError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, RenderError::Io(_)));
        assert_eq!(err.to_string(), "failed to write frame: closed");
    }

    #[test]
    fn test_render_error_messages() {
        assert_eq!(RenderError::NoAdapter.to_string(), "no suitable graphics adapter found");
        let err: RenderError = wgpu::SurfaceError::OutOfMemory.into();
        assert!(err.to_string().starts_with("surface error: "));
    }
}
