use super::camera::Camera;
use crate::paint::{Color, PixelFormat};

/// How a draw call schedules its triangles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ExecutionMode {
    /// Clip and rasterize every triangle on the calling thread.
    #[default]
    SingleThreaded,
    /// Clip on the calling thread, then rasterize on `workers` threads.
    /// The call returns once every triangle has been drawn.
    Pooled { workers: usize },
}

/// Render context configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub pixel_format: PixelFormat,
    pub mode: ExecutionMode,
    /// Rows per lock in pooled mode.
    pub band_rows: usize,
    pub clear_color: Color,
    pub camera: Camera,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            pixel_format: PixelFormat::Argb8888,
            mode: ExecutionMode::SingleThreaded,
            band_rows: 16,
            clear_color: Color::BLACK,
            camera: Camera::default(),
        }
    }
}
