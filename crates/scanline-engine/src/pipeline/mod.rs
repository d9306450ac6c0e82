//! Draw-call orchestration: clip, project, then rasterize.

mod camera;
mod config;
mod context;

pub use camera::Camera;
pub use config::{ExecutionMode, RenderConfig};
pub use context::RenderContext;
