//! Scanline engine crate.
//!
//! A CPU triangle pipeline over caller-defined vertex layouts: frustum
//! clipping in view space, perspective-correct scanline rasterization with a
//! closest-wins depth buffer, and per-pixel shading through [`VertexFormat`].
//!
//! The usual entry point is [`RenderContext`]: build one from a
//! [`RenderConfig`], submit triangles with [`RenderContext::draw`], then read
//! back [`RenderContext::target`].
//!
//! [`VertexFormat`]: vertex::VertexFormat
//! [`RenderContext`]: pipeline::RenderContext
//! [`RenderContext::draw`]: pipeline::RenderContext::draw
//! [`RenderContext::target`]: pipeline::RenderContext::target
//! [`RenderConfig`]: pipeline::RenderConfig

pub mod clip;
pub mod error;
pub mod logging;
pub mod paint;
pub mod pipeline;
pub mod pool;
pub mod raster;
pub mod vertex;

pub use error::RasterError;
