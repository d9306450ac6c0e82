//! Color model shared by shading functions and render targets.
//!
//! Scope:
//! - straight-alpha linear color (`Color`) used while shading
//! - packed 32-bit pixel layouts (`PixelFormat`) used by render targets

mod color;
mod pixel_format;

pub use color::Color;
pub use pixel_format::PixelFormat;
