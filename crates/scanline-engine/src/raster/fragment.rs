use glam::Vec4;

use crate::paint::PixelFormat;
use crate::vertex::{Assembler, Usage, Vertex};

/// One pixel about to be written, handed to [`VertexFormat::shade`].
///
/// Every attribute of `vertex()` has already been divided back out of
/// `1/z` space, so they hold the perspective-correct values at this pixel.
/// The position holds `(x + 0.5, y + 0.5, depth, 1)`.
///
/// [`VertexFormat::shade`]: crate::vertex::VertexFormat::shade
#[derive(Debug, Copy, Clone)]
pub struct Fragment<'a> {
    pub x: usize,
    pub y: usize,
    /// View-space depth (distance along `+z`).
    pub depth: f32,
    /// Format the shader must pack its result in.
    pub pixel_format: PixelFormat,
    vertex: &'a Vertex,
    assembler: Assembler<'a>,
}

impl<'a> Fragment<'a> {
    #[inline]
    pub(crate) fn new(
        x: usize,
        y: usize,
        depth: f32,
        pixel_format: PixelFormat,
        vertex: &'a Vertex,
        assembler: Assembler<'a>,
    ) -> Self {
        Self { x, y, depth, pixel_format, vertex, assembler }
    }

    #[inline]
    pub fn vertex(&self) -> &'a Vertex {
        self.vertex
    }

    /// Interpolated attribute tagged `usage`, if the layout has one.
    #[inline]
    pub fn attribute(&self, usage: Usage) -> Option<Vec4> {
        self.assembler.read(self.vertex, usage)
    }

    #[inline]
    pub fn position(&self) -> Vec4 {
        self.assembler.position(self.vertex)
    }
}
