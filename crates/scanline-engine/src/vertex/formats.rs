//! Built-in vertex formats.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use super::buffer::Vertex;
use super::format::VertexFormat;
use super::layout::{Attribute, AttributeFormat, Usage, VertexLayout};
use crate::paint::Color;
use crate::raster::Fragment;

// ── colored vertex ────────────────────────────────────────────────────────

/// Position + RGBA color, 32 bytes.
///
/// ```text
/// ┌──────────────────┬──────────────────┐
/// │ position [f32;4] │ color [f32;4]    │
/// │ offset 0         │ offset 16        │
/// └──────────────────┴──────────────────┘
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl ColorVertex {
    #[inline]
    pub fn new(position: Vec4, color: Color) -> Self {
        Self { position: position.to_array(), color: color.to_vec4().to_array() }
    }

    /// Point at `(x, y, z)` with `w = 1`.
    #[inline]
    pub fn at(x: f32, y: f32, z: f32, color: Color) -> Self {
        Self::new(Vec4::new(x, y, z, 1.0), color)
    }

    #[inline]
    pub fn to_vertex(&self) -> Vertex {
        Vertex::from_pod(self)
    }
}

/// Gouraud-shaded format: the color attribute is interpolated across the
/// triangle and written as the pixel color.
#[derive(Debug, Clone)]
pub struct ColorFormat {
    layout: VertexLayout,
}

impl ColorFormat {
    pub fn new() -> Self {
        let layout = VertexLayout::new(
            size_of::<ColorVertex>(),
            [
                Attribute::new(0, AttributeFormat::Float4, Usage::Position),
                Attribute::new(16, AttributeFormat::Float4, Usage::Color),
            ],
        )
        .unwrap_or_default();
        Self { layout }
    }
}

impl Default for ColorFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexFormat for ColorFormat {
    #[inline]
    fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    #[inline]
    fn shade(&self, fragment: &Fragment<'_>) -> u32 {
        let color = fragment
            .attribute(Usage::Color)
            .map(Color::from_vec4)
            .unwrap_or(Color::BLACK);
        fragment.pixel_format.pack(color)
    }
}

// ── flat ──────────────────────────────────────────────────────────────────

/// Position-only format that shades every fragment with one packed pixel value.
#[derive(Debug, Clone)]
pub struct FlatFormat {
    layout: VertexLayout,
    pixel: u32,
}

impl FlatFormat {
    /// `pixel` is written verbatim, so it must already be in the target's pixel format.
    pub fn new(pixel: u32) -> Self {
        let layout = VertexLayout::new(
            AttributeFormat::Float4.size(),
            [Attribute::new(0, AttributeFormat::Float4, Usage::Position)],
        )
        .unwrap_or_default();
        Self { layout, pixel }
    }

    /// Position-only vertex at `(x, y, z)` with `w = 1`.
    #[inline]
    pub fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::from_pod(&[x, y, z, 1.0f32])
    }

    #[inline]
    pub fn pixel(&self) -> u32 {
        self.pixel
    }
}

impl VertexFormat for FlatFormat {
    #[inline]
    fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    #[inline]
    fn shade(&self, _fragment: &Fragment<'_>) -> u32 {
        self.pixel
    }
}
