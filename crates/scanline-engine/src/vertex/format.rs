use super::assembler::Assembler;
use super::buffer::Vertex;
use super::layout::{UsageFilter, VertexLayout};
use crate::raster::Fragment;

/// A concrete vertex format: its layout plus the capability functions the
/// rasterizer calls per edge, per span and per pixel.
///
/// `add`, `scale` and `differential` default to the layout-driven generic
/// versions in [`Assembler`]. Formats with a fixed struct layout can override
/// them with direct field arithmetic.
///
/// `shade` receives a fragment whose attributes have been perspective-corrected
/// and returns a pixel already packed in `fragment.pixel_format`.
///
/// Formats are shared across worker threads in pooled mode, hence `Sync`.
pub trait VertexFormat: Sync {
    fn layout(&self) -> &VertexLayout;

    #[inline]
    fn add(&self, a: &Vertex, b: &Vertex) -> Vertex {
        Assembler::new(self.layout()).add(a, b)
    }

    #[inline]
    fn scale(&self, vertex: &Vertex, scalar: f32, filter: UsageFilter) -> Vertex {
        Assembler::new(self.layout()).scale(vertex, scalar, filter)
    }

    #[inline]
    fn differential(&self, v0: &Vertex, v1: &Vertex, inv_distance: f32) -> Vertex {
        Assembler::new(self.layout()).differential(v0, v1, inv_distance)
    }

    fn shade(&self, fragment: &Fragment<'_>) -> u32;
}

impl<T: VertexFormat + ?Sized> VertexFormat for &T {
    #[inline]
    fn layout(&self) -> &VertexLayout {
        (**self).layout()
    }

    #[inline]
    fn add(&self, a: &Vertex, b: &Vertex) -> Vertex {
        (**self).add(a, b)
    }

    #[inline]
    fn scale(&self, vertex: &Vertex, scalar: f32, filter: UsageFilter) -> Vertex {
        (**self).scale(vertex, scalar, filter)
    }

    #[inline]
    fn differential(&self, v0: &Vertex, v1: &Vertex, inv_distance: f32) -> Vertex {
        (**self).differential(v0, v1, inv_distance)
    }

    #[inline]
    fn shade(&self, fragment: &Fragment<'_>) -> u32 {
        (**self).shade(fragment)
    }
}
