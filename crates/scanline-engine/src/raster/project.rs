use glam::Vec4;

use crate::vertex::{Assembler, Usage, UsageFilter, Vertex, VertexFormat};

/// Maps clipped view-space vertices to screen space.
///
/// After projection a vertex's position holds `(sx, sy, 1/z, 1)` with
/// `(0, 0)` at the top-left corner of the target, and every other attribute
/// has been multiplied by `1/z`. Both are linear in screen space, which is what
/// the scanline walk interpolates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    x_scale: f32,
    y_scale: f32,
    half_width: f32,
    half_height: f32,
}

impl Projection {
    /// `fov_y` in radians, `aspect` as width / height.
    pub fn new(fov_y: f32, aspect: f32, width: usize, height: usize) -> Self {
        let tan_y = (fov_y * 0.5).tan();
        let tan_x = tan_y * aspect;
        Self {
            x_scale: 1.0 / tan_x,
            y_scale: 1.0 / tan_y,
            half_width: width as f32 * 0.5,
            half_height: height as f32 * 0.5,
        }
    }

    /// Screen position of a view-space point, as `(sx, sy, 1/z)`.
    #[inline]
    pub fn screen(&self, p: Vec4) -> (f32, f32, f32) {
        let inv_z = 1.0 / p.z;
        let sx = (p.x * inv_z * self.x_scale + 1.0) * self.half_width;
        let sy = (1.0 - p.y * inv_z * self.y_scale) * self.half_height;
        (sx, sy, inv_z)
    }

    /// Projects one vertex. Its `z` must be positive, which holds for any
    /// vertex that survived the near plane.
    pub fn project<F: VertexFormat + ?Sized>(&self, format: &F, vertex: &Vertex) -> Vertex {
        let assembler = Assembler::new(format.layout());
        let (sx, sy, inv_z) = self.screen(assembler.position(vertex));
        let mut out = format.scale(vertex, inv_z, UsageFilter::Except(Usage::Position));
        assembler.set_position(&mut out, Vec4::new(sx, sy, inv_z, 1.0));
        out
    }
}
