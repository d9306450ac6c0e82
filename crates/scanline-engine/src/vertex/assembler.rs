use glam::Vec4;

use super::buffer::Vertex;
use super::layout::{Usage, UsageFilter, VertexLayout};

static EMPTY_LAYOUT: VertexLayout = VertexLayout::empty();

/// Generic operations over opaque vertices, driven by a [`VertexLayout`].
///
/// The assembler knows nothing about what a vertex means beyond which
/// attribute is the position. Every other attribute is treated as a vector of
/// `f32` lanes and combined lane by lane.
///
/// All operations return a fresh `Vertex` by value. There is no shared scratch
/// buffer, so results may be held across calls and across threads.
///
/// A default assembler uses an empty layout: position reads return
/// `Vec4::ZERO`, writes are ignored, and arithmetic copies its first operand.
#[derive(Debug, Copy, Clone)]
pub struct Assembler<'l> {
    layout: &'l VertexLayout,
}

impl Default for Assembler<'_> {
    fn default() -> Self {
        Self { layout: &EMPTY_LAYOUT }
    }
}

impl<'l> Assembler<'l> {
    #[inline]
    pub fn new(layout: &'l VertexLayout) -> Self {
        Self { layout }
    }

    /// Installs the layout used by subsequent calls.
    #[inline]
    pub fn set_layout(&mut self, layout: &'l VertexLayout) {
        self.layout = layout;
    }

    #[inline]
    pub fn layout(&self) -> &'l VertexLayout {
        self.layout
    }

    // ── attribute access ──────────────────────────────────────────────────

    /// Position of `vertex`, or the zero vector if the layout has none.
    #[inline]
    pub fn position(&self, vertex: &Vertex) -> Vec4 {
        self.read(vertex, Usage::Position).unwrap_or(Vec4::ZERO)
    }

    /// Writes `position` into the position slot. No-op if the layout has none.
    #[inline]
    pub fn set_position(&self, vertex: &mut Vertex, position: Vec4) {
        self.write(vertex, Usage::Position, position);
    }

    /// Reads the first attribute tagged `usage`, zero-padded to four lanes.
    #[inline]
    pub fn read(&self, vertex: &Vertex, usage: Usage) -> Option<Vec4> {
        self.layout
            .find(usage)
            .map(|attr| Vec4::from_array(vertex.read_attribute(attr)))
    }

    /// Writes the leading lanes of `value` into the first attribute tagged
    /// `usage`. Returns `false` if no such attribute exists.
    #[inline]
    pub fn write(&self, vertex: &mut Vertex, usage: Usage, value: Vec4) -> bool {
        match self.layout.find(usage) {
            Some(attr) => {
                vertex.write_attribute(attr, value.to_array());
                true
            }
            None => false,
        }
    }

    // ── arithmetic ────────────────────────────────────────────────────────

    /// Per-attribute `v0 + t * (v1 - v0)`.
    #[inline]
    pub fn interpolate(&self, v0: &Vertex, v1: &Vertex, t: f32) -> Vertex {
        self.zip(v0, v1, UsageFilter::All, |a, b| a + t * (b - a))
    }

    /// Per-attribute `(v1 - v0) * inv_distance`: the step that advances an
    /// attribute by one unit of distance along the `v0 -> v1` direction.
    #[inline]
    pub fn differential(&self, v0: &Vertex, v1: &Vertex, inv_distance: f32) -> Vertex {
        self.zip(v0, v1, UsageFilter::All, |a, b| (b - a) * inv_distance)
    }

    /// Per-attribute `a + b`.
    #[inline]
    pub fn add(&self, a: &Vertex, b: &Vertex) -> Vertex {
        self.zip(a, b, UsageFilter::All, |x, y| x + y)
    }

    /// Multiplies the attributes selected by `filter` by `scalar`; the rest are copied.
    #[inline]
    pub fn scale(&self, vertex: &Vertex, scalar: f32, filter: UsageFilter) -> Vertex {
        self.zip(vertex, vertex, filter, |x, _| x * scalar)
    }

    /// Applies `op` lane by lane to every attribute accepted by `filter`.
    /// Bytes outside those attributes are copied from `a`.
    fn zip(&self, a: &Vertex, b: &Vertex, filter: UsageFilter, op: impl Fn(f32, f32) -> f32) -> Vertex {
        let mut out = *a;
        for attr in self.layout.attributes() {
            if !filter.accepts(attr.usage) {
                continue;
            }
            for c in 0..attr.format.components() {
                let offset = attr.offset + c * 4;
                out.write_f32(offset, op(a.read_f32(offset), b.read_f32(offset)));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::AttributeFormat;

    fn layout() -> VertexLayout {
        VertexLayout::packed(&[
            (AttributeFormat::Float4, Usage::Position),
            (AttributeFormat::Float3, Usage::Color),
            (AttributeFormat::Float, Usage::Generic(1)),
        ])
        .unwrap()
    }

    fn vertex(asm: &Assembler<'_>, pos: [f32; 4], color: [f32; 3], g: f32) -> Vertex {
        let mut v = Vertex::zeroed();
        asm.set_position(&mut v, Vec4::from_array(pos));
        asm.write(&mut v, Usage::Color, Vec4::new(color[0], color[1], color[2], 0.0));
        asm.write(&mut v, Usage::Generic(1), Vec4::new(g, 0.0, 0.0, 0.0));
        v
    }

    // ── position ──────────────────────────────────────────────────────────

    #[test]
    fn position_round_trip() {
        let l = layout();
        let asm = Assembler::new(&l);
        let mut v = Vertex::zeroed();
        let p = Vec4::new(1.0, -2.0, 3.5, 1.0);
        asm.set_position(&mut v, p);
        assert_eq!(asm.position(&v), p);
    }

    #[test]
    fn default_assembler_reads_zero_and_ignores_writes() {
        let asm = Assembler::default();
        let mut v = Vertex::from_bytes(&[0xAB; 16]);
        let before = v;
        asm.set_position(&mut v, Vec4::ONE);
        assert_eq!(v, before);
        assert_eq!(asm.position(&v), Vec4::ZERO);
    }

    #[test]
    fn set_layout_switches_interpretation() {
        let with = layout();
        let without = VertexLayout::packed(&[(AttributeFormat::Float4, Usage::Color)]).unwrap();
        let mut asm = Assembler::new(&with);
        let mut v = Vertex::zeroed();
        asm.set_position(&mut v, Vec4::new(1.0, 2.0, 3.0, 4.0));

        asm.set_layout(&without);
        assert_eq!(asm.position(&v), Vec4::ZERO);
        assert_eq!(asm.read(&v, Usage::Color), Some(Vec4::new(1.0, 2.0, 3.0, 4.0)));
    }

    // ── arithmetic ────────────────────────────────────────────────────────

    #[test]
    fn interpolate_midpoint() {
        let l = layout();
        let asm = Assembler::new(&l);
        let a = vertex(&asm, [0.0, 0.0, 1.0, 1.0], [0.0, 0.0, 0.0], 2.0);
        let b = vertex(&asm, [2.0, 4.0, 3.0, 1.0], [1.0, 0.5, 0.0], 4.0);

        let m = asm.interpolate(&a, &b, 0.5);
        assert_eq!(asm.position(&m), Vec4::new(1.0, 2.0, 2.0, 1.0));
        assert_eq!(asm.read(&m, Usage::Color), Some(Vec4::new(0.5, 0.25, 0.0, 0.0)));
        assert_eq!(asm.read(&m, Usage::Generic(1)), Some(Vec4::new(3.0, 0.0, 0.0, 0.0)));
    }

    #[test]
    fn differential_accumulates_to_endpoint() {
        let l = layout();
        let asm = Assembler::new(&l);
        let a = vertex(&asm, [0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0], 0.0);
        let b = vertex(&asm, [4.0, 8.0, 0.0, 1.0], [1.0, 1.0, 1.0], 8.0);

        let step = asm.differential(&a, &b, 0.25);
        let mut acc = a;
        for _ in 0..4 {
            acc = asm.add(&acc, &step);
        }
        assert_eq!(asm.position(&acc), asm.position(&b));
        assert_eq!(asm.read(&acc, Usage::Generic(1)), asm.read(&b, Usage::Generic(1)));
    }

    #[test]
    fn scale_respects_filter() {
        let l = layout();
        let asm = Assembler::new(&l);
        let v = vertex(&asm, [1.0, 2.0, 3.0, 1.0], [0.5, 0.5, 0.5], 1.0);

        let s = asm.scale(&v, 2.0, UsageFilter::Except(Usage::Position));
        assert_eq!(asm.position(&s), asm.position(&v));
        assert_eq!(asm.read(&s, Usage::Color), Some(Vec4::new(1.0, 1.0, 1.0, 0.0)));
        assert_eq!(asm.read(&s, Usage::Generic(1)), Some(Vec4::new(2.0, 0.0, 0.0, 0.0)));

        let p = asm.scale(&v, 2.0, UsageFilter::Only(Usage::Position));
        assert_eq!(asm.position(&p), Vec4::new(2.0, 4.0, 6.0, 2.0));
        assert_eq!(asm.read(&p, Usage::Color), asm.read(&v, Usage::Color));
    }

    #[test]
    fn bytes_outside_layout_are_preserved() {
        let l = VertexLayout::new(
            32,
            [crate::vertex::Attribute::new(0, AttributeFormat::Float4, Usage::Position)],
        )
        .unwrap();
        let asm = Assembler::new(&l);
        let mut a = Vertex::zeroed();
        a.write_f32(20, 42.0);
        let b = Vertex::zeroed();
        let m = asm.interpolate(&a, &b, 0.5);
        assert_eq!(m.read_f32(20), 42.0);
    }
}
