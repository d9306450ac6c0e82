use core::ops::Range;

use glam::Vec4;

use super::fragment::Fragment;
use super::rows::RowSink;
use super::stats::RasterStats;
use crate::paint::PixelFormat;
use crate::vertex::{Assembler, Usage, UsageFilter, Vertex, VertexFormat};

/// How a screen-space triangle splits into scanline halves.
///
/// Vertices are ordered top to bottom (`v0.y <= v1.y <= v2.y`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TriangleShape {
    /// `v0` and `v1` share the top row: one half, both edges end at `v2`.
    FlatTop,
    /// `v1` and `v2` share the bottom row: one half, both edges start at `v0`.
    FlatBottom,
    /// Split at `v1` into a flat-bottom upper half and a flat-top lower half.
    General,
}

impl TriangleShape {
    #[inline]
    pub fn classify(y0: f32, y1: f32, y2: f32) -> Self {
        if y0 == y1 {
            TriangleShape::FlatTop
        } else if y1 == y2 {
            TriangleShape::FlatBottom
        } else {
            TriangleShape::General
        }
    }
}

/// A triangle edge evaluated directly from its upper endpoint.
///
/// Both triangles sharing an edge see the same endpoints in the same order,
/// so they compute bit-identical crossings on every row.
struct Edge {
    origin: Vertex,
    step: Vertex,
    y0: f32,
}

/// Scanline rasterizer for screen-space triangles.
///
/// Input vertices come from [`Projection::project`](super::Projection::project):
/// position `(sx, sy, 1/z, 1)` and attributes pre-multiplied by `1/z`.
///
/// Coverage follows pixel centers. Row `y` is drawn when `y + 0.5` lies in
/// `[top, bottom)` of a half, and pixel `x` when `x + 0.5` lies in `[x0, x1)`
/// of a span, so triangles sharing an edge neither overlap nor leave gaps.
pub struct Rasterizer<'f, F: VertexFormat + ?Sized> {
    format: &'f F,
    assembler: Assembler<'f>,
    pixel_format: PixelFormat,
}

impl<'f, F: VertexFormat + ?Sized> Rasterizer<'f, F> {
    pub fn new(format: &'f F, pixel_format: PixelFormat) -> Self {
        Self { format, assembler: Assembler::new(format.layout()), pixel_format }
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Fills one projected triangle.
    ///
    /// Triangles with zero or non-finite screen area are skipped and counted
    /// in `stats.degenerate_skipped`.
    pub fn draw_triangle<S: RowSink>(&self, sink: &mut S, triangle: &[Vertex; 3], stats: &mut RasterStats) {
        let mut v = [&triangle[0], &triangle[1], &triangle[2]];
        let p = v.map(|v| self.assembler.position(v));

        let area2 = (p[1].x - p[0].x) * (p[2].y - p[0].y) - (p[2].x - p[0].x) * (p[1].y - p[0].y);
        if area2 == 0.0 || !area2.is_finite() {
            stats.degenerate_skipped += 1;
            return;
        }
        stats.triangles_rasterized += 1;

        // Stable, so vertices on the same row keep submission order.
        v.sort_by(|a, b| {
            let ya = self.assembler.position(a).y;
            let yb = self.assembler.position(b).y;
            ya.total_cmp(&yb)
        });
        let [top, mid, bot] = v;
        let y = v.map(|v| self.assembler.position(v).y);

        match TriangleShape::classify(y[0], y[1], y[2]) {
            TriangleShape::FlatTop => {
                let a = self.edge(top, bot);
                let b = self.edge(mid, bot);
                self.fill(sink, &a, &b, y[0], y[2], stats);
            }
            TriangleShape::FlatBottom => {
                let a = self.edge(top, mid);
                let b = self.edge(top, bot);
                self.fill(sink, &a, &b, y[0], y[2], stats);
            }
            TriangleShape::General => {
                let long = self.edge(top, bot);
                let upper = self.edge(top, mid);
                let lower = self.edge(mid, bot);
                self.fill(sink, &long, &upper, y[0], y[1], stats);
                self.fill(sink, &long, &lower, y[1], y[2], stats);
            }
        }
    }

    /// Draws the span between two edge vertices on row `y`.
    ///
    /// `x0`/`x1` are the span ends and `va`/`vb` the vertices there; the ends
    /// may come in either order. Each covered pixel is depth tested, and on
    /// success the interpolated vertex is divided back out of `1/z` space and
    /// shaded.
    pub fn draw_scanline<S: RowSink>(
        &self,
        sink: &mut S,
        x0: f32,
        x1: f32,
        y: usize,
        va: &Vertex,
        vb: &Vertex,
        stats: &mut RasterStats,
    ) {
        if y >= sink.height() {
            return;
        }
        let (x0, x1, va, vb) = if x0 > x1 { (x1, x0, vb, va) } else { (x0, x1, va, vb) };
        let columns = pixel_range(x0, x1, sink.width());
        if columns.is_empty() {
            return;
        }

        let step = self.format.differential(va, vb, 1.0 / (x1 - x0));
        let lead = columns.start as f32 + 0.5 - x0;
        let mut acc = self.format.add(va, &self.format.scale(&step, lead, UsageFilter::All));

        sink.with_row(y, |colors, depths| {
            for x in columns {
                let depth = 1.0 / self.assembler.position(&acc).z;
                if depth < depths[x] {
                    depths[x] = depth;
                    let mut corrected = self.format.scale(&acc, depth, UsageFilter::Except(Usage::Position));
                    self.assembler.set_position(
                        &mut corrected,
                        Vec4::new(x as f32 + 0.5, y as f32 + 0.5, depth, 1.0),
                    );
                    let fragment = Fragment::new(x, y, depth, self.pixel_format, &corrected, self.assembler);
                    colors[x] = self.format.shade(&fragment);
                    stats.fragments_shaded += 1;
                } else {
                    stats.depth_rejected += 1;
                }
                acc = self.format.add(&acc, &step);
            }
        });
    }

    // ── helpers ───────────────────────────────────────────────────────────

    /// `a` must be strictly above `b`.
    fn edge(&self, a: &Vertex, b: &Vertex) -> Edge {
        let y0 = self.assembler.position(a).y;
        let y1 = self.assembler.position(b).y;
        Edge { origin: *a, step: self.format.differential(a, b, 1.0 / (y1 - y0)), y0 }
    }

    #[inline]
    fn edge_at(&self, edge: &Edge, yc: f32) -> Vertex {
        let offset = self.format.scale(&edge.step, yc - edge.y0, UsageFilter::All);
        self.format.add(&edge.origin, &offset)
    }

    /// Walks rows whose centers fall in `[y_top, y_bottom)` between two edges.
    fn fill<S: RowSink>(
        &self,
        sink: &mut S,
        a: &Edge,
        b: &Edge,
        y_top: f32,
        y_bottom: f32,
        stats: &mut RasterStats,
    ) {
        for row in pixel_range(y_top, y_bottom, sink.height()) {
            let yc = row as f32 + 0.5;
            let va = self.edge_at(a, yc);
            let vb = self.edge_at(b, yc);
            let xa = self.assembler.position(&va).x;
            let xb = self.assembler.position(&vb).x;
            self.draw_scanline(sink, xa, xb, row, &va, &vb, stats);
        }
    }
}

/// Pixel indices whose centers lie in `[lo, hi)`, clamped to `0..limit`.
#[inline]
fn pixel_range(lo: f32, hi: f32, limit: usize) -> Range<usize> {
    if !(lo.is_finite() && hi.is_finite()) {
        return 0..0;
    }
    let first = (lo - 0.5).ceil().max(0.0);
    let end = (hi - 0.5).ceil().min(limit as f32);
    if first >= end {
        return 0..0;
    }
    first as usize..end as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::{DepthBuffer, FrameRows, RenderTarget, FAR_DEPTH};
    use crate::vertex::FlatFormat;

    const INK: u32 = 0xFFFF_FFFF;

    fn buffers(w: usize, h: usize) -> (RenderTarget, DepthBuffer) {
        let t = RenderTarget::new(w, h, PixelFormat::Argb8888).unwrap();
        let d = DepthBuffer::for_target(&t);
        (t, d)
    }

    /// Screen-space vertex at inverse depth `inv_z`.
    fn sv(x: f32, y: f32, inv_z: f32) -> Vertex {
        FlatFormat::vertex(x, y, inv_z)
    }

    fn covered(t: &RenderTarget) -> usize {
        t.pixels().iter().filter(|&&p| p == INK).count()
    }

    // ── classification ────────────────────────────────────────────────────

    #[test]
    fn shapes_are_classified_by_shared_rows() {
        assert_eq!(TriangleShape::classify(0.0, 0.0, 3.0), TriangleShape::FlatTop);
        assert_eq!(TriangleShape::classify(0.0, 3.0, 3.0), TriangleShape::FlatBottom);
        assert_eq!(TriangleShape::classify(0.0, 1.0, 3.0), TriangleShape::General);
    }

    #[test]
    fn pixel_range_uses_centers() {
        assert_eq!(pixel_range(1.0, 3.0, 4), 1..3);
        assert_eq!(pixel_range(0.5, 1.5, 4), 0..1);
        assert_eq!(pixel_range(-3.0, 10.0, 4), 0..4);
        assert!(pixel_range(1.6, 2.4, 4).is_empty());
        assert!(pixel_range(f32::NAN, 2.0, 4).is_empty());
    }

    // ── spans ─────────────────────────────────────────────────────────────

    #[test]
    fn scanline_is_half_open_and_order_free() {
        let format = FlatFormat::new(INK);
        let r = Rasterizer::new(&format, PixelFormat::Argb8888);
        let mut stats = RasterStats::default();

        for (x0, x1) in [(1.0, 3.0), (3.0, 1.0)] {
            let (mut t, mut d) = buffers(4, 1);
            let mut rows = FrameRows::new(&mut t, &mut d);
            r.draw_scanline(&mut rows, x0, x1, 0, &sv(x0, 0.5, 1.0), &sv(x1, 0.5, 1.0), &mut stats);
            assert_eq!(t.pixels(), &[0, INK, INK, 0]);
        }
    }

    #[test]
    fn scanline_outside_rows_is_ignored() {
        let format = FlatFormat::new(INK);
        let r = Rasterizer::new(&format, PixelFormat::Argb8888);
        let (mut t, mut d) = buffers(4, 2);
        let mut stats = RasterStats::default();
        {
            let mut rows = FrameRows::new(&mut t, &mut d);
            r.draw_scanline(&mut rows, 0.0, 4.0, 2, &sv(0.0, 2.5, 1.0), &sv(4.0, 2.5, 1.0), &mut stats);
            r.draw_scanline(&mut rows, -9.0, -1.0, 0, &sv(-9.0, 0.5, 1.0), &sv(-1.0, 0.5, 1.0), &mut stats);
        }
        assert_eq!(covered(&t), 0);
        assert_eq!(stats, RasterStats::default());
    }

    #[test]
    fn scanline_depth_is_reciprocal_of_inverse_depth() {
        let format = FlatFormat::new(INK);
        let r = Rasterizer::new(&format, PixelFormat::Argb8888);
        let (mut t, mut d) = buffers(2, 1);
        let mut stats = RasterStats::default();
        {
            let mut rows = FrameRows::new(&mut t, &mut d);
            r.draw_scanline(&mut rows, 0.0, 2.0, 0, &sv(0.0, 0.5, 4.0), &sv(2.0, 0.5, 4.0), &mut stats);
        }
        assert_eq!(d.values(), &[0.25, 0.25]);
        assert_eq!(stats.fragments_shaded, 2);
    }

    // ── triangles ─────────────────────────────────────────────────────────

    #[test]
    fn two_triangles_partition_a_square() {
        let format = FlatFormat::new(INK);
        let r = Rasterizer::new(&format, PixelFormat::Argb8888);
        let (mut t, mut d) = buffers(4, 4);
        let mut stats = RasterStats::default();
        {
            let mut rows = FrameRows::new(&mut t, &mut d);
            let a = [sv(0.0, 0.0, 1.0), sv(4.0, 0.0, 1.0), sv(4.0, 4.0, 1.0)];
            let b = [sv(0.0, 0.0, 1.0), sv(4.0, 4.0, 1.0), sv(0.0, 4.0, 1.0)];
            r.draw_triangle(&mut rows, &a, &mut stats);
            r.draw_triangle(&mut rows, &b, &mut stats);
        }
        assert_eq!(covered(&t), 16);
        // Equal depths are rejected, so any overlap would show up here.
        assert_eq!(stats.fragments_shaded, 16);
        assert_eq!(stats.depth_rejected, 0);
        assert_eq!(stats.triangles_rasterized, 2);
    }

    #[test]
    fn general_triangle_is_split_at_middle_vertex() {
        let format = FlatFormat::new(INK);
        let r = Rasterizer::new(&format, PixelFormat::Argb8888);
        let (mut t, mut d) = buffers(8, 8);
        let mut stats = RasterStats::default();
        {
            let mut rows = FrameRows::new(&mut t, &mut d);
            let tri = [sv(0.0, 8.0, 1.0), sv(8.0, 4.0, 1.0), sv(0.0, 0.0, 1.0)];
            r.draw_triangle(&mut rows, &tri, &mut stats);
        }
        // Row 3 (center 3.5) spans [0, 7) and row 4 (center 4.5) mirrors it.
        assert_eq!((0..8).filter(|&x| t.pixel(x, 3) == Some(INK)).count(), 7);
        assert_eq!((0..8).filter(|&x| t.pixel(x, 4) == Some(INK)).count(), 7);
        assert_eq!(t.pixel(0, 0), Some(INK));
        assert_eq!(t.pixel(1, 0), Some(0));
        assert_eq!(covered(&t), 32);
    }

    #[test]
    fn degenerate_triangles_are_skipped() {
        let format = FlatFormat::new(INK);
        let r = Rasterizer::new(&format, PixelFormat::Argb8888);
        let (mut t, mut d) = buffers(4, 4);
        let mut stats = RasterStats::default();
        {
            let mut rows = FrameRows::new(&mut t, &mut d);
            let line = [sv(0.0, 0.0, 1.0), sv(2.0, 2.0, 1.0), sv(4.0, 4.0, 1.0)];
            let nan = [sv(f32::NAN, 0.0, 1.0), sv(2.0, 2.0, 1.0), sv(4.0, 0.0, 1.0)];
            r.draw_triangle(&mut rows, &line, &mut stats);
            r.draw_triangle(&mut rows, &nan, &mut stats);
        }
        assert_eq!(stats.degenerate_skipped, 2);
        assert_eq!(stats.triangles_rasterized, 0);
        assert_eq!(covered(&t), 0);
        assert!(d.values().iter().all(|&z| z == FAR_DEPTH));
    }

    #[test]
    fn nearer_triangle_wins_in_either_order() {
        let near = FlatFormat::new(0xFF00_00FF);
        let far = FlatFormat::new(0xFFFF_0000);
        let quad = |inv_z| {
            [
                [sv(0.0, 0.0, inv_z), sv(2.0, 0.0, inv_z), sv(2.0, 2.0, inv_z)],
                [sv(0.0, 0.0, inv_z), sv(2.0, 2.0, inv_z), sv(0.0, 2.0, inv_z)],
            ]
        };

        for near_first in [true, false] {
            let (mut t, mut d) = buffers(2, 2);
            let mut stats = RasterStats::default();
            {
                let mut rows = FrameRows::new(&mut t, &mut d);
                let near_r = Rasterizer::new(&near, PixelFormat::Argb8888);
                let far_r = Rasterizer::new(&far, PixelFormat::Argb8888);
                let draw_near = |rows: &mut FrameRows<'_>, stats: &mut RasterStats| {
                    for tri in &quad(2.0) {
                        near_r.draw_triangle(rows, tri, stats);
                    }
                };
                let draw_far = |rows: &mut FrameRows<'_>, stats: &mut RasterStats| {
                    for tri in &quad(1.0) {
                        far_r.draw_triangle(rows, tri, stats);
                    }
                };
                if near_first {
                    draw_near(&mut rows, &mut stats);
                    draw_far(&mut rows, &mut stats);
                } else {
                    draw_far(&mut rows, &mut stats);
                    draw_near(&mut rows, &mut stats);
                }
            }
            assert!(t.pixels().iter().all(|&p| p == 0xFF00_00FF));
            assert!(d.values().iter().all(|&z| z == 0.5));
        }
    }
}
