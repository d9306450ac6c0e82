use super::camera::Camera;
use super::config::{ExecutionMode, RenderConfig};
use crate::clip::{ClipPolygon, Clipper};
use crate::error::RasterError;
use crate::pool::WorkerPool;
use crate::raster::{BandedRows, DepthBuffer, FrameRows, Projection, RasterStats, Rasterizer, RenderTarget};
use crate::vertex::{Assembler, Vertex, VertexFormat};

/// One independent rasterization pipeline.
///
/// Owns the color and depth buffers, the camera-derived clip and projection
/// state, and (in pooled mode) the worker pool. Several contexts can exist at
/// once; nothing is global.
///
/// Vertices are given in view space. Each draw call clips every triangle,
/// projects and fan-triangulates the result, and rasterizes the fan with the
/// format's shading function.
#[derive(Debug)]
pub struct RenderContext {
    config: RenderConfig,
    clipper: Clipper,
    projection: Projection,
    pool: Option<WorkerPool>,
    target: RenderTarget,
    depth: DepthBuffer,
    stats: RasterStats,
}

impl RenderContext {
    /// Allocates buffers of `config.width` x `config.height` and clears them.
    pub fn new(config: RenderConfig) -> Result<Self, RasterError> {
        let target = RenderTarget::new(config.width, config.height, config.pixel_format)?;
        let depth = DepthBuffer::for_target(&target);
        Self::with_buffers(config, target, depth)
    }

    /// Renders into caller-supplied buffers. Their size and pixel format take
    /// precedence over the ones in `config`.
    pub fn with_buffers(
        mut config: RenderConfig,
        target: RenderTarget,
        depth: DepthBuffer,
    ) -> Result<Self, RasterError> {
        depth.check_matches(&target)?;
        config.camera.validate()?;
        config.width = target.width();
        config.height = target.height();
        config.pixel_format = target.pixel_format();

        let pool = match config.mode {
            ExecutionMode::SingleThreaded => None,
            ExecutionMode::Pooled { workers } => Some(WorkerPool::new(workers)?),
        };

        let mut ctx = Self {
            clipper: Clipper::new(config.camera.frustum()),
            projection: config.camera.projection(config.width, config.height),
            config,
            pool,
            target,
            depth,
            stats: RasterStats::default(),
        };
        ctx.clear();

        log::debug!(
            "render context {}x{} {:?} {:?}",
            ctx.config.width,
            ctx.config.height,
            ctx.config.pixel_format,
            ctx.config.mode
        );
        Ok(ctx)
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.config.camera
    }

    #[inline]
    pub fn mode(&self) -> ExecutionMode {
        self.config.mode
    }

    #[inline]
    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    #[inline]
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    #[inline]
    pub fn clipper(&self) -> &Clipper {
        &self.clipper
    }

    /// Totals since the last [`clear`](Self::clear).
    #[inline]
    pub fn stats(&self) -> RasterStats {
        self.stats
    }

    pub fn into_parts(self) -> (RenderTarget, DepthBuffer) {
        (self.target, self.depth)
    }

    // ── frame control ─────────────────────────────────────────────────────

    /// Replaces the camera and rebuilds the frustum planes and projection.
    /// An invalid camera is rejected and the old one is kept.
    pub fn set_camera(&mut self, camera: Camera) -> Result<(), RasterError> {
        camera.validate()?;
        self.clipper
            .build_frustum(camera.near, camera.far, camera.fov_y, camera.aspect);
        self.projection = camera.projection(self.config.width, self.config.height);
        self.config.camera = camera;
        Ok(())
    }

    /// Clears color to the configured clear color, depth to far, and resets
    /// the statistics.
    pub fn clear(&mut self) {
        self.target.clear(self.config.clear_color);
        self.depth.clear();
        self.stats = RasterStats::default();
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Draws a triangle list. Trailing vertices that do not form a whole
    /// triangle are ignored.
    pub fn draw<F: VertexFormat + ?Sized>(&mut self, format: &F, vertices: &[Vertex]) {
        if vertices.len() % 3 != 0 {
            log::warn!(
                "draw: {} trailing vertices ignored",
                vertices.len() % 3
            );
        }
        let triangles = vertices
            .chunks_exact(3)
            .map(|t| [&t[0], &t[1], &t[2]]);
        self.submit(format, triangles);
    }

    /// Draws an indexed triangle list. Triangles referencing a vertex out of
    /// range are skipped.
    pub fn draw_indexed<F: VertexFormat + ?Sized>(
        &mut self,
        format: &F,
        vertices: &[Vertex],
        indices: &[u32],
    ) {
        if indices.len() % 3 != 0 {
            log::warn!("draw_indexed: {} trailing indices ignored", indices.len() % 3);
        }
        let triangles = indices.chunks_exact(3).filter_map(|t| {
            let fetch = |i: u32| vertices.get(i as usize);
            match (fetch(t[0]), fetch(t[1]), fetch(t[2])) {
                (Some(a), Some(b), Some(c)) => Some([a, b, c]),
                _ => {
                    log::warn!(
                        "draw_indexed: triangle {t:?} out of range for {} vertices",
                        vertices.len()
                    );
                    None
                }
            }
        });
        self.submit(format, triangles);
    }

    #[inline]
    pub fn draw_triangle<F: VertexFormat + ?Sized>(
        &mut self,
        format: &F,
        v0: &Vertex,
        v1: &Vertex,
        v2: &Vertex,
    ) {
        self.submit(format, [[v0, v1, v2]]);
    }

    fn submit<'v, F, I>(&mut self, format: &F, triangles: I)
    where
        F: VertexFormat + ?Sized,
        I: IntoIterator<Item = [&'v Vertex; 3]>,
    {
        let assembler = Assembler::new(format.layout());
        let rasterizer = Rasterizer::new(format, self.target.pixel_format());
        let geometry = Geometry {
            clipper: &self.clipper,
            projection: &self.projection,
            assembler,
        };
        let mut stats = RasterStats::default();

        match self.pool {
            None => {
                let mut rows = FrameRows::new(&mut self.target, &mut self.depth);
                for [v0, v1, v2] in triangles {
                    let polygon = geometry.prepare(format, v0, v1, v2, &mut stats);
                    for [a, b, c] in polygon.fan() {
                        rasterizer.draw_triangle(&mut rows, &[*a, *b, *c], &mut stats);
                    }
                }
            }
            Some(pool) => {
                let mut jobs: Vec<[Vertex; 3]> = Vec::new();
                for [v0, v1, v2] in triangles {
                    let polygon = geometry.prepare(format, v0, v1, v2, &mut stats);
                    jobs.extend(polygon.fan().map(|[a, b, c]| [*a, *b, *c]));
                }

                let banded = BandedRows::new(&mut self.target, &mut self.depth, self.config.band_rows);
                let per_worker = pool.run(&jobs, RasterStats::default, |worker_stats, triangle| {
                    rasterizer.draw_triangle(&mut banded.sink(), triangle, worker_stats);
                });
                for s in &per_worker {
                    stats.merge(s);
                }
                log::trace!("{} fan triangles across {} workers", jobs.len(), per_worker.len());
            }
        }

        log::debug!(
            "draw: {} submitted, {} clipped away, {} rasterized, {} shaded, {} depth rejected",
            stats.triangles_submitted,
            stats.triangles_clipped,
            stats.triangles_rasterized,
            stats.fragments_shaded,
            stats.depth_rejected
        );
        self.stats.merge(&stats);
    }
}

/// Borrowed view of the camera-derived state used before rasterization.
struct Geometry<'a> {
    clipper: &'a Clipper,
    projection: &'a Projection,
    assembler: Assembler<'a>,
}

impl Geometry<'_> {
    /// Clips one view-space triangle and projects the surviving polygon to
    /// screen space. An empty polygon means nothing is visible.
    fn prepare<F: VertexFormat + ?Sized>(
        &self,
        format: &F,
        v0: &Vertex,
        v1: &Vertex,
        v2: &Vertex,
        stats: &mut RasterStats,
    ) -> ClipPolygon {
        stats.triangles_submitted += 1;
        let mut polygon = self.clipper.clip_triangle(&self.assembler, v0, v1, v2);
        stats.polygon_overflows += polygon.overflowed() as u64;

        if polygon.len() < 3 {
            stats.triangles_clipped += 1;
            return polygon;
        }
        for v in polygon.vertices_mut() {
            *v = self.projection.project(format, v);
        }
        polygon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::PixelFormat;
    use crate::vertex::FlatFormat;

    fn config(mode: ExecutionMode) -> RenderConfig {
        RenderConfig {
            width: 4,
            height: 4,
            mode,
            camera: Camera::new(0.1, 10.0, core::f32::consts::FRAC_PI_2, 1.0),
            ..Default::default()
        }
    }

    #[test]
    fn zero_workers_fails_setup() {
        let err = RenderContext::new(config(ExecutionMode::Pooled { workers: 0 })).unwrap_err();
        assert_eq!(err, RasterError::NoWorkers);
    }

    #[test]
    fn mismatched_buffers_fail_setup() {
        let target = RenderTarget::new(4, 4, PixelFormat::Argb8888).unwrap();
        let depth = DepthBuffer::new(2, 2).unwrap();
        let err = RenderContext::with_buffers(RenderConfig::default(), target, depth).unwrap_err();
        assert!(matches!(err, RasterError::DepthSizeMismatch { .. }));
    }

    #[test]
    fn invalid_camera_is_rejected_and_old_kept() {
        let mut ctx = RenderContext::new(config(ExecutionMode::SingleThreaded)).unwrap();
        let before = *ctx.camera();
        assert!(ctx.set_camera(Camera { near: -1.0, ..before }).is_err());
        assert_eq!(*ctx.camera(), before);
    }

    #[test]
    fn leftover_vertices_are_ignored() {
        let mut ctx = RenderContext::new(config(ExecutionMode::SingleThreaded)).unwrap();
        let format = FlatFormat::new(0xFFFF_FFFF);
        let v = [
            FlatFormat::vertex(-0.1, -0.1, 1.0),
            FlatFormat::vertex(0.1, -0.1, 1.0),
            FlatFormat::vertex(0.0, 0.1, 1.0),
            FlatFormat::vertex(0.0, 0.0, 1.0),
        ];
        ctx.draw(&format, &v);
        assert_eq!(ctx.stats().triangles_submitted, 1);
    }

    #[test]
    fn out_of_range_indices_skip_the_triangle() {
        let mut ctx = RenderContext::new(config(ExecutionMode::SingleThreaded)).unwrap();
        let format = FlatFormat::new(0xFFFF_FFFF);
        let v = [
            FlatFormat::vertex(-1.0, -1.0, 1.0),
            FlatFormat::vertex(1.0, -1.0, 1.0),
            FlatFormat::vertex(0.0, 1.0, 1.0),
        ];
        ctx.draw_indexed(&format, &v, &[0, 1, 2, 0, 1, 7]);
        assert_eq!(ctx.stats().triangles_submitted, 1);
        assert!(ctx.stats().fragments_shaded > 0);
    }

    #[test]
    fn clear_resets_buffers_and_stats() {
        let mut ctx = RenderContext::new(config(ExecutionMode::SingleThreaded)).unwrap();
        let format = FlatFormat::new(0xFFFF_FFFF);
        ctx.draw_triangle(
            &format,
            &FlatFormat::vertex(-1.0, -1.0, 1.0),
            &FlatFormat::vertex(1.0, -1.0, 1.0),
            &FlatFormat::vertex(0.0, 1.0, 1.0),
        );
        assert!(ctx.stats().fragments_shaded > 0);

        ctx.clear();
        assert_eq!(ctx.stats(), RasterStats::default());
        assert!(ctx.target().pixels().iter().all(|&p| p == 0xFF00_0000));
        assert!(ctx.depth().values().iter().all(|&z| z == crate::raster::FAR_DEPTH));
    }

    #[test]
    fn triangle_behind_camera_is_counted_as_clipped() {
        let mut ctx = RenderContext::new(config(ExecutionMode::Pooled { workers: 2 })).unwrap();
        let format = FlatFormat::new(0xFFFF_FFFF);
        ctx.draw_triangle(
            &format,
            &FlatFormat::vertex(-1.0, -1.0, -1.0),
            &FlatFormat::vertex(1.0, -1.0, -1.0),
            &FlatFormat::vertex(0.0, 1.0, -1.0),
        );
        let stats = ctx.stats();
        assert_eq!(stats.triangles_clipped, 1);
        assert_eq!(stats.triangles_rasterized, 0);
        assert!(ctx.target().pixels().iter().all(|&p| p == 0xFF00_0000));
    }
}
