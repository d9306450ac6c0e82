use std::sync::{Mutex, PoisonError};

use super::target::{DepthBuffer, RenderTarget};

/// Row-granular access to a color buffer and its depth buffer.
///
/// The rasterizer touches pixels one scanline at a time, so the sink hands out
/// one row of each buffer per call. Implementations decide how that access is
/// synchronized.
pub trait RowSink {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Runs `f` with row `y` of the color and depth buffers.
    ///
    /// `y` must be below `height()`.
    fn with_row<R>(&mut self, y: usize, f: impl FnOnce(&mut [u32], &mut [f32]) -> R) -> R;
}

// ── single-threaded ───────────────────────────────────────────────────────

/// Exclusive access to a whole target. Used by the single-threaded path.
pub struct FrameRows<'a> {
    color: &'a mut [u32],
    depth: &'a mut [f32],
    width: usize,
    height: usize,
}

impl<'a> FrameRows<'a> {
    /// The two buffers must have matching dimensions; see
    /// [`DepthBuffer::check_matches`].
    pub fn new(target: &'a mut RenderTarget, depth: &'a mut DepthBuffer) -> Self {
        let width = target.width().min(depth.width());
        let height = target.height().min(depth.height());
        Self { color: target.pixels_mut(), depth: depth.values_mut(), width, height }
    }
}

impl RowSink for FrameRows<'_> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn with_row<R>(&mut self, y: usize, f: impl FnOnce(&mut [u32], &mut [f32]) -> R) -> R {
        let start = y * self.width;
        let end = start + self.width;
        f(&mut self.color[start..end], &mut self.depth[start..end])
    }
}

// ── banded ────────────────────────────────────────────────────────────────

struct Band<'a> {
    first_row: usize,
    color: &'a mut [u32],
    depth: &'a mut [f32],
}

/// A target split into horizontal bands, each behind its own lock.
///
/// Workers lock the band owning a scanline for the duration of that scanline,
/// which makes each per-pixel depth test and write atomic with respect to
/// other workers. Distinct bands never contend.
pub struct BandedRows<'a> {
    bands: Vec<Mutex<Band<'a>>>,
    band_rows: usize,
    width: usize,
    height: usize,
}

impl<'a> BandedRows<'a> {
    /// `band_rows` of zero is treated as one.
    pub fn new(target: &'a mut RenderTarget, depth: &'a mut DepthBuffer, band_rows: usize) -> Self {
        let band_rows = band_rows.max(1);
        let width = target.width().min(depth.width());
        let height = target.height().min(depth.height());
        let band_len = band_rows * width;

        let bands = target
            .pixels_mut()
            .chunks_mut(band_len)
            .zip(depth.values_mut().chunks_mut(band_len))
            .enumerate()
            .map(|(i, (color, depth))| Mutex::new(Band { first_row: i * band_rows, color, depth }))
            .collect();

        Self { bands, band_rows, width, height }
    }

    #[inline]
    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// A sink view for one worker.
    #[inline]
    pub fn sink(&self) -> SharedRows<'_, 'a> {
        SharedRows { rows: self }
    }
}

/// Per-worker handle onto [`BandedRows`].
#[derive(Copy, Clone)]
pub struct SharedRows<'s, 'a> {
    rows: &'s BandedRows<'a>,
}

impl RowSink for SharedRows<'_, '_> {
    #[inline]
    fn width(&self) -> usize {
        self.rows.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.rows.height
    }

    fn with_row<R>(&mut self, y: usize, f: impl FnOnce(&mut [u32], &mut [f32]) -> R) -> R {
        let width = self.rows.width;
        // A panicking shader poisons the lock but leaves the band's pixels
        // valid, so keep rendering.
        let mut band = self.rows.bands[y / self.rows.band_rows]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let band = &mut *band;
        let start = (y - band.first_row) * width;
        f(&mut band.color[start..start + width], &mut band.depth[start..start + width])
    }
}
