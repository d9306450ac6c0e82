use std::ops::{Add, AddAssign};

/// Counters gathered while drawing.
///
/// Workers each keep their own copy and the totals are summed once the
/// draw call finishes.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct RasterStats {
    /// Input triangles handed to the clipper.
    pub triangles_submitted: u64,
    /// Input triangles with nothing left after clipping.
    pub triangles_clipped: u64,
    /// Fan triangles that reached the rasterizer.
    pub triangles_rasterized: u64,
    /// Fan triangles skipped for zero or non-finite screen area.
    pub degenerate_skipped: u64,
    /// Vertices dropped because a clip polygon was full.
    pub polygon_overflows: u64,
    /// Pixels that passed the depth test and were shaded.
    pub fragments_shaded: u64,
    /// Pixels that failed the depth test.
    pub depth_rejected: u64,
}

impl RasterStats {
    #[inline]
    pub fn merge(&mut self, other: &RasterStats) {
        *self += *other;
    }
}

impl Add for RasterStats {
    type Output = RasterStats;

    fn add(self, rhs: RasterStats) -> RasterStats {
        RasterStats {
            triangles_submitted: self.triangles_submitted + rhs.triangles_submitted,
            triangles_clipped: self.triangles_clipped + rhs.triangles_clipped,
            triangles_rasterized: self.triangles_rasterized + rhs.triangles_rasterized,
            degenerate_skipped: self.degenerate_skipped + rhs.degenerate_skipped,
            polygon_overflows: self.polygon_overflows + rhs.polygon_overflows,
            fragments_shaded: self.fragments_shaded + rhs.fragments_shaded,
            depth_rejected: self.depth_rejected + rhs.depth_rejected,
        }
    }
}

impl AddAssign for RasterStats {
    #[inline]
    fn add_assign(&mut self, rhs: RasterStats) {
        *self = *self + rhs;
    }
}
