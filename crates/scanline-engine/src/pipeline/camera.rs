use core::f32::consts::{FRAC_PI_2, PI};

use crate::clip::Frustum;
use crate::error::RasterError;
use crate::raster::Projection;

/// Perspective camera at the view-space origin, looking down `+z`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub near: f32,
    pub far: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self { near: 0.1, far: 100.0, fov_y: FRAC_PI_2, aspect: 1.0 }
    }
}

impl Camera {
    #[inline]
    pub const fn new(near: f32, far: f32, fov_y: f32, aspect: f32) -> Self {
        Self { near, far, fov_y, aspect }
    }

    /// Same camera with `aspect` matched to a `width` x `height` target.
    #[inline]
    pub fn with_aspect_of(self, width: usize, height: usize) -> Self {
        Self { aspect: width as f32 / height.max(1) as f32, ..self }
    }

    pub fn validate(&self) -> Result<(), RasterError> {
        if !(self.near.is_finite() && self.near > 0.0) {
            return Err(RasterError::InvalidCamera("near must be positive"));
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(RasterError::InvalidCamera("far must be beyond near"));
        }
        if !(self.fov_y > 0.0 && self.fov_y < PI) {
            return Err(RasterError::InvalidCamera("fov_y must be in (0, pi)"));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(RasterError::InvalidCamera("aspect must be positive"));
        }
        Ok(())
    }

    #[inline]
    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.near, self.far, self.fov_y, self.aspect)
    }

    #[inline]
    pub fn projection(&self, width: usize, height: usize) -> Projection {
        Projection::new(self.fov_y, self.aspect, width, height)
    }
}
