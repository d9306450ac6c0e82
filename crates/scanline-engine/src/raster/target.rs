use crate::error::RasterError;
use crate::paint::{Color, PixelFormat};

/// Depth value a cleared depth buffer holds. Every real fragment is nearer.
pub const FAR_DEPTH: f32 = f32::INFINITY;

/// Color buffer the rasterizer writes into.
///
/// Row-major, top row first, one packed `u32` per pixel in `pixel_format`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    width: usize,
    height: usize,
    pixel_format: PixelFormat,
    pixels: Vec<u32>,
}

impl RenderTarget {
    pub fn new(width: usize, height: usize, pixel_format: PixelFormat) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSizedTarget { width, height });
        }
        Ok(Self { width, height, pixel_format, pixels: vec![0; width * height] })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Packed pixel at `(x, y)`, or `None` outside the target.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn clear(&mut self, color: Color) {
        let packed = self.pixel_format.pack(color);
        self.pixels.fill(packed);
    }

    /// Exports the buffer as tightly packed RGBA8 rows, top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&px| self.pixel_format.to_rgba8(px))
            .collect()
    }
}

/// Per-pixel view-space depth, sized identically to its [`RenderTarget`].
///
/// Smaller is nearer. Cleared to [`FAR_DEPTH`].
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSizedTarget { width, height });
        }
        Ok(Self { width, height, values: vec![FAR_DEPTH; width * height] })
    }

    /// Builds a depth buffer matching `target`.
    #[inline]
    pub fn for_target(target: &RenderTarget) -> Self {
        Self {
            width: target.width(),
            height: target.height(),
            values: vec![FAR_DEPTH; target.width() * target.height()],
        }
    }

    /// Checks that this buffer can be paired with `target`.
    pub fn check_matches(&self, target: &RenderTarget) -> Result<(), RasterError> {
        if self.width != target.width() || self.height != target.height() {
            return Err(RasterError::DepthSizeMismatch {
                width: target.width(),
                height: target.height(),
                depth_width: self.width,
                depth_height: self.height,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.values[y * self.width + x])
    }

    #[inline]
    pub fn clear(&mut self) {
        self.values.fill(FAR_DEPTH);
    }
}
