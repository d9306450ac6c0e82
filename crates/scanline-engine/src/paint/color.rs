use glam::Vec4;

/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
///
/// This is the value shading functions compute with. It is packed into the
/// render target's [`PixelFormat`](super::PixelFormat) only when written.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from `0`–`255` channel bytes.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Reads a color out of a 4-component attribute (`x=r, y=g, z=b, w=a`).
    #[inline]
    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    #[inline]
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    /// Clamps all channels to `[0, 1]`. Non-finite channels become `0`.
    #[inline]
    pub fn clamped(self) -> Self {
        fn c(v: f32) -> f32 {
            if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
        }
        Self::new(c(self.r), c(self.g), c(self.b), c(self.a))
    }

    /// Converts to `0`–`255` channel bytes, rounding to nearest.
    #[inline]
    pub fn to_u8(self) -> [u8; 4] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_u8_rounds_and_clamps() {
        assert_eq!(Color::new(1.5, -0.2, 0.5, 1.0).to_u8(), [255, 0, 128, 255]);
    }

    #[test]
    fn non_finite_channels_clamp_to_zero() {
        let c = Color::new(f32::NAN, f32::INFINITY, 0.25, 1.0).clamped();
        assert_eq!(c, Color::new(0.0, 0.0, 0.25, 1.0));
    }

    #[test]
    fn from_u8_round_trips() {
        let c = Color::from_u8(12, 34, 56, 78);
        assert_eq!(c.to_u8(), [12, 34, 56, 78]);
    }
}
