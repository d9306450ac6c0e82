use super::Color;

/// Packed 32-bit pixel layouts a render target can hold.
///
/// Channel order is given most-significant byte first, so `Argb8888` stores
/// alpha in bits 24..32 and blue in bits 0..8.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    #[default]
    Argb8888,
    Rgba8888,
}

impl PixelFormat {
    /// Packs a color into this format.
    #[inline]
    pub fn pack(self, color: Color) -> u32 {
        let [r, g, b, a] = color.to_u8().map(u32::from);
        match self {
            PixelFormat::Argb8888 => (a << 24) | (r << 16) | (g << 8) | b,
            PixelFormat::Rgba8888 => (r << 24) | (g << 16) | (b << 8) | a,
        }
    }

    /// Returns `[r, g, b, a]` bytes of a pixel stored in this format.
    #[inline]
    pub fn to_rgba8(self, pixel: u32) -> [u8; 4] {
        let [b0, b1, b2, b3] = pixel.to_be_bytes();
        match self {
            PixelFormat::Argb8888 => [b1, b2, b3, b0],
            PixelFormat::Rgba8888 => [b0, b1, b2, b3],
        }
    }

    #[inline]
    pub fn unpack(self, pixel: u32) -> Color {
        let [r, g, b, a] = self.to_rgba8(pixel);
        Color::from_u8(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_layout() {
        let px = PixelFormat::Argb8888.pack(Color::from_u8(0x11, 0x22, 0x33, 0x44));
        assert_eq!(px, 0x4411_2233);
        assert_eq!(PixelFormat::Argb8888.to_rgba8(px), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn rgba_layout() {
        let px = PixelFormat::Rgba8888.pack(Color::from_u8(0x11, 0x22, 0x33, 0x44));
        assert_eq!(px, 0x1122_3344);
        assert_eq!(PixelFormat::Rgba8888.to_rgba8(px), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn white_is_all_ones_in_both_formats() {
        assert_eq!(PixelFormat::Argb8888.pack(Color::WHITE), 0xFFFF_FFFF);
        assert_eq!(PixelFormat::Rgba8888.pack(Color::WHITE), 0xFFFF_FFFF);
    }
}
