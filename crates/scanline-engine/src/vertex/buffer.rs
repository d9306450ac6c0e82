use bytemuck::Pod;

use super::layout::{Attribute, MAX_VERTEX_SIZE};

/// Raw bytes of one vertex.
///
/// The buffer has a fixed capacity of [`MAX_VERTEX_SIZE`] bytes and no meaning
/// of its own; an [`Assembler`](super::Assembler) interprets it through the
/// active [`VertexLayout`](super::VertexLayout). Bytes past the layout's stride
/// are carried along unchanged.
#[derive(Copy, Clone, PartialEq)]
pub struct Vertex {
    bytes: [u8; MAX_VERTEX_SIZE],
}

impl Vertex {
    #[inline]
    pub const fn zeroed() -> Self {
        Self { bytes: [0; MAX_VERTEX_SIZE] }
    }

    /// Copies `bytes` into a new vertex.
    ///
    /// Input longer than the capacity is truncated (and logged).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut v = Self::zeroed();
        let n = bytes.len().min(MAX_VERTEX_SIZE);
        if n < bytes.len() {
            log::warn!(
                "vertex data is {} bytes, truncating to {MAX_VERTEX_SIZE}",
                bytes.len()
            );
        }
        v.bytes[..n].copy_from_slice(&bytes[..n]);
        v
    }

    /// Copies a plain-old-data vertex struct into an opaque vertex.
    #[inline]
    pub fn from_pod<T: Pod>(value: &T) -> Self {
        Self::from_bytes(bytemuck::bytes_of(value))
    }

    /// Reads the leading bytes back as a plain-old-data struct.
    ///
    /// Returns `None` if `T` is larger than the vertex capacity.
    #[inline]
    pub fn to_pod<T: Pod>(&self) -> Option<T> {
        self.bytes
            .get(..size_of::<T>())
            .map(bytemuck::pod_read_unaligned)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    // ── attribute cursor ──────────────────────────────────────────────────
    //
    // Offsets come from validated layouts, so every slot is in bounds.

    #[inline]
    pub(crate) fn read_f32(&self, offset: usize) -> f32 {
        bytemuck::pod_read_unaligned(&self.bytes[offset..offset + 4])
    }

    #[inline]
    pub(crate) fn write_f32(&mut self, offset: usize, value: f32) {
        self.bytes[offset..offset + 4].copy_from_slice(bytemuck::bytes_of(&value));
    }

    /// Reads an attribute into the leading lanes of a 4-vector. Missing lanes are zero.
    #[inline]
    pub(crate) fn read_attribute(&self, attr: &Attribute) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (c, lane) in out.iter_mut().enumerate().take(attr.format.components()) {
            *lane = self.read_f32(attr.offset + c * 4);
        }
        out
    }

    /// Writes the leading lanes of a 4-vector into an attribute. Extra lanes are dropped.
    #[inline]
    pub(crate) fn write_attribute(&mut self, attr: &Attribute, value: [f32; 4]) {
        for (c, lane) in value.iter().enumerate().take(attr.format.components()) {
            self.write_f32(attr.offset + c * 4, *lane);
        }
    }
}

impl Default for Vertex {
    #[inline]
    fn default() -> Self {
        Self::zeroed()
    }
}

impl core::fmt::Debug for Vertex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Trailing zero bytes are noise; show the populated prefix only.
        let used = self.bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        f.debug_struct("Vertex").field("bytes", &&self.bytes[..used]).finish()
    }
}
