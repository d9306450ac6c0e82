use crate::error::RasterError;
use crate::vertex::Vertex;

/// Vertex capacity of a [`ClipPolygon`].
///
/// Clipping a triangle by six planes adds at most one vertex per plane
/// (9 total); the extra room absorbs numerically degenerate cases.
pub const CLIP_POLYGON_CAPACITY: usize = 16;

/// Convex polygon produced by clipping one triangle.
///
/// Fixed capacity, stack allocated, created per triangle. Pushing past
/// capacity is refused and the polygon keeps its previous contents.
#[derive(Clone)]
pub struct ClipPolygon {
    vertices: [Vertex; CLIP_POLYGON_CAPACITY],
    len: usize,
    overflowed: usize,
}

impl ClipPolygon {
    #[inline]
    pub const fn new() -> Self {
        Self { vertices: [Vertex::zeroed(); CLIP_POLYGON_CAPACITY], len: 0, overflowed: 0 }
    }

    #[inline]
    pub fn from_triangle(v0: &Vertex, v1: &Vertex, v2: &Vertex) -> Self {
        let mut p = Self::new();
        p.vertices[0] = *v0;
        p.vertices[1] = *v1;
        p.vertices[2] = *v2;
        p.len = 3;
        p
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices[..self.len]
    }

    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices[..self.len]
    }

    /// Number of pushes refused for lack of capacity since creation.
    #[inline]
    pub fn overflowed(&self) -> usize {
        self.overflowed
    }

    /// Adds `other`'s refused pushes to this polygon's count.
    #[inline]
    pub(super) fn absorb_overflows(&mut self, other: &ClipPolygon) {
        self.overflowed += other.overflowed;
    }

    /// Clears vertices; the overflow count is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Appends a vertex.
    pub fn push(&mut self, vertex: Vertex) -> Result<(), RasterError> {
        if self.len == CLIP_POLYGON_CAPACITY {
            self.overflowed += 1;
            log::warn!("clip polygon full ({CLIP_POLYGON_CAPACITY} vertices); dropping vertex");
            return Err(RasterError::PolygonFull { capacity: CLIP_POLYGON_CAPACITY });
        }
        self.vertices[self.len] = vertex;
        self.len += 1;
        Ok(())
    }

    /// Fan triangulation: `(v0, v[i+1], v[i+2])` for `i in 0..len-2`.
    ///
    /// Yields nothing for polygons with fewer than three vertices.
    pub fn fan(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        let v = self.vertices();
        (1..v.len().saturating_sub(1)).map(move |i| [&v[0], &v[i], &v[i + 1]])
    }

    /// Number of triangles [`fan`](Self::fan) yields.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.len.saturating_sub(2)
    }
}

impl Default for ClipPolygon {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ClipPolygon {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClipPolygon")
            .field("vertices", &self.vertices())
            .field("overflowed", &self.overflowed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(i: u8) -> Vertex {
        Vertex::from_bytes(&[i])
    }

    #[test]
    fn push_past_capacity_is_refused() {
        let mut p = ClipPolygon::new();
        for i in 0..CLIP_POLYGON_CAPACITY {
            p.push(tagged(i as u8)).unwrap();
        }
        let err = p.push(tagged(99)).unwrap_err();
        assert_eq!(err, RasterError::PolygonFull { capacity: CLIP_POLYGON_CAPACITY });
        assert_eq!(p.len(), CLIP_POLYGON_CAPACITY);
        assert_eq!(p.overflowed(), 1);
        assert_eq!(p.vertices()[CLIP_POLYGON_CAPACITY - 1], tagged(15));
    }

    #[test]
    fn fan_shares_first_vertex() {
        let mut p = ClipPolygon::new();
        for i in 0..5 {
            p.push(tagged(i)).unwrap();
        }
        let tris: Vec<[u8; 3]> = p
            .fan()
            .map(|[a, b, c]| [a.as_bytes()[0], b.as_bytes()[0], c.as_bytes()[0]])
            .collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
        assert_eq!(p.triangle_count(), 3);
    }

    #[test]
    fn fan_of_degenerate_polygon_is_empty() {
        let mut p = ClipPolygon::new();
        p.push(tagged(0)).unwrap();
        p.push(tagged(1)).unwrap();
        assert_eq!(p.fan().count(), 0);
        assert_eq!(p.triangle_count(), 0);
        assert_eq!(ClipPolygon::new().fan().count(), 0);
    }
}
