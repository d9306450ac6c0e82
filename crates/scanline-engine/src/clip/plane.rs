use glam::{Vec3, Vec4};

/// Half-space `normal · p + distance * w >= 0`.
///
/// The normal points into the kept half-space, so points with a non-negative
/// signed distance are inside. Normals are not required to be unit length;
/// only the sign of the distance and the ratio between two distances are used.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    #[inline]
    pub const fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Signed distance of a homogeneous point. Non-negative means inside.
    #[inline]
    pub fn signed_distance(&self, p: Vec4) -> f32 {
        self.normal.dot(p.truncate()) + self.distance * p.w
    }

    #[inline]
    pub fn contains(&self, p: Vec4) -> bool {
        self.signed_distance(p) >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_plane_counts_as_inside() {
        let near = Plane::new(Vec3::Z, -0.5);
        assert_eq!(near.signed_distance(Vec4::new(3.0, -2.0, 0.5, 1.0)), 0.0);
        assert!(near.contains(Vec4::new(3.0, -2.0, 0.5, 1.0)));
    }

    #[test]
    fn distance_scales_with_w() {
        let p = Plane::new(Vec3::X, 1.0);
        assert_eq!(p.signed_distance(Vec4::new(0.0, 0.0, 0.0, 2.0)), 2.0);
        assert!(!p.contains(Vec4::new(-3.0, 0.0, 0.0, 1.0)));
    }
}
