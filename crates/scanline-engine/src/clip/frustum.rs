use glam::{Vec3, Vec4};

use super::plane::Plane;

/// Index of each plane inside a [`Frustum`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FrustumPlane {
    Near = 0,
    Left = 1,
    Right = 2,
    Top = 3,
    Bottom = 4,
    Far = 5,
}

impl FrustumPlane {
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Near,
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Top,
        FrustumPlane::Bottom,
        FrustumPlane::Far,
    ];
}

/// Six view-space planes bounding what a camera can see.
///
/// View space convention: camera at the origin looking down `+z`, `+x`
/// right, `+y` up. A point is visible when it is inside all six planes.
///
/// Planes are derived from `near`, `far`, vertical field of view (radians)
/// and aspect ratio (width / height). They must be rebuilt whenever any of
/// those change; stale planes are not detected.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    pub fn new(near: f32, far: f32, fov_y: f32, aspect: f32) -> Self {
        let tan_y = (fov_y * 0.5).tan();
        let tan_x = tan_y * aspect;

        // Side planes pass through the origin: x + z*tan_x >= 0 keeps the
        // region right of the left plane, and so on.
        Self {
            planes: [
                Plane::new(Vec3::Z, -near),
                Plane::new(Vec3::new(1.0, 0.0, tan_x), 0.0),
                Plane::new(Vec3::new(-1.0, 0.0, tan_x), 0.0),
                Plane::new(Vec3::new(0.0, -1.0, tan_y), 0.0),
                Plane::new(Vec3::new(0.0, 1.0, tan_y), 0.0),
                Plane::new(Vec3::NEG_Z, far),
            ],
        }
    }

    #[inline]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    #[inline]
    pub fn plane(&self, which: FrustumPlane) -> &Plane {
        &self.planes[which as usize]
    }

    /// `true` if `p` is inside (or on) every plane.
    #[inline]
    pub fn contains(&self, p: Vec4) -> bool {
        self.planes.iter().all(|plane| plane.contains(p))
    }
}
