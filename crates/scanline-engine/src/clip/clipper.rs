use super::frustum::Frustum;
use super::plane::Plane;
use super::polygon::ClipPolygon;
use crate::vertex::{Assembler, Vertex};

/// How one polygon edge `a -> b` relates to a plane.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum EdgeClass {
    /// Both ends inside: keep `a`.
    Inside,
    /// `a` inside, `b` outside: keep `a`, then the crossing.
    Leaving,
    /// `a` outside, `b` inside: keep the crossing only.
    Entering,
    /// Both ends outside: keep nothing.
    Outside,
}

impl EdgeClass {
    /// A distance of exactly zero is inside.
    #[inline]
    fn of(da: f32, db: f32) -> Self {
        match (da >= 0.0, db >= 0.0) {
            (true, true) => EdgeClass::Inside,
            (true, false) => EdgeClass::Leaving,
            (false, true) => EdgeClass::Entering,
            (false, false) => EdgeClass::Outside,
        }
    }
}

/// Sutherland–Hodgman clipper against a view frustum.
///
/// Each plane pass reads the current polygon and writes a fresh one, so no
/// vertex is ever removed from a list that is still being walked.
#[derive(Debug, Clone)]
pub struct Clipper {
    frustum: Frustum,
}

impl Clipper {
    #[inline]
    pub fn new(frustum: Frustum) -> Self {
        Self { frustum }
    }

    /// Rebuilds the six planes from camera parameters.
    #[inline]
    pub fn build_frustum(&mut self, near: f32, far: f32, fov_y: f32, aspect: f32) {
        self.frustum = Frustum::new(near, far, fov_y, aspect);
    }

    #[inline]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Clips a triangle against every frustum plane in order.
    ///
    /// The result has 0 or 3..=9 vertices in the winding order of the input.
    /// Fewer than three vertices means nothing is visible.
    pub fn clip_triangle(
        &self,
        assembler: &Assembler<'_>,
        v0: &Vertex,
        v1: &Vertex,
        v2: &Vertex,
    ) -> ClipPolygon {
        self.clip_polygon(assembler, ClipPolygon::from_triangle(v0, v1, v2))
    }

    /// Clips a convex polygon against every frustum plane in order.
    ///
    /// The returned polygon's [`overflowed`](ClipPolygon::overflowed) count
    /// covers every pass.
    pub fn clip_polygon(&self, assembler: &Assembler<'_>, polygon: ClipPolygon) -> ClipPolygon {
        let mut current = polygon;
        let mut next = ClipPolygon::new();

        for plane in self.frustum.planes() {
            // Fast path: nothing to do when every vertex is inside.
            if current
                .vertices()
                .iter()
                .all(|v| plane.contains(assembler.position(v)))
            {
                continue;
            }

            clip_against_plane(assembler, plane, &current, &mut next);
            core::mem::swap(&mut current, &mut next);

            if current.len() < 3 {
                log::trace!("triangle clipped away");
                current.clear();
                break;
            }
        }

        // Passes alternate between the two buffers, so each holds part of the count.
        current.absorb_overflows(&next);
        current
    }
}

/// One Sutherland–Hodgman pass. `output` is cleared first.
///
/// Crossings are always interpolated from the inside end toward the outside
/// end, so an edge shared by two triangles yields bit-identical vertices no
/// matter which direction each triangle walks it.
fn clip_against_plane(
    assembler: &Assembler<'_>,
    plane: &Plane,
    input: &ClipPolygon,
    output: &mut ClipPolygon,
) {
    let overflowed = output.overflowed();
    output.clear();

    let verts = input.vertices();
    let n = verts.len();

    for i in 0..n {
        let a = &verts[i];
        let b = &verts[(i + 1) % n];
        let da = plane.signed_distance(assembler.position(a));
        let db = plane.signed_distance(assembler.position(b));

        // Push failures are logged and counted by the polygon itself.
        match EdgeClass::of(da, db) {
            EdgeClass::Inside => {
                let _ = output.push(*a);
            }
            EdgeClass::Leaving => {
                let _ = output.push(*a);
                // An inside end exactly on the plane already is the crossing.
                if da > 0.0 {
                    let _ = output.push(crossing(assembler, a, da, b, db));
                }
            }
            EdgeClass::Entering => {
                if db > 0.0 {
                    let _ = output.push(crossing(assembler, b, db, a, da));
                }
            }
            EdgeClass::Outside => {}
        }
    }

    if output.overflowed() > overflowed {
        log::warn!(
            "clip pass dropped {} vertices",
            output.overflowed() - overflowed
        );
    }
}

#[inline]
fn crossing(
    assembler: &Assembler<'_>,
    inside: &Vertex,
    d_in: f32,
    outside: &Vertex,
    d_out: f32,
) -> Vertex {
    let t = d_in / (d_in - d_out);
    assembler.interpolate(inside, outside, t)
}
