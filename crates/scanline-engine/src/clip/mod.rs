//! Frustum clipping.
//!
//! Triangles are clipped in view space against six planes. The output is a
//! small convex polygon that the rasterizer fan-triangulates.

mod clipper;
mod frustum;
mod plane;
mod polygon;

pub use clipper::Clipper;
pub use frustum::{Frustum, FrustumPlane};
pub use plane::Plane;
pub use polygon::{CLIP_POLYGON_CAPACITY, ClipPolygon};
