pub mod aabox;
pub mod aacube;
pub mod conical_frustum;
pub mod dual_quaternion;
pub mod geometry;
pub mod plane;
pub mod projected_polygon;
pub mod transform;
pub mod triangle_set;
pub mod util;
pub mod view_frustum;

#[cfg(test)]
mod tests;

pub use aabox::{AABox, BoxFace, BoxVertex};
pub use aacube::AACube;
pub use conical_frustum::ConicalViewFrustum;
pub use geometry::Triangle;
pub use plane::Plane;
pub use transform::Transform;
pub use triangle_set::{TriangleHit, TriangleSet};
pub use view_frustum::{Intersection, ViewFrustum};

// small distances below this are treated as zero
pub const EPSILON: f32 = 0.000001;
