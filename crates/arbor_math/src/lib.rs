// Re-export glam for convenience
pub use glam::*;

// Arbor math types
mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;

/// Linear RGB color, one channel per component.
pub type Color = Vec3;
