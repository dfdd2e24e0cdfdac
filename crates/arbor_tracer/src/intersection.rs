//! Nearest-hit record threaded through a ray query.

use arbor_math::Vec3;
use arbor_scene::ObjectId;

/// Result of a ray query. Private to one ray; never shared between pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the nearest hit so far
    pub distance: f32,
    /// Barycentric coordinates `(1 - b1 - b2, b1, b2)`
    pub p: Vec3,
    pub triangle_index: usize,
    /// Object whose primitive was hit; `None` means no hit
    pub object: Option<ObjectId>,
}

impl Intersection {
    /// Empty record accepting hits up to `max_distance`.
    pub fn new(max_distance: f32) -> Self {
        Self {
            distance: max_distance,
            p: Vec3::ZERO,
            triangle_index: 0,
            object: None,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.object.is_some()
    }
}

impl Default for Intersection {
    fn default() -> Self {
        Self::new(f32::INFINITY)
    }
}
