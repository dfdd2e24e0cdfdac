use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box used by the BVH.
///
/// An empty box has `min > max` on every axis and is never hit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// The empty box, identity for [`Aabb::grow`] and [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create an AABB from two corner points (in any order).
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point, or `EMPTY` for no points.
    pub fn from_slice(points: &[Vec3]) -> Self {
        points.iter().fold(Self::EMPTY, |acc, &p| acc.grow(p))
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Extend the box to contain `p`.
    pub fn grow(self, p: Vec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn extent(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let e = self.extent();
        if e.x > e.y && e.x > e.z {
            0
        } else if e.y > e.z {
            1
        } else {
            2
        }
    }

    /// Slab test: does the ray cross the box anywhere inside `range`?
    ///
    /// Boxes are closed, so a ray grazing a flat (zero-thickness) box still
    /// counts as a hit.
    pub fn hit(&self, ray: &Ray, range: Interval) -> bool {
        if self.is_empty() {
            return false;
        }
        let mut t = range;
        for axis in 0..3 {
            let inv = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // NaN (origin on a slab plane, direction parallel) leaves t unchanged
            t.min = t0.max(t.min);
            t.max = t1.min(t.max);
            if t.max < t.min {
                return false;
            }
        }
        true
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
