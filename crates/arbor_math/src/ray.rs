use crate::{Interval, Mat4, Mat4Ext, Vec3};

/// A ray in 3D space restricted to the parameter range `[t_min, t_max]`.
///
/// Points along the ray are `origin + t * direction`. The direction is not
/// required to be unit length; when it is, `t` is a world-space distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub t_min: f32,
    pub t_max: f32,
}

impl Ray {
    /// Create an unbounded ray starting at `origin`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            t_min: 0.0,
            t_max: f32::INFINITY,
        }
    }

    /// Create a ray from `origin` towards `target`, with a unit direction.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, (target - origin).normalize_or_zero())
    }

    /// Restrict the ray to `[t_min, t_max]`.
    pub fn with_extent(mut self, t_min: f32, t_max: f32) -> Self {
        self.t_min = t_min;
        self.t_max = t_max;
        self
    }

    /// The valid parameter range as an interval.
    #[inline]
    pub fn extent(&self) -> Interval {
        Interval::new(self.t_min, self.t_max)
    }

    /// Get the point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Map the ray through an affine transform.
    ///
    /// The direction is transformed but not renormalized, so a parameter `t`
    /// names the same point in both spaces and hit distances stay comparable.
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
            t_min: self.t_min,
            t_max: self.t_max,
        }
    }
}
