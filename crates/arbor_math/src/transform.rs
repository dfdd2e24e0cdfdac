// Transform utilities for Mat4
//
// glam::Mat4 already provides transform_point3(), transform_vector3() and inverse().

use crate::Aabb;
use glam::{Mat4, Vec3};

/// Extension trait for Mat4 used by the scene graph and the tracer.
pub trait Mat4Ext {
    /// Inverse of the matrix, or `None` when it is singular (e.g. zero scale).
    fn try_inverse(&self) -> Option<Mat4>;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl Mat4Ext for Mat4 {
    fn try_inverse(&self) -> Option<Mat4> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(self.inverse())
    }

    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        if aabb.is_empty() {
            return Aabb::EMPTY;
        }
        let (lo, hi) = (aabb.min, aabb.max);
        (0..8).fold(Aabb::EMPTY, |acc, i| {
            let corner = Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            );
            acc.grow(self.transform_point3(corner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_inverse_singular() {
        let mat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(mat.try_inverse().is_none());
    }

    #[test]
    fn test_try_inverse_round_trip() {
        let mat = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4)
            * Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let inv = mat.try_inverse().unwrap();

        let point = Vec3::new(5.0, 3.0, 2.0);
        let back = inv.transform_point3(mat.transform_point3(point));
        assert!((back - point).length() < 0.001);
    }

    #[test]
    fn test_transform_aabb_translation() {
        let mat = Mat4::from_translation(Vec3::splat(5.0));
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let transformed = mat.transform_aabb(&aabb);

        assert!((transformed.min - Vec3::splat(5.0)).length() < 0.001);
        assert!((transformed.max - Vec3::splat(6.0)).length() < 0.001);
    }

    #[test]
    fn test_transform_aabb_rotation_grows_box() {
        let mat = Mat4::from_rotation_z(std::f32::consts::FRAC_PI_4);
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let transformed = mat.transform_aabb(&aabb);

        let half_diagonal = 2.0_f32.sqrt();
        assert!((transformed.max.x - half_diagonal).abs() < 0.001);
        assert!((transformed.max.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_transform_empty_aabb() {
        assert!(Mat4::IDENTITY.transform_aabb(&Aabb::EMPTY).is_empty());
    }
}
