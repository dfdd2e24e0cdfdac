//! Exact ray/triangle and brute-force ray/mesh intersection.
//!
//! Solves the two-barycentric linear system directly (Möller-Trumbore).

use arbor_math::{Ray, Vec3};
use arbor_scene::Mesh;

use crate::intersection::Intersection;

/// Accepted hit of a single triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter of the hit point
    pub distance: f32,
    pub b1: f32,
    pub b2: f32,
}

impl TriangleHit {
    /// Barycentric coordinates `(1 - b1 - b2, b1, b2)`.
    pub fn barycentric(&self) -> Vec3 {
        Vec3::new(1.0 - self.b1 - self.b2, self.b1, self.b2)
    }
}

/// Intersect `ray` with triangle `(v0, v1, v2)`.
///
/// Rays parallel to the triangle's plane, hits behind the origin and hits
/// outside the triangle are rejected. The ray's extent is not checked here.
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<TriangleHit> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let s1 = ray.direction.cross(e2);

    let s1e1 = s1.dot(e1);
    if s1e1 == 0.0 {
        return None;
    }

    let s = ray.origin - v0;
    let s2 = s.cross(e1);
    let distance = s2.dot(e2) / s1e1;
    // Also rejects NaN from a degenerate (zero area) triangle
    if !(distance >= 0.0) {
        return None;
    }

    let b1 = s1.dot(s) / s1e1;
    let b2 = s2.dot(ray.direction) / s1e1;
    if b1 < 0.0 || b2 < 0.0 || b1 + b2 > 1.0 {
        return None;
    }

    Some(TriangleHit { distance, b1, b2 })
}

/// Try to improve `hit` with triangle `index` of `mesh`.
///
/// Accepts a hit inside `[ray.t_min, ray.t_max]` that is strictly closer
/// than `hit.distance`. Does not touch `hit.object`.
pub fn intersect_mesh_triangle(ray: &Ray, mesh: &Mesh, index: usize, hit: &mut Intersection) -> bool {
    let Some([v0, v1, v2]) = mesh.triangle(index) else {
        return false;
    };
    match intersect_triangle(ray, v0, v1, v2) {
        Some(t) if ray.extent().contains(t.distance) && t.distance < hit.distance => {
            hit.distance = t.distance;
            hit.p = t.barycentric();
            hit.triangle_index = index;
            true
        }
        _ => false,
    }
}

/// Test every triangle of `mesh`, keeping the closest hit strictly nearer
/// than the incumbent in `hit`.
///
/// This is the unaccelerated reference path; scene traversal goes through
/// the BVH instead.
pub fn intersect_mesh(ray: &Ray, mesh: &Mesh, hit: &mut Intersection) -> bool {
    let mut found = false;
    for index in 0..mesh.triangle_count() {
        found |= intersect_mesh_triangle(ray, mesh, index, hit);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const V0: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    const V1: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const V2: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    #[test]
    fn test_hit_inside_triangle() {
        let ray = Ray::towards(Vec3::new(0.2, 0.2, 1.0), Vec3::new(0.2, 0.2, -1.0));
        let hit = intersect_triangle(&ray, V0, V1, V2).unwrap();

        assert!((hit.distance - 1.0).abs() < 1e-6);
        assert!(hit.b1 >= 0.0 && hit.b2 >= 0.0);
        assert!(hit.b1 + hit.b2 <= 1.0);
        assert!((hit.b1 - 0.2).abs() < 1e-6);
        assert!((hit.b2 - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_miss_outside_triangle() {
        let ray = Ray::towards(Vec3::new(2.0, 2.0, 1.0), Vec3::new(2.0, 2.0, -1.0));
        assert!(intersect_triangle(&ray, V0, V1, V2).is_none());
    }

    #[test]
    fn test_parallel_and_behind() {
        let parallel = Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::X);
        assert!(intersect_triangle(&parallel, V0, V1, V2).is_none());

        // Triangle behind the origin
        let away = Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::Z);
        assert!(intersect_triangle(&away, V0, V1, V2).is_none());
    }

    #[test]
    fn test_back_face_is_hit() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);
        let hit = intersect_triangle(&ray, V0, V1, V2).unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_triangle() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        assert!(intersect_triangle(&ray, V0, V0, V0).is_none());
    }

    #[test]
    fn test_mesh_keeps_closest() {
        let mesh = Mesh::cuboid(Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.1, 0.1, 5.0), Vec3::NEG_Z);
        let mut hit = Intersection::new(ray.t_max);

        assert!(intersect_mesh(&ray, &mesh, &mut hit));
        assert!((hit.distance - 4.5).abs() < 1e-5);
        assert!(hit.object.is_none());

        // An incumbent closer than the box is kept
        let mut closer = Intersection::new(2.0);
        assert!(!intersect_mesh(&ray, &mesh, &mut closer));
        assert_eq!(closer.distance, 2.0);
    }
}
