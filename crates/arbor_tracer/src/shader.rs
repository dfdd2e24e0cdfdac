//! Shading seam of the tracer.

use arbor_math::{Color, Ray};
use arbor_scene::Primitive;

use crate::intersection::Intersection;
use crate::tracer::RayTracer;

/// Computes the color of a confirmed hit.
///
/// Implementations that spawn secondary rays call [`RayTracer::trace`] with
/// `level + 1` and a reduced `weight`, and should stop recursing once the
/// weight drops below the tracer's `min_weight`. Occlusion toward a light is
/// tested with [`RayTracer::shadow`].
pub trait Shader: Send + Sync {
    fn shade(
        &self,
        tracer: &RayTracer<'_>,
        ray: &Ray,
        hit: &Intersection,
        level: u32,
        weight: f32,
    ) -> Color;
}

/// Flat shading: the hit primitive's diffuse color, no lighting.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatShader;

impl Shader for FlatShader {
    fn shade(
        &self,
        tracer: &RayTracer<'_>,
        _ray: &Ray,
        hit: &Intersection,
        _level: u32,
        _weight: f32,
    ) -> Color {
        hit.object
            .and_then(|id| tracer.scene().component::<Primitive>(id))
            .map_or(Color::ZERO, |primitive| primitive.material.diffuse)
    }
}
