//! Renderable primitive component: a shared mesh plus surface material.

use std::sync::Arc;

use arbor_math::Color;

use crate::mesh::Mesh;

/// Phong-style surface description used by the tracer's shaders.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub spot: Color,
    /// Specular exponent
    pub shine: f32,
    pub specular: Color,
    pub transparency: Color,
    /// Index of refraction
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::splat(0.2),
            diffuse: Color::splat(0.8),
            spot: Color::ONE,
            shine: 0.0,
            specular: Color::ZERO,
            transparency: Color::ZERO,
            ior: 1.0,
        }
    }
}

impl Material {
    /// Create a material with the given diffuse color and defaults elsewhere.
    pub fn with_diffuse(diffuse: Color) -> Self {
        Self {
            diffuse,
            ..Default::default()
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency.max_element() > 0.0
    }
}

/// A mesh instance placed by its object's transform.
///
/// The mesh is optional: a primitive without one is skipped by the tracer.
#[derive(Clone, Debug, Default)]
pub struct Primitive {
    mesh: Option<Arc<Mesh>>,
    mesh_name: String,
    pub material: Material,
}

impl Primitive {
    pub fn new(mesh: Arc<Mesh>, mesh_name: impl Into<String>) -> Self {
        Self {
            mesh: Some(mesh),
            mesh_name: mesh_name.into(),
            material: Material::default(),
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        self.mesh.as_ref()
    }

    pub fn mesh_name(&self) -> &str {
        &self.mesh_name
    }

    pub fn set_mesh(&mut self, mesh: Option<Arc<Mesh>>, mesh_name: impl Into<String>) {
        self.mesh = mesh;
        self.mesh_name = mesh_name.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_math::Vec3;

    #[test]
    fn test_default_has_no_mesh() {
        let primitive = Primitive::default();
        assert!(primitive.mesh().is_none());
        assert_eq!(primitive.material, Material::default());
        assert!(!primitive.material.is_transparent());
    }

    #[test]
    fn test_primitives_share_mesh() {
        let mesh = Arc::new(Mesh::cuboid(Vec3::ONE));
        let a = Primitive::new(mesh.clone(), "Box");
        let b = Primitive::new(mesh.clone(), "Box").with_material(Material::with_diffuse(Color::X));

        assert!(Arc::ptr_eq(a.mesh().unwrap(), b.mesh().unwrap()));
        assert_eq!(b.material.diffuse, Color::X);
        assert_eq!(Arc::strong_count(&mesh), 3);
    }
}
