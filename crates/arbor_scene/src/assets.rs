//! Named mesh assets shared by primitives.

use std::collections::BTreeMap;
use std::sync::Arc;

use arbor_math::Vec3;

use crate::mesh::Mesh;
use crate::primitive::Primitive;

/// Registry name that stands for "no mesh".
pub const NO_MESH: &str = "None";

/// Named meshes. Every primitive made from the registry shares the same
/// `Arc<Mesh>` for a given name.
#[derive(Debug, Default, Clone)]
pub struct MeshRegistry {
    meshes: BTreeMap<String, Arc<Mesh>>,
}

impl MeshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in "Box" and "Sphere" meshes.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert("Box", Mesh::cuboid(Vec3::ONE));
        registry.insert("Sphere", Mesh::sphere(0.5, 32));
        registry
    }

    /// Register `mesh` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, mesh: Mesh) -> Arc<Mesh> {
        let name = name.into();
        let mesh = Arc::new(mesh);
        log::debug!(
            "Registered mesh '{}' ({} triangles)",
            name,
            mesh.triangle_count()
        );
        self.meshes.insert(name, mesh.clone());
        mesh
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Mesh>> {
        self.meshes.get(name)
    }

    /// Registered names, sorted, preceded by [`NO_MESH`].
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(NO_MESH).chain(self.meshes.keys().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Build a primitive for `name`. [`NO_MESH`] yields a primitive without
    /// geometry; unknown names yield `None`.
    pub fn make_primitive(&self, name: &str) -> Option<Primitive> {
        if name == NO_MESH {
            return Some(Primitive::default());
        }
        self.get(name).map(|mesh| Primitive::new(mesh.clone(), name))
    }
}
