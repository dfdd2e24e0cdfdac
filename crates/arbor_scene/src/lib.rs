//! Arbor Scene - hierarchical scene graph for the editor and the ray tracer.
//!
//! This crate provides:
//!
//! - **Scene graph**: `Scene` owns every `SceneObject` in an arena; parents own
//!   an ordered child list, objects own an ordered component list.
//! - **Components**: `Transform` (mandatory, always first), `Primitive`,
//!   `Light` and `Camera`, addressed by `ComponentKind` or by type.
//! - **Assets**: `Mesh` geometry and the `MeshRegistry` of named meshes.
//!
//! # Example
//!
//! ```
//! use arbor_scene::{MeshRegistry, Scene};
//! use arbor_math::Vec3;
//!
//! let assets = MeshRegistry::with_defaults();
//! let mut scene = Scene::new("Example");
//!
//! let ball = scene.create_object("Ball", None).unwrap();
//! scene.add_component(ball, assets.make_primitive("Sphere").unwrap()).unwrap();
//! scene.set_local_position(ball, Vec3::new(0.0, 1.0, 0.0)).unwrap();
//!
//! assert_eq!(scene.component_count(ball), 2);
//! ```

pub mod assets;
pub mod camera;
pub mod component;
pub mod error;
pub mod light;
pub mod list;
pub mod mesh;
pub mod object;
pub mod primitive;
pub mod scene;
pub mod transform;

// Re-export commonly used types
pub use assets::{MeshRegistry, NO_MESH};
pub use camera::{Camera, ProjectionType};
pub use component::{Component, ComponentId, ComponentKind, ComponentType};
pub use error::{SceneError, SceneResult};
pub use light::{Light, LightType};
pub use mesh::Mesh;
pub use object::{ObjectId, SceneNode, SceneObject};
pub use primitive::{Material, Primitive};
pub use scene::{Children, DepthFirst, Scene, SceneId};
pub use transform::{LocalTransform, Transform};
