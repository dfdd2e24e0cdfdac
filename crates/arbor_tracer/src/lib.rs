//! Arbor Tracer - CPU ray tracing of Arbor scenes
//!
//! Every primitive's mesh gets a bounding volume hierarchy built in the
//! mesh's local space and cached per mesh. Rays are carried into each
//! primitive's local space, so instanced meshes share one BVH.
//!
//! ```no_run
//! use arbor_scene::Scene;
//! use arbor_tracer::{ImageBuffer, RayTracer, TracerConfig};
//!
//! # fn run(scene: &Scene) -> arbor_tracer::RenderResult<()> {
//! let mut tracer = RayTracer::new(scene, TracerConfig::default().with_parallel(true));
//! let mut image = ImageBuffer::new(320, 240);
//! tracer.render_image(&mut image)?;
//! image.save_png("out.png")?;
//! # Ok(())
//! # }
//! ```

mod bvh;
mod cache;
mod config;
mod error;
mod image_buffer;
mod intersection;
mod shader;
mod tracer;
mod triangle;

pub use bvh::{Bvh, BvhNode};
pub use cache::BvhCache;
pub use config::{TracerConfig, DEFAULT_LEAF_SIZE, MIN_WEIGHT};
pub use error::{RenderError, RenderResult};
pub use image_buffer::{color_to_rgba, ImageBuffer, ImageSink};
pub use intersection::Intersection;
pub use shader::{FlatShader, Shader};
pub use tracer::{RayTracer, RenderStats, Renderer};
pub use triangle::{intersect_mesh, intersect_mesh_triangle, intersect_triangle, TriangleHit};

/// Re-export common math types from arbor_math
pub use arbor_math::{Color, Ray, Vec3};
