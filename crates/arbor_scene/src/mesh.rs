//! Triangle mesh geometry.
//!
//! Meshes are immutable once built and shared between primitives through
//! `Arc<Mesh>`; the tracer keys its acceleration structures on that sharing.
//! Triangles are wound counter-clockwise when seen from outside.

use std::f32::consts::{PI, TAU};

use arbor_math::{Aabb, Vec3};

/// A mesh consisting of vertex positions, optional normals, and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (optional)
    pub normals: Option<Vec<Vec3>>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box of `positions`
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a new mesh from positions and indices, optionally with normals.
    ///
    /// Normals are not computed automatically; call `compute_normals()`.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> Self {
        let bounds = Aabb::from_slice(&positions);
        Self {
            positions,
            normals,
            indices,
            bounds,
        }
    }

    /// Axis-aligned box centred on the origin with per-face normals.
    pub fn cuboid(size: Vec3) -> Self {
        let half = size * 0.5;
        // (normal, u, v) with u x v = normal
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (n, u, v) in faces {
            let base = positions.len() as u32;
            for corner in [n - u - v, n + u - v, n + u + v, n - u + v] {
                positions.push(corner * half);
                normals.push(n);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(positions, indices, Some(normals))
    }

    /// UV sphere centred on the origin.
    ///
    /// `segments` is the number of slices around Y; the sphere gets half as
    /// many stacks.
    pub fn sphere(radius: f32, segments: u32) -> Self {
        let slices = segments.max(3);
        let stacks = (slices / 2).max(2);
        let row = slices + 1;

        let mut positions = Vec::with_capacity((row * (stacks + 1)) as usize);
        let mut normals = Vec::with_capacity(positions.capacity());

        for i in 0..=stacks {
            let phi = PI * i as f32 / stacks as f32;
            for j in 0..=slices {
                let theta = TAU * j as f32 / slices as f32;
                let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
                positions.push(n * radius);
                normals.push(n);
            }
        }

        let mut indices = Vec::new();
        for i in 0..stacks {
            for j in 0..slices {
                let a = i * row + j;
                let b = a + row;
                // Pole rows collapse one of the two triangles
                if i != 0 {
                    indices.extend_from_slice(&[a, a + 1, b]);
                }
                if i != stacks - 1 {
                    indices.extend_from_slice(&[a + 1, b + 1, b]);
                }
            }
        }

        Self::new(positions, indices, Some(normals))
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Replaces any existing normals.
    pub fn compute_normals(&mut self) {
        let vertex_count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; vertex_count];

        for face in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [face[0] as usize, face[1] as usize, face[2] as usize];
            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                continue;
            }

            let p0 = self.positions[i0];
            let face_normal = (self.positions[i1] - p0).cross(self.positions[i2] - p0);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            // Degenerate vertices point up
            *normal = normal.try_normalize().unwrap_or(Vec3::Y);
        }

        self.normals = Some(normals);
    }

    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Vertices of triangle `index`, `None` when out of range or when the
    /// triangle references a missing vertex.
    pub fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
        let face = self.indices.get(index * 3..index * 3 + 3)?;
        Some([
            *self.positions.get(face[0] as usize)?,
            *self.positions.get(face[1] as usize)?,
            *self.positions.get(face[2] as usize)?,
        ])
    }

    /// Interpolated normal at barycentric `(1 - b1 - b2, b1, b2)` of a
    /// triangle, falling back to the geometric normal.
    pub fn normal_at(&self, index: usize, b1: f32, b2: f32) -> Option<Vec3> {
        let [p0, p1, p2] = self.triangle(index)?;
        let face = &self.indices[index * 3..index * 3 + 3];
        let smooth = self.normals.as_ref().and_then(|normals| {
            let n0 = normals.get(face[0] as usize)?;
            let n1 = normals.get(face[1] as usize)?;
            let n2 = normals.get(face[2] as usize)?;
            (*n0 * (1.0 - b1 - b2) + *n1 * b1 + *n2 * b2).try_normalize()
        });
        smooth.or_else(|| (p1 - p0).cross(p2 - p0).try_normalize())
    }
}
