//! Per-mesh bounding volume hierarchy (BVH).
//!
//! A binary tree over a mesh's triangle indices, built once by median split
//! and queried with rays already mapped into the mesh's local space.

use std::sync::Arc;

use arbor_math::{Aabb, Interval, Ray, Vec3};
use arbor_scene::Mesh;

use crate::intersection::Intersection;
use crate::triangle::intersect_mesh_triangle;

/// Padding added around triangle boxes so rounding never culls a hit.
const PAD: f32 = 1e-4;

/// BVH node - either a branch with two children or a leaf with triangles.
#[derive(Debug)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node holding at most `leaf_size` triangle indices.
    Leaf { triangles: Vec<usize>, bbox: Aabb },
    /// Mesh without usable triangles.
    Empty,
}

/// Triangle reference used while building.
#[derive(Clone, Copy)]
struct TriangleRef {
    index: usize,
    bbox: Aabb,
    centroid: Vec3,
}

/// BVH over the triangles of one shared mesh.
#[derive(Debug)]
pub struct Bvh {
    mesh: Arc<Mesh>,
    root: BvhNode,
    leaf_size: usize,
    node_count: usize,
}

impl Bvh {
    /// Build a BVH whose leaves hold at most `leaf_size` triangles.
    pub fn new(mesh: Arc<Mesh>, leaf_size: usize) -> Self {
        let leaf_size = leaf_size.max(1);
        let triangle_count = mesh.triangle_count();

        let refs: Vec<TriangleRef> = (0..triangle_count)
            .filter_map(|index| {
                let vertices = mesh.triangle(index)?;
                let tight = Aabb::from_slice(&vertices);
                let bbox = Aabb::from_points(tight.min - Vec3::splat(PAD), tight.max + Vec3::splat(PAD));
                Some(TriangleRef {
                    index,
                    bbox,
                    centroid: bbox.centroid(),
                })
            })
            .collect();

        if refs.len() < triangle_count {
            log::warn!(
                "Mesh has {} triangles with out-of-range vertex indices; skipping them",
                triangle_count - refs.len()
            );
        }

        let mut node_count = 0;
        let root = if refs.is_empty() {
            BvhNode::Empty
        } else {
            Self::build(refs, leaf_size, &mut node_count)
        };

        log::debug!(
            "Built BVH: {} triangles, {} nodes, leaf size {}",
            triangle_count,
            node_count,
            leaf_size
        );

        Self {
            mesh,
            root,
            leaf_size,
            node_count,
        }
    }

    /// Recursive construction.
    ///
    /// Median split: sort triangles by centroid on the longest axis of the
    /// centroid bounds, split in half, recurse.
    fn build(mut refs: Vec<TriangleRef>, leaf_size: usize, node_count: &mut usize) -> BvhNode {
        *node_count += 1;

        let bbox = refs
            .iter()
            .fold(Aabb::EMPTY, |acc, r| Aabb::surrounding(&acc, &r.bbox));

        if refs.len() <= leaf_size {
            return BvhNode::Leaf {
                triangles: refs.iter().map(|r| r.index).collect(),
                bbox,
            };
        }

        let centroid_bounds = refs.iter().fold(Aabb::EMPTY, |acc, r| acc.grow(r.centroid));
        let axis = centroid_bounds.longest_axis();
        refs.sort_unstable_by(|a, b| a.centroid[axis].total_cmp(&b.centroid[axis]));

        let right = refs.split_off(refs.len() / 2);
        let left = refs;

        BvhNode::Branch {
            left: Box::new(Self::build(left, leaf_size, node_count)),
            right: Box::new(Self::build(right, leaf_size, node_count)),
            bbox,
        }
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn root(&self) -> &BvhNode {
        &self.root
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Find a hit closer than `hit.distance` within the ray's extent.
    ///
    /// `ray` must be in the mesh's local space. Updates distance,
    /// barycentrics and triangle index of `hit` but never `hit.object`.
    pub fn intersect(&self, ray: &Ray, hit: &mut Intersection) -> bool {
        self.root.intersect(&self.mesh, ray, hit)
    }
}

impl BvhNode {
    pub fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }

    fn intersect(&self, mesh: &Mesh, ray: &Ray, hit: &mut Intersection) -> bool {
        // Only boxes in front of the current best hit can improve it
        let range = Interval::new(ray.t_min, ray.t_max.min(hit.distance));
        if range.is_empty() || !self.bounding_box().hit(ray, range) {
            return false;
        }

        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { triangles, .. } => {
                let mut found = false;
                for &index in triangles {
                    found |= intersect_mesh_triangle(ray, mesh, index, hit);
                }
                found
            }

            BvhNode::Branch { left, right, .. } => {
                let hit_left = left.intersect(mesh, ray, hit);
                let hit_right = right.intersect(mesh, ray, hit);
                hit_left || hit_right
            }
        }
    }
}
