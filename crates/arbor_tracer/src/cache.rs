//! Session-wide cache of per-mesh BVHs.
//!
//! Entries are keyed by mesh identity (the `Arc<Mesh>` allocation), so every
//! primitive sharing a mesh shares one BVH. Entries are never evicted. Each
//! BVH keeps its mesh alive, which keeps the key from being reused.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use arbor_scene::{Mesh, Primitive, Scene};

use crate::bvh::Bvh;
use crate::config::DEFAULT_LEAF_SIZE;

/// Thread-safe, append-only map from mesh to BVH.
#[derive(Debug)]
pub struct BvhCache {
    leaf_size: usize,
    entries: RwLock<HashMap<usize, Arc<Bvh>>>,
    builds: AtomicUsize,
}

impl Default for BvhCache {
    fn default() -> Self {
        Self::new(DEFAULT_LEAF_SIZE)
    }
}

fn mesh_key(mesh: &Arc<Mesh>) -> usize {
    Arc::as_ptr(mesh) as usize
}

impl BvhCache {
    pub fn new(leaf_size: usize) -> Self {
        Self {
            leaf_size: leaf_size.max(1),
            entries: RwLock::new(HashMap::new()),
            builds: AtomicUsize::new(0),
        }
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Cached BVH for `mesh`, building it on first request.
    ///
    /// Concurrent first requests for the same mesh build it once.
    pub fn get_or_build(&self, mesh: &Arc<Mesh>) -> Arc<Bvh> {
        let key = mesh_key(mesh);
        if let Some(bvh) = self.get_by_key(key) {
            return bvh;
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(key)
            .or_insert_with(|| {
                self.builds.fetch_add(1, Ordering::Relaxed);
                Arc::new(Bvh::new(mesh.clone(), self.leaf_size))
            })
            .clone()
    }

    /// Cached BVH for `mesh`, without building.
    pub fn get(&self, mesh: &Arc<Mesh>) -> Option<Arc<Bvh>> {
        self.get_by_key(mesh_key(mesh))
    }

    fn get_by_key(&self, key: usize) -> Option<Arc<Bvh>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&key).cloned()
    }

    /// Build BVHs for every mesh referenced by a primitive in `scene`.
    ///
    /// Returns the number of distinct meshes found.
    pub fn prebuild(&self, scene: &Scene) -> usize {
        let mut seen = std::collections::HashSet::new();
        let mut nodes = 0;
        for id in scene.depth_first() {
            let Some(mesh) = scene.component::<Primitive>(id).and_then(Primitive::mesh) else {
                continue;
            };
            if seen.insert(mesh_key(mesh)) {
                nodes += self.get_or_build(mesh).node_count();
            }
        }
        log::debug!("Prebuilt BVHs for {} meshes ({} nodes)", seen.len(), nodes);
        seen.len()
    }

    /// Number of cached BVHs.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of BVHs built since the cache was created.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}
