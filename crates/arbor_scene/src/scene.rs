//! The scene graph.
//!
//! A `Scene` owns every object and component in two arenas. Ownership is
//! expressed by list membership: the scene's top-level list and each object's
//! child list hold object slots, each object's component list holds
//! component handles. Back-references (parent, owner) are plain handles.
//!
//! All structural edits validate first and mutate second, so a failed edit
//! leaves the graph untouched.

use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering};

use arbor_math::{Aabb, Color, Mat4, Mat4Ext, Quat, Vec3};
use slotmap::SlotMap;

use crate::camera::Camera;
use crate::component::{
    Component, ComponentArena, ComponentId, ComponentKind, ComponentList, ComponentType,
};
use crate::error::{SceneError, SceneResult};
use crate::light::Light;
use crate::list::{Iter, OwnedList};
use crate::object::{ObjectId, ObjectKey, SceneNode, SceneObject};
use crate::primitive::Primitive;
use crate::transform::{LocalTransform, Transform};

/// Name given to the object every scene is created with.
pub const ROOT_NAME: &str = "Root";

static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique scene identity, carried by every [`ObjectId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(u64);

impl SceneId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

type ObjectArena = SlotMap<ObjectKey, SceneObject>;

/// A scene: a forest of objects under a designated, undeletable root.
#[derive(Debug)]
pub struct Scene {
    id: SceneId,
    name: String,
    pub background: Color,
    pub ambient_light: Color,
    objects: ObjectArena,
    components: ComponentArena,
    children: OwnedList<ObjectKey>,
    root: ObjectId,
    current_camera: Option<ObjectId>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        let id = SceneId::next();
        let mut objects = ObjectArena::with_key();
        let mut components = ComponentArena::with_key();

        let root = objects.insert_with_key(|key| {
            let handle = ObjectId::new(id, key);
            SceneObject::new(ROOT_NAME, id, None, ComponentList::new(&mut components, handle))
        });
        let mut children = OwnedList::new();
        children.push_back(&mut objects, root);

        Self {
            id,
            name: name.into(),
            background: Color::splat(0.1),
            ambient_light: Color::splat(0.2),
            objects,
            components,
            children,
            root: ObjectId::new(id, root),
            current_camera: None,
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The object the scene was created with. It can be neither destroyed
    /// nor moved.
    pub fn root(&self) -> ObjectId {
        self.root
    }

    /// The object behind `id`; `None` for stale handles and handles issued
    /// by another scene.
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(self.key(id)?)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        let key = self.key(id)?;
        self.objects.get_mut(key)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.object(id).is_some()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // ---- structure ----

    /// Create an object at the end of `parent`'s child list, or of the
    /// scene's top-level list when `parent` is `None`.
    pub fn create_object(
        &mut self,
        name: impl Into<String>,
        parent: Option<ObjectId>,
    ) -> SceneResult<ObjectId> {
        if let Some(p) = parent {
            self.require(p)?;
        }

        let scene = self.id;
        let components = &mut self.components;
        let key = self.objects.insert_with_key(|key| {
            let handle = ObjectId::new(scene, key);
            SceneObject::new(name, scene, parent, ComponentList::new(components, handle))
        });
        let id = ObjectId::new(scene, key);
        self.with_child_list(parent, |list, objects| list.push_back(objects, key));
        self.refresh_world(id);

        log::debug!(
            "Created object '{}' ({:?}) under {:?}",
            self.objects[key].name(),
            id,
            parent
        );
        Ok(id)
    }

    /// Destroy `id` together with its whole subtree and every component
    /// attached to it.
    pub fn destroy_object(&mut self, id: ObjectId) -> SceneResult<()> {
        let parent = self.objects[self.require(id)?].parent;
        if id == self.root {
            return Err(SceneError::RootObject);
        }

        let key = id.key();
        self.with_child_list(parent, |list, objects| list.unlink(objects, key));

        let mut pending = vec![key];
        let mut destroyed = 0usize;
        while let Some(next) = pending.pop() {
            let Some(mut object) = self.objects.remove(next) else {
                continue;
            };
            while let Some(child) = object.children.pop_front(&mut self.objects) {
                pending.push(child);
            }
            object.components.release_all(&mut self.components, |cid, component| {
                log::trace!("Released {} component {:?}", component.type_name(), cid);
            });
            if self.current_camera == Some(ObjectId::new(self.id, next)) {
                self.current_camera = None;
            }
            destroyed += 1;
        }

        log::debug!("Destroyed object {:?} ({} objects in subtree)", id, destroyed);
        Ok(())
    }

    /// Move `id` to the end of `new_parent`'s child list (or the top-level
    /// list). The local transform is kept, so the world placement follows
    /// the new parent.
    ///
    /// Moving an object under its current parent does nothing.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> SceneResult<()> {
        let old_parent = self.objects[self.require(id)?].parent;
        if old_parent == new_parent {
            return Ok(());
        }
        if id == self.root {
            return Err(SceneError::RootObject);
        }
        if let Some(p) = new_parent {
            self.require(p)?;
            if p == id || self.is_ancestor(id, p) {
                return Err(SceneError::InvalidParent { object: id });
            }
        }

        // The arena keeps the object alive while it belongs to neither list
        let moved = id.key();
        let unlinked = self.with_child_list(old_parent, |list, objects| list.unlink(objects, moved));
        debug_assert!(unlinked, "object missing from its parent's child list");
        self.with_child_list(new_parent, |list, objects| list.push_back(objects, moved));
        if let Some(object) = self.objects.get_mut(moved) {
            object.parent = new_parent;
        }
        self.refresh_world(id);

        log::debug!(
            "Reparented {:?} from {:?} to {:?}",
            id,
            old_parent,
            new_parent
        );
        Ok(())
    }

    // ---- queries ----

    /// Children of `parent` in insertion order; `None` lists the top-level
    /// objects. Unknown parents have no children.
    pub fn children(&self, parent: Option<ObjectId>) -> Children<'_> {
        let list = match parent {
            Some(p) => self.object(p).map(|o| o.children).unwrap_or_default(),
            None => self.children,
        };
        Children {
            scene: self.id,
            inner: list.iter(&self.objects),
        }
    }

    /// Every object, depth-first pre-order, siblings in list order.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst::new(self.id, &self.objects, self.children(None))
    }

    /// Every descendant of `id` (excluding `id`), depth-first pre-order.
    pub fn descendants(&self, id: ObjectId) -> DepthFirst<'_> {
        DepthFirst::new(self.id, &self.objects, self.children(Some(id)))
    }

    /// True if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = self.object(id).and_then(|o| o.parent);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.object(p).and_then(|o| o.parent);
        }
        false
    }

    /// First object named `name` in depth-first order.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.depth_first()
            .find(|&id| self.object(id).is_some_and(|o| o.name() == name))
    }

    // ---- transforms ----

    pub fn transform(&self, id: ObjectId) -> Option<&Transform> {
        let object = self.object(id)?;
        let entry = self.components.get(object.components.transform())?;
        Transform::from_component(&entry.component)
    }

    pub fn local_transform(&self, id: ObjectId) -> Option<LocalTransform> {
        self.transform(id).map(Transform::local)
    }

    pub fn set_local_transform(&mut self, id: ObjectId, local: LocalTransform) -> SceneResult<()> {
        self.update_transform(id, |t| t.set_local(local))
    }

    pub fn set_local_position(&mut self, id: ObjectId, position: Vec3) -> SceneResult<()> {
        self.update_transform(id, |t| t.set_local_position(position))
    }

    pub fn set_local_rotation(&mut self, id: ObjectId, rotation: Quat) -> SceneResult<()> {
        self.update_transform(id, |t| t.set_local_rotation(rotation))
    }

    /// Set the local rotation from Euler angles in degrees.
    pub fn set_local_euler_angles(&mut self, id: ObjectId, degrees: Vec3) -> SceneResult<()> {
        self.update_transform(id, |t| t.set_local_euler_angles(degrees))
    }

    pub fn set_local_scale(&mut self, id: ObjectId, scale: Vec3) -> SceneResult<()> {
        self.update_transform(id, |t| t.set_local_scale(scale))
    }

    /// World-space bounds of the object's primitive mesh, if it has one.
    pub fn world_bounds(&self, id: ObjectId) -> Option<Aabb> {
        let mesh = self.component::<Primitive>(id)?.mesh()?;
        let transform = self.transform(id)?;
        Some(transform.local_to_world_matrix().transform_aabb(&mesh.bounds))
    }

    // ---- components ----

    /// Attach `component` to `id`, refusing a second component of the same
    /// kind (a second `Transform` included).
    pub fn add_component(
        &mut self,
        id: ObjectId,
        component: impl Into<Component>,
    ) -> SceneResult<ComponentId> {
        let key = self.require(id)?;
        let object = &mut self.objects[key];
        let component = component.into();
        let kind = component.kind();
        let cid = object.components.add(&mut self.components, id, component)?;
        log::debug!("Added {} component to {:?}", kind, id);
        Ok(cid)
    }

    /// Detach and return the component of `kind`. The transform cannot be
    /// removed.
    pub fn remove_component(&mut self, id: ObjectId, kind: ComponentKind) -> SceneResult<Component> {
        let key = self.require(id)?;
        let object = &mut self.objects[key];
        let removed = object.components.remove(&mut self.components, id, kind)?;
        if kind == ComponentKind::Camera && self.current_camera == Some(id) {
            self.current_camera = None;
        }
        log::debug!("Removed {} component from {:?}", kind, id);
        Ok(removed)
    }

    pub fn component<T: ComponentType>(&self, id: ObjectId) -> Option<&T> {
        let object = self.object(id)?;
        let cid = object.components.find(&self.components, T::KIND)?;
        T::from_component(&self.components.get(cid)?.component)
    }

    /// Mutable typed access. Transforms are edited through the
    /// `set_local_*` methods instead, so this returns `None` for them.
    pub fn component_mut<T: ComponentType>(&mut self, id: ObjectId) -> Option<&mut T> {
        if T::KIND == ComponentKind::Transform {
            return None;
        }
        let object = self.object(id)?;
        let cid = object.components.find(&self.components, T::KIND)?;
        T::from_component_mut(&mut self.components.get_mut(cid)?.component)
    }

    pub fn has_component(&self, id: ObjectId, kind: ComponentKind) -> bool {
        self.object(id)
            .is_some_and(|o| o.components.find(&self.components, kind).is_some())
    }

    /// Components of `id` in list order; the transform always comes first.
    pub fn components(&self, id: ObjectId) -> impl Iterator<Item = (ComponentId, &Component)> + '_ {
        let list = self.object(id).map(|o| o.components);
        list.into_iter()
            .flat_map(move |l| l.iter(&self.components))
            .filter_map(move |cid| self.components.get(cid).map(|e| (cid, &e.component)))
    }

    pub fn component_count(&self, id: ObjectId) -> usize {
        self.object(id).map_or(0, SceneObject::component_count)
    }

    pub fn component_owner(&self, cid: ComponentId) -> Option<ObjectId> {
        self.components.get(cid).map(|e| e.owner)
    }

    // ---- lights and cameras ----

    /// Every light with its object, depth-first.
    pub fn lights(&self) -> impl Iterator<Item = (ObjectId, &Light)> + '_ {
        self.depth_first()
            .filter_map(move |id| self.component::<Light>(id).map(|light| (id, light)))
    }

    /// World direction of the light attached to `id`.
    pub fn light_direction(&self, id: ObjectId) -> Option<Vec3> {
        let light = self.component::<Light>(id)?;
        Some(light.world_direction(self.transform(id)?.rotation()))
    }

    pub fn current_camera(&self) -> Option<ObjectId> {
        self.current_camera
    }

    /// Select the camera object renders default to. The object must carry a
    /// `Camera` component.
    pub fn set_current_camera(&mut self, id: Option<ObjectId>) -> SceneResult<()> {
        if let Some(id) = id {
            self.require(id)?;
            if self.component::<Camera>(id).is_none() {
                return Err(SceneError::MissingComponent {
                    object: id,
                    kind: ComponentKind::Camera,
                });
            }
        }
        self.current_camera = id;
        Ok(())
    }

    // ---- internals ----

    /// Arena slot of `id` if the handle was issued by this scene.
    fn key(&self, id: ObjectId) -> Option<ObjectKey> {
        (id.scene() == self.id).then(|| id.key())
    }

    /// Arena slot of a live object of this scene.
    fn require(&self, id: ObjectId) -> SceneResult<ObjectKey> {
        self.key(id)
            .filter(|&key| self.objects.contains_key(key))
            .ok_or(SceneError::UnknownObject(id))
    }

    /// Run `f` on the child list of `parent` (or the top-level list).
    fn with_child_list<R>(
        &mut self,
        parent: Option<ObjectId>,
        f: impl FnOnce(&mut OwnedList<ObjectKey>, &mut ObjectArena) -> R,
    ) -> R {
        let parent = parent.and_then(|p| self.key(p));
        let mut list = match parent {
            Some(p) => self.objects.get(p).map(|o| o.children).unwrap_or_default(),
            None => self.children,
        };
        let result = f(&mut list, &mut self.objects);
        match parent {
            Some(p) => {
                if let Some(object) = self.objects.get_mut(p) {
                    object.children = list;
                }
            }
            None => self.children = list,
        }
        result
    }

    fn update_transform(&mut self, id: ObjectId, f: impl FnOnce(&mut Transform)) -> SceneResult<()> {
        let key = self.require(id)?;
        let cid = self.objects[key].components.transform();
        if let Some(transform) = self
            .components
            .get_mut(cid)
            .and_then(|e| Transform::from_component_mut(&mut e.component))
        {
            f(transform);
        }
        self.refresh_world(id);
        Ok(())
    }

    /// Recompute cached world matrices for `id` and its subtree, parents
    /// before children.
    fn refresh_world(&mut self, id: ObjectId) {
        let Some(key) = self.key(id) else {
            return;
        };
        let mut stack = vec![key];
        while let Some(next) = stack.pop() {
            let Some(object) = self.objects.get(next) else {
                continue;
            };
            let parent_to_world = object
                .parent
                .and_then(|p| self.transform(p))
                .map_or(Mat4::IDENTITY, Transform::local_to_world_matrix);
            let cid = object.components.transform();
            stack.extend(object.children.iter(&self.objects));

            if let Some(transform) = self
                .components
                .get_mut(cid)
                .and_then(|e| Transform::from_component_mut(&mut e.component))
            {
                transform.update_world(parent_to_world);
            }
        }
    }
}

impl SceneNode for Scene {
    fn name(&self) -> &str {
        &self.name
    }

    /// Number of top-level objects.
    fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Children of one object (or the scene's top-level objects), in list
/// order. Reversible.
pub struct Children<'a> {
    scene: SceneId,
    inner: Iter<'a, ObjectKey, SceneObject>,
}

impl Iterator for Children<'_> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<ObjectId> {
        self.inner.next().map(|key| ObjectId::new(self.scene, key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<ObjectId> {
        self.inner.next_back().map(|key| ObjectId::new(self.scene, key))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl FusedIterator for Children<'_> {}

/// Pre-order depth-first walk over a scene's objects.
pub struct DepthFirst<'a> {
    scene: SceneId,
    objects: &'a ObjectArena,
    stack: Vec<ObjectKey>,
}

impl<'a> DepthFirst<'a> {
    fn new(scene: SceneId, objects: &'a ObjectArena, roots: Children<'a>) -> Self {
        Self {
            scene,
            objects,
            stack: roots.inner.rev().collect(),
        }
    }
}

impl Iterator for DepthFirst<'_> {
    type Item = ObjectId;

    fn next(&mut self) -> Option<ObjectId> {
        let key = self.stack.pop()?;
        if let Some(object) = self.objects.get(key) {
            self.stack.extend(object.children.iter(self.objects).rev());
        }
        Some(ObjectId::new(self.scene, key))
    }
}
