//! Scene objects: named nodes owning a child list and a component list.

use crate::component::ComponentList;
use crate::list::{Linked, Links, OwnedList};
use crate::scene::SceneId;

slotmap::new_key_type! {
    /// Slot of a scene object in its scene's arena.
    pub(crate) struct ObjectKey;
}

/// Stable handle of a scene object.
///
/// Arena slots repeat from scene to scene, so the handle also names its
/// scene; a scene refuses handles issued by another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    scene: SceneId,
    key: ObjectKey,
}

impl ObjectId {
    pub(crate) fn new(scene: SceneId, key: ObjectKey) -> Self {
        Self { scene, key }
    }

    /// The scene that issued this handle.
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    pub(crate) fn key(&self) -> ObjectKey {
        self.key
    }
}

/// Anything that owns an ordered list of child objects: the scene itself
/// (its top-level objects) or another object.
pub trait SceneNode {
    fn name(&self) -> &str;
    fn child_count(&self) -> usize;
}

/// A named node of the scene graph.
///
/// Objects are created and destroyed through [`crate::Scene`], which keeps
/// the parent, child and component links consistent.
#[derive(Debug)]
pub struct SceneObject {
    name: String,
    pub visible: bool,
    scene: SceneId,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: OwnedList<ObjectKey>,
    pub(crate) components: ComponentList,
    links: Links<ObjectKey>,
}

impl SceneObject {
    pub(crate) fn new(
        name: impl Into<String>,
        scene: SceneId,
        parent: Option<ObjectId>,
        components: ComponentList,
    ) -> Self {
        Self {
            name: name.into(),
            visible: true,
            scene,
            parent,
            children: OwnedList::new(),
            components,
            links: Links::new(),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The scene this object belongs to.
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Parent object, `None` for top-level objects.
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl SceneNode for SceneObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl Linked<ObjectKey> for SceneObject {
    fn links(&self) -> &Links<ObjectKey> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<ObjectKey> {
        &mut self.links
    }
}
