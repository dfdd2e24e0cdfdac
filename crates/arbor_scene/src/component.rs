//! Component model: a closed set of behaviours attached to scene objects.
//!
//! Each object owns a component list whose head is its `Transform`. The list
//! holds at most one component per [`ComponentKind`], and the head can never
//! be removed, so every object always has exactly one transform.

use std::fmt;

use slotmap::SlotMap;

use crate::camera::Camera;
use crate::error::{SceneError, SceneResult};
use crate::light::Light;
use crate::list::{Iter, Linked, Links, OwnedList};
use crate::object::ObjectId;
use crate::primitive::Primitive;
use crate::transform::Transform;

slotmap::new_key_type! {
    /// Stable handle of a component inside its scene.
    pub struct ComponentId;
}

/// Discriminant of a component's behavioural type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Transform,
    Primitive,
    Light,
    Camera,
}

impl ComponentKind {
    /// Stable type tag, as shown in the inspector.
    pub const fn type_name(self) -> &'static str {
        match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::Primitive => "Primitive",
            ComponentKind::Light => "Light",
            ComponentKind::Camera => "Camera",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A behaviour attached to exactly one scene object.
#[derive(Debug, Clone)]
pub enum Component {
    Transform(Transform),
    Primitive(Primitive),
    Light(Light),
    Camera(Camera),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Transform(_) => ComponentKind::Transform,
            Component::Primitive(_) => ComponentKind::Primitive,
            Component::Light(_) => ComponentKind::Light,
            Component::Camera(_) => ComponentKind::Camera,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }
}

/// Typed access to one variant of [`Component`].
///
/// Lets callers write `scene.component::<Light>(id)` instead of matching on
/// a runtime tag.
pub trait ComponentType: Into<Component> + Sized {
    const KIND: ComponentKind;

    fn from_component(component: &Component) -> Option<&Self>;
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

macro_rules! component_type {
    ($variant:ident) => {
        impl ComponentType for $variant {
            const KIND: ComponentKind = ComponentKind::$variant;

            fn from_component(component: &Component) -> Option<&Self> {
                match component {
                    Component::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                match component {
                    Component::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$variant> for Component {
            fn from(inner: $variant) -> Self {
                Component::$variant(inner)
            }
        }
    };
}

component_type!(Transform);
component_type!(Primitive);
component_type!(Light);
component_type!(Camera);

/// Arena slot of a component: the component plus its owner and list links.
#[derive(Debug)]
pub(crate) struct ComponentEntry {
    pub(crate) owner: ObjectId,
    pub(crate) component: Component,
    links: Links<ComponentId>,
}

impl Linked<ComponentId> for ComponentEntry {
    fn links(&self) -> &Links<ComponentId> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<ComponentId> {
        &mut self.links
    }
}

pub(crate) type ComponentArena = SlotMap<ComponentId, ComponentEntry>;

/// An object's component list. The head is always the object's transform.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ComponentList {
    list: OwnedList<ComponentId>,
    transform: ComponentId,
}

impl ComponentList {
    /// Create the list with a fresh identity transform at its head.
    pub(crate) fn new(arena: &mut ComponentArena, owner: ObjectId) -> Self {
        let transform = arena.insert(ComponentEntry {
            owner,
            component: Component::Transform(Transform::default()),
            links: Links::new(),
        });
        let mut list = OwnedList::new();
        list.push_back(arena, transform);
        Self { list, transform }
    }

    pub(crate) fn transform(&self) -> ComponentId {
        self.transform
    }

    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    pub(crate) fn iter<'a>(&self, arena: &'a ComponentArena) -> Iter<'a, ComponentId, ComponentEntry> {
        self.list.iter(arena)
    }

    /// Linear scan by kind; the list holds at most one entry per kind.
    pub(crate) fn find(&self, arena: &ComponentArena, kind: ComponentKind) -> Option<ComponentId> {
        self.iter(arena)
            .find(|&id| arena.get(id).is_some_and(|e| e.component.kind() == kind))
    }

    /// Append `component`, refusing a second component of the same kind.
    pub(crate) fn add(
        &mut self,
        arena: &mut ComponentArena,
        owner: ObjectId,
        component: Component,
    ) -> SceneResult<ComponentId> {
        let kind = component.kind();
        if self.find(arena, kind).is_some() {
            return Err(SceneError::DuplicateComponent {
                object: owner,
                kind,
            });
        }
        let id = arena.insert(ComponentEntry {
            owner,
            component,
            links: Links::new(),
        });
        self.list.push_back(arena, id);
        Ok(id)
    }

    /// Unlink and free the component of `kind`, handing it back.
    ///
    /// The transform at the head is refused.
    pub(crate) fn remove(
        &mut self,
        arena: &mut ComponentArena,
        owner: ObjectId,
        kind: ComponentKind,
    ) -> SceneResult<Component> {
        if kind == ComponentKind::Transform {
            return Err(SceneError::TransformRemoval);
        }
        let missing = SceneError::MissingComponent {
            object: owner,
            kind,
        };
        let Some(id) = self.find(arena, kind) else {
            return Err(missing);
        };
        if !self.list.unlink(arena, id) {
            return Err(missing);
        }
        arena.remove(id).map(|entry| entry.component).ok_or(missing)
    }

    /// Free every component, tail first, so the transform goes last.
    /// `released` sees each component as it leaves the arena.
    pub(crate) fn release_all(
        &mut self,
        arena: &mut ComponentArena,
        mut released: impl FnMut(ComponentId, Component),
    ) {
        while let Some(id) = self.list.pop_back(arena) {
            if let Some(entry) = arena.remove(id) {
                released(id, entry.component);
            }
        }
    }
}
