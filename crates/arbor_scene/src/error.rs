//! Structural errors reported by scene graph edits.
//!
//! Every failing edit leaves the graph exactly as it was.

use thiserror::Error;

use crate::component::ComponentKind;
use crate::object::ObjectId;

/// Errors that can occur while editing a scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Scene object {0:?} does not exist")]
    UnknownObject(ObjectId),

    #[error("Scene object {object:?} already has a {kind} component")]
    DuplicateComponent {
        object: ObjectId,
        kind: ComponentKind,
    },

    #[error("The Transform component cannot be removed")]
    TransformRemoval,

    #[error("Scene object {object:?} has no {kind} component")]
    MissingComponent {
        object: ObjectId,
        kind: ComponentKind,
    },

    #[error("The scene root cannot be destroyed or moved")]
    RootObject,

    #[error("Cannot parent {object:?} under itself or one of its descendants")]
    InvalidParent { object: ObjectId },
}

pub type SceneResult<T> = Result<T, SceneError>;
