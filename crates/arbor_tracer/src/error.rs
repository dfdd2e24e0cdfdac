//! Render errors.

use arbor_scene::ObjectId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No camera selected for rendering")]
    NoCamera,

    #[error("Scene object {0:?} has no Camera component")]
    NotACamera(ObjectId),

    #[error("Invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("{0} is not supported by this renderer; use render_image")]
    UnsupportedPath(&'static str),

    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
