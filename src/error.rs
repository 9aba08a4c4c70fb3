use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while augmenting a dataset. The
/// dataset-not-found variant is fatal; all others are per-image and are
/// reported by the run loop without aborting the remaining images.
#[derive(Debug, Error)]
pub enum AugmentError {
    #[error("invalid dataset path: {}", .0.display())]
    DatasetNotFound(PathBuf),

    #[error("malformed annotation line {line:?}: {reason}")]
    MalformedAnnotation { line: String, reason: String },

    #[error("{bboxes} bounding boxes paired with {labels} class labels")]
    LengthMismatch { bboxes: usize, labels: usize },

    #[error("transform failed: {0}")]
    Transform(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
