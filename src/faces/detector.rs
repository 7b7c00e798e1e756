//! Boundary to the external face detection capability.
//!
//! Detection runs outside this crate (a pretrained model runtime hosted by
//! the application). The engine only consumes its output: bounding boxes,
//! confidence scores, and optional embeddings per face.

use anyhow::Result;
use std::path::Path;

use super::FaceRecord;

/// Locates faces in a photo and produces records for grouping.
///
/// Implementations are expected to assign batch-unique `id`s and to emit
/// embeddings of one fixed dimensionality. A face may legitimately lack an
/// embedding (fast detection pass without the recognition model); such faces
/// are excluded from grouping downstream.
pub trait FaceDetector {
    fn detect(&self, image_path: &Path) -> Result<Vec<FaceRecord>>;
}

impl<D: FaceDetector + ?Sized> FaceDetector for &D {
    fn detect(&self, image_path: &Path) -> Result<Vec<FaceRecord>> {
        (**self).detect(image_path)
    }
}
