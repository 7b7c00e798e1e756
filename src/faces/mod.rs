//! Face records and similarity grouping.
//!
//! Detection itself is an external capability (see [`detector::FaceDetector`]);
//! this module owns the records a detector produces and the pure similarity
//! and grouping logic that runs over them.

pub mod clustering;
pub mod detector;
pub mod processor;
pub mod similarity;

use serde::{Deserialize, Serialize};

use crate::error::FaceError;

pub use clustering::{
    group_faces, group_faces_by_similarity, FaceGroupingResult, SimilarityGroup,
    DEFAULT_SIMILARITY_THRESHOLD,
};
pub use detector::FaceDetector;
pub use processor::{AlbumAnalysis, AnalysisStatus, PhotoAnalysis, PhotoAnalyzer};
pub use similarity::{compare_faces, similarity};

/// Bounding box of a detected face, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A single facial landmark point (eye corner, nose tip, etc).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

/// Fixed-length feature vector for a face.
///
/// Visually similar faces have small Euclidean distance between their
/// embeddings. Dimensionality is fixed per detector model (typically 128)
/// and must be consistent across a batch; mixing dimensions surfaces as
/// [`FaceError::DimensionMismatch`] when vectors are compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct Embedding(Vec<f32>);

impl TryFrom<Vec<f32>> for Embedding {
    type Error = FaceError;

    fn try_from(values: Vec<f32>) -> Result<Self, FaceError> {
        Self::new(values)
    }
}

impl From<Embedding> for Vec<f32> {
    fn from(embedding: Embedding) -> Self {
        embedding.0
    }
}

impl Embedding {
    /// Wrap a raw feature vector. Rejects empty vectors.
    pub fn new(values: Vec<f32>) -> Result<Self, FaceError> {
        if values.is_empty() {
            return Err(FaceError::EmptyEmbedding);
        }
        Ok(Self(values))
    }

    /// Number of components in the vector.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl AsRef<[f32]> for Embedding {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

/// A detected face within one photo.
///
/// `id` is unique within a detection batch. Records are ephemeral: they are
/// built from detector output for one analysis request and carry no identity
/// across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub id: String,
    pub bbox: BoundingBox,
    /// Detection confidence in [0, 1].
    pub confidence: f32,
    /// Absent when the detector ran without the recognition model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Embedding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Landmark>>,
}

impl FaceRecord {
    /// Create a record with no embedding or landmarks.
    pub fn new(id: impl Into<String>, bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            id: id.into(),
            bbox,
            confidence,
            embedding: None,
            landmarks: None,
        }
    }

    pub fn with_embedding(mut self, embedding: Embedding) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_landmarks(mut self, landmarks: Vec<Landmark>) -> Self {
        self.landmarks = Some(landmarks);
        self
    }

    /// Whether this face can participate in similarity grouping.
    pub fn has_embedding(&self) -> bool {
        self.embedding.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_embedding_rejected() {
        assert_eq!(Embedding::new(vec![]), Err(FaceError::EmptyEmbedding));
        assert!(Embedding::new(vec![0.5]).is_ok());
        // Construction validation also applies on the wire.
        assert!(serde_json::from_str::<Embedding>("[]").is_err());
    }

    #[test]
    fn test_face_record_json_shape() {
        let face = FaceRecord::new(
            "face_1",
            BoundingBox {
                x: 10.0,
                y: 20.0,
                width: 64.0,
                height: 64.0,
            },
            0.92,
        )
        .with_embedding(Embedding::new(vec![0.25, 0.5]).unwrap())
        .with_landmarks(vec![Landmark { x: 12.0, y: 24.0 }]);

        let json = serde_json::to_value(&face).unwrap();
        assert_eq!(json["id"], "face_1");
        assert_eq!(json["bbox"]["width"], 64.0);
        assert_eq!(json["landmarks"][0]["y"], 24.0);
        // Embeddings serialize as a plain number array, matching the wire
        // format the analyze endpoint exchanges.
        assert_eq!(json["embedding"], serde_json::json!([0.25, 0.5]));

        let back: FaceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, face);
    }

    #[test]
    fn test_face_record_optional_fields_omitted() {
        let face = FaceRecord::new(
            "face_2",
            BoundingBox {
                x: 0.0,
                y: 0.0,
                width: 32.0,
                height: 32.0,
            },
            0.5,
        );

        let json = serde_json::to_value(&face).unwrap();
        assert!(json.get("embedding").is_none());
        assert!(json.get("landmarks").is_none());

        let back: FaceRecord = serde_json::from_value(json).unwrap();
        assert!(!back.has_embedding());
    }
}
