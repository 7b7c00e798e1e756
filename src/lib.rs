//! Face similarity grouping engine for shared photo albums.
//!
//! An external detector finds faces in photos and produces [`faces::FaceRecord`]s
//! (bounding box, confidence, optional embedding). This crate scores pairwise
//! similarity between embeddings and partitions a batch of faces into
//! [`faces::SimilarityGroup`]s, so the application can tag and filter photos
//! by person. Persistence and notifications are delegated to the hosting
//! platform behind the [`storage`] traits.
//!
//! The grouping core is pure and synchronous: it holds no shared state, never
//! performs I/O, and is safe to run concurrently across analysis requests.

pub mod config;
pub mod error;
pub mod faces;
pub mod logging;
pub mod storage;

pub use config::{AnalysisConfig, Config};
pub use error::FaceError;
pub use faces::{
    compare_faces, group_faces_by_similarity, BoundingBox, Embedding, FaceRecord,
    SimilarityGroup, DEFAULT_SIMILARITY_THRESHOLD,
};
