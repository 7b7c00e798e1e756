//! Greedy similarity grouping of detected faces.
//!
//! The grouping is seed-based: the first unprocessed face with an embedding
//! anchors a group, and every remaining face is admitted by its similarity
//! to that seed alone. Membership is never re-checked against other group
//! members, so two faces can share a group without being directly similar.
//! This is a deliberate approximation that downstream group counts depend
//! on; it must not be swapped for a transitive or hierarchical algorithm.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::FaceError;

use super::similarity::similarity;
use super::FaceRecord;

/// Default minimum similarity for a face to join a seed's group.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.6;

/// A non-empty set of faces believed to depict the same person.
///
/// The first member is always the seed that anchored the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityGroup {
    faces: Vec<FaceRecord>,
}

impl SimilarityGroup {
    fn new(seed: FaceRecord) -> Self {
        Self { faces: vec![seed] }
    }

    fn push(&mut self, face: FaceRecord) {
        self.faces.push(face);
    }

    /// The face that anchored this group.
    pub fn seed(&self) -> &FaceRecord {
        &self.faces[0]
    }

    pub fn faces(&self) -> &[FaceRecord] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn into_faces(self) -> Vec<FaceRecord> {
        self.faces
    }
}

/// Summary of one grouping pass.
#[derive(Debug, Clone)]
pub struct FaceGroupingResult {
    /// Groups in seed first-seen order.
    pub groups: Vec<SimilarityGroup>,
    /// Faces placed in a group (everything that carried an embedding).
    pub faces_grouped: usize,
    /// Faces excluded because they had no embedding.
    pub faces_skipped: usize,
}

/// Partition `faces` into similarity groups against `threshold`.
///
/// Faces are visited in input order. Each unprocessed face with an embedding
/// seeds a new group; every later unprocessed face with an embedding joins
/// when its similarity to the seed reaches the threshold. Faces without an
/// embedding are excluded from the output entirely, not placed in singleton
/// groups. An empty input yields an empty group list.
///
/// The groups partition the embedded subset of the input exactly: every face
/// with an embedding appears in exactly one group, and every group holds at
/// least its seed.
///
/// Fails with [`FaceError::DimensionMismatch`] if the batch mixes embedding
/// dimensionalities.
pub fn group_faces_by_similarity(
    faces: &[FaceRecord],
    threshold: f32,
) -> Result<Vec<SimilarityGroup>, FaceError> {
    let mut groups: Vec<SimilarityGroup> = Vec::new();
    let mut processed: HashSet<&str> = HashSet::with_capacity(faces.len());

    for face in faces {
        if processed.contains(face.id.as_str()) {
            continue;
        }
        let Some(seed_embedding) = face.embedding.as_ref() else {
            continue;
        };

        processed.insert(face.id.as_str());
        let mut group = SimilarityGroup::new(face.clone());

        for other in faces {
            if processed.contains(other.id.as_str()) {
                continue;
            }
            let Some(other_embedding) = other.embedding.as_ref() else {
                continue;
            };

            // Compared against the seed only, never against other members.
            let score = similarity(seed_embedding, other_embedding)?;
            if score >= threshold {
                processed.insert(other.id.as_str());
                group.push(other.clone());
            }
        }

        groups.push(group);
    }

    Ok(groups)
}

/// Group faces and report how many were grouped versus skipped.
pub fn group_faces(
    faces: &[FaceRecord],
    threshold: f32,
) -> Result<FaceGroupingResult, FaceError> {
    let groups = group_faces_by_similarity(faces, threshold)?;
    let faces_grouped: usize = groups.iter().map(|g| g.len()).sum();

    Ok(FaceGroupingResult {
        groups,
        faces_grouped,
        faces_skipped: faces.len() - faces_grouped,
    })
}
