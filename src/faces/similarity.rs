//! Pairwise similarity scoring between face embeddings.

use crate::error::FaceError;

use super::Embedding;

/// Euclidean distance between two embeddings.
///
/// Both vectors must have the same dimensionality; anything else is a batch
/// construction bug and fails fast rather than silently truncating.
pub fn euclidean_distance(a: &Embedding, b: &Embedding) -> Result<f32, FaceError> {
    if a.dim() != b.dim() {
        return Err(FaceError::DimensionMismatch {
            expected: a.dim(),
            actual: b.dim(),
        });
    }

    let sum: f32 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| (x - y).powi(2))
        .sum();

    Ok(sum.sqrt())
}

/// Similarity score in [0, 1] between two embeddings, where 1 is identical.
///
/// Derived from Euclidean distance as `max(0, 1 - d/2)`. The divisor 2 is a
/// calibration constant for roughly unit-normalized embeddings, where a
/// distance of 2 is the practical maximum and floors the score at 0.
pub fn similarity(a: &Embedding, b: &Embedding) -> Result<f32, FaceError> {
    let distance = euclidean_distance(a, b)?;
    Ok((1.0 - distance / 2.0).max(0.0))
}

/// Similarity between two optional embeddings.
///
/// Returns 0 when either side is absent: a face without an embedding cannot
/// be compared, which is a defined fallback rather than an error.
pub fn compare_faces(
    a: Option<&Embedding>,
    b: Option<&Embedding>,
) -> Result<f32, FaceError> {
    match (a, b) {
        (Some(a), Some(b)) => similarity(a, b),
        _ => Ok(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emb(values: &[f32]) -> Embedding {
        Embedding::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_identical_embeddings_score_one() {
        let a = emb(&[0.3, 0.4, 0.5]);
        assert!((similarity(&a, &a).unwrap() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = emb(&[1.0, 0.0, 0.0]);
        let b = emb(&[0.0, 1.0, 0.0]);
        let ab = similarity(&a, &b).unwrap();
        let ba = similarity(&b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_similarity_stays_in_unit_range() {
        // Distance well past the calibration maximum of 2 must floor at 0.
        let a = emb(&[3.0, 0.0]);
        let b = emb(&[-3.0, 0.0]);
        assert_eq!(similarity(&a, &b).unwrap(), 0.0);

        let c = emb(&[0.1, 0.2]);
        let d = emb(&[0.15, 0.25]);
        let s = similarity(&c, &d).unwrap();
        assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn test_distance_two_scores_zero() {
        // Antipodal unit vectors sit exactly at the calibration maximum.
        let a = emb(&[1.0, 0.0]);
        let b = emb(&[-1.0, 0.0]);
        assert!((euclidean_distance(&a, &b).unwrap() - 2.0).abs() < 1e-6);
        assert!(similarity(&a, &b).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_missing_embedding_scores_zero() {
        let a = emb(&[0.5, 0.5]);
        assert_eq!(compare_faces(Some(&a), None).unwrap(), 0.0);
        assert_eq!(compare_faces(None, Some(&a)).unwrap(), 0.0);
        assert_eq!(compare_faces(None, None).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_fails_fast() {
        let a = emb(&[1.0, 0.0, 0.0]);
        let b = emb(&[1.0, 0.0]);
        assert_eq!(
            euclidean_distance(&a, &b),
            Err(FaceError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert!(compare_faces(Some(&a), Some(&b)).is_err());
    }
}
