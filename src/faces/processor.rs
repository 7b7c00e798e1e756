//! Photo analysis pipeline: detection, grouping, and result recording.
//!
//! This is the orchestration layer between the external detector and the
//! pure grouping functions. Unlike those functions it is allowed to log and
//! to talk to the persistence and notification collaborators.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::mpsc;

use crate::storage::{AnalysisStore, Notification, NotificationSink};

use super::clustering::{group_faces, SimilarityGroup, DEFAULT_SIMILARITY_THRESHOLD};
use super::detector::FaceDetector;
use super::FaceRecord;

/// Faces found in one photo, stamped with the analysis time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoAnalysis {
    pub photo_id: String,
    pub faces: Vec<FaceRecord>,
    pub processed_at: DateTime<Utc>,
}

impl PhotoAnalysis {
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Result of analyzing a batch of photos as one album.
#[derive(Debug, Clone)]
pub struct AlbumAnalysis {
    /// Per-photo results, in input order. Photos whose files were missing or
    /// whose detection failed are absent.
    pub analyses: Vec<PhotoAnalysis>,
    /// Similarity groups over all faces of the batch.
    pub groups: Vec<SimilarityGroup>,
    pub photos_processed: usize,
    pub faces_found: usize,
    /// Faces left out of grouping because they carried no embedding.
    pub faces_skipped: usize,
}

/// Status updates during batch analysis.
#[derive(Debug, Clone)]
pub enum AnalysisStatus {
    /// Starting the batch
    Starting { total_photos: usize },
    /// Processing a specific photo
    Processing {
        current: usize,
        total: usize,
        path: String,
    },
    /// Found faces in a photo
    FoundFaces { path: String, count: usize },
    /// Grouping all detected faces
    Grouping { faces: usize },
    /// Completed the batch
    Completed {
        photos_processed: usize,
        faces_found: usize,
        groups_created: usize,
    },
    /// Error occurred on one photo; the batch continues
    Error { message: String },
}

/// Runs detection and similarity grouping over photos.
pub struct PhotoAnalyzer<D: FaceDetector> {
    detector: D,
    threshold: f32,
}

impl<D: FaceDetector> PhotoAnalyzer<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    /// Override the similarity threshold (0-1) used for grouping.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Detect faces in a single photo.
    pub fn analyze_photo(&self, photo_id: &str, image_path: &Path) -> Result<PhotoAnalysis> {
        let faces = self.detector.detect(image_path)?;
        tracing::debug!(photo_id = %photo_id, count = faces.len(), "Detected faces");

        Ok(PhotoAnalysis {
            photo_id: photo_id.to_string(),
            faces,
            processed_at: Utc::now(),
        })
    }

    /// Detect faces in a photo, persist the result, and notify the owner
    /// when faces were found.
    pub fn analyze_and_record(
        &self,
        photo_id: &str,
        image_path: &Path,
        store: &dyn AnalysisStore,
        notifier: Option<&dyn NotificationSink>,
    ) -> Result<PhotoAnalysis> {
        let analysis = self.analyze_photo(photo_id, image_path)?;

        let record_id = store.persist_analysis(&analysis)?;
        tracing::info!(photo_id = %photo_id, record_id = %record_id, "Stored face analysis");

        if analysis.face_count() > 0 {
            if let Some(sink) = notifier {
                let notification = Notification::face_detected(analysis.face_count());
                if let Err(e) = sink.notify(&notification) {
                    // Notification delivery is best-effort.
                    tracing::warn!(photo_id = %photo_id, error = %e, "Failed to deliver notification");
                }
            }
        }

        Ok(analysis)
    }

    /// Analyze a batch of `(photo_id, path)` pairs as one album and group
    /// all detected faces across photos.
    ///
    /// Missing files are skipped and per-photo detector errors are reported
    /// through the status channel without aborting the batch. Grouping runs
    /// once, after every photo has been processed.
    pub fn analyze_batch(
        &self,
        photos: &[(String, String)],
        status_sender: Option<mpsc::Sender<AnalysisStatus>>,
    ) -> Result<AlbumAnalysis> {
        let total = photos.len();

        if let Some(ref tx) = status_sender {
            let _ = tx.send(AnalysisStatus::Starting { total_photos: total });
        }

        let mut analyses = Vec::new();

        for (idx, (photo_id, path)) in photos.iter().enumerate() {
            if let Some(ref tx) = status_sender {
                let _ = tx.send(AnalysisStatus::Processing {
                    current: idx + 1,
                    total,
                    path: path.clone(),
                });
            }

            let image_path = Path::new(path);
            if !image_path.exists() {
                tracing::warn!(path = %path, "Photo file not found, skipping");
                continue;
            }

            match self.analyze_photo(photo_id, image_path) {
                Ok(analysis) => {
                    if analysis.face_count() > 0 {
                        if let Some(ref tx) = status_sender {
                            let _ = tx.send(AnalysisStatus::FoundFaces {
                                path: path.clone(),
                                count: analysis.face_count(),
                            });
                        }
                    }
                    analyses.push(analysis);
                }
                Err(e) => {
                    if let Some(ref tx) = status_sender {
                        let _ = tx.send(AnalysisStatus::Error {
                            message: format!("Error processing {}: {}", path, e),
                        });
                    }
                }
            }
        }

        let all_faces: Vec<FaceRecord> = analyses
            .iter()
            .flat_map(|a| a.faces.iter().cloned())
            .collect();

        if let Some(ref tx) = status_sender {
            let _ = tx.send(AnalysisStatus::Grouping {
                faces: all_faces.len(),
            });
        }

        let grouping = group_faces(&all_faces, self.threshold)?;
        tracing::info!(
            photos = analyses.len(),
            faces = all_faces.len(),
            groups = grouping.groups.len(),
            "Album analysis complete"
        );

        if let Some(ref tx) = status_sender {
            let _ = tx.send(AnalysisStatus::Completed {
                photos_processed: analyses.len(),
                faces_found: all_faces.len(),
                groups_created: grouping.groups.len(),
            });
        }

        Ok(AlbumAnalysis {
            photos_processed: analyses.len(),
            faces_found: all_faces.len(),
            faces_skipped: grouping.faces_skipped,
            analyses,
            groups: grouping.groups,
        })
    }
}
