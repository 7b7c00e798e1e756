//! Collaborator seams for the hosted platform.
//!
//! In production these are backed by a managed object store, a managed
//! database, and the application's notification table. The engine only
//! returns data; persisting and surfacing it happens behind these traits.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::faces::PhotoAnalysis;

/// Blob storage for uploaded photos. Returns the public URL of the stored
/// object.
pub trait PhotoStore {
    fn store_photo(&self, filename: &str, bytes: &[u8]) -> Result<String>;
}

/// Persistence for analysis results. Returns the identifier of the stored
/// record.
pub trait AnalysisStore {
    fn persist_analysis(&self, analysis: &PhotoAnalysis) -> Result<String>;
}

/// Delivery channel for user-facing notifications.
pub trait NotificationSink {
    fn notify(&self, notification: &Notification) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    PhotoUpload,
    FaceDetected,
    AlbumShared,
    AnalysisComplete,
    AlbumCreated,
}

/// A user-facing notification about album or analysis activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn photo_upload(album_name: &str, photo_count: usize) -> Self {
        Self {
            kind: NotificationKind::PhotoUpload,
            title: "Photos uploaded successfully".to_string(),
            message: format!(
                "{} photo{} uploaded to \"{}\"",
                photo_count,
                plural(photo_count),
                album_name
            ),
        }
    }

    pub fn face_detected(face_count: usize) -> Self {
        Self {
            kind: NotificationKind::FaceDetected,
            title: "Face detection complete".to_string(),
            message: format!(
                "Detected {} face{} in your photo",
                face_count,
                plural(face_count)
            ),
        }
    }

    pub fn analysis_complete(album_name: &str, total_faces: usize) -> Self {
        Self {
            kind: NotificationKind::AnalysisComplete,
            title: "Album analysis complete".to_string(),
            message: format!(
                "Found {} face{} across all photos in \"{}\"",
                total_faces,
                plural(total_faces),
                album_name
            ),
        }
    }

    pub fn album_created(album_name: &str) -> Self {
        Self {
            kind: NotificationKind::AlbumCreated,
            title: "Album created".to_string(),
            message: format!("New album \"{}\" has been created", album_name),
        }
    }
}

/// Store a batch of uploaded photos and notify the uploader once, mirroring
/// the application's upload flow. Returns the stored photos' URLs in input
/// order.
pub fn upload_photos(
    store: &dyn PhotoStore,
    notifier: Option<&dyn NotificationSink>,
    album_name: &str,
    files: &[(String, Vec<u8>)],
) -> Result<Vec<String>> {
    let mut urls = Vec::with_capacity(files.len());

    for (filename, bytes) in files {
        let url = store.store_photo(filename, bytes)?;
        tracing::debug!(filename = %filename, url = %url, "Stored photo");
        urls.push(url);
    }

    if !urls.is_empty() {
        if let Some(sink) = notifier {
            let notification = Notification::photo_upload(album_name, urls.len());
            if let Err(e) = sink.notify(&notification) {
                // Notification delivery is best-effort.
                tracing::warn!(album = %album_name, error = %e, "Failed to deliver notification");
            }
        }
    }

    Ok(urls)
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryPhotoStore {
        stored: Mutex<Vec<String>>,
    }

    impl PhotoStore for MemoryPhotoStore {
        fn store_photo(&self, filename: &str, _bytes: &[u8]) -> Result<String> {
            self.stored.lock().unwrap().push(filename.to_string());
            Ok(format!("https://photos.example/{}", filename))
        }
    }

    #[derive(Default)]
    struct MemorySink {
        sent: Mutex<Vec<Notification>>,
    }

    impl NotificationSink for MemorySink {
        fn notify(&self, notification: &Notification) -> Result<()> {
            self.sent.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    #[test]
    fn test_upload_photos_stores_and_notifies_once() {
        let store = MemoryPhotoStore::default();
        let sink = MemorySink::default();

        let files = vec![
            ("a.jpg".to_string(), vec![1u8, 2]),
            ("b.jpg".to_string(), vec![3u8]),
        ];
        let urls = upload_photos(&store, Some(&sink), "Summer Trip", &files).unwrap();

        assert_eq!(
            urls,
            vec![
                "https://photos.example/a.jpg".to_string(),
                "https://photos.example/b.jpg".to_string(),
            ]
        );
        assert_eq!(store.stored.lock().unwrap().len(), 2);

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::PhotoUpload);
        assert_eq!(sent[0].message, "2 photos uploaded to \"Summer Trip\"");
    }

    #[test]
    fn test_upload_photos_empty_batch_is_quiet() {
        let store = MemoryPhotoStore::default();
        let sink = MemorySink::default();

        let urls = upload_photos(&store, Some(&sink), "Summer Trip", &[]).unwrap();
        assert!(urls.is_empty());
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_notification_messages() {
        let n = Notification::face_detected(1);
        assert_eq!(n.message, "Detected 1 face in your photo");

        let n = Notification::face_detected(3);
        assert_eq!(n.message, "Detected 3 faces in your photo");

        let n = Notification::analysis_complete("Summer Trip", 12);
        assert_eq!(n.kind, NotificationKind::AnalysisComplete);
        assert_eq!(
            n.message,
            "Found 12 faces across all photos in \"Summer Trip\""
        );

        let n = Notification::photo_upload("Summer Trip", 1);
        assert_eq!(n.message, "1 photo uploaded to \"Summer Trip\"");
    }

    #[test]
    fn test_notification_kind_wire_names() {
        let json = serde_json::to_value(NotificationKind::FaceDetected).unwrap();
        assert_eq!(json, "face_detected");
        let json = serde_json::to_value(NotificationKind::AnalysisComplete).unwrap();
        assert_eq!(json, "analysis_complete");
    }
}
