//! Remote image import seam.

use async_trait::async_trait;
use std::sync::RwLock;
use std::time::Duration;
use thiserror::Error;

/// Errors from the media import path.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The upload itself failed.
    #[error("Upload failed for {url}: {reason}")]
    Upload { url: String, reason: String },

    /// The import did not complete within the configured bound.
    #[error("Import timed out after {0:?}")]
    Timeout(Duration),

    /// The source URL is not importable.
    #[error("Invalid source URL: {0}")]
    InvalidUrl(String),
}

/// Result of importing a remote image into the media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUpload {
    /// Assigned public ID.
    pub public_id: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Imports remote images into the media host.
///
/// The only component of the search core with external I/O side effects;
/// callers must tolerate the added latency and bound it themselves.
#[async_trait]
pub trait MediaImporter: Send + Sync {
    /// Upload a remote URL, returning the assigned reference.
    async fn upload_remote(&self, url: &str) -> Result<RemoteUpload, MediaError>;
}

/// Deterministic in-process importer for tests and demos.
///
/// Derives a stable public ID from the source URL's file stem and records
/// every call so tests can assert which paths performed network imports.
#[derive(Default)]
pub struct RecordingImporter {
    calls: RwLock<Vec<String>>,
}

impl RecordingImporter {
    /// Create an importer with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs imported so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of imports performed.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl MediaImporter for RecordingImporter {
    async fn upload_remote(&self, url: &str) -> Result<RemoteUpload, MediaError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(MediaError::InvalidUrl(url.to_string()));
        }
        self.calls.write().unwrap().push(url.to_string());

        let stem = url
            .rsplit('/')
            .next()
            .and_then(|name| name.split('.').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("upload");
        Ok(RemoteUpload {
            public_id: format!("imported/{}", stem),
            width: 640,
            height: 480,
        })
    }
}

/// Importer that always fails, for exercising swallow paths.
#[derive(Debug, Default)]
pub struct FailingImporter;

#[async_trait]
impl MediaImporter for FailingImporter {
    async fn upload_remote(&self, url: &str) -> Result<RemoteUpload, MediaError> {
        Err(MediaError::Upload {
            url: url.to_string(),
            reason: "media host unreachable".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_importer_derives_stable_id() {
        let importer = RecordingImporter::new();
        let up = importer
            .upload_remote("https://cdn.shop.net/photos/mug.jpg")
            .await
            .unwrap();
        assert_eq!(up.public_id, "imported/mug");
        assert_eq!(importer.calls(), vec!["https://cdn.shop.net/photos/mug.jpg"]);
    }

    #[tokio::test]
    async fn test_recording_importer_rejects_non_http() {
        let importer = RecordingImporter::new();
        let err = importer.upload_remote("ftp://x/y.jpg").await.unwrap_err();
        assert!(matches!(err, MediaError::InvalidUrl(_)));
        assert_eq!(importer.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failing_importer() {
        let err = FailingImporter
            .upload_remote("https://x/y.jpg")
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Upload { .. }));
    }
}
