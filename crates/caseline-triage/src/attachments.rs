// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Files attached to replies, and their sequential pre-signed upload.

use std::path::Path;

use caseline_core::traits::{ObjectStore, SupportGateway};
use caseline_core::{CaseId, CaselineError};
use tracing::{debug, warn};

/// Content type implied by a file name's extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, inferring its content type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self, CaselineError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| CaselineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content_type = content_type_for(&file_name);
        Ok(Self::new(file_name, content_type, bytes))
    }
}

/// Outcome of uploading a batch of attachments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// Readable URLs of the files that made it, in input order.
    pub urls: Vec<String>,
    /// Names of the files that did not.
    pub failed: Vec<String>,
}

impl UploadReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Uploads one file at a time. A failure is logged and skipped; the rest are
/// still attempted.
pub async fn upload_all(
    gateway: &dyn SupportGateway,
    store: &dyn ObjectStore,
    case_id: &CaseId,
    attachments: Vec<Attachment>,
) -> UploadReport {
    let mut report = UploadReport::default();
    for attachment in attachments {
        let name = attachment.file_name.clone();
        match upload_one(gateway, store, case_id, attachment).await {
            Ok(url) => {
                debug!(file = %name, "attachment uploaded");
                report.urls.push(url);
            }
            Err(e) => {
                warn!(file = %name, error = %e, "attachment upload failed");
                report.failed.push(name);
            }
        }
    }
    report
}

async fn upload_one(
    gateway: &dyn SupportGateway,
    store: &dyn ObjectStore,
    case_id: &CaseId,
    attachment: Attachment,
) -> Result<String, CaselineError> {
    let Attachment {
        file_name,
        content_type,
        bytes,
    } = attachment;
    let upload_error = |message: String| CaselineError::Upload {
        file_name: file_name.clone(),
        message,
    };

    let ticket = gateway
        .upload_url(case_id, &file_name, &content_type)
        .await
        .map_err(|e| upload_error(e.to_string()))?;
    store
        .put_object(&ticket.upload_url, &content_type, bytes)
        .await
        .map_err(|e| upload_error(e.to_string()))?;
    ticket
        .readable_url()
        .map(str::to_string)
        .ok_or_else(|| upload_error("backend returned no file URL".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(content_type_for("shot.PNG"), "image/png");
        assert_eq!(content_type_for("photo.jpg"), "image/jpeg");
        assert_eq!(content_type_for("guide.md"), "text/markdown");
        assert_eq!(content_type_for("archive"), "application/octet-stream");
    }

    #[tokio::test]
    async fn reads_attachment_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error.webp");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let attachment = Attachment::from_path(&path).await.unwrap();
        assert_eq!(attachment.file_name, "error.webp");
        assert_eq!(attachment.content_type, "image/webp");
        assert_eq!(attachment.bytes.len(), 3);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = Attachment::from_path(Path::new("/nonexistent/caseline.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, CaselineError::Io { .. }));
    }
}
