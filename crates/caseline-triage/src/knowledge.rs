// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base documents: pre-signed upload, ingestion, listing, removal.

use std::sync::Arc;

use caseline_config::model::KnowledgeConfig;
use caseline_core::traits::{KnowledgeGateway, ObjectStore};
use caseline_core::{CaselineError, KnowledgeFile};
use tracing::{info, warn};

use crate::attachments::{Attachment, content_type_for};

pub struct KnowledgeLibrary {
    gateway: Arc<dyn KnowledgeGateway>,
    store: Arc<dyn ObjectStore>,
    accepted_extensions: Vec<String>,
}

impl KnowledgeLibrary {
    pub fn new(
        gateway: Arc<dyn KnowledgeGateway>,
        store: Arc<dyn ObjectStore>,
        config: &KnowledgeConfig,
    ) -> Self {
        Self {
            gateway,
            store,
            accepted_extensions: config
                .accepted_extensions
                .iter()
                .map(|ext| ext.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        let lower = file_name.to_ascii_lowercase();
        self.accepted_extensions
            .iter()
            .any(|ext| lower.len() > ext.len() && lower.ends_with(ext.as_str()))
    }

    /// Presigns, uploads and then asks the backend to ingest `document`.
    pub async fn upload(&self, document: Attachment) -> Result<(), CaselineError> {
        if !self.accepts(&document.file_name) {
            return Err(CaselineError::validation(
                "file",
                format!(
                    "{} is not a supported document type ({})",
                    document.file_name,
                    self.accepted_extensions.join(", ")
                ),
            ));
        }

        let Attachment {
            file_name,
            bytes,
            ..
        } = document;
        let file_type = content_type_for(&file_name);

        let presigned = self.gateway.presign_document(&file_name, file_type).await?;
        let url = presigned.url.ok_or_else(|| CaselineError::Upload {
            file_name: file_name.clone(),
            message: "backend returned no upload URL".into(),
        })?;
        self.store
            .put_object(&url, file_type, bytes)
            .await
            .map_err(|e| CaselineError::Upload {
                file_name: file_name.clone(),
                message: e.to_string(),
            })?;
        self.gateway.process_document(&file_name, file_type).await?;
        info!(file = %file_name, "knowledge document uploaded");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<KnowledgeFile>, CaselineError> {
        self.gateway.list_documents().await
    }

    /// Deletes documents one at a time, stopping at the first failure.
    ///
    /// Returns the deleted names in order.
    pub async fn delete_many(&self, names: &[String]) -> Result<Vec<String>, CaselineError> {
        let mut deleted = Vec::with_capacity(names.len());
        for name in names {
            if let Err(e) = self.gateway.delete_document(name).await {
                warn!(file = %name, deleted = deleted.len(), error = %e, "knowledge delete failed");
                return Err(e);
            }
            deleted.push(name.clone());
        }
        info!(count = deleted.len(), "knowledge documents deleted");
        Ok(deleted)
    }
}
