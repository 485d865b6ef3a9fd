// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base document endpoints.

use async_trait::async_trait;

use crate::error::CaselineError;
use crate::types::{KnowledgeFile, PresignedUpload};

/// Gateway to the `/rag` resource family.
#[async_trait]
pub trait KnowledgeGateway: Send + Sync + 'static {
    async fn presign_document(
        &self,
        file_name: &str,
        file_type: &str,
    ) -> Result<PresignedUpload, CaselineError>;

    /// Asks the backend to ingest an uploaded document.
    async fn process_document(&self, file_name: &str, file_type: &str)
    -> Result<(), CaselineError>;

    async fn list_documents(&self) -> Result<Vec<KnowledgeFile>, CaselineError>;

    async fn delete_document(&self, file_name: &str) -> Result<(), CaselineError>;
}
