// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/rag/*` knowledge-base endpoints.

use async_trait::async_trait;
use caseline_core::CaselineError;
use caseline_core::traits::KnowledgeGateway;
use caseline_core::types::{KnowledgeFile, PresignedUpload};
use reqwest::Method;

use crate::client::GatewayClient;
use crate::wire::{FileRef, FileSpec};

#[async_trait]
impl KnowledgeGateway for GatewayClient {
    async fn presign_document(
        &self,
        file_name: &str,
        file_type: &str,
    ) -> Result<PresignedUpload, CaselineError> {
        let url = self.endpoint(&["rag", "get-presigned-url"])?;
        let spec = FileSpec {
            file_name,
            file_type,
        };
        self.send_json("presign_document", Method::POST, url, &spec)
            .await
    }

    async fn process_document(
        &self,
        file_name: &str,
        file_type: &str,
    ) -> Result<(), CaselineError> {
        let url = self.endpoint(&["rag", "process-file"])?;
        let spec = FileSpec {
            file_name,
            file_type,
        };
        self.send_raw("process_document", Method::POST, url, Some(&spec))
            .await?;
        Ok(())
    }

    async fn list_documents(&self) -> Result<Vec<KnowledgeFile>, CaselineError> {
        let url = self.endpoint(&["rag", "list-files"])?;
        self.get_list("list_documents", url).await
    }

    async fn delete_document(&self, file_name: &str) -> Result<(), CaselineError> {
        let url = self.endpoint(&["rag", "delete-file"])?;
        self.send_raw("delete_document", Method::POST, url, Some(&FileRef { file_name }))
            .await?;
        Ok(())
    }
}
