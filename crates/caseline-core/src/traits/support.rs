// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support-case endpoints used by intake, triage and correspondence.

use async_trait::async_trait;

use crate::error::CaselineError;
use crate::types::{
    CaseId, CaseUpdate, CreatedCase, IntentSearchResponse, NewCase, NewMessage, SummaryResponse,
    SupportCase, SupportMessage, UploadTicket,
};

/// Gateway to the `/support` resource family.
#[async_trait]
pub trait SupportGateway: Send + Sync + 'static {
    /// Matches free text against known intents. May create a case server-side.
    async fn search_intents(&self, text: &str) -> Result<IntentSearchResponse, CaselineError>;

    async fn create_case(&self, case: &NewCase) -> Result<CreatedCase, CaselineError>;

    async fn list_cases(&self) -> Result<Vec<SupportCase>, CaselineError>;

    async fn get_case(&self, case_id: &CaseId) -> Result<SupportCase, CaselineError>;

    async fn update_case(&self, case_id: &CaseId, update: &CaseUpdate)
    -> Result<(), CaselineError>;

    /// Full message history, oldest first. No pagination.
    async fn list_messages(&self, case_id: &CaseId) -> Result<Vec<SupportMessage>, CaselineError>;

    /// Persists a message. The backend may or may not echo the stored message.
    async fn add_message(
        &self,
        message: &NewMessage,
    ) -> Result<Option<SupportMessage>, CaselineError>;

    /// Kicks off server-side processing of a freshly created case.
    async fn process_new_case(&self, case_id: &CaseId) -> Result<(), CaselineError>;

    /// Fetches the stored summary, regenerating it when `force` is set.
    async fn get_summary(
        &self,
        case_id: &CaseId,
        force: bool,
    ) -> Result<SummaryResponse, CaselineError>;

    /// Generates a fresh summary.
    async fn generate_summary(&self, case_id: &CaseId) -> Result<SummaryResponse, CaselineError>;

    /// Requests a pre-signed URL for attaching a file to a case.
    async fn upload_url(
        &self,
        case_id: &CaseId,
        file_name: &str,
        file_type: &str,
    ) -> Result<UploadTicket, CaselineError>;
}
