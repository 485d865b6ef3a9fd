// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-step case creation followed by a detached processing signal.
//!
//! The sequence is not transactional: if the opening message fails after
//! the case record was created, the case stays and the error is returned.

use std::sync::Arc;

use caseline_core::traits::SupportGateway;
use caseline_core::types::{IntentCandidate, NewCase, NewMessage, Priority};
use caseline_core::{CaseId, CaselineError, SessionContext};
use tracing::info;

use crate::background::BackgroundTasks;

pub struct CaseCreator {
    gateway: Arc<dyn SupportGateway>,
    session: SessionContext,
    background: BackgroundTasks,
    title_prefix_chars: usize,
}

impl CaseCreator {
    pub fn new(
        gateway: Arc<dyn SupportGateway>,
        session: SessionContext,
        background: BackgroundTasks,
        title_prefix_chars: usize,
    ) -> Self {
        Self {
            gateway,
            session,
            background,
            title_prefix_chars,
        }
    }

    /// Creates a case for `issue_text`, categorized by `intent` when given.
    pub async fn create(
        &self,
        issue_text: &str,
        intent: Option<&IntentCandidate>,
        media_urls: Vec<String>,
    ) -> Result<CaseId, CaselineError> {
        let title = match intent {
            Some(candidate) => candidate.intent.clone(),
            None => title_from_text(issue_text, self.title_prefix_chars),
        };

        let created = self
            .gateway
            .create_case(&NewCase {
                customer_id: self.session.user_id().to_string(),
                title,
                description: issue_text.to_string(),
                priority: Priority::Medium,
                intent_id: intent.and_then(|c| c.intent_id.clone()),
            })
            .await?;
        let case_id = created.case_id;

        let mut opening = NewMessage::from_customer(
            case_id.clone(),
            self.session.user_id(),
            issue_text,
            media_urls,
        );
        opening.is_new_ticket = true;
        self.gateway.add_message(&opening).await?;

        let gateway = Arc::clone(&self.gateway);
        let processing_id = case_id.clone();
        self.background.spawn_detached("process_new_case", async move {
            gateway.process_new_case(&processing_id).await
        });

        info!(case_id = %case_id, categorized = intent.is_some(), "support case created");
        Ok(case_id)
    }
}

/// First `max_chars` characters of the trimmed text, with `…` when cut.
pub fn title_from_text(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        None => trimmed.to_string(),
        Some((cut, _)) => format!("{}…", trimmed[..cut].trim_end()),
    }
}
