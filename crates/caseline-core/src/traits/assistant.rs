// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative endpoints: the chat tester and utterance generation.

use async_trait::async_trait;

use crate::error::CaselineError;
use crate::types::ChatReply;

#[async_trait]
pub trait AssistantGateway: Send + Sync + 'static {
    /// Sends one chat turn within the session's chat session.
    async fn chat(&self, text: &str) -> Result<ChatReply, CaselineError>;

    /// Generates sample utterances for an intent. The payload shape is opaque.
    async fn generate_utterances(&self, intent: &str)
    -> Result<serde_json::Value, CaselineError>;
}
