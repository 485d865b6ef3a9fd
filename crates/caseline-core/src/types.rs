// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support-case types shared by the gateway client and the triage workflows.
//!
//! Field names follow the backend's camelCase JSON. Most fields default when
//! absent so that partially populated records still decode.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use crate::summary::CaseSummary;

/// Identifier of a support case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CaseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a message within a case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Case urgency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// Lifecycle state of a case.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CaseStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

/// Who authored a message.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SenderType {
    #[default]
    Customer,
    Agent,
    Ai,
}

impl SenderType {
    /// Label shown next to a message in the correspondence thread.
    pub fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Agent => "Agent",
            Self::Ai => "AI Agent",
        }
    }
}

/// Shape of a message body.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MessageType {
    #[default]
    Text,
    Media,
    Mixed,
}

impl MessageType {
    /// `media` when anything was attached, `text` otherwise.
    pub fn for_media(media_urls: &[String]) -> Self {
        if media_urls.is_empty() {
            Self::Text
        } else {
            Self::Media
        }
    }
}

/// A candidate intent returned by intent search, or parked on a case as pending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentCandidate {
    /// Older call sites spell this `intentid`.
    #[serde(default, alias = "intentid", skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<String>,
    /// Display name of the intent.
    #[serde(default)]
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Match confidence in the 0..=100 range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

/// A support ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportCase {
    pub case_id: CaseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_intents: Option<Vec<IntentCandidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_agent: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub media_urls: Vec<String>,
    #[serde(
        default,
        deserialize_with = "crate::summary::deserialize_optional_summary",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<CaseSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl SupportCase {
    /// Candidates still awaiting a human choice, if the case is uncategorized.
    ///
    /// Returns `None` once an intent is set, even if stale pending entries remain.
    pub fn awaiting_intent_selection(&self) -> Option<&[IntentCandidate]> {
        if self.intent_id.is_some() {
            return None;
        }
        match self.pending_intents.as_deref() {
            Some(pending) if !pending.is_empty() => Some(pending),
            _ => None,
        }
    }
}

/// A message in a case's correspondence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportMessage {
    #[serde(default)]
    pub message_id: MessageId,
    #[serde(default)]
    pub case_id: CaseId,
    #[serde(default)]
    pub sender_id: String,
    #[serde(default)]
    pub sender_type: SenderType,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Body of `POST /support/cases`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCase {
    pub customer_id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<String>,
}

/// Response of `POST /support/cases`; only the id is relied upon.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCase {
    pub case_id: CaseId,
}

/// Body of `POST /support/cases/message`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub case_id: CaseId,
    pub sender_id: String,
    pub sender_type: SenderType,
    pub content: String,
    pub message_type: MessageType,
    pub media_urls: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_new_ticket: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_intent_selection: bool,
}

impl NewMessage {
    /// A customer-authored message; the type follows the attachments.
    pub fn from_customer(
        case_id: CaseId,
        sender_id: impl Into<String>,
        content: impl Into<String>,
        media_urls: Vec<String>,
    ) -> Self {
        Self {
            case_id,
            sender_id: sender_id.into(),
            sender_type: SenderType::Customer,
            content: content.into(),
            message_type: MessageType::for_media(&media_urls),
            media_urls,
            is_new_ticket: false,
            is_intent_selection: false,
        }
    }

    /// The locally rendered copy of this message before the server confirms it.
    pub fn to_local(&self, message_id: MessageId, created_at: String) -> SupportMessage {
        SupportMessage {
            message_id,
            case_id: self.case_id.clone(),
            sender_id: self.sender_id.clone(),
            sender_type: self.sender_type,
            content: self.content.clone(),
            message_type: self.message_type,
            media_urls: self.media_urls.clone(),
            created_at,
        }
    }
}

/// Body of `PUT /support/cases/{id}`. Unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_id: Option<String>,
    /// `Some(None)` serializes as `null` and clears the list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_intents: Option<Option<Vec<IntentCandidate>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_agent: Option<String>,
}

impl CaseUpdate {
    /// Resolve the case's category and drop its pending candidates.
    pub fn select_intent(intent_id: Option<String>) -> Self {
        Self {
            intent_id,
            pending_intents: Some(None),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Body of `POST /support/search-intents`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSearchRequest {
    pub text: String,
    pub user_id: String,
}

/// Response of `POST /support/search-intents`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub case_id: Option<CaseId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub intents: Vec<IntentCandidate>,
}

/// Response of `POST /support/cases/{id}/upload-url`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTicket {
    pub upload_url: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub public_url: Option<String>,
}

impl UploadTicket {
    /// URL under which the uploaded object is readable afterwards.
    pub fn readable_url(&self) -> Option<&str> {
        self.file_url.as_deref().or(self.public_url.as_deref())
    }
}

/// Response of the summary endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "crate::summary::deserialize_optional_summary")]
    pub summary: Option<CaseSummary>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply from the generative chat tester.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub text: String,
}

/// A document in the knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeFile {
    pub file_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl KnowledgeFile {
    /// Upper-cased file extension, or `Unknown` when the name has none.
    pub fn kind_label(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_uppercase(),
            _ => "Unknown".to_string(),
        }
    }
}

/// Response of `POST /rag/get-presigned-url`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PresignedUpload {
    #[serde(default)]
    pub url: Option<String>,
}

/// Treats an explicit JSON `null` list the same as an absent one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
