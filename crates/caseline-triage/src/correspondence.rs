// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The message thread of one support case.
//!
//! Replies are shown optimistically: the entry is appended before the
//! persist call resolves, and the call runs as a detached task that reports
//! back over an in-process channel keyed by correlation id. A confirmed
//! entry is replaced in place by the stored message; a failed one stays
//! visible and is marked failed.
//!
//! While the case still has pending intent candidates the thread is gated:
//! the operator must pick one before replying.

use std::sync::Arc;
use std::time::Duration;

use caseline_config::model::CorrespondenceConfig;
use caseline_core::traits::{ObjectStore, SupportGateway};
use caseline_core::types::{CaseUpdate, IntentCandidate, MessageId, NewMessage, SupportCase, SupportMessage};
use caseline_core::{CaseId, CaselineError, SessionContext};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::attachments::{self, Attachment};
use crate::background::BackgroundTasks;
use crate::banner::Banner;

const MEDIA_ONLY_CONTENT: &str = "Shared media";
const SEND_FAILED: &str = "Failed to send message. Please try again.";
const SELECT_FAILED: &str = "Failed to select intent. Please try again.";

/// Reply limits from `[correspondence]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadLimits {
    pub max_message_chars: usize,
    pub attachment_types: Vec<String>,
}

impl From<&CorrespondenceConfig> for ThreadLimits {
    fn from(config: &CorrespondenceConfig) -> Self {
        Self {
            max_message_chars: config.max_message_chars,
            attachment_types: config.attachment_types.clone(),
        }
    }
}

impl Default for ThreadLimits {
    fn default() -> Self {
        Self::from(&CorrespondenceConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Pending,
    Confirmed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreadEntry {
    pub correlation_id: Uuid,
    pub message: SupportMessage,
    pub delivery: Delivery,
}

impl ThreadEntry {
    fn from_server(message: SupportMessage) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            message,
            delivery: Delivery::Confirmed,
        }
    }

    pub fn sender_label(&self) -> &'static str {
        self.message.sender_type.label()
    }

    pub fn is_local(&self) -> bool {
        self.delivery != Delivery::Confirmed
    }
}

/// What the thread currently shows.
#[derive(Debug, PartialEq)]
pub enum ThreadView<'a> {
    SelectIntent(&'a [IntentCandidate]),
    Messages(&'a [ThreadEntry]),
}

#[derive(Debug)]
enum DeliveryReport {
    Confirmed {
        correlation_id: Uuid,
        stored: Option<SupportMessage>,
    },
    Failed {
        correlation_id: Uuid,
        reason: String,
    },
}

pub struct Correspondence {
    gateway: Arc<dyn SupportGateway>,
    store: Arc<dyn ObjectStore>,
    session: SessionContext,
    background: BackgroundTasks,
    limits: ThreadLimits,
    case: SupportCase,
    entries: Vec<ThreadEntry>,
    banner: Option<Banner>,
    reports_tx: mpsc::UnboundedSender<DeliveryReport>,
    reports_rx: mpsc::UnboundedReceiver<DeliveryReport>,
}

impl Correspondence {
    /// Loads the case and its full history concurrently.
    pub async fn open(
        gateway: Arc<dyn SupportGateway>,
        store: Arc<dyn ObjectStore>,
        session: SessionContext,
        background: BackgroundTasks,
        limits: ThreadLimits,
        case_id: &CaseId,
    ) -> Result<Self, CaselineError> {
        let (case, messages) =
            tokio::try_join!(gateway.get_case(case_id), gateway.list_messages(case_id))?;
        debug!(case_id = %case_id, messages = messages.len(), "thread opened");

        let (reports_tx, reports_rx) = mpsc::unbounded_channel();
        Ok(Self {
            gateway,
            store,
            session,
            background,
            limits,
            case,
            entries: messages.into_iter().map(ThreadEntry::from_server).collect(),
            banner: None,
            reports_tx,
            reports_rx,
        })
    }

    pub fn case(&self) -> &SupportCase {
        &self.case
    }

    pub fn case_id(&self) -> &CaseId {
        &self.case.case_id
    }

    pub fn entries(&self) -> &[ThreadEntry] {
        &self.entries
    }

    pub fn entry(&self, correlation_id: Uuid) -> Option<&ThreadEntry> {
        self.entries
            .iter()
            .find(|e| e.correlation_id == correlation_id)
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn limits(&self) -> &ThreadLimits {
        &self.limits
    }

    pub fn view(&self) -> ThreadView<'_> {
        match self.case.awaiting_intent_selection() {
            Some(candidates) => ThreadView::SelectIntent(candidates),
            None => ThreadView::Messages(&self.entries),
        }
    }

    /// Confirms the pending candidate at `index` and lifts the gate.
    pub async fn select_pending_intent(&mut self, index: usize) -> Result<Uuid, CaselineError> {
        let candidate = {
            let candidates = self.case.awaiting_intent_selection().ok_or_else(|| {
                CaselineError::validation("intent", "No intent selection is pending")
            })?;
            candidates.get(index).cloned().ok_or_else(|| {
                CaselineError::validation(
                    "intent",
                    format!("There is no candidate number {}", index + 1),
                )
            })?
        };

        let mut message = NewMessage::from_customer(
            self.case.case_id.clone(),
            self.session.user_id(),
            format!("Intent selected: {}", candidate.intent),
            Vec::new(),
        );
        message.is_intent_selection = true;
        let correlation_id = self.push_optimistic(&message);

        let update = CaseUpdate::select_intent(candidate.intent_id.clone());
        if let Err(e) = self.gateway.update_case(&self.case.case_id, &update).await {
            warn!(case_id = %self.case.case_id, error = %e, "intent selection failed");
            self.mark_failed(correlation_id, e.to_string());
            self.banner = Some(Banner::error(SELECT_FAILED));
            return Err(e);
        }

        self.persist_detached(correlation_id, message);
        info!(case_id = %self.case.case_id, intent = %candidate.intent, "intent selected");

        match self.gateway.get_case(&self.case.case_id).await {
            Ok(case) => self.case = case,
            Err(e) => {
                warn!(error = %e, "case reload after intent selection failed");
                self.case.pending_intents = None;
                self.case.intent_id = candidate.intent_id;
            }
        }
        self.banner = None;
        Ok(correlation_id)
    }

    /// Sends a reply, uploading attachments first.
    ///
    /// Returns as soon as the optimistic entry is appended; the persist call
    /// continues in the background.
    pub async fn send_reply(
        &mut self,
        text: &str,
        attachments: Vec<Attachment>,
    ) -> Result<Uuid, CaselineError> {
        self.check_reply(text, &attachments)?;

        let report = attachments::upload_all(
            self.gateway.as_ref(),
            self.store.as_ref(),
            &self.case.case_id,
            attachments,
        )
        .await;

        let trimmed = text.trim();
        if !report.all_succeeded() {
            self.banner = Some(Banner::error(format!(
                "Failed to upload {}",
                report.failed.join(", ")
            )));
            if trimmed.is_empty() && report.urls.is_empty() {
                return Err(CaselineError::Upload {
                    file_name: report.failed.join(", "),
                    message: "no attachment could be uploaded".into(),
                });
            }
        } else {
            self.banner = None;
        }

        let content = if trimmed.is_empty() {
            MEDIA_ONLY_CONTENT
        } else {
            trimmed
        };
        let message = NewMessage::from_customer(
            self.case.case_id.clone(),
            self.session.user_id(),
            content,
            report.urls,
        );
        let correlation_id = self.push_optimistic(&message);
        self.persist_detached(correlation_id, message);
        Ok(correlation_id)
    }

    fn check_reply(&self, text: &str, attachments: &[Attachment]) -> Result<(), CaselineError> {
        if self.case.awaiting_intent_selection().is_some() {
            return Err(CaselineError::validation(
                "reply",
                "Select one of the suggested intents before replying",
            ));
        }
        if text.trim().is_empty() && attachments.is_empty() {
            return Err(CaselineError::validation(
                "reply",
                "Type a message or attach a file",
            ));
        }
        let length = text.chars().count();
        if length > self.limits.max_message_chars {
            return Err(CaselineError::validation(
                "reply",
                format!(
                    "Message is {length} characters; the limit is {}",
                    self.limits.max_message_chars
                ),
            ));
        }
        if let Some(bad) = attachments
            .iter()
            .find(|a| !self.limits.attachment_types.contains(&a.content_type))
        {
            return Err(CaselineError::validation(
                "attachments",
                format!(
                    "{} is not a supported file type ({})",
                    bad.file_name,
                    self.limits.attachment_types.join(", ")
                ),
            ));
        }
        Ok(())
    }

    fn push_optimistic(&mut self, message: &NewMessage) -> Uuid {
        let correlation_id = Uuid::new_v4();
        let local = message.to_local(
            MessageId(format!("local-{correlation_id}")),
            chrono::Utc::now().to_rfc3339(),
        );
        self.entries.push(ThreadEntry {
            correlation_id,
            message: local,
            delivery: Delivery::Pending,
        });
        correlation_id
    }

    fn persist_detached(&self, correlation_id: Uuid, message: NewMessage) {
        let gateway = Arc::clone(&self.gateway);
        let reports = self.reports_tx.clone();
        self.background.spawn_detached("persist_message", async move {
            match gateway.add_message(&message).await {
                Ok(stored) => {
                    let _ = reports.send(DeliveryReport::Confirmed {
                        correlation_id,
                        stored,
                    });
                    Ok(())
                }
                Err(e) => {
                    let _ = reports.send(DeliveryReport::Failed {
                        correlation_id,
                        reason: e.to_string(),
                    });
                    Err(e)
                }
            }
        });
    }

    /// Applies every delivery report that has arrived. Returns how many.
    pub fn poll_deliveries(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(report) = self.reports_rx.try_recv() {
            self.apply(report);
            applied += 1;
        }
        applied
    }

    pub fn has_pending(&self) -> bool {
        self.entries.iter().any(|e| e.delivery == Delivery::Pending)
    }

    /// Waits until no entry is pending, up to `timeout`. Returns false on timeout.
    pub async fn settle(&mut self, timeout: Duration) -> bool {
        self.poll_deliveries();
        let deadline = tokio::time::Instant::now() + timeout;
        while self.has_pending() {
            match tokio::time::timeout_at(deadline, self.reports_rx.recv()).await {
                Ok(Some(report)) => self.apply(report),
                Ok(None) | Err(_) => return false,
            }
        }
        true
    }

    fn apply(&mut self, report: DeliveryReport) {
        match report {
            DeliveryReport::Confirmed {
                correlation_id,
                stored,
            } => {
                let duplicate = stored.as_ref().is_some_and(|s| {
                    self.entries.iter().any(|e| {
                        e.correlation_id != correlation_id
                            && e.delivery == Delivery::Confirmed
                            && e.message.message_id == s.message_id
                    })
                });
                if duplicate {
                    self.entries.retain(|e| e.correlation_id != correlation_id);
                    return;
                }
                if let Some(entry) = self
                    .entries
                    .iter_mut()
                    .find(|e| e.correlation_id == correlation_id)
                {
                    if let Some(stored) = stored {
                        entry.message = stored;
                    }
                    entry.delivery = Delivery::Confirmed;
                }
            }
            DeliveryReport::Failed {
                correlation_id,
                reason,
            } => {
                self.mark_failed(correlation_id, reason);
                self.banner = Some(Banner::error(SEND_FAILED));
            }
        }
    }

    fn mark_failed(&mut self, correlation_id: Uuid, reason: String) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.correlation_id == correlation_id)
        {
            entry.delivery = Delivery::Failed(reason);
        }
    }

    /// Reloads the case and history. Local entries still pending or failed
    /// are kept after the server history.
    pub async fn refresh(&mut self) -> Result<(), CaselineError> {
        self.poll_deliveries();
        let case_id = self.case.case_id.clone();
        let (case, messages) = tokio::try_join!(
            self.gateway.get_case(&case_id),
            self.gateway.list_messages(&case_id)
        )?;

        let local: Vec<ThreadEntry> = self.entries.drain(..).filter(ThreadEntry::is_local).collect();
        self.case = case;
        self.entries = messages.into_iter().map(ThreadEntry::from_server).collect();

        // A pending reply the server already stored takes over the server
        // copy, so its late delivery report lands on that entry.
        let server_len = self.entries.len();
        let mut claimed = vec![false; server_len];
        for entry in local {
            let stored = (entry.delivery == Delivery::Pending)
                .then(|| {
                    (0..server_len).find(|&i| {
                        !claimed[i] && is_stored_copy(&entry.message, &self.entries[i].message)
                    })
                })
                .flatten();
            match stored {
                Some(i) => {
                    debug!(
                        correlation_id = %entry.correlation_id,
                        message_id = %self.entries[i].message.message_id.0,
                        "pending reply already stored"
                    );
                    claimed[i] = true;
                    self.entries[i].correlation_id = entry.correlation_id;
                }
                None => self.entries.push(entry),
            }
        }
        Ok(())
    }
}

/// Allowed lag of the server clock behind ours when matching stored copies.
const CLOCK_SKEW_SECS: i64 = 120;

/// Whether `server` is the stored form of the optimistic `local` message:
/// same sender, content and media, created no earlier than the local copy.
fn is_stored_copy(local: &SupportMessage, server: &SupportMessage) -> bool {
    if local.sender_type != server.sender_type
        || local.sender_id != server.sender_id
        || local.content != server.content
        || local.media_urls != server.media_urls
    {
        return false;
    }
    let parse = |raw: &str| chrono::DateTime::parse_from_rfc3339(raw.trim()).ok();
    match (parse(&local.created_at), parse(&server.created_at)) {
        (Some(sent), Some(stored)) => stored >= sent - chrono::TimeDelta::seconds(CLOCK_SKEW_SECS),
        _ => false,
    }
}
