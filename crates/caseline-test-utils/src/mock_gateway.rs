// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory backend for deterministic workflow tests.
//!
//! `MockGateway` implements all four gateway traits. Responses are either
//! scripted per call kind (FIFO) or derived from seeded state. Every call is
//! recorded, failures can be injected for the next call of a kind, and a
//! call can be held open with [`MockGateway::gate`] so tests can observe
//! state while it is still in flight.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use caseline_core::catalog::{Intent, Tool};
use caseline_core::traits::{AssistantGateway, CatalogGateway, KnowledgeGateway, SupportGateway};
use caseline_core::types::{
    CaseUpdate, ChatReply, CreatedCase, IntentSearchResponse, KnowledgeFile, MessageId, NewCase,
    NewMessage, PresignedUpload, SummaryResponse, SupportCase, SupportMessage, UploadTicket,
};
use caseline_core::{CaseId, CaselineError};
use tokio::sync::oneshot;

/// Kind of gateway call, used for failure injection, gating and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    SearchIntents,
    CreateCase,
    ListCases,
    GetCase,
    UpdateCase,
    ListMessages,
    AddMessage,
    ProcessNewCase,
    GetSummary,
    GenerateSummary,
    UploadUrl,
    ListIntents,
    CreateIntent,
    UpdateIntent,
    DeleteIntent,
    ListTools,
    CreateTool,
    UpdateTool,
    DeleteTool,
    PresignDocument,
    ProcessDocument,
    ListDocuments,
    DeleteDocument,
    Chat,
    GenerateUtterances,
}

/// A call as the backend saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    SearchIntents { text: String },
    CreateCase(NewCase),
    ListCases,
    GetCase(CaseId),
    UpdateCase(CaseId, CaseUpdate),
    ListMessages(CaseId),
    AddMessage(NewMessage),
    ProcessNewCase(CaseId),
    GetSummary { case_id: CaseId, force: bool },
    GenerateSummary(CaseId),
    UploadUrl { case_id: CaseId, file_name: String, file_type: String },
    ListIntents,
    CreateIntent(Intent),
    UpdateIntent(Intent),
    DeleteIntent(String),
    ListTools,
    CreateTool(Tool),
    UpdateTool(Tool),
    DeleteTool(String),
    PresignDocument { file_name: String, file_type: String },
    ProcessDocument { file_name: String, file_type: String },
    ListDocuments,
    DeleteDocument(String),
    Chat(String),
    GenerateUtterances(String),
}

impl RecordedCall {
    pub fn kind(&self) -> Call {
        match self {
            Self::SearchIntents { .. } => Call::SearchIntents,
            Self::CreateCase(_) => Call::CreateCase,
            Self::ListCases => Call::ListCases,
            Self::GetCase(_) => Call::GetCase,
            Self::UpdateCase(..) => Call::UpdateCase,
            Self::ListMessages(_) => Call::ListMessages,
            Self::AddMessage(_) => Call::AddMessage,
            Self::ProcessNewCase(_) => Call::ProcessNewCase,
            Self::GetSummary { .. } => Call::GetSummary,
            Self::GenerateSummary(_) => Call::GenerateSummary,
            Self::UploadUrl { .. } => Call::UploadUrl,
            Self::ListIntents => Call::ListIntents,
            Self::CreateIntent(_) => Call::CreateIntent,
            Self::UpdateIntent(_) => Call::UpdateIntent,
            Self::DeleteIntent(_) => Call::DeleteIntent,
            Self::ListTools => Call::ListTools,
            Self::CreateTool(_) => Call::CreateTool,
            Self::UpdateTool(_) => Call::UpdateTool,
            Self::DeleteTool(_) => Call::DeleteTool,
            Self::PresignDocument { .. } => Call::PresignDocument,
            Self::ProcessDocument { .. } => Call::ProcessDocument,
            Self::ListDocuments => Call::ListDocuments,
            Self::DeleteDocument(_) => Call::DeleteDocument,
            Self::Chat(_) => Call::Chat,
            Self::GenerateUtterances(_) => Call::GenerateUtterances,
        }
    }
}

/// Injected failure for the next call of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Http(u16),
    Transport,
}

impl Failure {
    fn into_error(self, call: Call) -> CaselineError {
        match self {
            Self::Http(status) => CaselineError::Http {
                status,
                message: format!("injected failure for {call:?}"),
            },
            Self::Transport => CaselineError::Transport {
                message: format!("injected transport failure for {call:?}"),
                source: None,
            },
        }
    }
}

/// Holds the next call of a kind open until released or dropped.
pub struct GateHandle {
    release: Option<oneshot::Sender<()>>,
}

impl GateHandle {
    pub fn release(mut self) {
        if let Some(tx) = self.release.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for GateHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.release.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Default)]
struct State {
    calls: Vec<RecordedCall>,
    failures: HashMap<Call, VecDeque<Failure>>,
    gates: HashMap<Call, VecDeque<oneshot::Receiver<()>>>,
    search_responses: VecDeque<IntentSearchResponse>,
    cases: Vec<SupportCase>,
    messages: HashMap<CaseId, Vec<SupportMessage>>,
    summaries: HashMap<CaseId, SummaryResponse>,
    echo_messages: bool,
    failing_upload_files: Vec<String>,
    intents: Vec<Intent>,
    tools: Vec<Tool>,
    documents: Vec<KnowledgeFile>,
    next_id: u64,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// Scripted in-memory backend. Clones share state.
#[derive(Clone)]
pub struct MockGateway {
    state: Arc<Mutex<State>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                echo_messages: true,
                ..State::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- scripting -------------------------------------------------------

    /// Queue a response for the next `search_intents`. Unscripted searches
    /// answer with no match.
    pub fn push_search_response(&self, response: IntentSearchResponse) -> &Self {
        self.lock().search_responses.push_back(response);
        self
    }

    /// Seed a case; `create_case` also adds cases here.
    pub fn insert_case(&self, case: SupportCase) -> &Self {
        let mut state = self.lock();
        state.cases.retain(|c| c.case_id != case.case_id);
        state.cases.push(case);
        self
    }

    pub fn insert_message(&self, message: SupportMessage) -> &Self {
        self.lock()
            .messages
            .entry(message.case_id.clone())
            .or_default()
            .push(message);
        self
    }

    pub fn set_summary(&self, case_id: CaseId, summary: SummaryResponse) -> &Self {
        self.lock().summaries.insert(case_id, summary);
        self
    }

    /// Whether `add_message` echoes the stored message (default) or returns an empty body.
    pub fn echo_messages(&self, echo: bool) -> &Self {
        self.lock().echo_messages = echo;
        self
    }

    /// `upload_url` fails with a 500 for this file name, every time.
    pub fn fail_upload_url_for(&self, file_name: &str) -> &Self {
        self.lock().failing_upload_files.push(file_name.to_string());
        self
    }

    pub fn insert_document(&self, file: KnowledgeFile) -> &Self {
        self.lock().documents.push(file);
        self
    }

    /// Fail the next call of `call` with `failure`. Repeatable; queued FIFO.
    pub fn fail_next(&self, call: Call, failure: Failure) -> &Self {
        self.lock()
            .failures
            .entry(call)
            .or_default()
            .push_back(failure);
        self
    }

    /// Hold the next call of `call` open until the returned handle is
    /// released or dropped.
    pub fn gate(&self, call: Call) -> GateHandle {
        let (tx, rx) = oneshot::channel();
        self.lock().gates.entry(call).or_default().push_back(rx);
        GateHandle { release: Some(tx) }
    }

    // --- inspection ------------------------------------------------------

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.lock().calls.iter().filter(|c| c.kind() == call).count()
    }

    pub fn created_cases(&self) -> Vec<NewCase> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                RecordedCall::CreateCase(case) => Some(case.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn sent_messages(&self) -> Vec<NewMessage> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                RecordedCall::AddMessage(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn case(&self, case_id: &CaseId) -> Option<SupportCase> {
        self.lock()
            .cases
            .iter()
            .find(|c| &c.case_id == case_id)
            .cloned()
    }

    pub fn documents(&self) -> Vec<KnowledgeFile> {
        self.lock().documents.clone()
    }

    pub fn intents(&self) -> Vec<Intent> {
        self.lock().intents.clone()
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.lock().tools.clone()
    }

    // --- call plumbing ---------------------------------------------------

    /// Records the call, waits on any gate, then applies any injected failure.
    async fn enter(&self, recorded: RecordedCall) -> Result<(), CaselineError> {
        let call = recorded.kind();
        let gate = {
            let mut state = self.lock();
            state.calls.push(recorded);
            state.gates.get_mut(&call).and_then(VecDeque::pop_front)
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let failure = self
            .lock()
            .failures
            .get_mut(&call)
            .and_then(VecDeque::pop_front);
        match failure {
            Some(failure) => {
                tracing::debug!(?call, ?failure, "mock gateway injecting failure");
                Err(failure.into_error(call))
            }
            None => Ok(()),
        }
    }

    fn not_found(what: &str, id: &str) -> CaselineError {
        CaselineError::Http {
            status: 404,
            message: format!("{what} {id} not found"),
        }
    }
}

#[async_trait]
impl SupportGateway for MockGateway {
    async fn search_intents(&self, text: &str) -> Result<IntentSearchResponse, CaselineError> {
        self.enter(RecordedCall::SearchIntents {
            text: text.to_string(),
        })
        .await?;
        let mut state = self.lock();
        let response = state.search_responses.pop_front().unwrap_or(IntentSearchResponse {
            success: true,
            ..IntentSearchResponse::default()
        });
        if let Some(case_id) = &response.case_id
            && !state.cases.iter().any(|c| &c.case_id == case_id)
        {
            state.cases.push(SupportCase {
                case_id: case_id.clone(),
                description: text.to_string(),
                ..SupportCase::default()
            });
        }
        Ok(response)
    }

    async fn create_case(&self, case: &NewCase) -> Result<CreatedCase, CaselineError> {
        self.enter(RecordedCall::CreateCase(case.clone())).await?;
        let mut state = self.lock();
        let case_id = CaseId(state.next_id("case"));
        state.cases.push(SupportCase {
            case_id: case_id.clone(),
            title: case.title.clone(),
            description: case.description.clone(),
            priority: case.priority,
            intent_id: case.intent_id.clone(),
            ..SupportCase::default()
        });
        Ok(CreatedCase { case_id })
    }

    async fn list_cases(&self) -> Result<Vec<SupportCase>, CaselineError> {
        self.enter(RecordedCall::ListCases).await?;
        Ok(self.lock().cases.clone())
    }

    async fn get_case(&self, case_id: &CaseId) -> Result<SupportCase, CaselineError> {
        self.enter(RecordedCall::GetCase(case_id.clone())).await?;
        self.case(case_id)
            .ok_or_else(|| Self::not_found("case", &case_id.0))
    }

    async fn update_case(
        &self,
        case_id: &CaseId,
        update: &CaseUpdate,
    ) -> Result<(), CaselineError> {
        self.enter(RecordedCall::UpdateCase(case_id.clone(), update.clone()))
            .await?;
        let mut state = self.lock();
        let case = state
            .cases
            .iter_mut()
            .find(|c| &c.case_id == case_id)
            .ok_or_else(|| Self::not_found("case", &case_id.0))?;
        if let Some(status) = update.status {
            case.status = status;
        }
        if let Some(priority) = update.priority {
            case.priority = priority;
        }
        if let Some(resolved) = update.resolved {
            case.resolved = Some(resolved);
        }
        if let Some(intent_id) = &update.intent_id {
            case.intent_id = Some(intent_id.clone());
        }
        if let Some(pending) = &update.pending_intents {
            case.pending_intents = pending.clone();
        }
        if let Some(agent) = &update.assigned_agent {
            case.assigned_agent = Some(agent.clone());
        }
        Ok(())
    }

    async fn list_messages(&self, case_id: &CaseId) -> Result<Vec<SupportMessage>, CaselineError> {
        self.enter(RecordedCall::ListMessages(case_id.clone())).await?;
        Ok(self
            .lock()
            .messages
            .get(case_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_message(
        &self,
        message: &NewMessage,
    ) -> Result<Option<SupportMessage>, CaselineError> {
        self.enter(RecordedCall::AddMessage(message.clone())).await?;
        let mut state = self.lock();
        let id = MessageId(state.next_id("msg"));
        let stored = message.to_local(id, "2026-01-01T00:00:00Z".to_string());
        state
            .messages
            .entry(message.case_id.clone())
            .or_default()
            .push(stored.clone());
        Ok(state.echo_messages.then_some(stored))
    }

    async fn process_new_case(&self, case_id: &CaseId) -> Result<(), CaselineError> {
        self.enter(RecordedCall::ProcessNewCase(case_id.clone())).await
    }

    async fn get_summary(
        &self,
        case_id: &CaseId,
        force: bool,
    ) -> Result<SummaryResponse, CaselineError> {
        self.enter(RecordedCall::GetSummary {
            case_id: case_id.clone(),
            force,
        })
        .await?;
        Ok(self
            .lock()
            .summaries
            .get(case_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn generate_summary(&self, case_id: &CaseId) -> Result<SummaryResponse, CaselineError> {
        self.enter(RecordedCall::GenerateSummary(case_id.clone()))
            .await?;
        Ok(self
            .lock()
            .summaries
            .get(case_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upload_url(
        &self,
        case_id: &CaseId,
        file_name: &str,
        file_type: &str,
    ) -> Result<UploadTicket, CaselineError> {
        self.enter(RecordedCall::UploadUrl {
            case_id: case_id.clone(),
            file_name: file_name.to_string(),
            file_type: file_type.to_string(),
        })
        .await?;
        if self
            .lock()
            .failing_upload_files
            .iter()
            .any(|f| f == file_name)
        {
            return Err(CaselineError::Http {
                status: 500,
                message: format!("cannot sign {file_name}"),
            });
        }
        Ok(UploadTicket {
            upload_url: format!("https://uploads.test/put/{case_id}/{file_name}"),
            file_url: Some(format!("https://uploads.test/{case_id}/{file_name}")),
            public_url: None,
        })
    }
}

#[async_trait]
impl CatalogGateway for MockGateway {
    async fn list_intents(&self) -> Result<Vec<Intent>, CaselineError> {
        self.enter(RecordedCall::ListIntents).await?;
        Ok(self.intents())
    }

    async fn create_intent(&self, intent: &Intent) -> Result<(), CaselineError> {
        self.enter(RecordedCall::CreateIntent(intent.clone())).await?;
        let mut state = self.lock();
        let mut stored = intent.clone();
        if stored.intentid.is_none() {
            stored.intentid = Some(state.next_id("intent"));
        }
        state.intents.push(stored);
        Ok(())
    }

    async fn update_intent(&self, intent: &Intent) -> Result<(), CaselineError> {
        self.enter(RecordedCall::UpdateIntent(intent.clone())).await?;
        let mut state = self.lock();
        let slot = state
            .intents
            .iter_mut()
            .find(|i| i.intentid.is_some() && i.intentid == intent.intentid)
            .ok_or_else(|| {
                Self::not_found("intent", intent.intentid.as_deref().unwrap_or_default())
            })?;
        *slot = intent.clone();
        Ok(())
    }

    async fn delete_intent(&self, intent_id: &str) -> Result<(), CaselineError> {
        self.enter(RecordedCall::DeleteIntent(intent_id.to_string()))
            .await?;
        self.lock()
            .intents
            .retain(|i| i.intentid.as_deref() != Some(intent_id));
        Ok(())
    }

    async fn list_tools(&self) -> Result<Vec<Tool>, CaselineError> {
        self.enter(RecordedCall::ListTools).await?;
        Ok(self.tools())
    }

    async fn create_tool(&self, tool: &Tool) -> Result<(), CaselineError> {
        self.enter(RecordedCall::CreateTool(tool.clone())).await?;
        self.lock().tools.push(tool.clone());
        Ok(())
    }

    async fn update_tool(&self, tool: &Tool) -> Result<(), CaselineError> {
        self.enter(RecordedCall::UpdateTool(tool.clone())).await?;
        let mut state = self.lock();
        let slot = state
            .tools
            .iter_mut()
            .find(|t| t.name == tool.name)
            .ok_or_else(|| Self::not_found("tool", &tool.name))?;
        *slot = tool.clone();
        Ok(())
    }

    async fn delete_tool(&self, name: &str) -> Result<(), CaselineError> {
        self.enter(RecordedCall::DeleteTool(name.to_string())).await?;
        self.lock().tools.retain(|t| t.name != name);
        Ok(())
    }
}

#[async_trait]
impl KnowledgeGateway for MockGateway {
    async fn presign_document(
        &self,
        file_name: &str,
        file_type: &str,
    ) -> Result<PresignedUpload, CaselineError> {
        self.enter(RecordedCall::PresignDocument {
            file_name: file_name.to_string(),
            file_type: file_type.to_string(),
        })
        .await?;
        Ok(PresignedUpload {
            url: Some(format!("https://uploads.test/kb/{file_name}")),
        })
    }

    async fn process_document(
        &self,
        file_name: &str,
        file_type: &str,
    ) -> Result<(), CaselineError> {
        self.enter(RecordedCall::ProcessDocument {
            file_name: file_name.to_string(),
            file_type: file_type.to_string(),
        })
        .await?;
        let mut state = self.lock();
        if !state.documents.iter().any(|d| d.file_name == file_name) {
            state.documents.push(KnowledgeFile {
                file_name: file_name.to_string(),
                url: format!("https://uploads.test/kb/{file_name}"),
                created_at: None,
                updated_at: None,
            });
        }
        Ok(())
    }

    async fn list_documents(&self) -> Result<Vec<KnowledgeFile>, CaselineError> {
        self.enter(RecordedCall::ListDocuments).await?;
        Ok(self.documents())
    }

    async fn delete_document(&self, file_name: &str) -> Result<(), CaselineError> {
        self.enter(RecordedCall::DeleteDocument(file_name.to_string()))
            .await?;
        self.lock().documents.retain(|d| d.file_name != file_name);
        Ok(())
    }
}

#[async_trait]
impl AssistantGateway for MockGateway {
    async fn chat(&self, text: &str) -> Result<ChatReply, CaselineError> {
        self.enter(RecordedCall::Chat(text.to_string())).await?;
        Ok(ChatReply {
            text: format!("You said: {text}"),
        })
    }

    async fn generate_utterances(
        &self,
        intent: &str,
    ) -> Result<serde_json::Value, CaselineError> {
        self.enter(RecordedCall::GenerateUtterances(intent.to_string()))
            .await?;
        Ok(serde_json::json!({
            "intent": intent,
            "utterances": [format!("I need help with {intent}")]
        }))
    }
}
