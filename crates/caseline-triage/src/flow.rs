// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intake orchestration: draft, search, candidate selection, creation.
//!
//! Phases move Editing -> (Choosing | NoMatch | Created). A search that
//! finds nothing never creates a case on its own; uncategorized creation is
//! an explicit operator action and only when enabled.

use std::fmt;
use std::sync::Arc;

use caseline_config::model::IntakeConfig;
use caseline_core::traits::SupportGateway;
use caseline_core::types::IntentCandidate;
use caseline_core::{CaseId, SessionContext};
use tracing::warn;

use crate::background::BackgroundTasks;
use crate::banner::Banner;
use crate::creator::CaseCreator;
use crate::intake::IssueDraft;
use crate::matcher::{CandidateCard, IntentMatcher, SearchOutcome};

pub const NO_MATCH_ADVISORY: &str = "No matching categories found. Please add more details to your \
issue description to help us find the most relevant category for your problem. If you're unable \
to find a matching category after multiple attempts, please contact our customer care team \
directly for assistance.";

const SEARCH_FAILED: &str = "Failed to process your request. Please try again.";
const CREATE_FAILED: &str = "Failed to create support case. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakePhase {
    Editing,
    Choosing,
    NoMatch,
    Created(CaseId),
}

impl fmt::Display for IntakePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntakePhase::Editing => write!(f, "editing"),
            IntakePhase::Choosing => write!(f, "choosing"),
            IntakePhase::NoMatch => write!(f, "no-match"),
            IntakePhase::Created(id) => write!(f, "created({id})"),
        }
    }
}

/// Result of one operator action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeEvent {
    /// Blocked locally; no network call was made.
    Rejected,
    AutoCreated(CaseId),
    CandidatesShown(usize),
    NoMatch,
    Created(CaseId),
    /// A gateway call failed; the draft is kept for retry.
    Failed,
}

pub struct IntakeFlow {
    draft: IssueDraft,
    matcher: IntentMatcher,
    creator: CaseCreator,
    candidates: Vec<IntentCandidate>,
    banner: Option<Banner>,
    phase: IntakePhase,
    allow_uncategorized: bool,
}

impl IntakeFlow {
    pub fn new(
        gateway: Arc<dyn SupportGateway>,
        session: SessionContext,
        background: BackgroundTasks,
        config: &IntakeConfig,
    ) -> Self {
        Self {
            draft: IssueDraft::new(config.min_words),
            matcher: IntentMatcher::new(Arc::clone(&gateway)),
            creator: CaseCreator::new(gateway, session, background, config.title_prefix_chars),
            candidates: Vec::new(),
            banner: None,
            phase: IntakePhase::Editing,
            allow_uncategorized: config.allow_uncategorized,
        }
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.draft.set_text(text);
        if !matches!(self.phase, IntakePhase::Choosing) {
            self.phase = IntakePhase::Editing;
        }
    }

    pub async fn search(&mut self) -> IntakeEvent {
        let text = match self.draft.validate() {
            Ok(text) => text.to_string(),
            Err(e) => {
                self.banner = Some(Banner::warning(e.to_string()));
                return IntakeEvent::Rejected;
            }
        };
        self.banner = None;

        match self.matcher.search(&text).await {
            Ok(SearchOutcome::AutoCreated(case_id)) => {
                self.reset();
                self.banner = Some(Banner::success(format!(
                    "Support case created automatically! Case ID: {case_id}. Your issue has been \
                     matched to the most relevant category and our support team has been notified."
                )));
                self.phase = IntakePhase::Created(case_id.clone());
                IntakeEvent::AutoCreated(case_id)
            }
            Ok(SearchOutcome::Candidates(candidates)) => {
                let count = candidates.len();
                self.candidates = candidates;
                self.phase = IntakePhase::Choosing;
                IntakeEvent::CandidatesShown(count)
            }
            Ok(SearchOutcome::NoMatch) => {
                self.candidates.clear();
                self.draft.show_no_match();
                self.phase = IntakePhase::NoMatch;
                IntakeEvent::NoMatch
            }
            Err(e) => {
                warn!(error = %e, "intent search failed");
                self.candidates.clear();
                self.phase = IntakePhase::Editing;
                self.banner = Some(Banner::error(SEARCH_FAILED));
                IntakeEvent::Failed
            }
        }
    }

    /// Creates a case categorized by the candidate at `index`.
    pub async fn select(&mut self, index: usize) -> IntakeEvent {
        let Some(candidate) = self.candidates.get(index).cloned() else {
            self.banner = Some(Banner::warning("Select one of the listed categories"));
            return IntakeEvent::Rejected;
        };
        self.create(Some(candidate)).await
    }

    /// Creates a case with no category after a search found none.
    pub async fn create_uncategorized(&mut self) -> IntakeEvent {
        if !self.allow_uncategorized || self.phase != IntakePhase::NoMatch {
            self.banner = Some(Banner::warning(
                "Creating a case without a category is not available",
            ));
            return IntakeEvent::Rejected;
        }
        self.create(None).await
    }

    /// The draft may have been edited since the search, so the word gate is
    /// checked again before anything is sent.
    async fn create(&mut self, candidate: Option<IntentCandidate>) -> IntakeEvent {
        let text = match self.draft.validate() {
            Ok(text) => text.to_string(),
            Err(e) => {
                self.banner = Some(Banner::warning(e.to_string()));
                return IntakeEvent::Rejected;
            }
        };
        self.banner = None;
        match self
            .creator
            .create(&text, candidate.as_ref(), Vec::new())
            .await
        {
            Ok(case_id) => {
                self.reset();
                self.banner = Some(Banner::success(format!(
                    "Support case created successfully! Case ID: {case_id}"
                )));
                self.phase = IntakePhase::Created(case_id.clone());
                IntakeEvent::Created(case_id)
            }
            Err(e) => {
                warn!(error = %e, "case creation failed");
                self.banner = Some(Banner::error(CREATE_FAILED));
                IntakeEvent::Failed
            }
        }
    }

    fn reset(&mut self) {
        self.draft.clear();
        self.candidates.clear();
    }

    pub fn dismiss_banner(&mut self) {
        if self.banner.as_ref().is_some_and(|b| b.dismissible) {
            self.banner = None;
        }
    }

    pub fn draft(&self) -> &IssueDraft {
        &self.draft
    }

    pub fn candidates(&self) -> &[IntentCandidate] {
        &self.candidates
    }

    pub fn cards(&self) -> Vec<CandidateCard> {
        self.candidates.iter().map(CandidateCard::from).collect()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// The "no category found" advisory, while it applies.
    pub fn advisory(&self) -> Option<Banner> {
        self.draft
            .shows_no_match()
            .then(|| Banner::info(NO_MATCH_ADVISORY).sticky())
    }

    pub fn phase(&self) -> &IntakePhase {
        &self.phase
    }

    pub fn allows_uncategorized(&self) -> bool {
        self.allow_uncategorized
    }
}
