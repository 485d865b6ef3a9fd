// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent search and candidate presentation.

use std::sync::Arc;

use caseline_core::traits::SupportGateway;
use caseline_core::types::{IntentCandidate, IntentSearchResponse};
use caseline_core::{CaseId, CaselineError};
use tracing::{debug, info};

/// Scores above this are shown as a strong match.
const STRONG_MATCH_THRESHOLD: f64 = 80.0;

/// What a search response means for the intake flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The backend already created a case for a single confident match.
    AutoCreated(CaseId),
    /// The operator has to pick one of these.
    Candidates(Vec<IntentCandidate>),
    NoMatch,
}

impl SearchOutcome {
    pub fn classify(response: IntentSearchResponse) -> Self {
        if !response.success {
            return Self::NoMatch;
        }
        match response.case_id {
            Some(case_id) if !case_id.0.trim().is_empty() => Self::AutoCreated(case_id),
            _ if !response.intents.is_empty() => Self::Candidates(response.intents),
            _ => Self::NoMatch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceBadge {
    pub percent: i64,
    pub strong: bool,
}

impl ConfidenceBadge {
    pub fn from_score(score: f64) -> Self {
        Self {
            percent: score.round() as i64,
            strong: score > STRONG_MATCH_THRESHOLD,
        }
    }
}

/// One selectable candidate as rendered to the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCard {
    pub name: String,
    pub description: String,
    pub badge: Option<ConfidenceBadge>,
}

impl From<&IntentCandidate> for CandidateCard {
    fn from(candidate: &IntentCandidate) -> Self {
        Self {
            name: candidate.intent.clone(),
            description: candidate
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .unwrap_or("No description available")
                .to_string(),
            badge: candidate.confidence_score.map(ConfidenceBadge::from_score),
        }
    }
}

pub struct IntentMatcher {
    gateway: Arc<dyn SupportGateway>,
}

impl IntentMatcher {
    pub fn new(gateway: Arc<dyn SupportGateway>) -> Self {
        Self { gateway }
    }

    pub async fn search(&self, text: &str) -> Result<SearchOutcome, CaselineError> {
        let response = self.gateway.search_intents(text).await?;
        let outcome = SearchOutcome::classify(response);
        match &outcome {
            SearchOutcome::AutoCreated(id) => info!(case_id = %id, "case created by intent search"),
            SearchOutcome::Candidates(c) => debug!(count = c.len(), "intent candidates returned"),
            SearchOutcome::NoMatch => debug!("no intent matched"),
        }
        Ok(outcome)
    }
}
