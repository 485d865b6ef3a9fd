// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for the values most tests need.

use caseline_config::CaselineConfig;
use caseline_core::types::{IntentCandidate, IntentSearchResponse};
use caseline_core::{CaseId, SessionContext};

pub const TEST_USER: &str = "user-test";

pub fn session() -> SessionContext {
    SessionContext::new(TEST_USER, None)
        .unwrap_or_else(|e| panic!("test session must build: {e}"))
        .with_chat_session("chat-test")
}

pub fn config() -> CaselineConfig {
    let mut config = CaselineConfig::default();
    config.session.user_id = Some(TEST_USER.to_string());
    config
}

pub fn candidate(name: &str, score: f64) -> IntentCandidate {
    IntentCandidate {
        intent_id: Some(format!("intent-{}", name.to_lowercase().replace(' ', "-"))),
        intent: name.to_string(),
        description: Some(format!("{name} help")),
        confidence_score: Some(score),
    }
}

pub fn candidates_response(candidates: Vec<IntentCandidate>) -> IntentSearchResponse {
    IntentSearchResponse {
        success: true,
        case_id: None,
        intents: candidates,
    }
}

pub fn auto_created_response(case_id: &str) -> IntentSearchResponse {
    IntentSearchResponse {
        success: true,
        case_id: Some(CaseId::from(case_id)),
        intents: Vec::new(),
    }
}

pub fn no_match_response() -> IntentSearchResponse {
    IntentSearchResponse {
        success: true,
        case_id: None,
        intents: Vec::new(),
    }
}

/// A sentence of exactly `n` words.
pub fn words(n: usize) -> String {
    (1..=n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
}
