// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the intake flow against the mock gateway.

use std::sync::Arc;
use std::time::Duration;

use caseline_config::model::IntakeConfig;
use caseline_core::types::IntentSearchResponse;
use caseline_core::CaseId;
use caseline_test_utils::fixtures::{self, candidate, words};
use caseline_test_utils::{Call, Failure, MockGateway};
use caseline_triage::{BackgroundTasks, IntakeEvent, IntakeFlow, IntakePhase, Tone};

const LOGIN_ISSUE: &str = "I cannot log into my account after resetting my password this morning";

fn flow_with(gateway: &MockGateway, config: IntakeConfig) -> (IntakeFlow, BackgroundTasks) {
    let background = BackgroundTasks::new();
    let flow = IntakeFlow::new(
        Arc::new(gateway.clone()),
        fixtures::session(),
        background.clone(),
        &config,
    );
    (flow, background)
}

fn intake_flow(gateway: &MockGateway) -> (IntakeFlow, BackgroundTasks) {
    flow_with(gateway, IntakeConfig::default())
}

/// The full login walkthrough: search, one strong candidate, select, created.
#[tokio::test]
async fn login_issue_is_matched_selected_and_created() {
    assert_eq!(LOGIN_ISSUE.split_whitespace().count(), 12);
    let gateway = MockGateway::new();
    gateway.push_search_response(fixtures::candidates_response(vec![candidate(
        "Login Issues",
        92.0,
    )]));
    let (mut flow, background) = intake_flow(&gateway);

    flow.edit(LOGIN_ISSUE);
    assert!(flow.draft().can_search());
    assert_eq!(flow.search().await, IntakeEvent::CandidatesShown(1));
    assert_eq!(flow.phase(), &IntakePhase::Choosing);

    let cards = flow.cards();
    let badge = cards[0].badge.expect("score should render a badge");
    assert_eq!(cards[0].name, "Login Issues");
    assert_eq!(badge.percent, 92);
    assert!(badge.strong);

    let event = flow.select(0).await;
    let IntakeEvent::Created(case_id) = event.clone() else {
        panic!("expected a created case, got {event:?}");
    };

    let created = gateway.created_cases();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].title, "Login Issues");
    assert_eq!(created[0].description, LOGIN_ISSUE);
    assert_eq!(created[0].customer_id, fixtures::TEST_USER);
    assert_eq!(created[0].intent_id.as_deref(), Some("intent-login-issues"));

    let sent = gateway.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].content, LOGIN_ISSUE);
    assert_eq!(sent[0].case_id, case_id);
    assert!(sent[0].is_new_ticket);

    let banner = flow.banner().expect("success banner");
    assert_eq!(banner.tone, Tone::Success);
    assert_eq!(
        banner.message,
        format!("Support case created successfully! Case ID: {case_id}")
    );
    assert!(flow.draft().text().is_empty());
    assert!(flow.candidates().is_empty());

    assert!(background.drain(Duration::from_secs(1)).await);
    assert_eq!(gateway.count(Call::ProcessNewCase), 1);
}

#[tokio::test]
async fn auto_created_case_clears_input_and_names_the_id() {
    let gateway = MockGateway::new();
    gateway.push_search_response(fixtures::auto_created_response("case-77"));
    let (mut flow, _background) = intake_flow(&gateway);

    flow.edit(words(12));
    assert_eq!(
        flow.search().await,
        IntakeEvent::AutoCreated(CaseId::from("case-77"))
    );

    assert!(flow.draft().text().is_empty());
    let banner = flow.banner().expect("success banner");
    assert!(banner.message.contains("Case ID: case-77."));
    assert_eq!(gateway.count(Call::CreateCase), 0);
    assert_eq!(flow.phase(), &IntakePhase::Created(CaseId::from("case-77")));
}

#[tokio::test]
async fn two_candidates_render_rounded_scores_and_second_becomes_title() {
    let gateway = MockGateway::new();
    gateway.push_search_response(fixtures::candidates_response(vec![
        candidate("Billing", 64.4),
        candidate("Refunds", 80.6),
    ]));
    let (mut flow, _background) = intake_flow(&gateway);

    flow.edit(words(10));
    assert_eq!(flow.search().await, IntakeEvent::CandidatesShown(2));

    let badges: Vec<_> = flow.cards().iter().filter_map(|c| c.badge).collect();
    assert_eq!(badges[0].percent, 64);
    assert!(!badges[0].strong);
    assert_eq!(badges[1].percent, 81);
    assert!(badges[1].strong);

    assert!(matches!(flow.select(1).await, IntakeEvent::Created(_)));
    assert_eq!(gateway.created_cases()[0].title, "Refunds");
}

#[tokio::test]
async fn unsuccessful_or_empty_search_never_creates_a_case() {
    let gateway = MockGateway::new();
    gateway.push_search_response(IntentSearchResponse {
        success: false,
        case_id: None,
        intents: vec![candidate("Billing", 90.0)],
    });
    gateway.push_search_response(fixtures::no_match_response());
    let (mut flow, _background) = intake_flow(&gateway);

    flow.edit(words(11));
    assert_eq!(flow.search().await, IntakeEvent::NoMatch);
    assert_eq!(flow.search().await, IntakeEvent::NoMatch);

    assert_eq!(gateway.count(Call::SearchIntents), 2);
    assert_eq!(gateway.count(Call::CreateCase), 0);
    assert_eq!(flow.phase(), &IntakePhase::NoMatch);
    assert_eq!(flow.draft().text(), words(11));

    let advisory = flow.advisory().expect("no-match advisory");
    assert!(advisory.message.starts_with("No matching categories found."));
    assert!(!advisory.dismissible);

    flow.edit(words(13));
    assert!(flow.advisory().is_none());
}

#[tokio::test]
async fn short_description_is_rejected_without_a_request() {
    let gateway = MockGateway::new();
    let (mut flow, _background) = intake_flow(&gateway);

    flow.edit(words(9));
    assert_eq!(
        flow.draft().hint().as_deref(),
        Some("Please add 1 more words to enable search")
    );
    assert_eq!(flow.search().await, IntakeEvent::Rejected);
    assert_eq!(
        flow.banner().map(|b| b.message.as_str()),
        Some("Please provide at least 10 words in your description to search for matching categories")
    );

    flow.edit("   ");
    assert_eq!(flow.search().await, IntakeEvent::Rejected);
    assert_eq!(
        flow.banner().map(|b| b.message.as_str()),
        Some("Please describe your issue to continue")
    );
    assert_eq!(gateway.count(Call::SearchIntents), 0);
}

#[tokio::test]
async fn uncategorized_creation_needs_opt_in_and_a_failed_search() {
    let gateway = MockGateway::new();
    let (mut flow, _background) = intake_flow(&gateway);
    flow.edit(words(10));
    assert_eq!(flow.create_uncategorized().await, IntakeEvent::Rejected);
    assert_eq!(flow.search().await, IntakeEvent::NoMatch);
    assert_eq!(flow.create_uncategorized().await, IntakeEvent::Rejected);
    assert_eq!(gateway.count(Call::CreateCase), 0);

    let gateway = MockGateway::new();
    let (mut flow, background) = flow_with(
        &gateway,
        IntakeConfig {
            allow_uncategorized: true,
            title_prefix_chars: 12,
            ..IntakeConfig::default()
        },
    );
    assert!(flow.allows_uncategorized());
    flow.edit(words(10));
    assert_eq!(flow.search().await, IntakeEvent::NoMatch);
    assert!(matches!(
        flow.create_uncategorized().await,
        IntakeEvent::Created(_)
    ));

    let created = gateway.created_cases();
    assert_eq!(created[0].title, "word1 word2…");
    assert!(created[0].intent_id.is_none());
    assert!(background.drain(Duration::from_secs(1)).await);
    assert_eq!(gateway.count(Call::ProcessNewCase), 1);
}

#[tokio::test]
async fn search_failure_keeps_draft_for_retry() {
    let gateway = MockGateway::new();
    gateway.fail_next(Call::SearchIntents, Failure::Transport);
    let (mut flow, _background) = intake_flow(&gateway);

    flow.edit(words(10));
    assert_eq!(flow.search().await, IntakeEvent::Failed);
    let banner = flow.banner().expect("error banner");
    assert_eq!(banner.tone, Tone::Error);
    assert_eq!(banner.message, "Failed to process your request. Please try again.");
    assert_eq!(flow.draft().text(), words(10));
    assert_eq!(flow.phase(), &IntakePhase::Editing);

    flow.dismiss_banner();
    assert!(flow.banner().is_none());
    assert_eq!(flow.search().await, IntakeEvent::NoMatch);
}

#[tokio::test]
async fn creation_failure_keeps_candidates_and_draft() {
    let gateway = MockGateway::new();
    gateway.push_search_response(fixtures::candidates_response(vec![candidate("Billing", 70.0)]));
    gateway.fail_next(Call::CreateCase, Failure::Http(500));
    let (mut flow, _background) = intake_flow(&gateway);

    flow.edit(words(10));
    flow.search().await;
    assert_eq!(flow.select(0).await, IntakeEvent::Failed);
    assert_eq!(
        flow.banner().map(|b| b.message.as_str()),
        Some("Failed to create support case. Please try again.")
    );
    assert_eq!(flow.candidates().len(), 1);
    assert_eq!(flow.draft().text(), words(10));
    assert_eq!(gateway.count(Call::AddMessage), 0);

    assert!(matches!(flow.select(0).await, IntakeEvent::Created(_)));
}

#[tokio::test]
async fn opening_message_failure_is_reported_and_case_remains() {
    let gateway = MockGateway::new();
    gateway.push_search_response(fixtures::candidates_response(vec![candidate("Billing", 70.0)]));
    gateway.fail_next(Call::AddMessage, Failure::Http(503));
    let (mut flow, background) = intake_flow(&gateway);

    flow.edit(words(10));
    flow.search().await;
    assert_eq!(flow.select(0).await, IntakeEvent::Failed);
    assert_eq!(gateway.count(Call::CreateCase), 1);
    assert!(gateway.case(&CaseId::from("case-1")).is_some());

    assert!(background.drain(Duration::from_secs(1)).await);
    assert_eq!(gateway.count(Call::ProcessNewCase), 0);
}

#[tokio::test]
async fn selecting_out_of_range_is_rejected() {
    let gateway = MockGateway::new();
    let (mut flow, _background) = intake_flow(&gateway);
    assert_eq!(flow.select(3).await, IntakeEvent::Rejected);
    assert_eq!(flow.banner().map(|b| b.tone), Some(Tone::Warning));
    assert_eq!(gateway.count(Call::CreateCase), 0);
}

/// Editing the draft while choosing must not let a short description through.
#[tokio::test]
async fn select_rechecks_the_word_gate_after_an_edit() {
    let gateway = MockGateway::new();
    gateway.push_search_response(fixtures::candidates_response(vec![candidate(
        "Login Issues",
        92.0,
    )]));
    let (mut flow, _background) = intake_flow(&gateway);

    flow.edit(words(12));
    assert_eq!(flow.search().await, IntakeEvent::CandidatesShown(1));

    flow.edit("");
    assert_eq!(flow.select(0).await, IntakeEvent::Rejected);
    assert_eq!(
        flow.banner().map(|b| b.message.as_str()),
        Some("Please describe your issue to continue")
    );

    flow.edit(words(4));
    assert_eq!(flow.select(0).await, IntakeEvent::Rejected);
    assert_eq!(flow.banner().map(|b| b.tone), Some(Tone::Warning));
    assert_eq!(gateway.count(Call::CreateCase), 0);
    assert_eq!(gateway.count(Call::AddMessage), 0);

    flow.edit(words(10));
    assert!(matches!(flow.select(0).await, IntakeEvent::Created(_)));
    assert_eq!(gateway.created_cases()[0].description, words(10));
}
