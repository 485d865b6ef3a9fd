// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: the real HTTP gateway and upload store driving the
//! intake and correspondence workflows against a wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use caseline_api::{GatewayClient, HttpObjectStore};
use caseline_config::model::IntakeConfig;
use caseline_core::{CaseId, SessionContext};
use caseline_triage::{
    Attachment, BackgroundTasks, Correspondence, Delivery, IntakeEvent, IntakeFlow, ThreadLimits,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSUE: &str = "I cannot log into my account after resetting my password this morning";

fn session() -> SessionContext {
    SessionContext::new("user-1", None).unwrap()
}

fn client(server: &MockServer) -> Arc<GatewayClient> {
    Arc::new(GatewayClient::new(&server.uri(), Duration::from_secs(5), session()).unwrap())
}

#[tokio::test]
async fn intake_search_select_and_create_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/support/search-intents"))
        .and(header("authorization", "user-1"))
        .and(body_partial_json(json!({"text": ISSUE, "userId": "user-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "intents": [
                {"intentId": "intent-login", "intent": "Login Issues", "description": "Trouble signing in", "confidenceScore": 92.4},
                {"intentId": "intent-billing", "intent": "Billing", "confidenceScore": 41.0}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/support/cases"))
        .and(body_partial_json(json!({
            "customerId": "user-1",
            "title": "Login Issues",
            "description": ISSUE,
            "priority": "medium",
            "intentId": "intent-login"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"caseId": "case-42"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/support/cases/message"))
        .and(body_partial_json(json!({
            "caseId": "case-42",
            "senderId": "user-1",
            "content": ISSUE,
            "isNewTicket": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/support/cases/process/new"))
        .and(body_partial_json(json!({"caseId": "case-42"})))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let background = BackgroundTasks::new();
    let mut flow = IntakeFlow::new(
        client(&server),
        session(),
        background.clone(),
        &IntakeConfig::default(),
    );
    flow.edit(ISSUE);

    assert_eq!(flow.search().await, IntakeEvent::CandidatesShown(2));
    let cards = flow.cards();
    assert_eq!(cards[0].badge.map(|b| b.percent), Some(92));

    assert_eq!(
        flow.select(0).await,
        IntakeEvent::Created(CaseId::from("case-42"))
    );
    assert!(background.drain(Duration::from_secs(5)).await);

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        paths,
        [
            "/support/search-intents",
            "/support/cases",
            "/support/cases/message",
            "/support/cases/process/new"
        ]
    );
}

#[tokio::test]
async fn thread_reply_uploads_then_persists_with_media() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/support/cases/case-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "caseId": "case-7",
            "title": "Login Issues",
            "status": "open",
            "priority": "medium",
            "intentId": "intent-login"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/support/cases/case-7/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"messageId": "m-1", "caseId": "case-7", "senderType": "ai", "content": "Have you tried a reset?", "createdAt": "2026-01-01T10:00:00Z"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/support/cases/case-7/upload-url"))
        .and(body_partial_json(json!({"fileName": "shot.png", "fileType": "image/png"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uploadUrl": format!("{}/bucket/shot.png", server.uri()),
            "fileUrl": "https://cdn.test/case-7/shot.png"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/bucket/shot.png"))
        .and(header("content-type", "image/png"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/support/cases/message"))
        .and(body_partial_json(json!({
            "caseId": "case-7",
            "senderType": "customer",
            "content": "Here is the error",
            "messageType": "media",
            "mediaUrls": ["https://cdn.test/case-7/shot.png"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messageId": "m-2",
            "caseId": "case-7",
            "senderType": "customer",
            "content": "Here is the error",
            "messageType": "media",
            "mediaUrls": ["https://cdn.test/case-7/shot.png"],
            "createdAt": "2026-01-01T10:05:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(HttpObjectStore::new(Duration::from_secs(5)).unwrap());
    let mut thread = Correspondence::open(
        client(&server),
        store,
        session(),
        BackgroundTasks::new(),
        ThreadLimits::default(),
        &CaseId::from("case-7"),
    )
    .await
    .unwrap();
    assert_eq!(thread.entries().len(), 1);

    let id = thread
        .send_reply(
            "Here is the error",
            vec![Attachment::new("shot.png", "image/png", vec![0x89, b'P', b'N', b'G'])],
        )
        .await
        .unwrap();
    assert!(thread.settle(Duration::from_secs(5)).await);

    let entry = thread.entry(id).expect("reply stays in the thread");
    assert_eq!(entry.delivery, Delivery::Confirmed);
    assert_eq!(entry.message.message_id.0, "m-2");
    assert_eq!(thread.entries().len(), 2);

    let put = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("object was uploaded");
    assert!(put.headers.get("authorization").is_none());
    assert_eq!(put.body, vec![0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn failed_persist_keeps_reply_visible_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/support/cases/case-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "caseId": "case-8",
            "title": "Billing",
            "intentId": "intent-billing"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/support/cases/case-8/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/support/cases/message"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "backend down"})))
        .mount(&server)
        .await;

    let mut thread = Correspondence::open(
        client(&server),
        Arc::new(HttpObjectStore::new(Duration::from_secs(5)).unwrap()),
        session(),
        BackgroundTasks::new(),
        ThreadLimits::default(),
        &CaseId::from("case-8"),
    )
    .await
    .unwrap();

    let id = thread.send_reply("Was I charged twice?", vec![]).await.unwrap();
    assert!(thread.settle(Duration::from_secs(5)).await);

    let entry = thread.entry(id).unwrap();
    assert!(matches!(entry.delivery, Delivery::Failed(_)));
    assert_eq!(entry.message.content, "Was I charged twice?");
    assert!(thread.banner().is_some());
}
