// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `/support/*` endpoints: intent search, cases, messages, summaries and
//! case attachment URLs.

use async_trait::async_trait;
use caseline_core::traits::SupportGateway;
use caseline_core::types::{
    CaseId, CaseUpdate, CreatedCase, IntentSearchRequest, IntentSearchResponse, NewCase,
    NewMessage, SummaryResponse, SupportCase, SupportMessage, UploadTicket,
};
use caseline_core::CaselineError;
use reqwest::Method;
use tracing::debug;

use crate::client::{GatewayClient, decode};
use crate::wire::{CaseRef, FileSpec};

#[async_trait]
impl SupportGateway for GatewayClient {
    async fn search_intents(&self, text: &str) -> Result<IntentSearchResponse, CaselineError> {
        let url = self.endpoint(&["support", "search-intents"])?;
        let request = IntentSearchRequest {
            text: text.to_string(),
            user_id: self.session().user_id().to_string(),
        };
        self.send_json("search_intents", Method::POST, url, &request)
            .await
    }

    async fn create_case(&self, case: &NewCase) -> Result<CreatedCase, CaselineError> {
        let url = self.endpoint(&["support", "cases"])?;
        self.send_json("create_case", Method::POST, url, case).await
    }

    async fn list_cases(&self) -> Result<Vec<SupportCase>, CaselineError> {
        let url = self.endpoint(&["support", "cases"])?;
        self.get_list("list_cases", url).await
    }

    async fn get_case(&self, case_id: &CaseId) -> Result<SupportCase, CaselineError> {
        let url = self.endpoint(&["support", "cases", case_id.0.as_str()])?;
        self.get_json("get_case", url).await
    }

    async fn update_case(
        &self,
        case_id: &CaseId,
        update: &CaseUpdate,
    ) -> Result<(), CaselineError> {
        let url = self.endpoint(&["support", "cases", case_id.0.as_str()])?;
        self.send_raw("update_case", Method::PUT, url, Some(update))
            .await?;
        Ok(())
    }

    async fn list_messages(&self, case_id: &CaseId) -> Result<Vec<SupportMessage>, CaselineError> {
        let url = self.endpoint(&["support", "cases", case_id.0.as_str(), "messages"])?;
        self.get_list("list_messages", url).await
    }

    async fn add_message(
        &self,
        message: &NewMessage,
    ) -> Result<Option<SupportMessage>, CaselineError> {
        let url = self.endpoint(&["support", "cases", "message"])?;
        let body = self
            .send_raw("add_message", Method::POST, url, Some(message))
            .await?;
        echoed_message(&body)
    }

    async fn process_new_case(&self, case_id: &CaseId) -> Result<(), CaselineError> {
        let url = self.endpoint(&["support", "cases", "process", "new"])?;
        self.send_raw("process_new_case", Method::POST, url, Some(&CaseRef { case_id }))
            .await?;
        Ok(())
    }

    async fn get_summary(
        &self,
        case_id: &CaseId,
        force: bool,
    ) -> Result<SummaryResponse, CaselineError> {
        let mut url = self.endpoint(&["support", "cases", case_id.0.as_str(), "summary"])?;
        url.query_pairs_mut()
            .append_pair("force", if force { "true" } else { "false" });
        self.get_json("get_summary", url).await
    }

    async fn generate_summary(&self, case_id: &CaseId) -> Result<SummaryResponse, CaselineError> {
        let url = self.endpoint(&["support", "cases", case_id.0.as_str(), "summary"])?;
        let body = self
            .send_raw::<()>("generate_summary", Method::POST, url, None)
            .await?;
        decode("generate_summary", &body)
    }

    async fn upload_url(
        &self,
        case_id: &CaseId,
        file_name: &str,
        file_type: &str,
    ) -> Result<UploadTicket, CaselineError> {
        let url = self.endpoint(&["support", "cases", case_id.0.as_str(), "upload-url"])?;
        let spec = FileSpec {
            file_name,
            file_type,
        };
        self.send_json("upload_url", Method::POST, url, &spec).await
    }
}

/// The stored message when the backend echoes one; `None` for an empty body
/// or an acknowledgement without a `messageId`.
fn echoed_message(body: &str) -> Result<Option<SupportMessage>, CaselineError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value = decode("add_message", body)?;
    if value.get("messageId").is_none() {
        debug!("add_message acknowledged without an echoed message");
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| CaselineError::Decode {
            message: format!("add_message: {e}"),
            source: Some(Box::new(e)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use caseline_core::types::{CaseStatus, MessageType, Priority, SenderType};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn search_sends_text_and_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/support/search-intents"))
            .and(body_json(json!({"text": "cannot log in", "userId": "user-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "intents": [{"intentId": "i-1", "intent": "Login Issues", "confidenceScore": 92.4}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let response = client.search_intents("cannot log in").await.unwrap();
        assert!(response.success);
        assert!(response.case_id.is_none());
        assert_eq!(response.intents[0].intent, "Login Issues");
    }

    #[tokio::test]
    async fn create_case_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/support/cases"))
            .and(body_json(json!({
                "customerId": "user-1",
                "title": "Login Issues",
                "description": "cannot log in",
                "priority": "medium",
                "intentId": "i-1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"caseId": "c-9"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let created = client
            .create_case(&NewCase {
                customer_id: "user-1".into(),
                title: "Login Issues".into(),
                description: "cannot log in".into(),
                priority: Priority::Medium,
                intent_id: Some("i-1".into()),
            })
            .await
            .unwrap();
        assert_eq!(created.case_id, CaseId::from("c-9"));
    }

    #[tokio::test]
    async fn get_case_and_messages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/support/cases/c-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "caseId": "c-1",
                "title": "Billing",
                "status": "in-progress",
                "priority": "high",
                "pendingIntents": [{"intentid": "i-2", "intent": "Refund"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/support/cases/c-1/messages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"messageId": "m-1", "caseId": "c-1", "senderType": "ai", "content": "Hi", "createdAt": "2026-01-01T00:00:00Z"}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let case = client.get_case(&CaseId::from("c-1")).await.unwrap();
        assert_eq!(case.status, CaseStatus::InProgress);
        assert_eq!(case.awaiting_intent_selection().unwrap().len(), 1);

        let messages = client.list_messages(&CaseId::from("c-1")).await.unwrap();
        assert_eq!(messages[0].sender_type, SenderType::Ai);
    }

    #[tokio::test]
    async fn update_case_clears_pending_intents_with_null() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/support/cases/c-1"))
            .and(body_json(json!({"intentId": "i-2", "pendingIntents": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client
            .update_case(&CaseId::from("c-1"), &CaseUpdate::select_intent(Some("i-2".into())))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn add_message_handles_echo_and_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/support/cases/message"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messageId": "m-7", "caseId": "c-1", "content": "hello", "messageType": "text"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/support/cases/message"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let message = NewMessage::from_customer(CaseId::from("c-1"), "user-1", "hello", vec![]);

        let echoed = client.add_message(&message).await.unwrap().unwrap();
        assert_eq!(echoed.message_id.0, "m-7");
        assert_eq!(echoed.message_type, MessageType::Text);

        assert!(client.add_message(&message).await.unwrap().is_none());
    }

    #[test]
    fn acknowledgement_without_message_id_is_none() {
        assert!(echoed_message(r#"{"success":true}"#).unwrap().is_none());
        assert!(echoed_message("  ").unwrap().is_none());
        assert!(echoed_message("oops").is_err());
    }

    #[tokio::test]
    async fn summary_passes_force_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/support/cases/c-1/summary"))
            .and(query_param("force", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "summary": {"caseSummary": "Reset password", "tags": ["login"]}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/support/cases/c-1/summary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "not enough messages"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let id = CaseId::from("c-1");
        let stored = client.get_summary(&id, true).await.unwrap();
        assert_eq!(
            stored.summary.unwrap().case_summary.as_deref(),
            Some("Reset password")
        );

        let generated = client.generate_summary(&id).await.unwrap();
        assert!(!generated.success);
        assert_eq!(generated.message.as_deref(), Some("not enough messages"));
    }

    #[tokio::test]
    async fn upload_url_and_process_new_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/support/cases/c-1/upload-url"))
            .and(body_json(json!({"fileName": "shot.png", "fileType": "image/png"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "uploadUrl": "https://bucket/put",
                "fileUrl": "https://bucket/shot.png"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/support/cases/process/new"))
            .and(body_json(json!({"caseId": "c-1"})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let id = CaseId::from("c-1");
        let ticket = client.upload_url(&id, "shot.png", "image/png").await.unwrap();
        assert_eq!(ticket.readable_url(), Some("https://bucket/shot.png"));
        client.process_new_case(&id).await.unwrap();
    }
}
