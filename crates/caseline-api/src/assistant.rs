// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat tester and utterance generation.

use async_trait::async_trait;
use caseline_core::CaselineError;
use caseline_core::traits::AssistantGateway;
use caseline_core::types::ChatReply;
use reqwest::Method;

use crate::client::GatewayClient;
use crate::wire::{ChatTurn, UtteranceRequest};

#[async_trait]
impl AssistantGateway for GatewayClient {
    async fn chat(&self, text: &str) -> Result<ChatReply, CaselineError> {
        let url = self.endpoint(&["chat"])?;
        let turn = ChatTurn {
            session_id: self.session().chat_session_id(),
            text,
        };
        self.send_json("chat", Method::POST, url, &turn).await
    }

    async fn generate_utterances(
        &self,
        intent: &str,
    ) -> Result<serde_json::Value, CaselineError> {
        let url = self.endpoint(&["genai", "utterances"])?;
        self.send_json(
            "generate_utterances",
            Method::POST,
            url,
            &UtteranceRequest { intent },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_client;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn chat_uses_session_chat_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({"sessionId": "chat-1", "text": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "Hi! How can I help?"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let reply = client.chat("hello").await.unwrap();
        assert_eq!(reply.text, "Hi! How can I help?");
    }

    #[tokio::test]
    async fn utterances_are_returned_verbatim() {
        let server = MockServer::start().await;
        let payload = json!({"utterances": ["I want my money back", "refund please"]});
        Mock::given(method("POST"))
            .and(path("/genai/utterances"))
            .and(body_json(json!({"intent": "Refund"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.generate_utterances("Refund").await.unwrap(), payload);
    }
}
