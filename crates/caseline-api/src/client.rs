// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP plumbing for every gateway call.
//!
//! Provides [`GatewayClient`], which owns the pooled connection, the base
//! URL, and the operator's [`SessionContext`]. Every request carries
//! `Content-Type: application/json` and the identity token in
//! `Authorization`. Nothing is retried.

use std::time::Duration;

use caseline_config::CaselineConfig;
use caseline_core::{CaselineError, SessionContext};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Longest slice of a non-JSON error body echoed into an error message.
const ERROR_BODY_PREVIEW: usize = 200;

/// HTTP client for the support backend.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionContext,
}

impl GatewayClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// The identity header comes from `session` and nowhere else.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: SessionContext,
    ) -> Result<Self, CaselineError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| CaselineError::Config(format!("invalid api.base_url `{base_url}`: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(CaselineError::Config(format!(
                "api.base_url `{base_url}` cannot carry endpoint paths"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut identity = HeaderValue::from_str(session.header_value()).map_err(|e| {
            CaselineError::Config(format!("identity token is not a valid header value: {e}"))
        })?;
        identity.set_sensitive(true);
        headers.insert(AUTHORIZATION, identity);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CaselineError::Transport {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        debug!(base_url = %base_url, user_id = session.user_id(), "gateway client initialized");

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Creates a client from the `[api]` section.
    pub fn from_config(
        config: &CaselineConfig,
        session: SessionContext,
    ) -> Result<Self, CaselineError> {
        Self::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
            session,
        )
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Base URL joined with percent-encoded path segments.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, CaselineError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CaselineError::Internal("base URL cannot carry paths".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Sends a request and returns the raw body of a 2xx response.
    async fn send(&self, op: &'static str, request: RequestBuilder) -> Result<String, CaselineError> {
        let response = request.send().await.map_err(|e| transport_error(op, e))?;
        let status = response.status();
        debug!(op, status = %status, "gateway response received");

        let body = response.text().await.map_err(|e| transport_error(op, e))?;
        if status.is_success() {
            return Ok(body);
        }

        let message = error_message(status, &body);
        warn!(op, status = status.as_u16(), error = %message, "gateway call failed");
        Err(CaselineError::Http {
            status: status.as_u16(),
            message,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        url: Url,
    ) -> Result<T, CaselineError> {
        let body = self.send(op, self.request(Method::GET, url)).await?;
        decode(op, &body)
    }

    /// GET a list; a `null` body decodes as empty.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        op: &'static str,
        url: Url,
    ) -> Result<Vec<T>, CaselineError> {
        let body = self.send(op, self.request(Method::GET, url)).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(decode::<Option<Vec<T>>>(op, &body)?.unwrap_or_default())
    }

    /// Sends `payload` and decodes the response body.
    pub(crate) async fn send_json<B, T>(
        &self,
        op: &'static str,
        method: Method,
        url: Url,
        payload: &B,
    ) -> Result<T, CaselineError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let body = self.send(op, self.request(method, url).json(payload)).await?;
        decode(op, &body)
    }

    /// Sends `payload` and returns the raw response body, for endpoints whose
    /// reply is optional or ignored.
    pub(crate) async fn send_raw<B>(
        &self,
        op: &'static str,
        method: Method,
        url: Url,
        payload: Option<&B>,
    ) -> Result<String, CaselineError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self.request(method, url);
        if let Some(payload) = payload {
            request = request.json(payload);
        }
        self.send(op, request).await
    }
}

pub(crate) fn decode<T: DeserializeOwned>(op: &'static str, body: &str) -> Result<T, CaselineError> {
    serde_json::from_str(body).map_err(|e| CaselineError::Decode {
        message: format!("{op}: {e}"),
        source: Some(Box::new(e)),
    })
}

fn transport_error(op: &'static str, e: reqwest::Error) -> CaselineError {
    let message = if e.is_timeout() {
        format!("{op}: request timed out")
    } else {
        format!("{op}: request failed: {e}")
    };
    CaselineError::Transport {
        message,
        source: Some(Box::new(e)),
    }
}

/// The server's `message` (or `error`) field when present, else a short
/// preview of the body, else the status reason.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.chars().take(ERROR_BODY_PREVIEW).collect();
    }

    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[cfg(test)]
pub(crate) fn test_client(base_url: &str) -> GatewayClient {
    let session = SessionContext::new("user-1", None)
        .expect("valid session")
        .with_chat_session("chat-1");
    GatewayClient::new(base_url, Duration::from_secs(5), session).expect("valid client")
}
