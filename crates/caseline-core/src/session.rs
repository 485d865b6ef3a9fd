// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator identity threaded explicitly through the gateway and workflows.
//!
//! A [`SessionContext`] is built once at startup and cloned into every
//! component that needs the user id (customer and sender ids) or the opaque
//! identity token sent in the `Authorization` header.

use secrecy::{ExposeSecret, SecretString};

use crate::error::CaselineError;

/// Identity of the operator driving the console.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user_id: String,
    auth_token: SecretString,
    chat_session_id: String,
}

impl SessionContext {
    /// Build a context for `user_id`.
    ///
    /// The backend has historically authenticated with the user id itself, so
    /// it doubles as the identity token when no separate token is configured.
    pub fn new(user_id: impl Into<String>, auth_token: Option<String>) -> Result<Self, CaselineError> {
        let user_id = user_id.into().trim().to_string();
        if user_id.is_empty() {
            return Err(CaselineError::Config(
                "session.user_id is required (set it in caseline.toml or CASELINE_SESSION_USER_ID)"
                    .into(),
            ));
        }

        let token = auth_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| user_id.clone());

        Ok(Self {
            user_id,
            auth_token: SecretString::from(token),
            chat_session_id: uuid::Uuid::new_v4().to_string(),
        })
    }

    /// Pin the chat tester to an existing session instead of a fresh one.
    pub fn with_chat_session(mut self, chat_session_id: impl Into<String>) -> Self {
        self.chat_session_id = chat_session_id.into();
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn auth_token(&self) -> &SecretString {
        &self.auth_token
    }

    /// The token as sent on the wire.
    pub fn header_value(&self) -> &str {
        self.auth_token.expose_secret()
    }

    pub fn chat_session_id(&self) -> &str {
        &self.chat_session_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_defaults_to_user_id() {
        let ctx = SessionContext::new("user-42", None).unwrap();
        assert_eq!(ctx.header_value(), "user-42");

        let ctx = SessionContext::new("user-42", Some("  ".into())).unwrap();
        assert_eq!(ctx.header_value(), "user-42");
    }

    #[test]
    fn explicit_token_wins() {
        let ctx = SessionContext::new("user-42", Some("tok-abc".into())).unwrap();
        assert_eq!(ctx.user_id(), "user-42");
        assert_eq!(ctx.header_value(), "tok-abc");
    }

    #[test]
    fn blank_user_id_is_rejected() {
        let err = SessionContext::new("   ", None).unwrap_err();
        assert!(matches!(err, CaselineError::Config(_)));
    }

    #[test]
    fn debug_output_redacts_token() {
        let ctx = SessionContext::new("user-42", Some("tok-secret".into())).unwrap();
        let rendered = format!("{ctx:?}");
        assert!(!rendered.contains("tok-secret"));
    }

    #[test]
    fn chat_session_ids_are_fresh_unless_pinned() {
        let a = SessionContext::new("u", None).unwrap();
        let b = SessionContext::new("u", None).unwrap();
        assert_ne!(a.chat_session_id(), b.chat_session_id());
        let pinned = a.with_chat_session("chat-1");
        assert_eq!(pinned.chat_session_id(), "chat-1");
    }
}
