// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Caseline support console.

use thiserror::Error;

/// The single error type returned by gateway calls and triage workflows.
#[derive(Debug, Error)]
pub enum CaselineError {
    /// Configuration errors (missing identity, invalid base URL, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Input rejected before any network call was made.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// The request never produced an HTTP response (connect failure, timeout, TLS).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Http { status: u16, message: String },

    /// The backend answered but the body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A pre-signed upload failed for one file.
    #[error("failed to upload {file_name}: {message}")]
    Upload { file_name: String, message: String },

    /// Local file access failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CaselineError {
    /// Shorthand for a validation error on a named input field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether re-invoking the same action could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Upload { .. } => true,
            _ => false,
        }
    }

    /// True for errors raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
