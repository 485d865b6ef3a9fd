// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Caseline console.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Caseline configuration.
///
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaselineConfig {
    /// Console identity and logging.
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Backend gateway connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Operator identity.
    #[serde(default)]
    pub session: SessionConfig,

    /// Issue intake rules.
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Correspondence thread limits.
    #[serde(default)]
    pub correspondence: CorrespondenceConfig,

    /// Knowledge-base upload rules.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

/// Console identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Name shown in prompts and banners.
    #[serde(default = "default_console_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            name: default_console_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_console_name() -> String {
    "caseline".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Backend gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Identity token for the `Authorization` header. Falls back to `session.user_id`.
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            auth_token: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Operator identity configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// User id used as customer id, sender id and default identity token.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Reuse an existing chat-tester session instead of starting a new one.
    #[serde(default)]
    pub chat_session_id: Option<String>,
}

/// Issue intake configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Minimum whitespace-delimited words before search is enabled.
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Offer "create without category" when no intent matches.
    #[serde(default)]
    pub allow_uncategorized: bool,

    /// Length of the issue-text prefix used as title for uncategorized cases.
    #[serde(default = "default_title_prefix_chars")]
    pub title_prefix_chars: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            allow_uncategorized: false,
            title_prefix_chars: default_title_prefix_chars(),
        }
    }
}

fn default_min_words() -> usize {
    10
}

fn default_title_prefix_chars() -> usize {
    60
}

/// Correspondence thread configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorrespondenceConfig {
    /// Maximum reply length in characters.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Content types accepted as reply attachments.
    #[serde(default = "default_attachment_types")]
    pub attachment_types: Vec<String>,
}

impl Default for CorrespondenceConfig {
    fn default() -> Self {
        Self {
            max_message_chars: default_max_message_chars(),
            attachment_types: default_attachment_types(),
        }
    }
}

fn default_max_message_chars() -> usize {
    500
}

fn default_attachment_types() -> Vec<String> {
    ["image/jpeg", "image/png", "image/gif", "image/webp"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Knowledge-base configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// File extensions accepted for upload, with leading dot.
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: Vec<String>,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            accepted_extensions: default_accepted_extensions(),
        }
    }
}

fn default_accepted_extensions() -> Vec<String> {
    [".pdf", ".txt", ".doc", ".docx", ".md"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_console_contract() {
        let config = CaselineConfig::default();
        assert_eq!(config.intake.min_words, 10);
        assert_eq!(config.correspondence.max_message_chars, 500);
        assert_eq!(config.correspondence.attachment_types.len(), 4);
        assert!(!config.intake.allow_uncategorized);
        assert!(config.session.user_id.is_none());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: CaselineConfig = toml::from_str(
            r#"
[intake]
allow_uncategorized = true
"#,
        )
        .unwrap();
        assert!(config.intake.allow_uncategorized);
        assert_eq!(config.intake.min_words, 10);
        assert_eq!(config.intake.title_prefix_chars, 60);
    }

    #[test]
    fn unknown_session_key_is_rejected() {
        let result = toml::from_str::<CaselineConfig>(
            r#"
[session]
user = "x"
"#,
        );
        assert!(result.is_err());
    }
}
