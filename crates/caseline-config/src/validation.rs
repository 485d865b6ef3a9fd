// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Collects every problem instead of failing on the first one.

use crate::diagnostic::ConfigError;
use crate::model::CaselineConfig;

/// Levels accepted by `console.log_level`, case-insensitive.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Check semantic constraints serde cannot express.
///
/// Returns one [`ConfigError::Validation`] per failed check, each naming the
/// dotted key it concerns.
pub fn validate_config(config: &CaselineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let level = config.console.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "console.log_level `{}` must be one of {}",
            config.console.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let base_url = config.api.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        fail(format!(
            "api.base_url `{base_url}` must start with http:// or https://"
        ));
    }

    if config.api.timeout_secs == 0 {
        fail("api.timeout_secs must be greater than 0".to_string());
    }

    if let Some(user_id) = &config.session.user_id
        && user_id.trim().is_empty()
    {
        fail("session.user_id must not be blank when set".to_string());
    }

    if config.intake.min_words == 0 {
        fail("intake.min_words must be at least 1".to_string());
    }

    if config.intake.title_prefix_chars == 0 {
        fail("intake.title_prefix_chars must be at least 1".to_string());
    }

    if config.correspondence.max_message_chars == 0 {
        fail("correspondence.max_message_chars must be at least 1".to_string());
    }

    for (i, mime) in config.correspondence.attachment_types.iter().enumerate() {
        if !looks_like_mime(mime) {
            fail(format!(
                "correspondence.attachment_types[{i}] `{mime}` is not a type/subtype content type"
            ));
        }
    }

    for (i, ext) in config.knowledge.accepted_extensions.iter().enumerate() {
        if !ext.starts_with('.') || ext.len() < 2 {
            fail(format!(
                "knowledge.accepted_extensions[{i}] `{ext}` must look like `.pdf`"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `type/subtype` with both halves present and no whitespace.
fn looks_like_mime(value: &str) -> bool {
    match value.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty() && !subtype.is_empty() && !subtype.contains('/') && !value.contains(' ')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &[ConfigError]) -> Vec<String> {
        errors.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&CaselineConfig::default()).is_ok());
    }

    #[test]
    fn non_http_base_url_fails() {
        let mut config = CaselineConfig::default();
        config.api.base_url = "ftp://support.local".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(messages(&errors)[0].contains("api.base_url"));
    }

    #[test]
    fn collects_all_problems() {
        let mut config = CaselineConfig::default();
        config.intake.min_words = 0;
        config.correspondence.max_message_chars = 0;
        config.api.timeout_secs = 0;
        config.correspondence.attachment_types.push("png".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn blank_user_id_fails_but_absent_is_fine() {
        let mut config = CaselineConfig::default();
        config.session.user_id = Some("  ".into());
        assert!(validate_config(&config).is_err());
        config.session.user_id = None;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn extension_without_dot_fails() {
        let mut config = CaselineConfig::default();
        config.knowledge.accepted_extensions = vec!["pdf".into()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn mime_shape() {
        assert!(looks_like_mime("image/png"));
        assert!(!looks_like_mime("image/"));
        assert!(!looks_like_mime("image/png/x"));
        assert!(!looks_like_mime("png"));
    }
}
