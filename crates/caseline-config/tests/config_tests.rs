// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Caseline configuration system.

use std::io::Write;

use caseline_config::diagnostic::ConfigError;
use caseline_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_str, session_context,
};
use figment::Jail;

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[console]
name = "desk-3"
log_level = "debug"

[api]
base_url = "https://support.example.com/api"
timeout_secs = 5
auth_token = "tok-1"

[session]
user_id = "agent-7"

[intake]
min_words = 5
allow_uncategorized = true
title_prefix_chars = 40

[correspondence]
max_message_chars = 280
attachment_types = ["image/png"]

[knowledge]
accepted_extensions = [".md"]
"#;

    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.console.name, "desk-3");
    assert_eq!(config.api.base_url, "https://support.example.com/api");
    assert_eq!(config.api.timeout_secs, 5);
    assert_eq!(config.session.user_id.as_deref(), Some("agent-7"));
    assert_eq!(config.intake.min_words, 5);
    assert!(config.intake.allow_uncategorized);
    assert_eq!(config.correspondence.max_message_chars, 280);
    assert_eq!(config.knowledge.accepted_extensions, vec![".md"]);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("defaults");
    assert_eq!(config.console.log_level, "info");
    assert_eq!(config.api.base_url, "http://127.0.0.1:3000");
    assert_eq!(config.intake.min_words, 10);
    assert_eq!(config.correspondence.max_message_chars, 500);
    assert_eq!(
        config.knowledge.accepted_extensions,
        vec![".pdf", ".txt", ".doc", ".docx", ".md"]
    );
}

#[test]
fn typo_gets_suggestion_and_span() {
    let toml = "[intake]\nmin_wrods = 3\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(key, "min_wrods");
            assert_eq!(suggestion.as_deref(), Some("min_words"));
            let span = span.expect("span located in inline source");
            assert_eq!(span.offset(), toml.find("min_wrods").unwrap());
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[intake]\nmin_words = \"ten\"\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::InvalidType { key, .. } if key.contains("min_words")));
}

#[test]
fn validation_errors_surface_through_loader() {
    let errors = load_and_validate_str("[api]\nbase_url = \"localhost:3000\"\n").unwrap_err();
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("base_url")));
}

#[test]
fn env_overrides_file_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "caseline.toml",
            r#"
[session]
user_id = "from-file"

[intake]
min_words = 4
"#,
        )?;
        jail.set_env("CASELINE_SESSION_USER_ID", "from-env");
        jail.set_env("CASELINE_INTAKE_ALLOW_UNCATEGORIZED", "true");

        let config = caseline_config::load_config().expect("loads");
        assert_eq!(config.session.user_id.as_deref(), Some("from-env"));
        assert_eq!(config.intake.min_words, 4);
        assert!(config.intake.allow_uncategorized);
        Ok(())
    });
}

#[test]
fn explicit_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(load_and_validate_path(&missing).is_err());

    let path = dir.path().join("caseline.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[correspondence]\nmax_message_chars = 120").unwrap();
    let config = load_and_validate_path(&path).expect("file loads");
    assert_eq!(config.correspondence.max_message_chars, 120);
}

#[test]
fn session_context_prefers_override_then_config() {
    let config = load_config_from_str(
        r#"
[api]
auth_token = "tok-9"

[session]
user_id = "agent-1"
chat_session_id = "chat-abc"
"#,
    )
    .unwrap();

    let ctx = session_context(&config, None).unwrap();
    assert_eq!(ctx.user_id(), "agent-1");
    assert_eq!(ctx.header_value(), "tok-9");
    assert_eq!(ctx.chat_session_id(), "chat-abc");

    let ctx = session_context(&config, Some("agent-2")).unwrap();
    assert_eq!(ctx.user_id(), "agent-2");
}

#[test]
fn session_context_requires_user() {
    let config = load_config_from_str("").unwrap();
    assert!(session_context(&config, None).is_err());
}

#[test]
fn unknown_section_carries_diagnostic_code() {
    use miette::Diagnostic;
    let errors = load_and_validate_str("[bogus]\nx = 1\n").unwrap_err();
    let code = errors[0].code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("caseline::config::unknown_key"));
    let rendered = serde_json::json!({ "error": errors[0].to_string() });
    assert!(rendered["error"].as_str().unwrap().contains("bogus"));
}
