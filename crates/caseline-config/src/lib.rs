// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Caseline support console.
//!
//! TOML parsing with strict key checking, an XDG file hierarchy,
//! `CASELINE_` environment overrides, and diagnostic rendering with typo
//! suggestions.
//!
//! ```no_run
//! use caseline_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("backend: {}", config.api.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

use caseline_core::{CaselineError, SessionContext};

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::CaselineConfig;

/// Load the standard hierarchy and validate it.
///
/// Extraction failures and validation failures both come back as
/// [`ConfigError`] lists ready for [`render_errors`].
pub fn load_and_validate() -> Result<CaselineConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<CaselineConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load a TOML string and validate it. No files or environment are read.
pub fn load_and_validate_str(toml_content: &str) -> Result<CaselineConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Build the operator identity from `[session]` and `[api]`.
///
/// `user_override` (from `--user`) wins over the configured user id.
pub fn session_context(
    config: &CaselineConfig,
    user_override: Option<&str>,
) -> Result<SessionContext, CaselineError> {
    let user_id = user_override
        .map(str::to_string)
        .or_else(|| config.session.user_id.clone())
        .unwrap_or_default();
    let ctx = SessionContext::new(user_id, config.api.auth_token.clone())?;
    Ok(match &config.session.chat_session_id {
        Some(id) if !id.trim().is_empty() => ctx.with_chat_session(id.trim()),
        _ => ctx,
    })
}

/// Contents of every hierarchy file that exists, for diagnostic spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string(loader::LOCAL_CONFIG_FILE) {
        let path = std::env::current_dir()
            .map(|d| d.join(loader::LOCAL_CONFIG_FILE).display().to_string())
            .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.to_string());
        sources.push((path, content));
    }

    if let Some(path) = loader::user_config_path()
        && let Ok(content) = std::fs::read_to_string(&path)
    {
        sources.push((path.display().to_string(), content));
    }

    if let Ok(content) = std::fs::read_to_string(loader::SYSTEM_CONFIG_PATH) {
        sources.push((loader::SYSTEM_CONFIG_PATH.to_string(), content));
    }

    sources
}
