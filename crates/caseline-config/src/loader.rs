// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./caseline.toml` > `~/.config/caseline/caseline.toml` >
//! `/etc/caseline/caseline.toml`, with `CASELINE_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CaselineConfig;

/// System-wide config file, lowest-priority file layer.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/caseline/caseline.toml";
/// Config file in the working directory, highest-priority file layer.
pub const LOCAL_CONFIG_FILE: &str = "caseline.toml";

/// Path of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("caseline/caseline.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/caseline/caseline.toml`
/// 3. `~/.config/caseline/caseline.toml`
/// 4. `./caseline.toml`
/// 5. `CASELINE_*` environment variables
pub fn load_config() -> Result<CaselineConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only. No files, no env.
pub fn load_config_from_str(toml_content: &str) -> Result<CaselineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CaselineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
///
/// Used by `--config`. Unlike the hierarchy, a missing file here is an error.
pub fn load_config_from_path(path: &Path) -> Result<CaselineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CaselineConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// The hierarchy Figment before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(CaselineConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider mapping `CASELINE_SECTION_KEY` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` so keys that themselves
/// contain underscores (`CASELINE_INTAKE_MIN_WORDS`) land on `intake.min_words`.
fn env_provider() -> Env {
    Env::prefixed("CASELINE_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env key to its dotted path. Only the first
/// underscore after a known section name is a separator.
fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    const SECTIONS: [&str; 6] = [
        "console",
        "api",
        "session",
        "intake",
        "correspondence",
        "knowledge",
    ];
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_only_at_section() {
        assert_eq!(map_env_key("intake_min_words"), "intake.min_words");
        assert_eq!(map_env_key("session_user_id"), "session.user_id");
        assert_eq!(
            map_env_key("correspondence_max_message_chars"),
            "correspondence.max_message_chars"
        );
        assert_eq!(map_env_key("api_auth_token"), "api.auth_token");
        assert_eq!(map_env_key("INTAKE_ALLOW_UNCATEGORIZED"), "intake.allow_uncategorized");
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }
}
