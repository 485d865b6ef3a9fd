// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent and tool definitions managed from the console.
//!
//! Tools carry server-executed code and a typed parameter list. Their
//! definitions are validated locally before any create or update call so the
//! operator sees every problem at once.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use crate::error::CaselineError;

/// Letters and underscores only; shared by tool names and parameter names.
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]+$").expect("identifier pattern is valid"));

/// A categorized type of user issue with its resolution steps and permitted tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intentid: Option<String>,
    pub intent: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub tools: Vec<ToolRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

impl Intent {
    pub fn validate(&self) -> Result<(), Vec<CaselineError>> {
        let mut errors = Vec::new();
        if self.intent.trim().is_empty() {
            errors.push(CaselineError::validation("intent", "Intent name is required"));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Case-insensitive match against name, description and steps.
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        [&self.intent, &self.description, &self.steps]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Reference from an intent to a tool, as stored by the intent editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolRef {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Tool> for ToolRef {
    fn from(tool: &Tool) -> Self {
        Self {
            label: tool.name.clone(),
            value: tool.name.clone(),
            description: Some(tool.description.clone()),
        }
    }
}

/// Declared type of a tool parameter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParamKind {
    #[default]
    String,
    Number,
    Boolean,
    Enum,
}

/// A single typed parameter of a tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolParam {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: ParamKind,
    /// Allowed values for `enum` parameters.
    #[serde(
        default,
        deserialize_with = "deserialize_values",
        skip_serializing_if = "Option::is_none"
    )]
    pub values: Option<Vec<String>>,
}

/// A named, typed, server-executed function definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub params: Vec<ToolParam>,
    #[serde(default)]
    pub code: String,
}

impl Tool {
    /// Check every field and parameter, collecting all problems.
    pub fn validate(&self) -> Result<(), Vec<CaselineError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(CaselineError::validation("name", "Name is required"));
        } else if !IDENTIFIER.is_match(&self.name) {
            errors.push(CaselineError::validation(
                "name",
                "Name can only contain letters and underscores (no spaces or numbers)",
            ));
        }

        if self.description.trim().is_empty() {
            errors.push(CaselineError::validation("description", "Description is required"));
        }

        if self.code.trim().is_empty() {
            errors.push(CaselineError::validation("code", "Code is required"));
        }

        for (i, param) in self.params.iter().enumerate() {
            if param.name.trim().is_empty() {
                errors.push(CaselineError::validation(
                    format!("params[{i}].name"),
                    "Parameter name is required",
                ));
            } else if !IDENTIFIER.is_match(&param.name) {
                errors.push(CaselineError::validation(
                    format!("params[{i}].name"),
                    "Param name can only contain letters and underscores",
                ));
            }
            if param.description.trim().is_empty() {
                errors.push(CaselineError::validation(
                    format!("params[{i}].description"),
                    "Param description is required",
                ));
            }
            let has_values = param.values.as_ref().is_some_and(|v| !v.is_empty());
            if param.kind == ParamKind::Enum && !has_values {
                errors.push(CaselineError::validation(
                    format!("params[{i}].values"),
                    "Enum values are required if type is 'enum'",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValuesRepr {
    List(Vec<String>),
    Csv(String),
}

/// Enum values arrive either as a list or as the editor's comma-separated string.
fn deserialize_values<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ValuesRepr>::deserialize(deserializer)? {
        None => None,
        Some(ValuesRepr::List(values)) => Some(values),
        Some(ValuesRepr::Csv(raw)) => {
            let values: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect();
            if values.is_empty() { None } else { Some(values) }
        }
    })
}
