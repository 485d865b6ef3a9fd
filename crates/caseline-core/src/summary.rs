// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI-generated case summary model.
//!
//! The backend stores the summary either as a native JSON object or as a
//! JSON-encoded string, depending on which code path wrote it. Both decode
//! into [`CaseSummary`]. A string that is not itself JSON is kept verbatim as
//! the narrative summary text.

use serde::{Deserialize, Deserializer, Serialize};

/// Structured summary of a case. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_issue: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub key_interactions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_agent_performance: Option<AiAgentPerformance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_agent_involvement: Option<HumanAgentInvolvement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_status: Option<ResolutionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<Insights>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_resolution: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiAgentPerformance {
    /// `high`, `medium` or `low`.
    pub effectiveness: Option<String>,
    pub helpful_responses: Option<u32>,
    pub issues_resolved: Vec<String>,
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HumanAgentInvolvement {
    pub required: Option<bool>,
    pub reason_for_escalation: Option<String>,
    pub effectiveness_of_intervention: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolutionStatus {
    pub is_resolved: Option<bool>,
    pub resolution_method: Option<String>,
    pub customer_satisfaction_level: Option<String>,
    pub pending_actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Insights {
    pub customer_behavior: Option<String>,
    pub common_issue_type: Option<String>,
    pub improvement_suggestions: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SummaryRepr {
    Encoded(String),
    Structured(Box<CaseSummary>),
}

impl CaseSummary {
    /// Decode a summary from the string form used by some backend writers.
    pub fn from_encoded(raw: &str) -> Self {
        match serde_json::from_str::<CaseSummary>(raw) {
            Ok(summary) => summary,
            Err(e) => {
                tracing::debug!(error = %e, "summary string is not JSON, keeping as text");
                Self {
                    case_summary: Some(raw.to_string()),
                    ..Self::default()
                }
            }
        }
    }
}

/// `deserialize_with` helper accepting `null`, a JSON object, or a JSON-encoded string.
pub fn deserialize_optional_summary<'de, D>(deserializer: D) -> Result<Option<CaseSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<SummaryRepr>::deserialize(deserializer)? {
            None => None,
            Some(SummaryRepr::Encoded(raw)) if raw.trim().is_empty() => None,
            Some(SummaryRepr::Encoded(raw)) => Some(CaseSummary::from_encoded(&raw)),
            Some(SummaryRepr::Structured(summary)) => Some(*summary),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SupportCase;

    const SUMMARY_OBJECT: &str = r#"{
        "caseSummary": "Customer could not log in after update.",
        "customerIssue": "Login failure",
        "keyInteractions": ["AI suggested password reset"],
        "aiAgentPerformance": {"effectiveness": "high", "helpfulResponses": 3, "issuesResolved": ["reset"]},
        "resolutionStatus": {"isResolved": true, "pendingActions": []},
        "tags": ["login", "auth"]
    }"#;

    #[test]
    fn decodes_native_object() {
        let json = format!(r#"{{"caseId":"c-1","summary":{SUMMARY_OBJECT}}}"#);
        let case: SupportCase = serde_json::from_str(&json).unwrap();
        let summary = case.summary.unwrap();
        assert_eq!(summary.customer_issue.as_deref(), Some("Login failure"));
        let perf = summary.ai_agent_performance.unwrap();
        assert_eq!(perf.helpful_responses, Some(3));
        assert_eq!(perf.issues_resolved, vec!["reset"]);
        assert_eq!(summary.tags, vec!["login", "auth"]);
    }

    #[test]
    fn decodes_json_encoded_string() {
        let encoded = serde_json::to_string(SUMMARY_OBJECT).unwrap();
        let json = format!(r#"{{"caseId":"c-1","summary":{encoded}}}"#);
        let case: SupportCase = serde_json::from_str(&json).unwrap();
        let summary = case.summary.unwrap();
        assert_eq!(
            summary.case_summary.as_deref(),
            Some("Customer could not log in after update.")
        );
        assert_eq!(summary.resolution_status.unwrap().is_resolved, Some(true));
    }

    #[test]
    fn plain_text_string_becomes_narrative() {
        let case: SupportCase =
            serde_json::from_str(r#"{"caseId":"c-1","summary":"Resolved by reset."}"#).unwrap();
        assert_eq!(
            case.summary.unwrap().case_summary.as_deref(),
            Some("Resolved by reset.")
        );
    }

    #[test]
    fn null_and_empty_summary_are_absent() {
        let case: SupportCase =
            serde_json::from_str(r#"{"caseId":"c-1","summary":null}"#).unwrap();
        assert!(case.summary.is_none());
        let case: SupportCase = serde_json::from_str(r#"{"caseId":"c-1","summary":""}"#).unwrap();
        assert!(case.summary.is_none());
    }
}
