// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Case list filtering and the per-case overview.

use std::cmp::Reverse;

use caseline_core::traits::SupportGateway;
use caseline_core::types::{CaseStatus, Priority, SupportCase};
use caseline_core::{CaseId, CaseSummary, CaselineError};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::banner::Tone;

const SUMMARY_FAILED: &str = "Failed to generate summary. Please try again.";

/// Cases whose title, id or status contains `filter`, ignoring case.
///
/// A blank filter keeps every case.
pub fn filter_cases<'a>(cases: &'a [SupportCase], filter: &str) -> Vec<&'a SupportCase> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return cases.iter().collect();
    }
    cases
        .iter()
        .filter(|case| {
            case.title.to_lowercase().contains(&needle)
                || case.case_id.0.to_lowercase().contains(&needle)
                || case.status.to_string().contains(&needle)
        })
        .collect()
}

/// Most recently touched first, compared as instants. Cases without a
/// parseable RFC 3339 timestamp sort last, in their original order.
pub fn sort_by_recent(cases: &mut [&SupportCase]) {
    cases.sort_by_key(|case| Reverse(last_touched(case)));
}

fn last_touched(case: &SupportCase) -> Option<DateTime<Utc>> {
    case.updated_at
        .as_deref()
        .or(case.created_at.as_deref())
        .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map(|at| at.with_timezone(&Utc))
}

pub fn status_tone(status: CaseStatus) -> Tone {
    match status {
        CaseStatus::Open => Tone::Info,
        CaseStatus::InProgress => Tone::Warning,
        CaseStatus::Resolved => Tone::Success,
        CaseStatus::Closed => Tone::Neutral,
    }
}

pub fn priority_tone(priority: Priority) -> Tone {
    match priority {
        Priority::Low => Tone::Neutral,
        Priority::Medium => Tone::Info,
        Priority::High => Tone::Warning,
        Priority::Urgent => Tone::Error,
    }
}

/// Loads the stored summary, or generates a fresh one when `regenerate` is set.
///
/// `Ok(None)` means the case has no summary yet.
pub async fn fetch_summary(
    gateway: &dyn SupportGateway,
    case_id: &CaseId,
    regenerate: bool,
) -> Result<Option<CaseSummary>, CaselineError> {
    if !regenerate {
        let response = gateway.get_summary(case_id, false).await?;
        debug!(case_id = %case_id, found = response.summary.is_some(), "summary loaded");
        return Ok(response.summary);
    }

    let response = gateway.generate_summary(case_id).await?;
    match response.summary {
        Some(summary) if response.success => Ok(Some(summary)),
        _ => {
            warn!(case_id = %case_id, message = ?response.message, "summary generation declined");
            Err(CaselineError::Internal(
                response.message.unwrap_or_else(|| SUMMARY_FAILED.to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(id: &str, title: &str, status: CaseStatus, updated: Option<&str>) -> SupportCase {
        SupportCase {
            case_id: CaseId::from(id),
            title: title.into(),
            status,
            updated_at: updated.map(String::from),
            ..SupportCase::default()
        }
    }

    fn sample() -> Vec<SupportCase> {
        vec![
            case("case-1", "Login Issues", CaseStatus::Open, Some("2026-01-02T10:00:00Z")),
            case("case-2", "Refund request", CaseStatus::InProgress, Some("2026-01-03T09:00:00Z")),
            case("case-3", "Password reset", CaseStatus::Resolved, None),
        ]
    }

    #[test]
    fn filter_matches_title_id_and_status_ignoring_case() {
        let cases = sample();
        let ids = |filter: &str| -> Vec<String> {
            filter_cases(&cases, filter)
                .into_iter()
                .map(|c| c.case_id.0.clone())
                .collect()
        };
        assert_eq!(ids("LOGIN"), ["case-1"]);
        assert_eq!(ids("case-3"), ["case-3"]);
        assert_eq!(ids("in-progress"), ["case-2"]);
        assert_eq!(ids("  ").len(), 3);
        assert!(ids("nothing like this").is_empty());
    }

    #[test]
    fn recent_cases_first() {
        let cases = sample();
        let mut refs: Vec<&SupportCase> = cases.iter().collect();
        sort_by_recent(&mut refs);
        let order: Vec<&str> = refs.iter().map(|c| c.case_id.0.as_str()).collect();
        assert_eq!(order, ["case-2", "case-1", "case-3"]);
    }

    #[test]
    fn recency_compares_instants_not_strings() {
        let cases = vec![
            // 09:30 UTC, later than case-b despite the smaller wall-clock text.
            case("case-a", "Offset", CaseStatus::Open, Some("2026-01-02T11:30:00+02:00")),
            case("case-b", "Utc", CaseStatus::Open, Some("2026-01-02T09:00:00Z")),
            case("case-c", "Fraction", CaseStatus::Open, Some("2026-01-02T09:00:00.5Z")),
            case("case-d", "Garbage", CaseStatus::Open, Some("yesterday")),
            case("case-e", "Missing", CaseStatus::Open, None),
        ];
        let mut refs: Vec<&SupportCase> = cases.iter().collect();
        sort_by_recent(&mut refs);
        let order: Vec<&str> = refs.iter().map(|c| c.case_id.0.as_str()).collect();
        assert_eq!(order, ["case-a", "case-c", "case-b", "case-d", "case-e"]);
    }

    #[test]
    fn tones() {
        assert_eq!(status_tone(CaseStatus::Resolved), Tone::Success);
        assert_eq!(status_tone(CaseStatus::Closed), Tone::Neutral);
        assert_eq!(priority_tone(Priority::Urgent), Tone::Error);
        assert_eq!(priority_tone(Priority::Low), Tone::Neutral);
    }
}
