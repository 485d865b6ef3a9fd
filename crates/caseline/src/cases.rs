// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `caseline cases` command implementation.

use caseline_core::types::CaseUpdate;
use caseline_core::{CaseId, CaseStatus, CaselineError, Priority, SupportCase, SupportMessage};
use caseline_triage::overview::{self, filter_cases, sort_by_recent};
use caseline_triage::Tone;
use serde::Serialize;
use tracing::info;

use crate::app::App;
use crate::render::{self, Output};

#[derive(Debug, Serialize)]
struct CaseDetail<'a> {
    case: &'a SupportCase,
    messages: &'a [SupportMessage],
}

pub async fn list(app: &App, output: Output, filter: Option<&str>) -> Result<(), CaselineError> {
    let cases = app.support().list_cases().await?;
    let mut shown = filter_cases(&cases, filter.unwrap_or_default());
    sort_by_recent(&mut shown);

    if output.json {
        render::print_json(&shown);
        return Ok(());
    }

    println!();
    println!("  caseline cases ({} of {})", shown.len(), cases.len());
    println!("  {}", "-".repeat(60));
    if shown.is_empty() {
        println!("    no cases found");
    }
    for case in shown {
        println!("{}", render::format_case_row(case, output.color));
    }
    println!();
    Ok(())
}

pub async fn show(app: &App, output: Output, case_id: &CaseId) -> Result<(), CaselineError> {
    let gateway = app.support();
    let (case, messages) =
        tokio::try_join!(gateway.get_case(case_id), gateway.list_messages(case_id))?;

    if output.json {
        render::print_json(&CaseDetail {
            case: &case,
            messages: &messages,
        });
        return Ok(());
    }

    render::print_case_detail(&case, output.color);
    println!("  messages ({})", messages.len());
    println!("  {}", "-".repeat(35));
    for message in &messages {
        let time = message.created_at.get(..16).unwrap_or(&message.created_at);
        println!(
            "  [{time}] {}: {}",
            message.sender_type.label(),
            message.content
        );
    }
    println!();
    Ok(())
}

/// Builds the update body; at least one field has to be set.
pub fn build_update(
    status: Option<CaseStatus>,
    priority: Option<Priority>,
    resolved: Option<bool>,
    assign: Option<String>,
) -> Result<CaseUpdate, CaselineError> {
    let update = CaseUpdate {
        status,
        priority,
        resolved,
        assigned_agent: assign.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()),
        ..CaseUpdate::default()
    };
    if update.is_empty() {
        return Err(CaselineError::validation(
            "update",
            "Nothing to update; pass --status, --priority, --resolved or --assign",
        ));
    }
    Ok(update)
}

pub async fn update(
    app: &App,
    output: Output,
    case_id: &CaseId,
    update: &CaseUpdate,
) -> Result<(), CaselineError> {
    app.support().update_case(case_id, update).await?;
    info!(case_id = %case_id, "case updated");

    if output.json {
        render::print_json(&serde_json::json!({ "caseId": case_id, "updated": update }));
    } else {
        render::print_banner(
            output,
            &caseline_triage::Banner::success(format!("Case {case_id} updated")),
        );
    }
    Ok(())
}

pub async fn summary(
    app: &App,
    output: Output,
    case_id: &CaseId,
    regenerate: bool,
) -> Result<(), CaselineError> {
    let gateway = app.support();
    let summary = overview::fetch_summary(gateway.as_ref(), case_id, regenerate).await?;

    if output.json {
        render::print_json(&serde_json::json!({ "caseId": case_id, "summary": summary }));
        return Ok(());
    }

    match summary {
        Some(summary) => {
            println!();
            println!(
                "  summary of {}{}",
                case_id,
                if regenerate { " (regenerated)" } else { "" }
            );
            println!("  {}", "-".repeat(35));
            render::print_summary(&summary);
        }
        None => {
            println!(
                "{} No summary yet. Run with --regenerate to create one.",
                render::tinted("-", Tone::Neutral, output.color)
            );
        }
    }
    Ok(())
}
