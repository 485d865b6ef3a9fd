// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal and JSON output shared by the subcommands.
//!
//! Colors are used only when stdout is a terminal and `--plain` is not set.
//! Plain mode falls back to bracketed markers like `[OK]`.

use std::io::IsTerminal;

use caseline_config::CaselineConfig;
use caseline_core::summary::CaseSummary;
use caseline_core::{CaselineError, SupportCase};
use caseline_triage::overview::{priority_tone, status_tone};
use caseline_triage::{Banner, CandidateCard, Delivery, ThreadEntry, Tone};
use colored::{ColoredString, Colorize};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub color: bool,
}

impl Output {
    pub fn new(json: bool, plain: bool) -> Self {
        Self {
            json,
            color: !plain && std::io::stdout().is_terminal(),
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn paint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Success => text.green(),
        Tone::Info => text.cyan(),
        Tone::Warning => text.yellow(),
        Tone::Error => text.red(),
        Tone::Neutral => text.dimmed(),
    }
}

fn marker(tone: Tone, color: bool) -> String {
    if color {
        let symbol = match tone {
            Tone::Success => "✓",
            Tone::Info => "i",
            Tone::Warning => "!",
            Tone::Error => "✗",
            Tone::Neutral => "-",
        };
        paint(symbol, tone).to_string()
    } else {
        match tone {
            Tone::Success => "[OK]",
            Tone::Info => "[INFO]",
            Tone::Warning => "[WARN]",
            Tone::Error => "[FAIL]",
            Tone::Neutral => "[--]",
        }
        .to_string()
    }
}

/// A label colored by tone, or left bare in plain mode.
pub fn tinted(text: &str, tone: Tone, color: bool) -> String {
    if color {
        paint(text, tone).to_string()
    } else {
        text.to_string()
    }
}

pub fn format_banner(banner: &Banner, color: bool) -> String {
    format!("{} {}", marker(banner.tone, color), banner.message)
}

pub fn print_banner(output: Output, banner: &Banner) {
    let line = format_banner(banner, output.color);
    if banner.tone == Tone::Error {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn print_error(output: Output, error: &CaselineError) {
    if output.color {
        eprintln!("{}: {error}", "error".red());
    } else {
        eprintln!("error: {error}");
    }
}

pub fn format_case_row(case: &SupportCase, color: bool) -> String {
    let status = format!("{:<12}", case.status.to_string());
    let priority = format!("{:<7}", case.priority.to_string());
    format!(
        "  {:<14} {} {} {}",
        case.case_id,
        tinted(&status, status_tone(case.status), color),
        tinted(&priority, priority_tone(case.priority), color),
        case.title
    )
}

pub fn print_case_detail(case: &SupportCase, color: bool) {
    println!();
    println!("  case {}", case.case_id);
    println!("  {}", "-".repeat(35));
    println!("    Title:    {}", case.title);
    println!(
        "    Status:   {}",
        tinted(&case.status.to_string(), status_tone(case.status), color)
    );
    println!(
        "    Priority: {}",
        tinted(&case.priority.to_string(), priority_tone(case.priority), color)
    );
    if let Some(resolved) = case.resolved {
        println!("    Resolved: {}", if resolved { "yes" } else { "no" });
    }
    match (&case.intent_id, case.pending_intents.as_deref()) {
        (Some(intent), _) => println!("    Intent:   {intent}"),
        (None, Some(pending)) if !pending.is_empty() => {
            println!("    Intent:   awaiting selection ({} candidates)", pending.len())
        }
        _ => println!("    Intent:   uncategorized"),
    }
    if let Some(agent) = &case.assigned_agent {
        println!("    Agent:    {agent}");
    }
    if let Some(created) = &case.created_at {
        println!("    Created:  {created}");
    }
    if !case.description.is_empty() {
        println!();
        println!("    {}", case.description);
    }
    println!();
}

pub fn format_card(index: usize, card: &CandidateCard, color: bool) -> String {
    let badge = match card.badge {
        Some(badge) => {
            let text = format!("{}% match", badge.percent);
            let tone = if badge.strong { Tone::Success } else { Tone::Info };
            format!(" ({})", tinted(&text, tone, color))
        }
        None => String::new(),
    };
    format!("  {}. {}{}\n     {}", index + 1, card.name, badge, card.description)
}

pub fn format_entry(entry: &ThreadEntry, color: bool) -> String {
    let message = &entry.message;
    let label = message.sender_type.label();
    let time = message.created_at.get(..16).unwrap_or(&message.created_at);
    let state = match &entry.delivery {
        Delivery::Confirmed => String::new(),
        Delivery::Pending => format!(" {}", tinted("(sending)", Tone::Neutral, color)),
        Delivery::Failed(_) => format!(" {}", tinted("(not delivered)", Tone::Error, color)),
    };
    let mut line = format!("  [{time}] {label}: {}{state}", message.content);
    for url in &message.media_urls {
        line.push_str(&format!("\n      attachment: {url}"));
    }
    line
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("    {title}:");
    for item in items {
        println!("      - {item}");
    }
}

fn print_field(title: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        println!("    {title}: {value}");
    }
}

pub fn print_summary(summary: &CaseSummary) {
    println!();
    print_field("Summary", summary.case_summary.as_deref());
    print_field("Customer issue", summary.customer_issue.as_deref());
    print_list("Key interactions", &summary.key_interactions);

    if let Some(ai) = &summary.ai_agent_performance {
        print_field("AI effectiveness", ai.effectiveness.as_deref());
        if let Some(helpful) = ai.helpful_responses {
            println!("    Helpful responses: {helpful}");
        }
        print_list("Issues resolved", &ai.issues_resolved);
        print_list("Limitations", &ai.limitations);
    }
    if let Some(human) = &summary.human_agent_involvement {
        if let Some(required) = human.required {
            println!("    Human agent required: {}", if required { "yes" } else { "no" });
        }
        print_field("Escalation reason", human.reason_for_escalation.as_deref());
        print_field("Intervention", human.effectiveness_of_intervention.as_deref());
    }
    if let Some(resolution) = &summary.resolution_status {
        if let Some(resolved) = resolution.is_resolved {
            println!("    Resolved: {}", if resolved { "yes" } else { "no" });
        }
        print_field("Resolution method", resolution.resolution_method.as_deref());
        print_field("Satisfaction", resolution.customer_satisfaction_level.as_deref());
        print_list("Pending actions", &resolution.pending_actions);
    }
    if let Some(insights) = &summary.insights {
        print_field("Customer behavior", insights.customer_behavior.as_deref());
        print_field("Issue type", insights.common_issue_type.as_deref());
        print_list("Suggestions", &insights.improvement_suggestions);
    }
    print_list("Next steps", &summary.next_steps);
    if !summary.tags.is_empty() {
        println!("    Tags: {}", summary.tags.join(", "));
    }
    print_field("Time to resolution", summary.time_to_resolution.as_deref());
    println!();
}

/// `config check`: the effective settings with the token redacted.
pub fn print_config(
    output: Output,
    config: &CaselineConfig,
    user_override: Option<&str>,
) -> Result<(), CaselineError> {
    let mut shown = config.clone();
    if shown.api.auth_token.is_some() {
        shown.api.auth_token = Some("<redacted>".to_string());
    }
    if let Some(user) = user_override {
        shown.session.user_id = Some(user.to_string());
    }

    if output.json {
        print_json(&shown);
        return Ok(());
    }

    let session = caseline_config::session_context(config, user_override);
    println!();
    println!("  caseline config");
    println!("  {}", "-".repeat(35));
    println!("    {} configuration is valid", marker(Tone::Success, output.color));
    println!("    API:      {} (timeout {}s)", shown.api.base_url, shown.api.timeout_secs);
    match &session {
        Ok(ctx) => println!("    User:     {}", ctx.user_id()),
        Err(_) => println!(
            "    User:     {} not set (session.user_id or --user)",
            marker(Tone::Warning, output.color)
        ),
    }
    println!(
        "    Intake:   {} words minimum, uncategorized {}",
        shown.intake.min_words,
        if shown.intake.allow_uncategorized { "allowed" } else { "off" }
    );
    println!(
        "    Replies:  {} chars, attachments {}",
        shown.correspondence.max_message_chars,
        shown.correspondence.attachment_types.join(", ")
    );
    println!(
        "    Knowledge: {}",
        shown.knowledge.accepted_extensions.join(", ")
    );
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use caseline_core::types::{CaseStatus, Priority, SenderType, SupportMessage};
    use caseline_core::CaseId;
    use caseline_triage::ConfidenceBadge;

    #[test]
    fn plain_banner_uses_markers() {
        assert_eq!(
            format_banner(&Banner::success("Support case created successfully! Case ID: c-1"), false),
            "[OK] Support case created successfully! Case ID: c-1"
        );
        assert_eq!(format_banner(&Banner::error("boom"), false), "[FAIL] boom");
    }

    #[test]
    fn plain_case_row_has_no_escape_codes() {
        let case = SupportCase {
            case_id: CaseId::from("case-1"),
            title: "Login Issues".into(),
            status: CaseStatus::InProgress,
            priority: Priority::High,
            ..SupportCase::default()
        };
        let row = format_case_row(&case, false);
        assert!(row.contains("in-progress"));
        assert!(row.contains("high"));
        assert!(row.ends_with("Login Issues"));
        assert!(!row.contains('\u{1b}'));
    }

    #[test]
    fn card_is_numbered_from_one() {
        let card = CandidateCard {
            name: "Login Issues".into(),
            description: "Trouble signing in".into(),
            badge: Some(ConfidenceBadge::from_score(92.0)),
        };
        let text = format_card(0, &card, false);
        assert!(text.starts_with("  1. Login Issues (92% match)"));
        assert!(text.ends_with("Trouble signing in"));
    }

    #[test]
    fn entry_shows_label_and_delivery_state() {
        let entry = ThreadEntry {
            correlation_id: Default::default(),
            message: SupportMessage {
                sender_type: SenderType::Ai,
                content: "Try resetting your password".into(),
                created_at: "2026-01-01T10:30:00Z".into(),
                media_urls: vec!["https://cdn/x.png".into()],
                ..SupportMessage::default()
            },
            delivery: Delivery::Failed("503".into()),
        };
        let text = format_entry(&entry, false);
        assert!(text.starts_with("  [2026-01-01T10:30] AI Agent: Try resetting your password (not delivered)"));
        assert!(text.contains("attachment: https://cdn/x.png"));
    }
}
