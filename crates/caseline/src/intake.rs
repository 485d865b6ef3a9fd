// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `caseline intake` command implementation.
//!
//! Interactive mode collects the description line by line and accepts
//! `/search`, `/select N`, `/create`, `/clear` and `/quit`. One-shot mode
//! runs a single search and optional selection from flags.

use caseline_core::CaselineError;
use caseline_triage::{IntakeEvent, IntakeFlow, IntakePhase};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use serde::Serialize;

use crate::app::App;
use crate::render::{self, Output};

/// Structured intake result for `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IntakeReport {
    phase: String,
    case_id: Option<String>,
    candidates: Vec<CandidateReport>,
    banner: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CandidateReport {
    number: usize,
    name: String,
    description: String,
    confidence: Option<i64>,
}

impl IntakeReport {
    fn from_flow(flow: &IntakeFlow) -> Self {
        let case_id = match flow.phase() {
            IntakePhase::Created(id) => Some(id.to_string()),
            _ => None,
        };
        Self {
            phase: flow.phase().to_string(),
            case_id,
            candidates: flow
                .cards()
                .into_iter()
                .enumerate()
                .map(|(i, card)| CandidateReport {
                    number: i + 1,
                    name: card.name,
                    description: card.description,
                    confidence: card.badge.map(|b| b.percent),
                })
                .collect(),
            banner: flow
                .banner()
                .map(|b| b.message.clone())
                .or_else(|| flow.advisory().map(|b| b.message)),
        }
    }
}

fn new_flow(app: &App) -> IntakeFlow {
    IntakeFlow::new(
        app.support(),
        app.session.clone(),
        app.background.clone(),
        &app.config.intake,
    )
}

/// Converts a 1-based choice from the operator into an index.
fn choice_index(number: usize) -> Result<usize, CaselineError> {
    number
        .checked_sub(1)
        .ok_or_else(|| CaselineError::validation("select", "Categories are numbered from 1"))
}

/// Runs one search, then selects or creates as the flags ask.
pub async fn run_once(
    app: &App,
    output: Output,
    text: &str,
    select: Option<usize>,
    uncategorized: bool,
) -> Result<(), CaselineError> {
    let mut flow = new_flow(app);
    flow.edit(text);

    let event = match (flow.search().await, select) {
        (IntakeEvent::CandidatesShown(_), Some(number)) => {
            flow.select(choice_index(number)?).await
        }
        (IntakeEvent::NoMatch, _) if uncategorized => flow.create_uncategorized().await,
        (searched, _) => searched,
    };

    if output.json {
        render::print_json(&IntakeReport::from_flow(&flow));
    } else {
        print_state(&flow, output);
        if matches!(event, IntakeEvent::CandidatesShown(_)) {
            println!("Re-run with {} to open the case.", "--select N".yellow());
        }
    }
    outcome(&flow, &event)
}

/// Maps a terminal event to the process result.
fn outcome(flow: &IntakeFlow, event: &IntakeEvent) -> Result<(), CaselineError> {
    let message = || {
        flow.banner()
            .map(|b| b.message.clone())
            .unwrap_or_else(|| "intake did not complete".to_string())
    };
    match event {
        IntakeEvent::Rejected => Err(CaselineError::validation("intake", message())),
        IntakeEvent::Failed => Err(CaselineError::Internal(message())),
        _ => Ok(()),
    }
}

fn print_state(flow: &IntakeFlow, output: Output) {
    if let Some(banner) = flow.banner() {
        render::print_banner(output, banner);
    }
    if let Some(advisory) = flow.advisory() {
        render::print_banner(output, &advisory);
        if flow.allows_uncategorized() {
            println!("Use {} to open the case without a category.", "/create".yellow());
        }
    }
    if flow.phase() == &IntakePhase::Choosing {
        println!();
        println!("  Select the category that best matches your issue:");
        for (i, card) in flow.cards().iter().enumerate() {
            println!("{}", render::format_card(i, card, output.color));
        }
        println!();
    }
}

/// Interactive intake REPL.
pub async fn run_interactive(app: &App, output: Output) -> Result<(), CaselineError> {
    let mut flow = new_flow(app);
    let mut rl = DefaultEditor::new()
        .map_err(|e| CaselineError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "caseline intake".bold().green());
    println!(
        "Describe your issue, then type {}. {} exits.\n",
        "/search".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "intake".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                handle_line(&mut flow, output, trimmed).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                render::print_error(output, &CaselineError::Internal(e.to_string()));
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

async fn handle_line(flow: &mut IntakeFlow, output: Output, line: &str) {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match command {
        "/search" => {
            flow.search().await;
            print_state(flow, output);
        }
        "/select" => {
            let Some(number) = argument.parse::<usize>().ok().filter(|n| *n > 0) else {
                println!("usage: /select N");
                return;
            };
            flow.select(number - 1).await;
            print_state(flow, output);
        }
        "/create" => {
            flow.create_uncategorized().await;
            print_state(flow, output);
        }
        "/clear" => {
            flow.edit("");
            flow.dismiss_banner();
        }
        "/show" => println!("{}", flow.draft().text()),
        _ if command.starts_with('/') => {
            println!("unknown command {command}; try /search, /select N, /create, /clear, /quit");
        }
        _ => {
            let text = if flow.draft().text().is_empty() {
                line.to_string()
            } else {
                format!("{} {line}", flow.draft().text())
            };
            flow.edit(text);
            flow.dismiss_banner();
            match flow.draft().hint() {
                Some(hint) => println!("{}", hint.dimmed()),
                None => println!(
                    "{}",
                    format!("{} words, ready to /search", flow.draft().word_count()).dimmed()
                ),
            }
        }
    }
}
