// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `caseline thread` command implementation.
//!
//! An interactive view of one case's correspondence. Plain lines are sent
//! as replies; staged attachments go with the next reply. Delivery results
//! of earlier replies are reported before each prompt.

use std::path::Path;
use std::time::Duration;

use caseline_core::{CaseId, CaselineError};
use caseline_triage::{
    Attachment, Correspondence, Delivery, ThreadEntry, ThreadLimits, ThreadView, Tone,
};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use uuid::Uuid;

use crate::app::App;
use crate::render::{self, Output};

const SETTLE_ON_EXIT: Duration = Duration::from_secs(10);

/// Replies whose delivery result has not been reported yet.
#[derive(Default)]
struct Tracked(Vec<Uuid>);

impl Tracked {
    fn watch(&mut self, correlation_id: Uuid) {
        self.0.push(correlation_id);
    }

    /// Entries whose delivery settled since the last call.
    fn settled<'a>(&mut self, entries: &'a [ThreadEntry]) -> Vec<&'a ThreadEntry> {
        let mut done = Vec::new();
        self.0.retain(|id| match entries.iter().find(|e| e.correlation_id == *id) {
            Some(entry) if entry.delivery != Delivery::Pending => {
                done.push(entry);
                false
            }
            Some(_) => true,
            None => false,
        });
        done
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub async fn run_thread(app: &App, output: Output, case_id: &CaseId) -> Result<(), CaselineError> {
    let mut thread = Correspondence::open(
        app.support(),
        app.store(),
        app.session.clone(),
        app.background.clone(),
        ThreadLimits::from(&app.config.correspondence),
        case_id,
    )
    .await?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| CaselineError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", format!("caseline thread {case_id}").bold().green());
    println!(
        "Type a reply, {} to stage a file, {} to pick an intent, {} to reload, {} to exit.",
        "/attach PATH".yellow(),
        "/select N".yellow(),
        "/refresh".yellow(),
        "/quit".yellow()
    );
    print_view(&thread, output);

    let mut staged: Vec<Attachment> = Vec::new();
    let mut tracked = Tracked::default();
    let prompt = format!("{}> ", "reply".green());

    loop {
        thread.poll_deliveries();
        report_deliveries(&mut thread, &mut tracked, output);

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
                if let Err(e) =
                    handle_line(&mut thread, &mut staged, &mut tracked, output, trimmed).await
                {
                    render::print_error(output, &e);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                render::print_error(output, &CaselineError::Internal(e.to_string()));
                break;
            }
        }
    }

    if !tracked.is_empty() && !thread.settle(SETTLE_ON_EXIT).await {
        println!("{}", "some replies were still sending at exit".yellow());
    }
    report_deliveries(&mut thread, &mut tracked, output);
    println!("{}", "goodbye".dimmed());
    Ok(())
}

async fn handle_line(
    thread: &mut Correspondence,
    staged: &mut Vec<Attachment>,
    tracked: &mut Tracked,
    output: Output,
    line: &str,
) -> Result<(), CaselineError> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match command {
        "/attach" => {
            if argument.is_empty() {
                println!("usage: /attach PATH");
                return Ok(());
            }
            let attachment = Attachment::from_path(Path::new(argument)).await?;
            if !thread
                .limits()
                .attachment_types
                .contains(&attachment.content_type)
            {
                return Err(CaselineError::validation(
                    "attachments",
                    format!(
                        "{} is not a supported file type ({})",
                        attachment.file_name,
                        thread.limits().attachment_types.join(", ")
                    ),
                ));
            }
            println!(
                "{}",
                format!("staged {} ({} bytes)", attachment.file_name, attachment.bytes.len())
                    .dimmed()
            );
            staged.push(attachment);
        }
        "/detach" => {
            staged.clear();
            println!("{}", "attachments cleared".dimmed());
        }
        "/select" => {
            let Some(number) = argument.parse::<usize>().ok().filter(|n| *n > 0) else {
                println!("usage: /select N");
                return Ok(());
            };
            let result = thread.select_pending_intent(number - 1).await;
            show_banner(thread, output);
            tracked.watch(result?);
            print_view(thread, output);
        }
        "/refresh" => {
            thread.refresh().await?;
            print_view(thread, output);
        }
        _ if command.starts_with('/') => {
            println!("unknown command {command}; try /attach, /detach, /select, /refresh, /quit");
        }
        _ => {
            let attachments = std::mem::take(staged);
            let result = thread.send_reply(line, attachments).await;
            show_banner(thread, output);
            let id = result?;
            if let Some(entry) = thread.entry(id) {
                println!("{}", render::format_entry(entry, output.color));
            }
            tracked.watch(id);
        }
    }
    Ok(())
}

fn print_view(thread: &Correspondence, output: Output) {
    println!();
    match thread.view() {
        ThreadView::SelectIntent(candidates) => {
            println!(
                "  {}",
                render::tinted(
                    "This case needs a category before you can reply:",
                    Tone::Warning,
                    output.color
                )
            );
            for (i, candidate) in candidates.iter().enumerate() {
                let card = caseline_triage::CandidateCard::from(candidate);
                println!("{}", render::format_card(i, &card, output.color));
            }
        }
        ThreadView::Messages(entries) => {
            println!("  {} ({} messages)", thread.case().title, entries.len());
            println!("  {}", "-".repeat(35));
            for entry in entries {
                println!("{}", render::format_entry(entry, output.color));
            }
        }
    }
    println!();
}

fn report_deliveries(thread: &mut Correspondence, tracked: &mut Tracked, output: Output) {
    for entry in tracked.settled(thread.entries()) {
        let line = match &entry.delivery {
            Delivery::Failed(reason) => format!(
                "{} not delivered: {} ({reason})",
                render::tinted("✗", Tone::Error, output.color),
                entry.message.content
            ),
            _ => format!(
                "{} delivered: {}",
                render::tinted("✓", Tone::Success, output.color),
                entry.message.content
            ),
        };
        println!("{line}");
    }
    show_banner(thread, output);
}

/// Prints the current banner once.
fn show_banner(thread: &mut Correspondence, output: Output) {
    if let Some(banner) = thread.banner() {
        render::print_banner(output, banner);
        thread.dismiss_banner();
    }
}
