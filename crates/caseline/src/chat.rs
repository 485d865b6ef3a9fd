// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `caseline chat`: talk to the assistant inside one chat session.

use caseline_core::CaselineError;
use caseline_triage::Tone;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::app::App;
use crate::render::{self, Output};

pub async fn run_chat(app: &App, output: Output) -> Result<(), CaselineError> {
    let assistant = app.assistant();
    let mut rl = DefaultEditor::new()
        .map_err(|e| CaselineError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "caseline chat".bold().green());
    println!(
        "Session {}. Type {} to exit.\n",
        app.session.chat_session_id().dimmed(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "you".green());
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

                match assistant.chat(trimmed).await {
                    Ok(reply) => {
                        debug!(chars = reply.text.len(), "assistant replied");
                        let label = render::tinted("assistant:", Tone::Info, output.color);
                        println!("{label} {}\n", reply.text);
                    }
                    Err(e) => render::print_error(output, &e),
                }
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
