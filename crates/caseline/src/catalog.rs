// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `caseline intents` and `caseline tools` command implementations.
//!
//! Definitions are read from a `.json` or `.toml` file and validated locally
//! before anything is sent.

use std::path::Path;

use caseline_core::{CaselineError, Intent, Tool};
use caseline_triage::{Banner, Tone};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::app::App;
use crate::render::{self, Output};

/// Reads a definition file. `.json` files are parsed as JSON, anything else as TOML.
pub fn load_definition<T: DeserializeOwned>(path: &Path) -> Result<T, CaselineError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CaselineError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        serde_json::from_str(&raw).map_err(|e| e.to_string())
    } else {
        toml::from_str(&raw).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| {
        CaselineError::validation("file", format!("{}: {message}", path.display()))
    })
}

/// Folds a list of field errors into one validation error.
fn combine(errors: Vec<CaselineError>) -> CaselineError {
    let message = errors
        .iter()
        .map(|e| match e {
            CaselineError::Validation { field, message } => format!("{field}: {message}"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ");
    CaselineError::validation("definition", message)
}

fn done(output: Output, message: String) {
    if output.json {
        render::print_json(&serde_json::json!({ "ok": true, "message": message }));
    } else {
        render::print_banner(output, &Banner::success(message));
    }
}

pub async fn list_intents(
    app: &App,
    output: Output,
    filter: Option<&str>,
) -> Result<(), CaselineError> {
    let intents = app.catalog().list_intents().await?;
    let shown: Vec<&Intent> = intents
        .iter()
        .filter(|i| filter.is_none_or(|f| f.trim().is_empty() || i.matches(f.trim())))
        .collect();

    if output.json {
        render::print_json(&shown);
        return Ok(());
    }

    println!();
    println!("  caseline intents ({} of {})", shown.len(), intents.len());
    println!("  {}", "-".repeat(60));
    if shown.is_empty() {
        println!("    no intents found");
    }
    for intent in shown {
        let id = intent.intentid.as_deref().unwrap_or("-");
        let tools = intent
            .tools
            .iter()
            .map(|t| t.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {:<14} {}",
            id,
            render::tinted(&intent.intent, Tone::Info, output.color)
        );
        if !intent.description.is_empty() {
            println!("                 {}", intent.description);
        }
        if !tools.is_empty() {
            println!("                 tools: {tools}");
        }
    }
    println!();
    Ok(())
}

pub async fn create_intent(app: &App, output: Output, path: &Path) -> Result<(), CaselineError> {
    let intent: Intent = load_definition(path)?;
    intent.validate().map_err(combine)?;
    app.catalog().create_intent(&intent).await?;
    info!(intent = %intent.intent, "intent created");
    done(output, format!("Intent {} created", intent.intent));
    Ok(())
}

pub async fn update_intent(app: &App, output: Output, path: &Path) -> Result<(), CaselineError> {
    let intent: Intent = load_definition(path)?;
    if intent.intentid.as_deref().is_none_or(|id| id.trim().is_empty()) {
        return Err(CaselineError::validation(
            "intentid",
            "intentid is required to update an intent",
        ));
    }
    intent.validate().map_err(combine)?;
    app.catalog().update_intent(&intent).await?;
    info!(intent = %intent.intent, "intent updated");
    done(output, format!("Intent {} updated", intent.intent));
    Ok(())
}

pub async fn delete_intent(app: &App, output: Output, intent_id: &str) -> Result<(), CaselineError> {
    app.catalog().delete_intent(intent_id).await?;
    info!(intent_id, "intent deleted");
    done(output, format!("Intent {intent_id} deleted"));
    Ok(())
}

/// Generates sample utterances; the payload is printed as returned.
pub async fn utterances(app: &App, _output: Output, intent: &str) -> Result<(), CaselineError> {
    let generated = app.assistant().generate_utterances(intent).await?;
    render::print_json(&generated);
    Ok(())
}

pub async fn list_tools(app: &App, output: Output) -> Result<(), CaselineError> {
    let tools = app.catalog().list_tools().await?;

    if output.json {
        render::print_json(&tools);
        return Ok(());
    }

    println!();
    println!("  caseline tools ({})", tools.len());
    println!("  {}", "-".repeat(60));
    if tools.is_empty() {
        println!("    no tools defined");
    }
    for tool in &tools {
        let params = tool
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.kind))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {}({params})",
            render::tinted(&tool.name, Tone::Info, output.color)
        );
        if !tool.description.is_empty() {
            println!("      {}", tool.description);
        }
    }
    println!();
    Ok(())
}

fn load_tool(path: &Path) -> Result<Tool, CaselineError> {
    let tool: Tool = load_definition(path)?;
    tool.validate().map_err(combine)?;
    Ok(tool)
}

pub async fn create_tool(app: &App, output: Output, path: &Path) -> Result<(), CaselineError> {
    let tool = load_tool(path)?;
    app.catalog().create_tool(&tool).await?;
    info!(tool = %tool.name, "tool created");
    done(output, format!("Tool {} created", tool.name));
    Ok(())
}

pub async fn update_tool(app: &App, output: Output, path: &Path) -> Result<(), CaselineError> {
    let tool = load_tool(path)?;
    app.catalog().update_tool(&tool).await?;
    info!(tool = %tool.name, "tool updated");
    done(output, format!("Tool {} updated", tool.name));
    Ok(())
}

pub async fn delete_tool(app: &App, output: Output, name: &str) -> Result<(), CaselineError> {
    app.catalog().delete_tool(name).await?;
    info!(tool = name, "tool deleted");
    done(output, format!("Tool {name} deleted"));
    Ok(())
}
