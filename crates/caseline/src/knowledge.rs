// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `caseline knowledge` command implementation.

use std::path::PathBuf;

use caseline_core::CaselineError;
use caseline_triage::{Attachment, Banner, KnowledgeLibrary, Tone};
use serde::Serialize;

use crate::app::App;
use crate::render::{self, Output};

#[derive(Debug, Default, Serialize)]
struct UploadSummary {
    uploaded: Vec<String>,
    failed: Vec<String>,
}

fn library(app: &App) -> KnowledgeLibrary {
    KnowledgeLibrary::new(app.knowledge(), app.store(), &app.config.knowledge)
}

pub async fn list(app: &App, output: Output) -> Result<(), CaselineError> {
    let files = library(app).list().await?;

    if output.json {
        render::print_json(&files);
        return Ok(());
    }

    println!();
    println!("  caseline knowledge ({} documents)", files.len());
    println!("  {}", "-".repeat(60));
    if files.is_empty() {
        println!("    no documents uploaded");
    }
    for file in &files {
        let updated = file
            .updated_at
            .as_deref()
            .or(file.created_at.as_deref())
            .unwrap_or("-");
        println!(
            "  {:<8} {:<32} {}",
            render::tinted(&file.kind_label(), Tone::Info, output.color),
            file.file_name,
            updated
        );
    }
    println!();
    Ok(())
}

/// Uploads each file in turn. A failure is reported and the rest still go.
pub async fn upload(app: &App, output: Output, paths: &[PathBuf]) -> Result<(), CaselineError> {
    let library = library(app);
    let mut summary = UploadSummary::default();

    for path in paths {
        let result = match Attachment::from_path(path).await {
            Ok(document) => library.upload(document).await,
            Err(e) => Err(e),
        };
        let name = path.display().to_string();
        match result {
            Ok(()) => {
                if !output.json {
                    render::print_banner(output, &Banner::success(format!("Uploaded {name}")));
                }
                summary.uploaded.push(name);
            }
            Err(e) => {
                if !output.json {
                    render::print_error(output, &e);
                }
                summary.failed.push(name);
            }
        }
    }

    if output.json {
        render::print_json(&summary);
    }
    if summary.failed.is_empty() {
        Ok(())
    } else {
        Err(CaselineError::Upload {
            file_name: summary.failed.join(", "),
            message: format!("{} of {} documents failed", summary.failed.len(), paths.len()),
        })
    }
}

pub async fn delete(app: &App, output: Output, names: &[String]) -> Result<(), CaselineError> {
    let deleted = library(app).delete_many(names).await?;

    if output.json {
        render::print_json(&serde_json::json!({ "deleted": deleted }));
    } else {
        render::print_banner(
            output,
            &Banner::success(format!("Deleted {} document(s)", deleted.len())),
        );
    }
    Ok(())
}
