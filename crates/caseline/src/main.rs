// SPDX-FileCopyrightText: 2026 Caseline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caseline - operator console for support-case intake and triage.
//!
//! This is the binary entry point. Each subcommand lives in its own module.

mod app;
mod cases;
mod catalog;
mod chat;
mod intake;
mod knowledge;
mod render;
mod thread;

use std::path::PathBuf;

use caseline_config::CaselineConfig;
use caseline_core::{CaseStatus, CaselineError, Priority};
use clap::{Parser, Subcommand};

use crate::app::App;
use crate::render::Output;

/// Caseline - operator console for support-case intake and triage.
#[derive(Parser, Debug)]
#[command(name = "caseline", version, about, long_about = None)]
struct Cli {
    /// Read this config file instead of the layered lookup.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Act as this user instead of `session.user_id`.
    #[arg(long, global = true, value_name = "USER_ID")]
    user: Option<String>,

    /// Print JSON for scripting.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Describe an issue, match it to an intent and open a case.
    Intake {
        /// Run once with this description instead of interactively.
        #[arg(long)]
        text: Option<String>,
        /// Pick the N-th suggested category (1-based).
        #[arg(long, requires = "text")]
        select: Option<usize>,
        /// Open the case without a category when nothing matches.
        #[arg(long, requires = "text", conflicts_with = "select")]
        uncategorized: bool,
    },
    /// Browse and update support cases.
    Cases {
        #[command(subcommand)]
        action: CasesCommand,
    },
    /// Open the correspondence thread of a case.
    Thread {
        case_id: String,
    },
    /// Manage intents.
    Intents {
        #[command(subcommand)]
        action: IntentsCommand,
    },
    /// Manage tools.
    Tools {
        #[command(subcommand)]
        action: ToolsCommand,
    },
    /// Manage knowledge-base documents.
    Knowledge {
        #[command(subcommand)]
        action: KnowledgeCommand,
    },
    /// Talk to the generative chat tester.
    Chat,
    /// Inspect configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CasesCommand {
    /// List cases, most recent first.
    List {
        /// Keep cases whose title, id or status contains this text.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show one case with its messages.
    Show { case_id: String },
    /// Change status, priority, resolution or assignee.
    Update {
        case_id: String,
        #[arg(long)]
        status: Option<CaseStatus>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        resolved: Option<bool>,
        #[arg(long, value_name = "AGENT")]
        assign: Option<String>,
    },
    /// Show the AI summary of a case.
    Summary {
        case_id: String,
        /// Generate a fresh summary instead of loading the stored one.
        #[arg(long)]
        regenerate: bool,
    },
}

#[derive(Subcommand, Debug)]
enum IntentsCommand {
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Create an intent from a TOML or JSON definition.
    Create {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
    /// Replace an intent; the definition must carry `intentid`.
    Update {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
    Delete { intent_id: String },
    /// Generate sample utterances for an intent.
    Utterances { intent: String },
}

#[derive(Subcommand, Debug)]
enum ToolsCommand {
    List,
    /// Create a tool from a TOML or JSON definition.
    Create {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
    /// Replace a tool with the same name.
    Update {
        #[arg(long, value_name = "PATH")]
        file: PathBuf,
    },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum KnowledgeCommand {
    List,
    /// Upload one or more documents.
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Delete documents by file name.
    Delete {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate configuration, then print the effective settings.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => caseline_config::load_and_validate_path(path),
        None => caseline_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            caseline_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.console.log_level);
    let output = Output::new(cli.json, cli.plain);

    if let Err(e) = run(cli, config, output).await {
        render::print_error(output, &e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: CaselineConfig, output: Output) -> Result<(), CaselineError> {
    if let Commands::Config {
        action: ConfigCommand::Check,
    } = &cli.command
    {
        return render::print_config(output, &config, cli.user.as_deref());
    }

    let app = App::new(config, cli.user.as_deref())?;
    let result = match cli.command {
        Commands::Intake {
            text,
            select,
            uncategorized,
        } => match text {
            Some(text) => intake::run_once(&app, output, &text, select, uncategorized).await,
            None => intake::run_interactive(&app, output).await,
        },
        Commands::Cases { action } => match action {
            CasesCommand::List { filter } => cases::list(&app, output, filter.as_deref()).await,
            CasesCommand::Show { case_id } => cases::show(&app, output, &case_id.as_str().into()).await,
            CasesCommand::Update {
                case_id,
                status,
                priority,
                resolved,
                assign,
            } => {
                let update = cases::build_update(status, priority, resolved, assign)?;
                cases::update(&app, output, &case_id.as_str().into(), &update).await
            }
            CasesCommand::Summary {
                case_id,
                regenerate,
            } => cases::summary(&app, output, &case_id.as_str().into(), regenerate).await,
        },
        Commands::Thread { case_id } => thread::run_thread(&app, output, &case_id.as_str().into()).await,
        Commands::Intents { action } => match action {
            IntentsCommand::List { filter } => catalog::list_intents(&app, output, filter.as_deref()).await,
            IntentsCommand::Create { file } => catalog::create_intent(&app, output, &file).await,
            IntentsCommand::Update { file } => catalog::update_intent(&app, output, &file).await,
            IntentsCommand::Delete { intent_id } => catalog::delete_intent(&app, output, &intent_id).await,
            IntentsCommand::Utterances { intent } => catalog::utterances(&app, output, &intent).await,
        },
        Commands::Tools { action } => match action {
            ToolsCommand::List => catalog::list_tools(&app, output).await,
            ToolsCommand::Create { file } => catalog::create_tool(&app, output, &file).await,
            ToolsCommand::Update { file } => catalog::update_tool(&app, output, &file).await,
            ToolsCommand::Delete { name } => catalog::delete_tool(&app, output, &name).await,
        },
        Commands::Knowledge { action } => match action {
            KnowledgeCommand::List => knowledge::list(&app, output).await,
            KnowledgeCommand::Upload { paths } => knowledge::upload(&app, output, &paths).await,
            KnowledgeCommand::Delete { names } => knowledge::delete(&app, output, &names).await,
        },
        Commands::Chat => chat::run_chat(&app, output).await,
        Commands::Config { .. } => Ok(()),
    };

    app.shutdown().await;
    result
}

/// Logs go to stderr so command output stays clean on stdout.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("caseline={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
