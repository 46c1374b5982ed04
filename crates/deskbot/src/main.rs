// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deskbot - a retrieval-backed customer support assistant.
//!
//! This is the binary entry point: loads configuration and the knowledge
//! base, wires the engine, and dispatches to the chat REPL or a one-shot
//! query.

use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use deskbot_config::DeskbotConfig;
use deskbot_core::{DeskbotError, GenerateCapability};
use deskbot_engine::Engine;
use deskbot_openrouter::OpenRouterClient;
use deskbot_retrieval::KnowledgeBase;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod shell;

/// Deskbot - a retrieval-backed customer support assistant.
#[derive(Parser, Debug)]
#[command(name = "deskbot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive chat session.
    Chat,
    /// Answer a single query and exit.
    Ask {
        /// The customer question.
        query: String,
        /// Print the full result as JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match deskbot_config::load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("deskbot: configuration error: {err}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    let engine = match build_engine(&config) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("deskbot: {err}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Chat => {
            if let Err(err) = shell::run_shell(&config, &engine).await {
                eprintln!("deskbot: {err}");
                std::process::exit(1);
            }
        }
        Commands::Ask { query, json } => {
            let result = engine.answer(&query).await;
            if json {
                match serde_json::to_string_pretty(&result) {
                    Ok(out) => println!("{out}"),
                    Err(err) => {
                        eprintln!("deskbot: failed to serialize result: {err}");
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", result.response_text);
            }
        }
    }
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over the config level.
fn init_tracing(config: &DeskbotConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the knowledge base and wires the engine with the OpenRouter
/// capability when an API key is configured.
fn build_engine(config: &DeskbotConfig) -> Result<Engine, DeskbotError> {
    let knowledge = Arc::new(KnowledgeBase::load_json(Path::new(&config.knowledge.path))?);

    let capability: Option<Arc<dyn GenerateCapability>> = if config.openrouter.api_key.is_some() {
        Some(Arc::new(OpenRouterClient::new(&config.openrouter)?))
    } else {
        info!("no OpenRouter API key configured, running fallback-only");
        None
    };

    Ok(Engine::new(knowledge, config, capability))
}
