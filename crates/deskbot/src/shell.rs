// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `deskbot chat` command implementation.
//!
//! Interactive REPL with a colored prompt and readline history. Each line is
//! answered independently; there is no cross-turn context.

use colored::Colorize;
use deskbot_config::DeskbotConfig;
use deskbot_core::DeskbotError;
use deskbot_engine::Engine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// Runs the interactive chat loop until `exit`, `quit`, or EOF.
pub async fn run_shell(config: &DeskbotConfig, engine: &Engine) -> Result<(), DeskbotError> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| DeskbotError::Internal(format!("failed to start readline: {e}")))?;

    println!(
        "{} ready. Ask about accounts, challenges, payouts, or platform setup.",
        config.agent.name.bold()
    );
    println!("Type 'exit' or 'quit' to end the session.\n");

    loop {
        let line = match editor.readline(&format!("{} ", "you:".cyan().bold())) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(DeskbotError::Internal(format!("readline error: {e}")));
            }
        };

        let query = line.trim();
        if query.is_empty() {
            println!("Please enter a question.");
            continue;
        }
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            break;
        }

        let _ = editor.add_history_entry(query);

        let result = engine.answer(query).await;
        debug!(
            model = %result.model_used,
            complexity = %result.complexity,
            candidates = result.candidate_count,
            elapsed_ms = result.processing_time_ms,
            "query answered"
        );

        println!("\n{} {}\n", "bot:".green().bold(), result.response_text);
        println!(
            "{}",
            format!(
                "[model: {} | complexity: {} | matches: {} | {} ms]",
                result.model_used,
                result.complexity,
                result.candidate_count,
                result.processing_time_ms
            )
            .dimmed()
        );
    }

    println!("Goodbye!");
    Ok(())
}
