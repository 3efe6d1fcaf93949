use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use tolk_application::ConsoleSession;
use tolk_core::TolkError;
use tolk_infrastructure::{BackendLauncher, ConfigService};
use tolk_interaction::OllamaApiClient;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Renders a failed turn the way the console always has.
fn describe_error(error: &TolkError) -> String {
    match error {
        TolkError::Api { status, body } => format!("API Error: {} {}", status, body),
        other => format!("Error: {}", other),
    }
}

/// Console entry point.
///
/// Starts the inference server, then loops: read a prompt, run one turn,
/// print the reply. Ctrl-C or Ctrl-D at the prompt ends the process.
#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = ConfigService::new().get_config();

    // The server is left running after we exit
    match BackendLauncher::from_config(&config).launch().await {
        Ok(_child) => println!("{}", "Ollama server started successfully.".bright_green()),
        Err(e) => println!(
            "{}",
            format!("Failed to start Ollama server: {}", e).bright_red()
        ),
    }

    let client = Arc::new(OllamaApiClient::new(config.endpoint.clone()));
    let mut session = ConsoleSession::new(client, &config.console);
    tracing::info!(
        "[Console] Using model {} at {}",
        session.model(),
        config.endpoint
    );

    let mut rl = DefaultEditor::new()?;

    loop {
        println!("\n{}", "Enter prompt:".bright_cyan());
        let line = match rl.readline("") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        if !is_submittable(&line) {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        match session.submit(&line).await {
            Ok(reply) => println!("{}", reply.output),
            Err(e) => println!("{}", describe_error(&e).red()),
        }
    }

    Ok(())
}

/// Blank lines re-prompt instead of sending an empty turn.
fn is_submittable(line: &str) -> bool {
    !line.trim().is_empty()
}
