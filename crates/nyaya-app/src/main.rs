//! Nyaya application binary - composition root.
//!
//! Ties together the Nyaya crates into a single terminal executable:
//! 1. Load configuration from TOML
//! 2. Build the session engine and suggestion provider
//! 3. Render snapshot changes as a progressive typewriter transcript
//! 4. Read queries and commands from stdin

mod cli;

use std::io::Write;

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::sync::watch;

use nyaya_chat::{SessionEngine, SuggestionProvider};
use nyaya_core::types::{RevealState, Role, SessionSnapshot};
use nyaya_core::NyayaConfig;

use cli::CliArgs;

/// Render snapshot changes incrementally.
///
/// Tracks how many characters of each turn have already been written so a
/// reveal step prints only the new suffix, giving the terminal the same
/// typewriter effect the engine drives.
async fn render_loop(mut rx: watch::Receiver<SessionSnapshot>) {
    let mut printed_chars: Vec<usize> = Vec::new();
    let mut line_closed: Vec<bool> = Vec::new();

    while rx.changed().await.is_ok() {
        let snap = rx.borrow_and_update().clone();
        let mut out = std::io::stdout().lock();

        for (i, turn) in snap.turns.iter().enumerate() {
            if i >= printed_chars.len() {
                let label = match turn.role {
                    Role::User => "you",
                    Role::Assistant => "nyaya",
                };
                let _ = write!(out, "\n[{}] ", label);
                printed_chars.push(0);
                line_closed.push(false);
            }

            let visible = turn.visible_content();
            let total = visible.chars().count();
            if total > printed_chars[i] {
                let delta: String = visible.chars().skip(printed_chars[i]).collect();
                let _ = write!(out, "{}", delta);
                printed_chars[i] = total;
            }

            // Close the line once the turn has nothing left to reveal.
            if turn.reveal_state != RevealState::Revealing && !line_closed[i] {
                let _ = writeln!(out);
                line_closed[i] = true;
            }
        }

        let _ = out.flush();
    }
}

fn print_suggestions(provider: &SuggestionProvider) {
    println!("Suggested queries:");
    for (i, suggestion) in provider.all().iter().enumerate() {
        println!("  {}. {}", i + 1, suggestion);
    }
    println!("Type a question, or /pick N then /send. /quit exits.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let config = NyayaConfig::load_or_default(&config_file);

    // Tracing. Priority: RUST_LOG env > --log-level flag > config value.
    let log_level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting Nyaya v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let engine = SessionEngine::new(&config.chat);
    let provider = SuggestionProvider::from_config(&config.chat);

    tokio::spawn(render_loop(engine.subscribe()));

    print_suggestions(&provider);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "/quit" => break,
            "/suggest" => print_suggestions(&provider),
            "/send" => {
                let draft = engine.draft();
                engine.submit(&draft);
            }
            _ if line.starts_with("/pick") => {
                let picked = line
                    .split_whitespace()
                    .nth(1)
                    .and_then(|n| n.parse::<usize>().ok())
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| provider.get(i));
                match picked {
                    Some(text) => {
                        engine.select_suggestion(text);
                        println!("(draft) {}", engine.draft());
                    }
                    None => println!("Usage: /pick N (1..{})", provider.all().len()),
                }
            }
            _ => engine.submit(line),
        }
    }

    engine.shutdown();
    tracing::info!("Session ended");
    Ok(())
}
