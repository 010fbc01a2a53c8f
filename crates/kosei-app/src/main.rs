//! Kosei application binary - composition root.
//!
//! Ties together the Kosei crates into a single executable:
//! 1. Load configuration from TOML and apply CLI overrides
//! 2. Load the selected style reference file, if any
//! 3. Build the OpenRouter client and the single-flight session
//! 4. Read input lines from stdin, submit them, and deliver outcomes
//!    (print + clipboard + sound cue)
//!
//! Settings changed during the run are written back to the config file.

mod cli;
mod feedback;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kosei_core::config::KoseiConfig;
use kosei_core::{ConversionOutcome, CueKind, ReferenceLibrary};
use kosei_llm::OpenRouterClient;
use kosei_session::ConversionSession;

use crate::cli::CliArgs;
use crate::feedback::Feedback;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config_path = args.resolve_config_path();
    let mut config = KoseiConfig::load_or_default(&config_path);

    let log_level = args.resolve_log_level(&config.general.log_level);
    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(config = %config_path.display(), "Kosei starting");

    apply_overrides(&mut config, &args);

    let client = match OpenRouterClient::new(config.llm.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to build chat-completion client: {e}");
            std::process::exit(1);
        }
    };

    let (session, mut outcomes) = ConversionSession::new(Arc::new(client), config.correction.clone());
    let feedback = Feedback::new();

    info!("Reading input from stdin; empty line is ignored, Ctrl-D exits");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            eprintln!("nothing to convert");
                            feedback.play_cue(CueKind::Warning);
                            continue;
                        }
                        if session.submit_input(&line) {
                            println!("converting...");
                            persist_settings(&mut config, &session, &config_path);
                        } else {
                            eprintln!("a conversion is already in flight");
                            feedback.play_cue(CueKind::Warning);
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read stdin: {e}");
                        break;
                    }
                }
            }
            outcome = outcomes.recv() => {
                match outcome {
                    Some(ConversionOutcome::Corrected(text)) => {
                        println!("{text}");
                        if let Err(e) = feedback.copy_to_clipboard(&text) {
                            tracing::debug!("Clipboard copy failed: {e}");
                        }
                        feedback.play_cue(CueKind::Success);
                    }
                    Some(ConversionOutcome::Error(message)) => {
                        eprintln!("{message}");
                        feedback.play_cue(CueKind::Warning);
                    }
                    None => break,
                }
            }
        }
    }

    persist_settings(&mut config, &session, &config_path);
    info!("Kosei shutting down");
}

/// Apply CLI overrides to the loaded config, resolving the reference file
/// against the reference library.
fn apply_overrides(config: &mut KoseiConfig, args: &CliArgs) {
    if let Some(ref policy) = args.policy {
        config.correction.conversion_policy = policy.clone();
    }

    let selected = args
        .reference_file
        .clone()
        .unwrap_or_else(|| config.correction.selected_reference_file.clone());
    if selected.is_empty() {
        return;
    }

    let library = ReferenceLibrary::new(&config.reference.folder);
    match library.read(&selected) {
        Ok(text) => {
            config.correction.reference_text = text;
            config.correction.selected_reference_file = selected;
        }
        Err(e) => {
            warn!("Reference file unavailable: {e}");
            config.correction.reference_text.clear();
            config.correction.selected_reference_file.clear();
        }
    }
}

/// Write the session's current settings back into the config file.
fn persist_settings(config: &mut KoseiConfig, session: &ConversionSession, path: &Path) {
    config.correction = session.settings();
    if let Err(e) = config.save(path) {
        warn!("Failed to persist settings: {e}");
    }
}
