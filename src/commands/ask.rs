//! Ask command handler.
//!
//! Runs a single experiment without the TUI: both engines are queried
//! concurrently behind a spinner, then each pane is printed in turn with its
//! scripted trace and the answer revealed typewriter-style.

use std::io;
use std::time::Duration;

use super::resolve_scenario;
use crate::config::{get_effective_config, Config};
use crate::controller::{execute_run, RunOutcome};
use crate::error::Result;
use crate::llm::{build_responders, ApiKeyStore};
use crate::output::{
    print_outcome_status, print_pane_banner, print_pane_footer, print_run_header, print_trace,
    typewrite,
};
use crate::progress::RunSpinner;
use crate::scenario::RunRequest;
use crate::signal::SignalHandler;
use crate::trace::PaneMode;

/// Options for `thinkmode ask`.
#[derive(Debug, Clone, Default)]
pub struct AskOptions {
    /// Custom question; the scenario question is used when absent or blank.
    pub prompt: Option<String>,
    /// Scenario id; defaults to the configured scenario.
    pub scenario: Option<String>,
    /// Print the outcome as JSON instead of a transcript.
    pub json: bool,
    /// Print answers at once instead of revealing them.
    pub no_typewriter: bool,
}

pub fn ask_command(options: &AskOptions, keys: ApiKeyStore) -> Result<()> {
    let config = get_effective_config()?;
    let scenario = resolve_scenario(options.scenario.as_deref(), &config)?;
    let request = RunRequest::resolve(options.prompt.as_deref().unwrap_or(""), scenario);
    let (fast, reasoning) = build_responders(&config, keys)?;

    log::debug!("Asking both engines: {:?}", request.prompt);

    if options.json {
        let outcome = execute_run(fast.as_ref(), reasoning.as_ref(), &request);
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_run_header(&request);

    let spinner = RunSpinner::new(request.label());
    let outcome = execute_run(fast.as_ref(), reasoning.as_ref(), &request);
    if outcome.is_fallback() {
        spinner.finish_fallback();
    } else {
        spinner.finish_answered();
    }
    drop(spinner);

    print_transcript(&outcome, &config, options.no_typewriter)
}

fn print_transcript(outcome: &RunOutcome, config: &Config, no_typewriter: bool) -> Result<()> {
    // Only take over SIGINT once the blocking part is done
    let signals = if no_typewriter {
        SignalHandler::detached()
    } else {
        SignalHandler::new().unwrap_or_else(|e| {
            log::warn!("Ctrl+C will not skip the typewriter: {}", e);
            SignalHandler::detached()
        })
    };
    let interval = Duration::from_millis(config.reveal_interval_ms);

    for mode in PaneMode::ALL {
        print_pane_banner(mode);
        print_trace(mode);
        let text = outcome.text(mode);
        if no_typewriter {
            println!("{}", text);
        } else {
            typewrite(&mut io::stdout(), text, interval, || signals.skip_requested())?;
        }
        print_pane_footer(mode);
    }

    print_outcome_status(outcome);
    Ok(())
}
