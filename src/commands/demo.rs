//! Demo command handler.
//!
//! Launches the interactive split-screen demo.

use super::resolve_scenario;
use crate::config::get_effective_config;
use crate::error::Result;
use crate::llm::ApiKeyStore;
use crate::tui;

/// Open the demo on `scenario` (or the configured default) and block until
/// the user quits.
pub fn demo_command(scenario: Option<&str>, keys: ApiKeyStore, muted: bool) -> Result<()> {
    let config = get_effective_config()?;
    let scenario = resolve_scenario(scenario, &config)?;
    log::info!(
        "Opening demo on {} (fast: {}, reasoning: {})",
        scenario.id,
        config.fast_model,
        config.reasoning_model
    );
    tui::run_demo(&config, keys, scenario, muted)
}
