//! Scenarios command handler.

use crate::config::load_config;
use crate::error::Result;
use crate::output::print_scenarios;
use crate::scenario::{default_scenario, SCENARIOS};

/// List the scenario catalog, marking the configured default.
pub fn scenarios_command() -> Result<()> {
    let default_id = match load_config() {
        Ok(config) => config.default_scenario,
        Err(e) => {
            log::warn!("Could not read config, marking built-in default: {}", e);
            default_scenario().id.to_string()
        }
    };
    print_scenarios(SCENARIOS, &default_id);
    Ok(())
}
