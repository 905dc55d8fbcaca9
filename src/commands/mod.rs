//! CLI command handlers for thinkmode.
//!
//! Each command has its own module with a handler function.
//!
//! # Commands
//!
//! - [`demo`] - Interactive split-screen demo
//! - [`ask`] - One headless experiment run
//! - [`scenarios`] - List the scenario catalog
//! - [`config`] - Show, modify, and reset configuration

mod ask;
mod config;
mod demo;
mod scenarios;

pub use ask::{ask_command, AskOptions};
pub use config::{
    config_path_command, config_reset_command, config_set_command, config_show_command,
};
pub use demo::demo_command;
pub use scenarios::scenarios_command;

use crate::config::Config;
use crate::error::Result;
use crate::scenario::{require_scenario, Scenario};

/// Resolve the scenario named on the command line, or the configured default.
pub(crate) fn resolve_scenario(
    requested: Option<&str>,
    config: &Config,
) -> Result<&'static Scenario> {
    require_scenario(requested.unwrap_or(config.default_scenario.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThinkmodeError;

    #[test]
    fn test_resolve_scenario_prefers_flag() {
        let config = Config::default();
        let scenario = resolve_scenario(Some("word-count"), &config).unwrap();
        assert_eq!(scenario.id, "word-count");
    }

    #[test]
    fn test_resolve_scenario_falls_back_to_config() {
        let config = Config::default();
        let scenario = resolve_scenario(None, &config).unwrap();
        assert_eq!(scenario.id, config.default_scenario);
    }

    #[test]
    fn test_resolve_scenario_unknown() {
        let err = resolve_scenario(Some("nope"), &Config::default()).unwrap_err();
        assert!(matches!(err, ThinkmodeError::UnknownScenario(id) if id == "nope"));
    }
}
