//! Config command handler.
//!
//! Displays, modifies, and resets the thinkmode configuration file.

use std::path::Path;

use crate::config::{
    config_path, load_config_at, save_config_at, set_config_value, toml_string, Config,
};
use crate::error::Result;
use crate::output::{print_success, BOLD, CYAN, GRAY, RESET, YELLOW};

/// Display the configuration as TOML, with the file path as a header.
pub fn config_show_command() -> Result<()> {
    let path = config_path()?;

    println!("{BOLD}# thinkmode config{RESET}");
    println!("{GRAY}# {}{RESET}", path.display());
    println!();

    if !path.exists() {
        println!("{YELLOW}# (file does not exist, using defaults){RESET}");
        println!();
        print_config_as_toml(&Config::default());
        return Ok(());
    }

    print_config_as_toml(&load_config_at(&path)?);
    Ok(())
}

/// Set a single configuration value and save the file.
///
/// The value is parsed for the key's type and the resulting config is
/// validated before anything is written.
pub fn config_set_command(key: &str, value: &str) -> Result<()> {
    let path = config_path()?;
    set_value_at(&path, key, value)?;
    print_success(&format!("Set {} = {}", key, value));
    Ok(())
}

/// Overwrite the configuration file with defaults.
pub fn config_reset_command() -> Result<()> {
    let path = config_path()?;
    save_config_at(&path, &Config::default())?;
    print_success(&format!("Configuration reset to defaults ({})", path.display()));
    Ok(())
}

/// Print the configuration file path.
pub fn config_path_command() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn set_value_at(path: &Path, key: &str, value: &str) -> Result<Config> {
    let mut config = load_config_at(path)?;
    set_config_value(&mut config, key, value)?;
    save_config_at(path, &config)?;
    log::debug!("Config {} updated in {:?}", key, path);
    Ok(config)
}

fn print_config_as_toml(config: &Config) {
    for line in config_to_toml_string(config).lines() {
        match line.split_once(" = ") {
            Some((key, value)) => println!("{CYAN}{}{RESET} = {}", key, value),
            None => println!("{}", line),
        }
    }
}

/// Render a Config as plain TOML, one `key = value` per line.
pub fn config_to_toml_string(config: &Config) -> String {
    format!(
        "fast_model = {}\n\
         reasoning_model = {}\n\
         api_base = {}\n\
         request_timeout_secs = {}\n\
         reveal_interval_ms = {}\n\
         audio = {}\n\
         default_scenario = {}",
        toml_string(&config.fast_model),
        toml_string(&config.reasoning_model),
        toml_string(&config.api_base),
        config.request_timeout_secs,
        config.reveal_interval_ms,
        config.audio,
        toml_string(&config.default_scenario)
    )
}
