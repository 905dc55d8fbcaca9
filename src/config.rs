use crate::error::{Result, ThinkmodeError};
use crate::scenario::find_scenario;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "thinkmode";

/// The filename for the configuration file.
const CONFIG_FILENAME: &str = "config.toml";

// ============================================================================
// Configuration
// ============================================================================

/// User configuration for thinkmode.
///
/// Missing fields in a config file fall back to their defaults, so partial
/// configs work.
///
/// # Example
///
/// ```toml
/// fast_model = "gemini-1.5-flash"
/// reasoning_model = "gemini-1.5-pro"
/// reveal_interval_ms = 8
/// audio = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Model used by the impulsive (fast) engine.
    #[serde(default = "default_fast_model")]
    pub fast_model: String,

    /// Model used by the reasoning engine.
    #[serde(default = "default_reasoning_model")]
    pub reasoning_model: String,

    /// Base URL of the generative language API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout for remote calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay between two revealed characters of an answer, in milliseconds.
    #[serde(default = "default_reveal_interval_ms")]
    pub reveal_interval_ms: u64,

    /// Whether audio feedback (terminal bell) is enabled at start-up.
    #[serde(default = "default_true")]
    pub audio: bool,

    /// Scenario selected when the demo opens.
    #[serde(default = "default_scenario_id")]
    pub default_scenario: String,
}

fn default_fast_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_reasoning_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_reveal_interval_ms() -> u64 {
    8
}

fn default_true() -> bool {
    true
}

fn default_scenario_id() -> String {
    crate::scenario::default_scenario().id.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fast_model: default_fast_model(),
            reasoning_model: default_reasoning_model(),
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            reveal_interval_ms: default_reveal_interval_ms(),
            audio: true,
            default_scenario: default_scenario_id(),
        }
    }
}

// ============================================================================
// Config Validation
// ============================================================================

use std::error::Error;
use std::fmt;

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A model name is empty.
    EmptyModel(&'static str),
    /// The API base URL is empty.
    EmptyApiBase,
    /// The request timeout is zero.
    ZeroTimeout,
    /// The reveal interval is zero.
    ZeroRevealInterval,
    /// `default_scenario` names no known scenario.
    UnknownDefaultScenario(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyModel(field) => write!(f, "`{}` must not be empty", field),
            ConfigError::EmptyApiBase => write!(f, "`api_base` must not be empty"),
            ConfigError::ZeroTimeout => {
                write!(f, "`request_timeout_secs` must be greater than zero")
            }
            ConfigError::ZeroRevealInterval => {
                write!(f, "`reveal_interval_ms` must be greater than zero")
            }
            ConfigError::UnknownDefaultScenario(id) => write!(
                f,
                "Unknown `default_scenario` \"{}\". Run `thinkmode scenarios` to list valid ids",
                id
            ),
        }
    }
}

impl Error for ConfigError {}

/// Validate a configuration for consistency.
///
/// # Example
///
/// ```
/// use thinkmode::config::{Config, validate_config};
///
/// assert!(validate_config(&Config::default()).is_ok());
///
/// let invalid = Config {
///     reveal_interval_ms: 0,
///     ..Default::default()
/// };
/// assert!(validate_config(&invalid).is_err());
/// ```
pub fn validate_config(config: &Config) -> std::result::Result<(), ConfigError> {
    if config.fast_model.trim().is_empty() {
        return Err(ConfigError::EmptyModel("fast_model"));
    }
    if config.reasoning_model.trim().is_empty() {
        return Err(ConfigError::EmptyModel("reasoning_model"));
    }
    if config.api_base.trim().is_empty() {
        return Err(ConfigError::EmptyApiBase);
    }
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::ZeroTimeout);
    }
    if config.reveal_interval_ms == 0 {
        return Err(ConfigError::ZeroRevealInterval);
    }
    if find_scenario(&config.default_scenario).is_none() {
        return Err(ConfigError::UnknownDefaultScenario(
            config.default_scenario.clone(),
        ));
    }
    Ok(())
}

// ============================================================================
// Config File Management
// ============================================================================

/// Keys accepted by `thinkmode config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "fast_model",
    "reasoning_model",
    "api_base",
    "request_timeout_secs",
    "reveal_interval_ms",
    "audio",
    "default_scenario",
];

/// Get the thinkmode config directory path (~/.config/thinkmode/).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ThinkmodeError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".config").join(CONFIG_DIR_NAME))
}

/// Ensure the config directory exists. Returns whether it was newly created.
pub fn ensure_config_dir() -> Result<(PathBuf, bool)> {
    let dir = config_dir()?;
    let created = !dir.exists();
    fs::create_dir_all(&dir)?;
    Ok((dir, created))
}

/// Get the path to the config file (~/.config/thinkmode/config.toml).
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

/// Load the configuration, creating a commented default file if none exists.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined, the file
/// cannot be read or written, or it contains invalid TOML.
pub fn load_config() -> Result<Config> {
    load_config_at(&config_path()?)
}

/// Save the configuration (overwrites user comments).
pub fn save_config(config: &Config) -> Result<()> {
    save_config_at(&config_path()?, config)
}

pub fn load_config_at(path: &Path) -> Result<Config> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config = Config::default();
        fs::write(path, generate_config_with_comments(&config))?;
        return Ok(config);
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        ThinkmodeError::Config(format!(
            "Failed to parse config file at {:?}: {}",
            path, e
        ))
    })
}

pub fn save_config_at(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, generate_config_with_comments(config))?;
    Ok(())
}

/// Load, validate, and return the effective configuration.
pub fn get_effective_config() -> Result<Config> {
    let config = load_config()?;
    validate_config(&config).map_err(|e| ThinkmodeError::Config(e.to_string()))?;
    Ok(config)
}

/// Apply a `key = value` change to `config`, parsing the value for the key's type.
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parse_u64 = |value: &str| {
        value.parse::<u64>().map_err(|_| {
            ThinkmodeError::Config(format!(
                "Invalid value for `{}`: expected a positive integer, got \"{}\"",
                key, value
            ))
        })
    };

    match key {
        "fast_model" => config.fast_model = value.to_string(),
        "reasoning_model" => config.reasoning_model = value.to_string(),
        "api_base" => config.api_base = value.to_string(),
        "request_timeout_secs" => config.request_timeout_secs = parse_u64(value)?,
        "reveal_interval_ms" => config.reveal_interval_ms = parse_u64(value)?,
        "audio" => {
            config.audio = value.parse::<bool>().map_err(|_| {
                ThinkmodeError::Config(format!(
                    "Invalid value for `audio`: expected true or false, got \"{}\"",
                    value
                ))
            })?
        }
        "default_scenario" => config.default_scenario = value.to_string(),
        _ => {
            return Err(ThinkmodeError::Config(format!(
                "Unknown config key \"{}\". Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            )))
        }
    }

    validate_config(config).map_err(|e| ThinkmodeError::Config(e.to_string()))
}

/// Render `value` as a TOML string literal, quotes and escapes included.
pub(crate) fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// Generate config file content with explanatory comments.
fn generate_config_with_comments(config: &Config) -> String {
    format!(
        r#"# Thinkmode Configuration

# Model for the Impulse Engine (answers immediately, no reasoning shown)
fast_model = {}

# Model for the Reasoning Engine (step-by-step chain of thought)
reasoning_model = {}

# Base URL of the generative language API
api_base = {}

# Timeout for each remote call, in seconds
request_timeout_secs = {}

# Typewriter speed: milliseconds between revealed characters
reveal_interval_ms = {}

# Audio feedback through the terminal bell
# - true: click on actions, chime when engines start thinking
# - false: silent
audio = {}

# Scenario selected when the demo opens (see `thinkmode scenarios`)
default_scenario = {}
"#,
        toml_string(&config.fast_model),
        toml_string(&config.reasoning_model),
        toml_string(&config.api_base),
        config.request_timeout_secs,
        config.reveal_interval_ms,
        config.audio,
        toml_string(&config.default_scenario),
    )
}
