//! Shell completion scripts.
//!
//! The shell is taken from the command line or detected from `$SHELL`; the
//! script is generated by clap_complete from the CLI definition passed in by
//! the binary.

use crate::error::{Result, ThinkmodeError};
use clap::{Command, ValueEnum};
use clap_complete::{generate, Shell};

pub const BIN_NAME: &str = "thinkmode";

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

impl ShellType {
    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the user's shell from the `$SHELL` environment variable.
pub fn detect_shell() -> Result<ShellType> {
    let shell_path = std::env::var("SHELL").map_err(|_| {
        ThinkmodeError::ShellCompletion(
            "$SHELL environment variable is not set. Pass the shell explicitly, e.g. `thinkmode completions zsh`."
                .to_string(),
        )
    })?;

    parse_shell_from_path(&shell_path)
}

/// Parse a shell type from a path such as `/usr/local/bin/fish`.
pub fn parse_shell_from_path(shell_path: &str) -> Result<ShellType> {
    let shell_name = std::path::Path::new(shell_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(shell_path);

    match shell_name {
        "bash" => Ok(ShellType::Bash),
        "zsh" => Ok(ShellType::Zsh),
        "fish" => Ok(ShellType::Fish),
        _ => Err(ThinkmodeError::ShellCompletion(format!(
            "Unsupported shell: '{}'. Supported shells are: bash, zsh, fish.",
            shell_name
        ))),
    }
}

/// Render the completion script for `shell`.
pub fn generate_completion_script(shell: ShellType, cmd: &mut Command) -> String {
    let mut buffer = Vec::new();
    generate(shell.to_clap_shell(), cmd, BIN_NAME, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}
