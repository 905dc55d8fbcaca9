pub mod audio;
pub mod commands;
pub mod completion;
pub mod config;
pub mod controller;
pub mod error;
pub mod llm;
pub mod output;
pub mod pane;
pub mod progress;
pub mod reveal;
pub mod scenario;
pub mod scroll;
pub mod signal;
pub mod system_log;
pub mod ticker;
pub mod trace;
pub mod tui;

#[cfg(test)]
mod test_utils;

pub use audio::{AudioCue, NoopAudio, TerminalBell};
pub use config::Config;
pub use controller::{DualPaneRunController, RunOutcome, RunResult, RunStart};
pub use error::{Result, ThinkmodeError};
pub use pane::ThinkingPane;
pub use scenario::{RunRequest, Scenario, SCENARIOS};
pub use trace::{ExecutionTraceSimulator, PaneMode};
