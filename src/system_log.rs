//! Bounded operational log shown in the status bar.
//!
//! `SystemLog` is an explicitly owned service: the application creates one at
//! start-up and hands `&mut` access to whatever needs to record something.
//! It keeps only the most recent [`MAX_LOG_ENTRIES`] entries, evicting the
//! oldest first. Every entry is mirrored to the `log` facade so it also
//! reaches `env_logger` when enabled.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Maximum number of retained entries.
pub const MAX_LOG_ENTRIES: usize = 50;

const LOG_TARGET: &str = "thinkmode::system_log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: String,
    /// Local wall-clock time, `HH:MM:SS.mmm`.
    pub timestamp: String,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Default)]
pub struct SystemLog {
    entries: VecDeque<LogEntry>,
}

/// Format a wall-clock time as `HH:MM:SS.mmm`.
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format("%H:%M:%S%.3f").to_string()
}

impl SystemLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    /// Append an entry stamped with the current local time.
    pub fn add_log(&mut self, message: impl Into<String>, level: LogLevel) {
        self.push_at(message.into(), level, Local::now());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.add_log(message, LogLevel::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.add_log(message, LogLevel::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.add_log(message, LogLevel::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add_log(message, LogLevel::Error);
    }

    fn push_at(&mut self, message: String, level: LogLevel, time: DateTime<Local>) {
        match level {
            LogLevel::Info | LogLevel::Success => log::info!(target: LOG_TARGET, "{}", message),
            LogLevel::Warning => log::warn!(target: LOG_TARGET, "{}", message),
            LogLevel::Error => log::error!(target: LOG_TARGET, "{}", message),
        }

        if self.entries.len() == MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: format_timestamp(&time),
            message,
            level,
        });
    }

    /// Entries in insertion order, oldest first.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The most recent entry, for the collapsed status bar.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Boot sequence
// ============================================================================

const BOOT_STEPS: &[(u64, &str, LogLevel)] = &[
    (200, "Initializing kernel...", LogLevel::Info),
    (600, "Mounting terminal interface...", LogLevel::Info),
    (1000, "Loading audio subsystem...", LogLevel::Info),
    (1400, "Checking terminal capabilities...", LogLevel::Info),
    (1800, "System interface ready.", LogLevel::Success),
];

const CREDENTIAL_CHECK_DELAY_MS: u64 = 2000;

/// Scripted start-up messages written to the log at fixed offsets, finishing
/// with a report on whether an API key is available.
///
/// Polled from the frame loop; done once every step has been written.
#[derive(Debug, Clone)]
pub struct BootSequence {
    started: Instant,
    steps: VecDeque<(Duration, String, LogLevel)>,
}

impl BootSequence {
    /// Schedule the boot steps relative to `started`.
    ///
    /// The credential line reflects `api_key_present` as captured here, at
    /// start-up. A key entered before the line is written does not change it.
    pub fn new(started: Instant, api_key_present: bool) -> Self {
        let mut steps: VecDeque<_> = BOOT_STEPS
            .iter()
            .map(|(delay, msg, level)| (Duration::from_millis(*delay), msg.to_string(), *level))
            .collect();

        let credential_step = if api_key_present {
            ("API key detected and loaded.", LogLevel::Success)
        } else {
            (
                "No API key found in environment. Please set GEMINI_API_KEY.",
                LogLevel::Warning,
            )
        };
        steps.push_back((
            Duration::from_millis(CREDENTIAL_CHECK_DELAY_MS),
            credential_step.0.to_string(),
            credential_step.1,
        ));

        Self { started, steps }
    }

    /// Write every step that fell due. Returns how many were written.
    pub fn poll(&mut self, now: Instant, log: &mut SystemLog) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        let mut written = 0;
        while let Some((delay, _, _)) = self.steps.front() {
            if *delay > elapsed {
                break;
            }
            if let Some((_, message, level)) = self.steps.pop_front() {
                log.add_log(message, level);
                written += 1;
            }
        }
        written
    }

    pub fn is_done(&self) -> bool {
        self.steps.is_empty()
    }
}
