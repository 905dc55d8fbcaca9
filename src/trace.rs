//! Scripted "thinking" trace shown above each pane's answer.
//!
//! The trace is purely decorative. It plays a fixed script at a fixed
//! cadence while its pane is loading and knows nothing about how far the
//! real remote call has progressed. A fast call may settle before the script
//! is halfway through; a slow one may leave the script finished long before
//! the answer arrives.

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::ticker::Ticker;

const FAST_SCRIPT: &[&str] = &[
    "// Ingesting prompt...",
    "// Tokenizing input...",
    "// Vector search...",
    "// Predicting next token...",
    "// Generating output...",
    "// Finalizing response...",
];

const REASONING_SCRIPT: &[&str] = &[
    "// Analyzing intent...",
    "// Defining constraints...",
    "// Checking for logic traps...",
    "/* Strategy: Decomposition */",
    "// Step 1: Breakdown...",
    "// Step 2: Calculation...",
    "// Step 3: Verification...",
    "// Reviewing logical consistency...",
    "// Formatting final answer...",
];

/// Which half of the comparison a pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneMode {
    /// Zero-shot answer, no scratchpad.
    Fast,
    /// Step-by-step reasoning before the answer.
    Reasoning,
}

impl PaneMode {
    pub const ALL: [PaneMode; 2] = [PaneMode::Fast, PaneMode::Reasoning];

    pub fn script(self) -> &'static [&'static str] {
        match self {
            PaneMode::Fast => FAST_SCRIPT,
            PaneMode::Reasoning => REASONING_SCRIPT,
        }
    }

    /// Delay between two trace lines.
    pub fn cadence(self) -> Duration {
        match self {
            PaneMode::Fast => Duration::from_millis(300),
            PaneMode::Reasoning => Duration::from_millis(800),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PaneMode::Fast => "Impulse Engine",
            PaneMode::Reasoning => "Reasoning Engine",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            PaneMode::Fast => "Zero-shot. No scratchpad.",
            PaneMode::Reasoning => "Chain of Thought enabled.",
        }
    }

    pub fn index(self) -> usize {
        match self {
            PaneMode::Fast => 0,
            PaneMode::Reasoning => 1,
        }
    }

    pub fn other(self) -> PaneMode {
        match self {
            PaneMode::Fast => PaneMode::Reasoning,
            PaneMode::Reasoning => PaneMode::Fast,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionTraceSimulator {
    mode: PaneMode,
    lines: Vec<&'static str>,
    active: bool,
    ticker: Ticker,
}

impl ExecutionTraceSimulator {
    pub fn new(mode: PaneMode) -> Self {
        Self {
            mode,
            lines: Vec::new(),
            active: false,
            ticker: Ticker::new(mode.cadence()),
        }
    }

    pub fn mode(&self) -> PaneMode {
        self.mode
    }

    /// Feed the pane's loading state.
    ///
    /// Becoming active clears the previous trace and restarts the script.
    /// While inactive nothing is appended, and the lines are kept only if a
    /// result exists to go with them.
    pub fn set_active(&mut self, active: bool, has_result: bool, now: Instant) {
        if active {
            if !self.active {
                self.lines.clear();
                self.ticker.start(now);
            }
        } else {
            self.ticker.stop();
            if !has_result {
                self.lines.clear();
            }
        }
        self.active = active;
    }

    /// Append every line that fell due. Returns how many were appended.
    pub fn tick(&mut self, now: Instant) -> usize {
        let script = self.mode.script();
        let due = self.ticker.due(now) as usize;
        let start = self.lines.len();
        let count = due.min(script.len() - start);

        self.lines.extend_from_slice(&script[start..start + count]);

        if self.lines.len() == script.len() {
            self.ticker.stop();
        }
        count
    }

    pub fn lines(&self) -> &[&'static str] {
        &self.lines
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_exhausted(&self) -> bool {
        self.lines.len() == self.mode.script().len()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    /// Teardown: stop the timer and forget the trace.
    pub fn cancel(&mut self) {
        self.ticker.stop();
        self.lines.clear();
        self.active = false;
    }
}
