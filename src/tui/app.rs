//! Demo application state.
//!
//! `DemoApp` owns everything the split-screen demo needs: the run
//! controller, one [`ThinkingPane`] per engine, the system log, the audio
//! backend and the input state. The event loop in `mod.rs` feeds it key
//! events and the current time; `ui.rs` reads it to draw.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::audio::AudioCue;
use crate::controller::{DualPaneRunController, OutcomeStatus, RunOutcome, RunStart};
use crate::llm::ApiKeyStore;
use crate::pane::ThinkingPane;
use crate::scenario::{Scenario, SCENARIOS};
use crate::system_log::{BootSequence, SystemLog};
use crate::trace::PaneMode;

/// Rows from the bottom within which a pane keeps following new output.
pub const TUI_BOTTOM_THRESHOLD: u32 = 2;

/// Rows moved by PgUp/PgDn.
const PAGE_ROWS: i64 = 10;

/// What keystrokes are currently typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingQuery,
    EditingKey,
}

pub struct DemoApp {
    controller: DualPaneRunController,
    panes: [ThinkingPane; 2],
    audio: Box<dyn AudioCue>,
    log: SystemLog,
    boot: BootSequence,
    keys: ApiKeyStore,

    scenario: &'static Scenario,
    custom_query: String,
    key_input: String,
    input_mode: InputMode,

    focus: PaneMode,
    log_expanded: bool,
    should_quit: bool,
}

impl DemoApp {
    pub fn new(
        controller: DualPaneRunController,
        keys: ApiKeyStore,
        audio: Box<dyn AudioCue>,
        scenario: &'static Scenario,
        reveal_interval: Duration,
        now: Instant,
    ) -> Self {
        let pane = |mode| ThinkingPane::new(mode, reveal_interval, TUI_BOTTOM_THRESHOLD);
        Self {
            controller,
            panes: [pane(PaneMode::Fast), pane(PaneMode::Reasoning)],
            audio,
            log: SystemLog::new(),
            boot: BootSequence::new(now, keys.is_available()),
            keys,
            scenario,
            custom_query: String::new(),
            key_input: String::new(),
            input_mode: InputMode::Normal,
            focus: PaneMode::Fast,
            log_expanded: false,
            should_quit: false,
        }
    }

    // ------------------------------------------------------------------
    // Accessors for rendering
    // ------------------------------------------------------------------

    pub fn scenario(&self) -> &'static Scenario {
        self.scenario
    }

    pub fn custom_query(&self) -> &str {
        &self.custom_query
    }

    pub fn is_custom(&self) -> bool {
        !self.custom_query.trim().is_empty()
    }

    /// Number of characters typed into the (masked) key prompt.
    pub fn key_input_len(&self) -> usize {
        self.key_input.chars().count()
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn focus(&self) -> PaneMode {
        self.focus
    }

    pub fn pane(&self, mode: PaneMode) -> &ThinkingPane {
        &self.panes[mode.index()]
    }

    pub fn pane_mut(&mut self, mode: PaneMode) -> &mut ThinkingPane {
        &mut self.panes[mode.index()]
    }

    pub fn log(&self) -> &SystemLog {
        &self.log
    }

    pub fn is_log_expanded(&self) -> bool {
        self.log_expanded
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    pub fn has_api_key(&self) -> bool {
        self.keys.is_available()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------

    /// Advance boot messages, apply a settled run and tick both panes.
    pub fn update(&mut self, now: Instant) {
        self.boot.poll(now, &mut self.log);

        if let Some(outcome) = self.controller.poll() {
            self.log_outcome(&outcome);
        }
        self.sync_panes(now);
        for pane in &mut self.panes {
            pane.tick(now);
        }
    }

    fn sync_panes(&mut self, now: Instant) {
        for mode in PaneMode::ALL {
            let result = self.controller.pane(mode);
            self.panes[mode.index()].sync(result, now, self.audio.as_mut());
        }
    }

    fn log_outcome(&mut self, outcome: &RunOutcome) {
        match &outcome.status {
            OutcomeStatus::Answered => {
                self.log
                    .success(format!("Experiment #{} complete: both engines responded", outcome.run_id));
            }
            OutcomeStatus::Fallback { reason } => {
                self.log.warning(format!(
                    "Experiment #{} failed, automatic fallback engaged: {}",
                    outcome.run_id, reason
                ));
            }
        }
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    pub fn start_run(&mut self, now: Instant) {
        self.audio.play_click();
        match self.controller.run(&self.custom_query, self.scenario) {
            RunStart::Started { run_id } => {
                let label = self
                    .controller
                    .current_request()
                    .map_or(self.scenario.title, |r| r.label())
                    .to_string();
                self.log
                    .info(format!("Experiment #{} started: {}", run_id, label));
            }
            RunStart::Ignored => {
                self.log.warning("Experiment already running; request ignored");
            }
        }
        self.sync_panes(now);
    }

    pub fn reset(&mut self, now: Instant) {
        self.audio.play_click();
        self.controller.reset();
        self.sync_panes(now);
        self.log.info("Panes reset");
    }

    /// Select scenario `index` (0-based). Clears the custom query and resets
    /// both panes.
    pub fn select_scenario(&mut self, index: usize, now: Instant) {
        let Some(scenario) = SCENARIOS.get(index) else {
            return;
        };
        self.audio.play_click();
        self.scenario = scenario;
        self.custom_query.clear();
        self.controller.reset();
        self.sync_panes(now);
        self.log
            .info(format!("Scenario switched: {}", scenario.title));
    }

    fn next_scenario(&mut self, now: Instant) {
        let current = SCENARIOS
            .iter()
            .position(|s| s.id == self.scenario.id)
            .unwrap_or(0);
        self.select_scenario((current + 1) % SCENARIOS.len(), now);
    }

    pub fn toggle_mute(&mut self) {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        if !muted {
            self.audio.play_click();
        }
        self.log.info(format!(
            "Audio subsystem {}",
            if muted { "MUTED" } else { "ENABLED" }
        ));
    }

    pub fn toggle_log(&mut self) {
        self.audio.play_click();
        self.log_expanded = !self.log_expanded;
    }

    fn submit_key(&mut self) {
        let key = std::mem::take(&mut self.key_input);
        self.keys.set_dynamic_key(key);
        if self.keys.has_dynamic_key() {
            self.log.success("Session API key set.");
        } else {
            self.log.info("Session API key cleared.");
        }
    }

    fn scroll_focused(&mut self, delta: i64) {
        self.panes[self.focus.index()]
            .follower_mut()
            .scroll_by(delta);
    }

    fn pin_focused(&mut self) {
        self.panes[self.focus.index()]
            .follower_mut()
            .on_user_scroll(u32::MAX);
    }

    /// Cancel pane timers and silence audio.
    pub fn teardown(&mut self) {
        for pane in &mut self.panes {
            pane.teardown(self.audio.as_mut());
        }
        self.audio.stop_loop();
    }

    pub fn quit(&mut self) {
        self.teardown();
        self.should_quit = true;
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.input_mode {
            InputMode::EditingQuery => self.handle_query_key(key.code, now),
            InputMode::EditingKey => self.handle_api_key_key(key.code),
            InputMode::Normal => self.handle_normal_key(key.code, now),
        }
    }

    fn handle_query_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.start_run(now);
            }
            KeyCode::Backspace => {
                self.custom_query.pop();
            }
            KeyCode::Char(c) => self.custom_query.push(c),
            _ => {}
        }
    }

    fn handle_api_key_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.key_input.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.submit_key();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.key_input.pop();
            }
            KeyCode::Char(c) => self.key_input.push(c),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, now: Instant) {
        match code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.select_scenario(index, now);
            }
            KeyCode::Tab => self.next_scenario(now),
            KeyCode::Char('i') => self.input_mode = InputMode::EditingQuery,
            KeyCode::Char('k') => {
                self.key_input.clear();
                self.input_mode = InputMode::EditingKey;
            }
            KeyCode::Enter | KeyCode::Char('r') => self.start_run(now),
            KeyCode::Char('x') => self.reset(now),
            KeyCode::Char('m') => self.toggle_mute(),
            KeyCode::Char('l') => self.toggle_log(),
            KeyCode::Left | KeyCode::Right => self.focus = self.focus.other(),
            KeyCode::Up => self.scroll_focused(-1),
            KeyCode::Down => self.scroll_focused(1),
            KeyCode::PageUp => self.scroll_focused(-PAGE_ROWS),
            KeyCode::PageDown => self.scroll_focused(PAGE_ROWS),
            KeyCode::End => self.pin_focused(),
            _ => {}
        }
    }
}
