//! Orchestration of one split-screen experiment.
//!
//! A run sends the same effective prompt to both engines at once, waits for
//! both to settle, and then fills both panes together. Failure is handled as
//! a unit: if either engine fails, both panes receive the deterministic
//! fallback text for the request, so the UI never shows one real answer next
//! to one fallback and never shows a raw error.
//!
//! The controller is driven from the UI loop. `run` flips both panes into the
//! loading state and hands the remote work to a worker thread; `poll` applies
//! the settled outcome. Outcomes are tagged with a run id so that a run
//! abandoned by `reset` can still finish in the background without touching
//! the panes.

use serde::Serialize;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Result, ThinkmodeError};
use crate::llm::Responder;
use crate::scenario::{RunRequest, Scenario};
use crate::trace::PaneMode;

/// Display state of one pane for the current run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub text: Option<String>,
    pub is_loading: bool,
}

impl RunResult {
    fn loading() -> Self {
        Self {
            text: None,
            is_loading: true,
        }
    }

    fn settled(text: String) -> Self {
        Self {
            text: Some(text),
            is_loading: false,
        }
    }
}

/// Whether a run produced real answers or the automatic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Answered,
    Fallback { reason: String },
}

/// The settled texts of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub run_id: u64,
    pub prompt: String,
    pub is_custom: bool,
    pub fast: String,
    pub reasoning: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl RunOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.status, OutcomeStatus::Fallback { .. })
    }

    pub fn text(&self, mode: PaneMode) -> &str {
        match mode {
            PaneMode::Fast => &self.fast,
            PaneMode::Reasoning => &self.reasoning,
        }
    }

    fn fallback(run_id: u64, request: &RunRequest, reason: String) -> Self {
        log::warn!("Experiment failed, using automatic fallback: {}", reason);
        let (fast, reasoning) = request.fallback_texts();
        Self {
            run_id,
            prompt: request.prompt.clone(),
            is_custom: request.is_custom,
            fast,
            reasoning,
            status: OutcomeStatus::Fallback { reason },
        }
    }
}

/// Result of asking the controller to start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStart {
    Started { run_id: u64 },
    /// A run is already in flight; the request was dropped.
    Ignored,
}

fn join_engine(handle: thread::ScopedJoinHandle<'_, Result<String>>, name: &str) -> Result<String> {
    handle
        .join()
        .unwrap_or_else(|_| Err(ThinkmodeError::Remote(format!("{} engine panicked", name))))
}

/// Apply the all-or-nothing policy to two settled engine results.
pub fn resolve_outcome(
    run_id: u64,
    request: &RunRequest,
    fast: Result<String>,
    reasoning: Result<String>,
) -> RunOutcome {
    match (fast, reasoning) {
        (Ok(fast), Ok(reasoning)) => RunOutcome {
            run_id,
            prompt: request.prompt.clone(),
            is_custom: request.is_custom,
            fast,
            reasoning,
            status: OutcomeStatus::Answered,
        },
        (Err(e), _) | (_, Err(e)) => RunOutcome::fallback(run_id, request, e.to_string()),
    }
}

/// Run both engines concurrently against `request` and wait for both.
///
/// Blocks the calling thread until both engines have settled. A panicking
/// engine counts as a failure.
pub fn execute_run(
    fast: &dyn Responder,
    reasoning: &dyn Responder,
    request: &RunRequest,
) -> RunOutcome {
    execute_run_with_id(0, fast, reasoning, request)
}

fn execute_run_with_id(
    run_id: u64,
    fast: &dyn Responder,
    reasoning: &dyn Responder,
    request: &RunRequest,
) -> RunOutcome {
    let prompt = request.prompt.as_str();
    let (fast_result, reasoning_result) = thread::scope(|scope| {
        let fast_handle = scope.spawn(|| fast.respond(prompt));
        let reasoning_handle = scope.spawn(|| reasoning.respond(prompt));
        (
            join_engine(fast_handle, fast.name()),
            join_engine(reasoning_handle, reasoning.name()),
        )
    });
    resolve_outcome(run_id, request, fast_result, reasoning_result)
}

/// Drives the two panes through the run lifecycle.
pub struct DualPaneRunController {
    fast: Arc<dyn Responder>,
    reasoning: Arc<dyn Responder>,
    panes: [RunResult; 2],
    /// Run whose outcome may still be applied.
    pending_run: Option<u64>,
    last_run_id: u64,
    request: Option<RunRequest>,
    tx: Sender<RunOutcome>,
    rx: Receiver<RunOutcome>,
}

impl DualPaneRunController {
    pub fn new(fast: Arc<dyn Responder>, reasoning: Arc<dyn Responder>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            fast,
            reasoning,
            panes: [RunResult::default(), RunResult::default()],
            pending_run: None,
            last_run_id: 0,
            request: None,
            tx,
            rx,
        }
    }

    pub fn pane(&self, mode: PaneMode) -> &RunResult {
        &self.panes[mode.index()]
    }

    /// True while a run is in flight (both panes load together).
    pub fn is_loading(&self) -> bool {
        self.panes.iter().any(|p| p.is_loading)
    }

    /// The request of the most recent run, if any.
    pub fn current_request(&self) -> Option<&RunRequest> {
        self.request.as_ref()
    }

    /// Start a run. Empty (or markup-only) input falls back to the scenario
    /// question.
    ///
    /// A second call while a run is in flight is ignored.
    pub fn run(&mut self, custom_input: &str, scenario: &'static Scenario) -> RunStart {
        if self.is_loading() {
            log::debug!("Run requested while another is in flight; ignoring");
            return RunStart::Ignored;
        }

        let request = RunRequest::resolve(custom_input, scenario);
        self.last_run_id += 1;
        let run_id = self.last_run_id;
        self.pending_run = Some(run_id);
        self.panes = [RunResult::loading(), RunResult::loading()];
        self.request = Some(request.clone());

        let fast = Arc::clone(&self.fast);
        let reasoning = Arc::clone(&self.reasoning);
        let tx = self.tx.clone();
        let worker_request = request.clone();
        let spawned = thread::Builder::new()
            .name(format!("thinkmode-run-{}", run_id))
            .spawn(move || {
                let outcome =
                    execute_run_with_id(run_id, fast.as_ref(), reasoning.as_ref(), &worker_request);
                // The receiver is gone if the controller was dropped; nothing to update.
                let _ = tx.send(outcome);
            });

        if let Err(e) = spawned {
            let outcome =
                RunOutcome::fallback(run_id, &request, format!("failed to start run: {}", e));
            let _ = self.tx.send(outcome);
        }

        RunStart::Started { run_id }
    }

    /// Apply a settled outcome if one is ready. Non-blocking.
    pub fn poll(&mut self) -> Option<RunOutcome> {
        while let Ok(outcome) = self.rx.try_recv() {
            if let Some(applied) = self.apply(outcome) {
                return Some(applied);
            }
        }
        None
    }

    /// Block up to `timeout` for the in-flight run to settle.
    pub fn wait(&mut self, timeout: Duration) -> Option<RunOutcome> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(outcome) => {
                    if let Some(applied) = self.apply(outcome) {
                        return Some(applied);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }

    fn apply(&mut self, outcome: RunOutcome) -> Option<RunOutcome> {
        if self.pending_run != Some(outcome.run_id) {
            log::debug!("Discarding outcome of abandoned run {}", outcome.run_id);
            return None;
        }

        self.pending_run = None;
        self.panes = [
            RunResult::settled(outcome.fast.clone()),
            RunResult::settled(outcome.reasoning.clone()),
        ];
        Some(outcome)
    }

    /// Clear both panes without a new call. An in-flight run keeps going but
    /// its outcome will be discarded.
    ///
    /// Abandoned workers are detached, not cancelled: each lives until its
    /// remote calls settle, at most `request_timeout_secs`. Repeated
    /// run/reset cycles keep one such worker per abandoned run until then.
    pub fn reset(&mut self) {
        self.pending_run = None;
        self.panes = [RunResult::default(), RunResult::default()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{find_scenario, CUSTOM_IMPULSE_FALLBACK, CUSTOM_REASONING_FALLBACK};
    use crate::test_utils::StubResponder;

    const WAIT: Duration = Duration::from_secs(5);

    fn drying_time() -> &'static Scenario {
        find_scenario("drying-time").unwrap()
    }

    fn controller(fast: StubResponder, reasoning: StubResponder) -> DualPaneRunController {
        DualPaneRunController::new(Arc::new(fast), Arc::new(reasoning))
    }

    #[test]
    fn test_execute_run_success_populates_both() {
        let fast = StubResponder::answering("50 minutes");
        let reasoning = StubResponder::answering("10 minutes");
        let request = RunRequest::resolve("", drying_time());

        let outcome = execute_run(&fast, &reasoning, &request);
        assert_eq!(outcome.status, OutcomeStatus::Answered);
        assert_eq!(outcome.fast, "50 minutes");
        assert_eq!(outcome.reasoning, "10 minutes");
        assert_eq!(fast.last_prompt().as_deref(), Some(drying_time().question));
        assert_eq!(reasoning.last_prompt().as_deref(), Some(drying_time().question));
    }

    #[test]
    fn test_single_failure_falls_back_on_both_panes() {
        let fast = StubResponder::answering("real fast answer");
        let reasoning = StubResponder::failing("429 rate limited");
        let request = RunRequest::resolve("", drying_time());

        let outcome = execute_run(&fast, &reasoning, &request);
        assert!(outcome.is_fallback());
        assert_ne!(outcome.fast, "real fast answer");
        assert_eq!(
            outcome.status,
            OutcomeStatus::Fallback {
                reason: "Remote model call failed: 429 rate limited".to_string()
            }
        );
    }

    #[test]
    fn test_drying_time_forced_failure() {
        let request = RunRequest::resolve("", drying_time());
        let outcome = execute_run(
            &StubResponder::failing("down"),
            &StubResponder::failing("down"),
            &request,
        );
        assert!(outcome.fast.contains("Impulse says 50 minutes"));
        assert!(outcome.reasoning.contains("1. "));
        assert!(outcome.reasoning.contains("2. "));
        assert!(outcome
            .reasoning
            .contains("3. Conclusion: Impulse says 50 minutes. Reality is concurrent (10 minutes)."));
    }

    #[test]
    fn test_custom_query_forced_failure_uses_fixed_messages() {
        for scenario in crate::scenario::SCENARIOS {
            let request = RunRequest::resolve("What is 9 plus 10?", scenario);
            let outcome = execute_run(
                &StubResponder::failing("down"),
                &StubResponder::failing("down"),
                &request,
            );
            assert_eq!(outcome.fast, CUSTOM_IMPULSE_FALLBACK);
            assert_eq!(outcome.reasoning, CUSTOM_REASONING_FALLBACK);
        }
    }

    #[test]
    fn test_missing_key_falls_back() {
        let request = RunRequest::resolve("", drying_time());
        let outcome = execute_run(
            &StubResponder::missing_key(),
            &StubResponder::missing_key(),
            &request,
        );
        match outcome.status {
            OutcomeStatus::Fallback { reason } => assert!(reason.contains("API key")),
            OutcomeStatus::Answered => panic!("expected fallback"),
        }
    }

    #[test]
    fn test_panicking_engine_counts_as_failure() {
        let request = RunRequest::resolve("", drying_time());
        let outcome = execute_run(
            &StubResponder::panicking(),
            &StubResponder::answering("fine"),
            &request,
        );
        assert!(outcome.is_fallback());
        assert_eq!(outcome.reasoning, drying_time().reasoning_fallback());
    }

    #[test]
    fn test_waits_for_both_engines_even_after_early_failure() {
        let request = RunRequest::resolve("", drying_time());
        let slow = StubResponder::answering("slow").with_delay(Duration::from_millis(150));
        let started = Instant::now();
        let outcome = execute_run(&StubResponder::failing("fast failure"), &slow, &request);
        assert!(started.elapsed() >= Duration::from_millis(150));
        assert!(outcome.is_fallback());
        assert_eq!(slow.call_count(), 1);
    }

    #[test]
    fn test_run_sets_loading_and_clears_text() {
        let mut controller = controller(
            StubResponder::answering("a").with_delay(Duration::from_millis(50)),
            StubResponder::answering("b").with_delay(Duration::from_millis(50)),
        );
        assert!(!controller.is_loading());

        let start = controller.run("", drying_time());
        assert_eq!(start, RunStart::Started { run_id: 1 });
        for mode in PaneMode::ALL {
            assert_eq!(controller.pane(mode), &RunResult::loading());
        }

        let outcome = controller.wait(WAIT).unwrap();
        assert_eq!(outcome.run_id, 1);
        assert!(!controller.is_loading());
        assert_eq!(controller.pane(PaneMode::Fast).text.as_deref(), Some("a"));
        assert_eq!(controller.pane(PaneMode::Reasoning).text.as_deref(), Some("b"));
    }

    #[test]
    fn test_failed_run_clears_loading_on_both_panes() {
        let mut controller = controller(
            StubResponder::failing("boom"),
            StubResponder::answering("ok"),
        );
        controller.run("What is 9 plus 10?", drying_time());
        controller.wait(WAIT).unwrap();

        assert!(!controller.is_loading());
        assert_eq!(
            controller.pane(PaneMode::Fast).text.as_deref(),
            Some(CUSTOM_IMPULSE_FALLBACK)
        );
        assert_eq!(
            controller.pane(PaneMode::Reasoning).text.as_deref(),
            Some(CUSTOM_REASONING_FALLBACK)
        );
    }

    #[test]
    fn test_run_while_loading_is_ignored() {
        let fast = Arc::new(StubResponder::answering("a").with_delay(Duration::from_millis(100)));
        let reasoning = Arc::new(StubResponder::answering("b"));
        let mut controller = DualPaneRunController::new(fast.clone(), reasoning.clone());

        assert!(matches!(controller.run("", drying_time()), RunStart::Started { .. }));
        assert_eq!(controller.run("other", drying_time()), RunStart::Ignored);

        controller.wait(WAIT).unwrap();
        assert_eq!(fast.call_count(), 1);
        assert_eq!(reasoning.call_count(), 1);
        assert!(!controller.current_request().unwrap().is_custom);
    }

    #[test]
    fn test_reset_discards_in_flight_outcome() {
        let fast = StubResponder::answering_in_order(&["first", "second"])
            .with_delay(Duration::from_millis(50));
        let reasoning = StubResponder::answering_in_order(&["first", "second"]);
        let mut controller = controller(fast, reasoning);

        controller.run("", drying_time());
        controller.reset();
        assert!(!controller.is_loading());
        assert_eq!(controller.pane(PaneMode::Fast), &RunResult::default());

        let start = controller.run("", drying_time());
        assert_eq!(start, RunStart::Started { run_id: 2 });

        let outcome = controller.wait(WAIT).unwrap();
        assert_eq!(outcome.run_id, 2);
        assert!(controller.poll().is_none());
    }

    #[test]
    fn test_abandoned_outcome_never_reaches_panes() {
        let mut controller = controller(
            StubResponder::answering("late").with_delay(Duration::from_millis(30)),
            StubResponder::answering("late"),
        );
        controller.run("", drying_time());
        controller.reset();

        assert!(controller.wait(Duration::from_millis(300)).is_none());
        assert_eq!(controller.pane(PaneMode::Fast).text, None);
        assert_eq!(controller.pane(PaneMode::Reasoning).text, None);
    }

    #[test]
    fn test_repeated_reset_keeps_only_latest_run() {
        let fast = Arc::new(StubResponder::answering("a").with_delay(Duration::from_millis(40)));
        let reasoning = Arc::new(StubResponder::answering("b"));
        let mut controller = DualPaneRunController::new(fast.clone(), reasoning.clone());

        for _ in 0..3 {
            controller.run("", drying_time());
            controller.reset();
        }
        let start = controller.run("", drying_time());
        assert_eq!(start, RunStart::Started { run_id: 4 });

        let outcome = controller.wait(WAIT).unwrap();
        assert_eq!(outcome.run_id, 4);
        assert!(controller.wait(Duration::from_millis(200)).is_none());
        assert_eq!(fast.call_count(), 4);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_poll_without_run_returns_none() {
        let mut controller = controller(
            StubResponder::answering("a"),
            StubResponder::answering("b"),
        );
        assert!(controller.poll().is_none());
    }

    #[test]
    fn test_outcome_serializes_flat_status() {
        let request = RunRequest::resolve("", drying_time());
        let outcome = resolve_outcome(
            7,
            &request,
            Err(ThinkmodeError::Remote("x".to_string())),
            Ok("y".to_string()),
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["run_id"], 7);
        assert_eq!(json["status"], "fallback");
        assert_eq!(json["reason"], "Remote model call failed: x");
    }
}
