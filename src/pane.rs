//! Per-pane view model.
//!
//! A [`ThinkingPane`] turns the controller's [`RunResult`] for one engine into
//! what the terminal draws: the scripted execution trace, a pulse while the
//! engine is busy, and the typewriter-revealed answer. It also owns the
//! pane's scroll state.
//!
//! The trace is decorative. It plays its script at a fixed cadence no matter
//! when the real answer arrives.

use std::time::{Duration, Instant};

use crate::audio::AudioCue;
use crate::controller::RunResult;
use crate::reveal::StreamingTextRevealer;
use crate::scroll::ScrollFollower;
use crate::trace::{ExecutionTraceSimulator, PaneMode};

/// One logical line of pane content, before wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneLine<'a> {
    TraceHeader,
    /// 1-based position in the script.
    Trace { number: usize, text: &'a str },
    /// Shown under the trace while the engine is still busy.
    Pulse,
    Blank,
    OutputHeader,
    /// Revealed answer text; may contain newlines.
    Output(&'a str),
}

#[derive(Debug, Clone)]
pub struct ThinkingPane {
    mode: PaneMode,
    trace: ExecutionTraceSimulator,
    revealer: StreamingTextRevealer,
    follower: ScrollFollower,
    loading: bool,
}

impl ThinkingPane {
    pub fn new(mode: PaneMode, reveal_interval: Duration, bottom_threshold: u32) -> Self {
        Self {
            mode,
            trace: ExecutionTraceSimulator::new(mode),
            revealer: StreamingTextRevealer::new(reveal_interval),
            follower: ScrollFollower::new(bottom_threshold),
            loading: false,
        }
    }

    pub fn mode(&self) -> PaneMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn trace(&self) -> &ExecutionTraceSimulator {
        &self.trace
    }

    pub fn revealer(&self) -> &StreamingTextRevealer {
        &self.revealer
    }

    pub fn follower(&self) -> &ScrollFollower {
        &self.follower
    }

    pub fn follower_mut(&mut self) -> &mut ScrollFollower {
        &mut self.follower
    }

    /// Bring the pane in line with the controller state.
    ///
    /// Called every frame; only edges have side effects. Entering the loading
    /// state re-pins the scroll and starts the thinking loop, leaving it stops
    /// the loop.
    pub fn sync(&mut self, result: &RunResult, now: Instant, audio: &mut dyn AudioCue) {
        if result.is_loading && !self.loading {
            self.follower.reset_for_new_run();
            audio.start_loop();
        } else if !result.is_loading && self.loading {
            audio.stop_loop();
        }
        self.loading = result.is_loading;

        self.trace
            .set_active(result.is_loading, result.text.is_some(), now);
        self.revealer.set_source(result.text.as_deref(), now);
    }

    /// Advance both timers. Returns `true` if the content changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let traced = self.trace.tick(now) > 0;
        let revealed = self.revealer.tick(now);
        traced || revealed
    }

    /// Whether any timer is still running.
    pub fn is_animating(&self) -> bool {
        self.trace.is_ticking() || self.revealer.is_ticking()
    }

    pub fn content_lines(&self) -> Vec<PaneLine<'_>> {
        let mut lines = Vec::new();

        let trace = self.trace.lines();
        if !trace.is_empty() {
            lines.push(PaneLine::TraceHeader);
            lines.extend(
                trace
                    .iter()
                    .enumerate()
                    .map(|(i, text)| PaneLine::Trace { number: i + 1, text }),
            );
            if self.loading {
                lines.push(PaneLine::Pulse);
            }
        }

        let output = self.revealer.displayed();
        if !output.is_empty() {
            if !lines.is_empty() {
                lines.push(PaneLine::Blank);
            }
            lines.push(PaneLine::OutputHeader);
            lines.push(PaneLine::Output(output));
        }
        lines
    }

    /// Cancel both timers and drop in-flight reveal state.
    pub fn teardown(&mut self, audio: &mut dyn AudioCue) {
        if self.loading {
            audio.stop_loop();
        }
        self.loading = false;
        self.trace.cancel();
        self.revealer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AudioEvent, RecordingAudio};

    fn pane(mode: PaneMode) -> ThinkingPane {
        ThinkingPane::new(mode, Duration::from_millis(8), 2)
    }

    fn loading() -> RunResult {
        RunResult {
            text: None,
            is_loading: true,
        }
    }

    fn settled(text: &str) -> RunResult {
        RunResult {
            text: Some(text.to_string()),
            is_loading: false,
        }
    }

    #[test]
    fn test_idle_pane_is_empty() {
        let pane = pane(PaneMode::Fast);
        assert!(pane.content_lines().is_empty());
        assert!(!pane.is_animating());
    }

    #[test]
    fn test_loading_edges_drive_audio_loop() {
        let mut audio = RecordingAudio::new();
        let mut pane = pane(PaneMode::Fast);
        let t0 = Instant::now();

        pane.sync(&loading(), t0, &mut audio);
        pane.sync(&loading(), t0, &mut audio);
        pane.sync(&settled("done"), t0, &mut audio);

        assert_eq!(audio.events, vec![AudioEvent::LoopStart, AudioEvent::LoopStop]);
    }

    #[test]
    fn test_trace_lines_are_numbered_with_pulse() {
        let mut audio = RecordingAudio::new();
        let mut pane = pane(PaneMode::Fast);
        let t0 = Instant::now();
        pane.sync(&loading(), t0, &mut audio);
        assert!(pane.tick(t0 + Duration::from_millis(600)));

        let lines = pane.content_lines();
        assert_eq!(lines[0], PaneLine::TraceHeader);
        assert_eq!(
            lines[1],
            PaneLine::Trace {
                number: 1,
                text: PaneMode::Fast.script()[0]
            }
        );
        assert!(matches!(lines[2], PaneLine::Trace { number: 2, .. }));
        assert_eq!(lines.last(), Some(&PaneLine::Pulse));
    }

    #[test]
    fn test_result_is_revealed_under_trace() {
        let mut audio = RecordingAudio::new();
        let mut pane = pane(PaneMode::Reasoning);
        let t0 = Instant::now();
        pane.sync(&loading(), t0, &mut audio);
        pane.tick(t0 + Duration::from_millis(800));

        let t1 = t0 + Duration::from_millis(900);
        pane.sync(&settled("10 minutes"), t1, &mut audio);
        pane.tick(t1 + Duration::from_millis(24));

        let lines = pane.content_lines();
        assert!(!lines.contains(&PaneLine::Pulse));
        assert_eq!(lines[lines.len() - 2], PaneLine::OutputHeader);
        assert_eq!(lines[lines.len() - 1], PaneLine::Output("10 "));

        pane.tick(t1 + Duration::from_secs(1));
        assert_eq!(pane.content_lines().last(), Some(&PaneLine::Output("10 minutes")));
        assert!(!pane.is_animating());
    }

    #[test]
    fn test_new_run_clears_previous_content_and_repins() {
        let mut audio = RecordingAudio::new();
        let mut pane = pane(PaneMode::Fast);
        let t0 = Instant::now();
        pane.sync(&settled("old answer"), t0, &mut audio);
        pane.tick(t0 + Duration::from_secs(1));

        pane.follower_mut().set_viewport(2);
        pane.follower_mut().on_content_change(20);
        pane.follower_mut().on_user_scroll(0);
        assert!(!pane.follower().is_following());

        pane.sync(&loading(), t0 + Duration::from_secs(2), &mut audio);
        assert!(pane.follower().is_following());
        assert!(pane.content_lines().is_empty());
    }

    #[test]
    fn test_reset_clears_trace_and_output() {
        let mut audio = RecordingAudio::new();
        let mut pane = pane(PaneMode::Fast);
        let t0 = Instant::now();
        pane.sync(&loading(), t0, &mut audio);
        pane.tick(t0 + Duration::from_millis(900));

        pane.sync(&RunResult::default(), t0 + Duration::from_secs(1), &mut audio);
        assert!(pane.content_lines().is_empty());
        assert!(!pane.is_animating());
    }

    #[test]
    fn test_teardown_cancels_timers() {
        let mut audio = RecordingAudio::new();
        let mut pane = pane(PaneMode::Reasoning);
        let t0 = Instant::now();
        pane.sync(&loading(), t0, &mut audio);
        assert!(pane.is_animating());

        pane.teardown(&mut audio);
        assert!(!pane.is_animating());
        assert!(!pane.tick(t0 + Duration::from_secs(10)));
        assert_eq!(audio.count(AudioEvent::LoopStop), 1);
    }
}
