//! Test utilities shared across modules.
//!
//! Provides scripted engines and a recording audio backend so run lifecycle
//! tests never touch the network or the terminal.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::audio::AudioCue;
use crate::error::{Result, ThinkmodeError};
use crate::llm::Responder;

#[derive(Debug, Clone)]
enum StubBehavior {
    Answer(Vec<String>),
    Fail(String),
    MissingKey,
    Panic,
}

/// A scripted [`Responder`].
///
/// `answering_in_order` cycles through its answers, repeating the last one,
/// which lets a test tell consecutive runs apart.
#[derive(Debug)]
pub struct StubResponder {
    behavior: StubBehavior,
    delay: Duration,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubResponder {
    fn with_behavior(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::with_behavior(StubBehavior::Answer(vec![text.to_string()]))
    }

    pub fn answering_in_order(texts: &[&str]) -> Self {
        Self::with_behavior(StubBehavior::Answer(
            texts.iter().map(|t| t.to_string()).collect(),
        ))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_behavior(StubBehavior::Fail(message.to_string()))
    }

    pub fn missing_key() -> Self {
        Self::with_behavior(StubBehavior::MissingKey)
    }

    pub fn panicking() -> Self {
        Self::with_behavior(StubBehavior::Panic)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl Responder for StubResponder {
    fn respond(&self, prompt: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        match &self.behavior {
            StubBehavior::Answer(texts) => {
                let index = call.min(texts.len().saturating_sub(1));
                Ok(texts.get(index).cloned().unwrap_or_default())
            }
            StubBehavior::Fail(message) => Err(ThinkmodeError::Remote(message.clone())),
            StubBehavior::MissingKey => Err(ThinkmodeError::MissingApiKey),
            StubBehavior::Panic => panic!("stub engine panicked"),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Audio events observed by [`RecordingAudio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Click,
    LoopStart,
    LoopStop,
}

/// Audio backend that records every cue it is asked to play.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub events: Vec<AudioEvent>,
    muted: bool,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, event: AudioEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl AudioCue for RecordingAudio {
    fn play_click(&mut self) {
        self.events.push(AudioEvent::Click);
    }

    fn start_loop(&mut self) {
        self.events.push(AudioEvent::LoopStart);
    }

    fn stop_loop(&mut self) {
        self.events.push(AudioEvent::LoopStop);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answering_in_order_repeats_last() {
        let stub = StubResponder::answering_in_order(&["one", "two"]);
        assert_eq!(stub.respond("a").unwrap(), "one");
        assert_eq!(stub.respond("b").unwrap(), "two");
        assert_eq!(stub.respond("c").unwrap(), "two");
        assert_eq!(stub.call_count(), 3);
        assert_eq!(stub.last_prompt().as_deref(), Some("c"));
    }

    #[test]
    fn test_recording_audio_counts_events() {
        let mut audio = RecordingAudio::new();
        audio.play_click();
        audio.start_loop();
        audio.play_click();
        assert_eq!(audio.count(AudioEvent::Click), 2);
        assert_eq!(audio.count(AudioEvent::LoopStart), 1);
    }
}
