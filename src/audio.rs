//! Audio feedback capability.
//!
//! The UI only needs four things from an audio backend: a click for button
//! presses, a "thinking" loop while engines are busy, and a mute switch.
//! Backends are injected as `Box<dyn AudioCue>` so tests can use
//! [`NoopAudio`].

use std::io::Write;

pub trait AudioCue {
    fn play_click(&mut self);
    fn start_loop(&mut self);
    fn stop_loop(&mut self);
    /// Muting also stops a running loop.
    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
}

/// Silent backend.
#[derive(Debug, Default)]
pub struct NoopAudio {
    muted: bool,
}

impl NoopAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioCue for NoopAudio {
    fn play_click(&mut self) {}

    fn start_loop(&mut self) {}

    fn stop_loop(&mut self) {}

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

const BEL: &[u8] = b"\x07";

/// Terminal bell backend.
///
/// Clicks ring the bell; the thinking loop rings once when it starts and is
/// idempotent while running. Write failures are ignored: audio is never
/// allowed to break the UI.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
    muted: bool,
    looping: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            muted: false,
            looping: false,
        }
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self) {
        let _ = self.out.write_all(BEL);
        let _ = self.out.flush();
    }
}

impl<W: Write> AudioCue for TerminalBell<W> {
    fn play_click(&mut self) {
        if self.muted {
            return;
        }
        self.ring();
    }

    fn start_loop(&mut self) {
        if self.muted || self.looping {
            return;
        }
        self.looping = true;
        self.ring();
    }

    fn stop_loop(&mut self) {
        self.looping = false;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_loop();
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
