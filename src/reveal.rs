//! Typewriter reveal of an already-fetched answer.
//!
//! The revealer owns the full source text and exposes a prefix that grows by
//! one character per tick. Supplying a different source (or `None`) restarts
//! the reveal from the empty string. Once the prefix covers the whole source
//! the ticker stops for good.

use std::time::{Duration, Instant};

use crate::ticker::Ticker;

/// Default delay between two revealed characters.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(8);

#[derive(Debug, Clone)]
pub struct StreamingTextRevealer {
    source: Option<String>,
    /// Revealed length in characters.
    shown: usize,
    /// Byte offset matching `shown`.
    shown_bytes: usize,
    total: usize,
    ticker: Ticker,
}

impl StreamingTextRevealer {
    pub fn new(interval: Duration) -> Self {
        Self {
            source: None,
            shown: 0,
            shown_bytes: 0,
            total: 0,
            ticker: Ticker::new(interval),
        }
    }

    /// Replace the source text. Returns `true` if the reveal restarted.
    ///
    /// Passing the text that is already being revealed is a no-op.
    pub fn set_source(&mut self, source: Option<&str>, now: Instant) -> bool {
        if self.source.as_deref() == source {
            return false;
        }

        self.source = source.map(str::to_string);
        self.shown = 0;
        self.shown_bytes = 0;
        self.total = self.source.as_deref().map_or(0, |s| s.chars().count());

        if self.total > 0 {
            self.ticker.start(now);
        } else {
            self.ticker.stop();
        }
        true
    }

    /// Advance the reveal. Returns `true` if the visible prefix grew.
    pub fn tick(&mut self, now: Instant) -> bool {
        let steps = self.ticker.due(now) as usize;
        if steps == 0 {
            return false;
        }
        let Some(source) = self.source.as_deref() else {
            self.ticker.stop();
            return false;
        };

        let target = (self.shown + steps).min(self.total);
        let advanced = target - self.shown;
        self.shown_bytes += source[self.shown_bytes..]
            .chars()
            .take(advanced)
            .map(char::len_utf8)
            .sum::<usize>();
        self.shown = target;

        if self.shown == self.total {
            self.ticker.stop();
        }
        advanced > 0
    }

    /// The currently visible prefix ("" when there is no source).
    pub fn displayed(&self) -> &str {
        self.source
            .as_deref()
            .map_or("", |s| &s[..self.shown_bytes])
    }

    pub fn shown_len(&self) -> usize {
        self.shown
    }

    pub fn source_len(&self) -> usize {
        self.total
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// True once the full source is visible (or there is nothing to show).
    pub fn is_complete(&self) -> bool {
        self.shown == self.total
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_running()
    }

    /// Teardown: stop ticking and drop the in-flight reveal.
    pub fn cancel(&mut self) {
        self.ticker.stop();
        self.source = None;
        self.shown = 0;
        self.shown_bytes = 0;
        self.total = 0;
    }
}

impl Default for StreamingTextRevealer {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_INTERVAL)
    }
}
