//! Ctrl+C handling for the headless commands.
//!
//! The first Ctrl+C during `thinkmode ask` skips the typewriter and prints
//! the remaining text at once. A second one exits.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{Result, ThinkmodeError};

/// Exit status used when the user interrupts twice.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Counts SIGINT deliveries.
///
/// Cloning shares the counter, so the handler can be polled from any thread.
#[derive(Clone)]
pub struct SignalHandler {
    interrupts: Arc<AtomicUsize>,
}

impl SignalHandler {
    /// Register the process-wide SIGINT handler.
    ///
    /// # Errors
    ///
    /// Fails with `ThinkmodeError::SignalHandler` if a handler is already registered.
    pub fn new() -> Result<Self> {
        let interrupts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&interrupts);

        ctrlc::set_handler(move || {
            let previous = counter.fetch_add(1, Ordering::SeqCst);
            if previous >= 1 {
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        })
        .map_err(|e| ThinkmodeError::SignalHandler(e.to_string()))?;

        Ok(Self { interrupts })
    }

    /// A handler that never fires, for when registration is not possible.
    pub fn detached() -> Self {
        Self {
            interrupts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Non-blocking: true once Ctrl+C has been pressed.
    pub fn skip_requested(&self) -> bool {
        self.interrupts.load(Ordering::SeqCst) > 0
    }

    #[cfg(test)]
    fn trigger(&self) {
        self.interrupts.fetch_add(1, Ordering::SeqCst);
    }
}
