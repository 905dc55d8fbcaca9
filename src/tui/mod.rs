//! Interactive split-screen demo.
//!
//! # Architecture
//!
//! - `app`: demo state, key handling and run lifecycle logging
//! - `ui`: layout and widgets
//! - `mod.rs` (this file): terminal setup and the frame loop
//!
//! The frame loop is single-threaded. Remote calls run on worker threads
//! owned by the run controller; everything else (timers, log, audio, scroll)
//! is advanced from here once per frame.

mod app;
mod ui;

pub use app::{DemoApp, InputMode, TUI_BOTTOM_THRESHOLD};
pub use ui::wrap_text;

use crate::audio::{AudioCue, NoopAudio, TerminalBell};
use crate::config::Config;
use crate::controller::DualPaneRunController;
use crate::error::{Result, ThinkmodeError};
use crate::llm::{build_responders, ApiKeyStore};
use crate::scenario::Scenario;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Target frames per second. Fast enough for the 8ms typewriter to look
/// smooth when several characters land per frame.
const TARGET_FPS: u64 = 30;

const FRAME_DURATION: Duration = Duration::from_millis(1000 / TARGET_FPS);

type DemoTerminal = Terminal<CrosstermBackend<Stdout>>;

fn init_terminal() -> io::Result<DemoTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut DemoTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Launch the demo and block until the user quits.
pub fn run_demo(
    config: &Config,
    keys: ApiKeyStore,
    scenario: &'static Scenario,
    muted: bool,
) -> Result<()> {
    let (fast, reasoning) = build_responders(config, keys.clone())?;
    let controller = DualPaneRunController::new(fast, reasoning);

    let mut audio: Box<dyn AudioCue> = if config.audio {
        Box::new(TerminalBell::new(io::stdout()))
    } else {
        Box::new(NoopAudio::new())
    };
    if muted {
        audio.set_muted(true);
    }

    let mut app = DemoApp::new(
        controller,
        keys,
        audio,
        scenario,
        Duration::from_millis(config.reveal_interval_ms),
        Instant::now(),
    );

    // Restore the terminal even if something panics mid-frame
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal =
        init_terminal().map_err(|e| ThinkmodeError::Terminal(e.to_string()))?;
    log::debug!("Demo started with scenario {}", scenario.id);

    let result = event_loop(&mut terminal, &mut app);

    app.teardown();
    restore_terminal(&mut terminal).map_err(|e| ThinkmodeError::Terminal(e.to_string()))?;
    result
}

fn event_loop(terminal: &mut DemoTerminal, app: &mut DemoApp) -> Result<()> {
    loop {
        app.update(Instant::now());
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release or repeat)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration_matches_fps() {
        assert_eq!(TARGET_FPS, 30);
        assert_eq!(FRAME_DURATION.as_millis(), 33);
    }
}
