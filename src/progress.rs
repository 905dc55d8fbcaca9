use crate::output::{GREEN, RESET, YELLOW};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use terminal_size::{terminal_size, Width};

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const DEFAULT_TERMINAL_WIDTH: u16 = 80;
// Spinner (2) + "Both engines thinking on " (25) + " [HH:MM:SS]" (11)
const SPINNER_OVERHEAD: usize = 38;
const MIN_LABEL_WIDTH: usize = 10;

fn get_terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

/// Spinner shown while both engines of a headless run are in flight.
pub struct RunSpinner {
    spinner: ProgressBar,
    start_time: Instant,
}

impl RunSpinner {
    pub fn new(label: &str) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars(SPINNER_CHARS)
                .template("{spinner:.cyan} Both engines thinking on {msg} [{elapsed_precise}]")
                .expect("invalid template"),
        );
        let available = get_terminal_width().saturating_sub(SPINNER_OVERHEAD);
        spinner.set_message(truncate_label(label, available.max(MIN_LABEL_WIDTH)));
        spinner.enable_steady_tick(Duration::from_millis(80));

        Self {
            spinner,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    fn elapsed_label(&self) -> String {
        format!("{:.1}s", self.elapsed().as_secs_f64())
    }

    pub fn finish_answered(&self) {
        self.spinner.finish_and_clear();
        println!(
            "{GREEN}\u{2714} Engines settled in {}{RESET}",
            self.elapsed_label()
        );
        println!();
    }

    pub fn finish_fallback(&self) {
        self.spinner.finish_and_clear();
        println!(
            "{YELLOW}\u{26A0} Engines failed after {}, showing automatic responses{RESET}",
            self.elapsed_label()
        );
        println!();
    }
}

impl Drop for RunSpinner {
    fn drop(&mut self) {
        // No partial spinner line left behind
        self.spinner.finish_and_clear();
    }
}

/// First line of `label`, cut to `max_len` characters with a trailing `...`.
fn truncate_label(label: &str, max_len: usize) -> String {
    let first_line = label.lines().next().unwrap_or("");
    if first_line.chars().count() <= max_len {
        return first_line.to_string();
    }
    if max_len <= 3 {
        return first_line.chars().take(max_len).collect();
    }
    let truncated: String = first_line.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}
