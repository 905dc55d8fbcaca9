//! Scenario list and run transcripts for `thinkmode scenarios` / `thinkmode ask`.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use super::colors::*;
use crate::controller::{OutcomeStatus, RunOutcome};
use crate::reveal::StreamingTextRevealer;
use crate::scenario::{RunRequest, Scenario};
use crate::trace::PaneMode;

/// Print the scenario catalog, marking `default_id`.
pub fn print_scenarios(scenarios: &[Scenario], default_id: &str) {
    println!("{BOLD}Scenarios{RESET}");
    println!();
    for (i, scenario) in scenarios.iter().enumerate() {
        let marker = if scenario.id == default_id {
            format!(" {GREEN}(default){RESET}")
        } else {
            String::new()
        };
        println!(
            "  {CYAN}[{}]{RESET} {BOLD}{}{RESET} {GRAY}{} · {}{RESET}{}",
            i + 1,
            scenario.title,
            scenario.id,
            scenario.difficulty,
            marker
        );
        println!("      {}", scenario.question);
        println!("      {DIM}Trap: {}{RESET}", scenario.trap);
    }
}

pub fn print_run_header(request: &RunRequest) {
    let source = if request.is_custom {
        "Custom Query".to_string()
    } else {
        format!("Preset: {}", request.scenario.title)
    };
    println!("{BOLD}The Split-Screen Test{RESET} {GRAY}({}){RESET}", source);
    println!("{CYAN}Q:{RESET} {}", request.prompt);
    println!();
}

/// Print the mode's scripted trace, numbered the way the demo shows it.
pub fn print_trace(mode: PaneMode) {
    println!("{DIM}▾ Execution Trace{RESET}");
    for (i, line) in mode.script().iter().enumerate() {
        println!("{GRAY}{:>3}  {}{RESET}", i + 1, line);
    }
    println!();
}

pub fn print_outcome_status(outcome: &RunOutcome) {
    match &outcome.status {
        OutcomeStatus::Answered => {
            println!("{GREEN}\u{2714} Both engines responded{RESET}");
        }
        OutcomeStatus::Fallback { reason } => {
            println!("{YELLOW}\u{26A0} Automatic fallback engaged:{RESET} {}", reason);
        }
    }
}

/// Reveal `text` on `out` one character per `interval`.
///
/// `skip` is polled between characters; once it returns `true` the rest of
/// the text is written at once.
pub fn typewrite<W: Write>(
    out: &mut W,
    text: &str,
    interval: Duration,
    skip: impl Fn() -> bool,
) -> io::Result<()> {
    let mut revealer = StreamingTextRevealer::new(interval);
    revealer.set_source(Some(text), Instant::now());
    let mut written = 0;

    while !revealer.is_complete() {
        if skip() {
            break;
        }
        thread::sleep(interval);
        revealer.tick(Instant::now());

        let shown = revealer.displayed();
        out.write_all(shown[written..].as_bytes())?;
        out.flush()?;
        written = shown.len();
    }

    out.write_all(text[written..].as_bytes())?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{find_scenario, SCENARIOS};
    use std::cell::Cell;

    #[test]
    fn test_typewrite_writes_full_text() {
        let mut out = Vec::new();
        typewrite(&mut out, "héllo wörld", Duration::from_millis(1), || false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "héllo wörld\n");
    }

    #[test]
    fn test_typewrite_skip_flushes_rest() {
        let mut out = Vec::new();
        let polls = Cell::new(0);
        let text = "a".repeat(500);
        typewrite(&mut out, &text, Duration::from_millis(50), || {
            polls.set(polls.get() + 1);
            polls.get() > 2
        })
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", text));
        assert_eq!(polls.get(), 3);
    }

    #[test]
    fn test_typewrite_empty_text() {
        let mut out = Vec::new();
        typewrite(&mut out, "", Duration::from_millis(1), || false).unwrap();
        assert_eq!(out, b"\n");
    }

    #[test]
    fn test_print_helpers_smoke() {
        print_scenarios(SCENARIOS, "drying-time");
        let request = RunRequest::resolve("", find_scenario("word-count").unwrap());
        print_run_header(&request);
        for mode in PaneMode::ALL {
            print_trace(mode);
        }
    }
}
