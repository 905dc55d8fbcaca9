//! Layout and widgets for the split-screen demo.
//!
//! # Layout Structure
//!
//! ```text
//! ┌─────────────────────────── Header ───────────────────────────┐
//! │ thinkmode │ The Split-Screen Test │ Scenario │ Ready │ Audio │
//! ├──────── Choose a trap ───────┬──────── Or enter your own ─────┤
//! │ ▶ [1] The Drying Time Trap   │ If it takes 10 minutes ...     │
//! │   [2] ...                    │                  Using Preset  │
//! ├──────── Impulse Engine ──────┼──────── Reasoning Engine ──────┤
//! │ ▾ Execution Trace            │ ▾ Execution Trace              │
//! │  1  // Ingesting prompt...   │  1  // Analyzing intent...     │
//! │ ▸ OUTPUT STREAM              │  ...                           │
//! │ 50 minutes█                  │                                │
//! ├──────── explanation ─────────┼──────── explanation ───────────┤
//! │ key hints                                                      │
//! ├─────────────────────────── System Log ───────────────────────┤
//! │ [12:00:01.250] System interface ready.                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pane content is wrapped here rather than by `Paragraph` so the row count
//! is known before drawing; it feeds the pane's scroll follower.

use super::app::{DemoApp, InputMode};
use crate::pane::PaneLine;
use crate::scenario::SCENARIOS;
use crate::system_log::{LogEntry, LogLevel};
use crate::trace::PaneMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LOG_COLLAPSED_HEIGHT: u16 = 3;
const LOG_EXPANDED_HEIGHT: u16 = 12;

const CURSOR: &str = "█";

/// Render the whole demo. Takes the app mutably because drawing measures the
/// panes and updates their scroll state.
pub fn render(frame: &mut Frame, app: &mut DemoApp) {
    let log_height = if app.is_log_expanded() {
        LOG_EXPANDED_HEIGHT
    } else {
        LOG_COLLAPSED_HEIGHT
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),          // Header
            Constraint::Length(6),          // Controls
            Constraint::Min(8),             // Panes
            Constraint::Length(1),          // Key hints
            Constraint::Length(log_height), // System log
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_controls(frame, app, chunks[1]);
    render_panes(frame, app, chunks[2]);
    render_hints(frame, app, chunks[3]);
    render_log(frame, app, chunks[4]);
}

fn separator() -> Span<'static> {
    Span::styled(" │ ", Style::default().fg(Color::DarkGray))
}

fn render_header(frame: &mut Frame, app: &DemoApp, area: Rect) {
    let (status, status_color) = if app.is_loading() {
        ("Processing...", Color::Yellow)
    } else {
        ("Ready", Color::Green)
    };

    let subject = if app.is_custom() {
        "Custom Query".to_string()
    } else {
        app.scenario().title.to_string()
    };

    let line = Line::from(vec![
        Span::styled(
            "thinkmode",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::styled("The Split-Screen Test", Style::default().fg(Color::White)),
        separator(),
        Span::styled(subject, Style::default().fg(Color::Magenta)),
        separator(),
        Span::styled(
            status,
            Style::default()
                .fg(status_color)
                .add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::styled("Audio ", Style::default().fg(Color::Gray)),
        Span::styled(
            if app.is_muted() { "OFF" } else { "ON" },
            Style::default().fg(Color::White),
        ),
        separator(),
        Span::styled("Key ", Style::default().fg(Color::Gray)),
        if app.has_api_key() {
            Span::styled("loaded", Style::default().fg(Color::Green))
        } else {
            Span::styled("missing", Style::default().fg(Color::Red))
        },
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, area);
}

fn render_controls(frame: &mut Frame, app: &DemoApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let active_id = app.scenario().id;
    let lines: Vec<Line> = SCENARIOS
        .iter()
        .enumerate()
        .map(|(i, scenario)| {
            let selected = scenario.id == active_id && !app.is_custom();
            let style = if selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(if selected { "▶ " } else { "  " }, style),
                Span::styled(format!("[{}] {}", i + 1, scenario.title), style),
                Span::styled(
                    format!(" ({})", scenario.difficulty),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let scenarios = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Choose a trap "),
    );
    frame.render_widget(scenarios, chunks[0]);

    render_input_box(frame, app, chunks[1]);
}

fn render_input_box(frame: &mut Frame, app: &DemoApp, area: Rect) {
    let editing_style = Style::default().fg(Color::Yellow);

    let (title, body, border_style) = match app.input_mode() {
        InputMode::EditingKey => (
            " Session API key ",
            Line::from(vec![
                Span::raw("*".repeat(app.key_input_len())),
                Span::styled(CURSOR, editing_style),
            ]),
            editing_style,
        ),
        mode => {
            let editing = mode == InputMode::EditingQuery;
            let mut spans = if app.custom_query().is_empty() {
                vec![Span::styled(
                    app.scenario().question,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )]
            } else {
                vec![Span::styled(
                    app.custom_query(),
                    Style::default().fg(Color::White),
                )]
            };
            if editing {
                spans.push(Span::styled(CURSOR, editing_style));
            }
            let border = if editing {
                editing_style
            } else {
                Style::default().fg(Color::DarkGray)
            };
            (" Or enter your own ", Line::from(spans), border)
        }
    };

    let tag = if app.is_custom() {
        "Custom Query"
    } else {
        "Using Preset"
    };

    let input = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
            .title_bottom(
                Line::from(Span::styled(
                    format!(" {} ", tag),
                    Style::default().fg(Color::DarkGray),
                ))
                .right_aligned(),
            ),
    );
    frame.render_widget(input, area);
}

fn pane_color(mode: PaneMode) -> Color {
    match mode {
        PaneMode::Fast => Color::Red,
        PaneMode::Reasoning => Color::Blue,
    }
}

fn explanation(mode: PaneMode) -> (&'static str, &'static str) {
    match mode {
        PaneMode::Fast => (
            "→ The \"Black Box\" Danger",
            "Without scratchpad space, the model guesses the next token immediately. This statistical guessing fails at logic, leading to confident hallucinations.",
        ),
        PaneMode::Reasoning => (
            "→ The Chain of Thought",
            "By explicitly writing down intermediate steps, the model catches its own errors. It moves from \"Fast Thinking\" (System 1) to \"Slow Thinking\" (System 2).",
        ),
    }
}

fn render_panes(frame: &mut Frame, app: &mut DemoApp, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (mode, column) in PaneMode::ALL.into_iter().zip(columns.iter()) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(4)])
            .split(*column);
        render_pane(frame, app, mode, rows[0]);
        render_explanation(frame, mode, rows[1]);
    }
}

fn render_pane(frame: &mut Frame, app: &mut DemoApp, mode: PaneMode, area: Rect) {
    let color = pane_color(mode);
    let focused = app.focus() == mode;
    let loading = app.pane(mode).is_loading();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        })
        .border_style(Style::default().fg(color))
        .title(Line::from(vec![
            Span::styled(
                format!(" {} ", mode.title()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} ", mode.tagline()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    if loading {
        block = block.title(
            Line::from(Span::styled(
                " ● THINKING ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::SLOW_BLINK),
            ))
            .right_aligned(),
        );
    }

    let inner = block.inner(area);
    let width = usize::from(inner.width.max(1));
    let rows = pane_rows(app, mode, width);

    let pane = app.pane_mut(mode);
    let follower = pane.follower_mut();
    follower.set_viewport(u32::from(inner.height));
    follower.on_content_change(u32::try_from(rows.len()).unwrap_or(u32::MAX));
    let scroll_top = u16::try_from(follower.scroll_top()).unwrap_or(u16::MAX);
    let following = follower.is_following();

    if !following {
        block = block.title_bottom(
            Line::from(Span::styled(
                " End: follow output ",
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );
    }

    let paragraph = Paragraph::new(rows)
        .block(block)
        .scroll((scroll_top, 0));
    frame.render_widget(paragraph, area);
}

/// Wrapped, styled rows for one pane.
fn pane_rows(app: &DemoApp, mode: PaneMode, width: usize) -> Vec<Line<'static>> {
    let pane = app.pane(mode);
    let color = pane_color(mode);
    let dim = Style::default().fg(Color::DarkGray);
    let trace_style = Style::default().fg(Color::Gray);

    let content = pane.content_lines();
    if content.is_empty() {
        let hint = if pane.is_loading() {
            "Waiting for the engine..."
        } else {
            "Press Enter to run the experiment."
        };
        return vec![Line::from(Span::styled(hint, dim))];
    }

    let mut rows = Vec::new();
    for line in content {
        match line {
            PaneLine::TraceHeader => rows.push(Line::from(Span::styled(
                "▾ Execution Trace",
                dim.add_modifier(Modifier::BOLD),
            ))),
            PaneLine::Trace { number, text } => {
                let prefix = format!("{:>3}  ", number);
                let indent = " ".repeat(prefix.width());
                let body_width = width.saturating_sub(prefix.width()).max(1);
                for (i, row) in wrap_text(text, body_width).into_iter().enumerate() {
                    let lead = if i == 0 { prefix.clone() } else { indent.clone() };
                    rows.push(Line::from(vec![
                        Span::styled(lead, dim),
                        Span::styled(row, trace_style),
                    ]));
                }
            }
            PaneLine::Pulse => rows.push(Line::from(Span::styled(
                "     ...",
                dim.add_modifier(Modifier::SLOW_BLINK),
            ))),
            PaneLine::Blank => rows.push(Line::default()),
            PaneLine::OutputHeader => rows.push(Line::from(Span::styled(
                "▸ OUTPUT STREAM",
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))),
            PaneLine::Output(text) => {
                let mut wrapped: Vec<Line<'static>> = wrap_text(text, width)
                    .into_iter()
                    .map(|row| Line::from(Span::styled(row, Style::default().fg(Color::White))))
                    .collect();
                if let Some(last) = wrapped.last_mut() {
                    last.push_span(Span::styled(
                        CURSOR,
                        Style::default().fg(color).add_modifier(Modifier::SLOW_BLINK),
                    ));
                }
                rows.extend(wrapped);
            }
        }
    }
    rows
}

fn render_explanation(frame: &mut Frame, mode: PaneMode, area: Rect) {
    let (headline, body) = explanation(mode);
    let text = vec![
        Line::from(Span::styled(
            headline,
            Style::default()
                .fg(pane_color(mode))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(body, Style::default().fg(Color::Gray))),
    ];
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_hints(frame: &mut Frame, app: &DemoApp, area: Rect) {
    let hints = match app.input_mode() {
        InputMode::EditingQuery => " Type your question | Enter: run | Esc: done ",
        InputMode::EditingKey => " Type API key | Enter: save for session | Esc: cancel ",
        InputMode::Normal => {
            " 1-3/Tab: scenario | i: own query | Enter/r: run | x: reset | ←→: focus | ↑↓ PgUp PgDn End: scroll | k: key | m: mute | l: log | q: quit "
        }
    };
    let footer = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Info => Style::default().fg(Color::Gray),
        LogLevel::Success => Style::default().fg(Color::Green),
        LogLevel::Warning => Style::default().fg(Color::Yellow),
        LogLevel::Error => Style::default().fg(Color::Red),
    }
}

fn log_line(entry: &LogEntry) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("[{}] ", entry.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(entry.message.clone(), level_style(entry.level)),
    ])
}

fn render_log(frame: &mut Frame, app: &DemoApp, area: Rect) {
    let log = app.log();
    let title = format!(" System Log ({}) ", log.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);

    let lines: Vec<Line> = if app.is_log_expanded() {
        let visible = usize::from(block.inner(area).height);
        let skip = log.len().saturating_sub(visible);
        log.entries().skip(skip).map(log_line).collect()
    } else {
        match log.latest() {
            Some(entry) => vec![log_line(entry)],
            None => vec![Line::from(Span::styled(
                "Initializing core systems...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))],
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Greedy word wrap to `width` display columns. Newlines are kept as row
/// breaks and words wider than a row are split. Wide characters (CJK, emoji)
/// count as two columns.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for source_line in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;

        for (i, word) in source_line.split(' ').enumerate() {
            let word_width = word.width();
            if i > 0 {
                if row_width > 0 && row_width + 1 + word_width > width {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                } else if row_width < width {
                    row.push(' ');
                    row_width += 1;
                }
            }
            for c in word.chars() {
                let char_width = c.width().unwrap_or(0);
                if row_width > 0 && row_width + char_width > width {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                row.push(c);
                row_width += char_width;
            }
        }
        rows.push(row);
    }
    rows
}
