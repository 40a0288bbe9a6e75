//! Machine state pane: register, mode and control flags

use crate::interpreter::constants::{REGISTER_MAX, REGISTER_MIN};
use crate::interpreter::ops::output::map_register;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// How the register value would print with `o`
fn register_glyph(value: i32) -> String {
    match map_register(value) {
        Some('\n') => "'\\n'".to_string(),
        Some(ch) => format!("'{}'", ch),
        None => "(unprintable)".to_string(),
    }
}

/// Fixed-width gauge of the register within its bounds
///
/// A failed `a`/`s`/`m` leaves an out-of-range value behind; it is drawn as an
/// empty or full gauge.
fn register_gauge(value: i32, width: usize) -> String {
    let value = value.clamp(REGISTER_MIN, REGISTER_MAX);
    let span = (REGISTER_MAX - REGISTER_MIN) as usize;
    let filled = ((value - REGISTER_MIN) as usize * width) / span;
    let mut gauge = String::with_capacity(width + 2);
    gauge.push('[');
    for i in 0..width {
        gauge.push(if i < filled { '█' } else { '·' });
    }
    gauge.push(']');
    gauge
}

fn row<'a>(label: &'a str, value: String, value_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{:<10}", label),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, value_style),
    ])
}

/// Render the machine state pane
pub fn render_machine_pane(frame: &mut Frame, area: Rect, snapshot: &Snapshot, is_focused: bool) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Machine ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let value_style = Style::default().fg(DEFAULT_THEME.fg);
    let gauge_width = area.width.saturating_sub(16).clamp(4, 32) as usize;

    let recording = match snapshot.recording {
        Some(slot) => format!("slot {}", slot),
        None => "-".to_string(),
    };
    let location = match snapshot.location {
        Some(location) => location.to_string(),
        None => "-".to_string(),
    };

    let lines = vec![
        row(
            "register",
            format!("{:>4}  {}", snapshot.register, register_glyph(snapshot.register)),
            Style::default()
                .fg(DEFAULT_THEME.number)
                .add_modifier(Modifier::BOLD),
        ),
        row(
            "",
            register_gauge(snapshot.register, gauge_width),
            Style::default().fg(DEFAULT_THEME.primary),
        ),
        row(
            "mode",
            snapshot.mode.to_string(),
            Style::default().fg(DEFAULT_THEME.mode),
        ),
        row(
            "recording",
            recording,
            Style::default().fg(DEFAULT_THEME.function),
        ),
        row(
            "halted",
            if snapshot.halted { "yes" } else { "no" }.to_string(),
            if snapshot.halted {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                value_style
            },
        ),
        row("step", snapshot.step.to_string(), value_style),
        row("at", location, value_style),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
