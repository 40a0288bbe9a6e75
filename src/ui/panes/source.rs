//! Source code pane rendering with syntax highlighting
//!
//! Shows the program text with line numbers. The line of the last processed
//! position gets a lighter background and the two characters of that token
//! are drawn reversed. A line that raised a fatal error is drawn in red.

use crate::parser::{Opcode, SourceLocation};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Style for one source character
fn char_style(c: char) -> Style {
    if c.is_ascii_digit() {
        return Style::default().fg(DEFAULT_THEME.number);
    }
    match Opcode::from_letter(c) {
        Some(Opcode::Add)
        | Some(Opcode::Subtract)
        | Some(Opcode::Multiply)
        | Some(Opcode::Divide)
        | Some(Opcode::Modulo) => Style::default()
            .fg(DEFAULT_THEME.arithmetic)
            .add_modifier(Modifier::BOLD),
        Some(Opcode::Output) => Style::default()
            .fg(DEFAULT_THEME.output)
            .add_modifier(Modifier::BOLD),
        Some(Opcode::Function) => Style::default()
            .fg(DEFAULT_THEME.function)
            .add_modifier(Modifier::BOLD),
        Some(Opcode::Mode) => Style::default()
            .fg(DEFAULT_THEME.mode)
            .add_modifier(Modifier::BOLD),
        Some(Opcode::Halt) => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
        // Not part of any valid instruction
        None => Style::default()
            .fg(DEFAULT_THEME.comment)
            .add_modifier(Modifier::CROSSED_OUT),
    }
}

/// Highlight a naz line, marking the token that starts at `token_column`
fn highlight_line(line: &str, token_column: Option<usize>) -> Vec<Span<'static>> {
    line.chars()
        .enumerate()
        .map(|(idx, c)| {
            let column = idx + 1;
            let mut style = char_style(c);
            if let Some(start) = token_column {
                if column == start || column == start + 1 {
                    style = style.add_modifier(Modifier::REVERSED);
                }
            }
            Span::styled(c.to_string(), style)
        })
        .collect()
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Visual row the current line is pinned to while stepping
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
///
/// `current` is the start of the last processed token, `error_line` the line
/// of a fatal error when the viewer sits on the final step.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current: Option<SourceLocation>,
    error_line: Option<usize>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = error_line.or(current.map(|loc| loc.line)).unwrap_or(0);

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Initialize target row to center if not set, then clamp to the visible area
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);

        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;
            let is_error = is_current && error_line.is_some();
            let line_num_str = format!("{:4} ", line_num);

            let token_column = current
                .filter(|loc| loc.line == line_num)
                .map(|loc| loc.column);
            let mut spans = highlight_line(line, token_column);

            let num_style = if is_error {
                for span in &mut spans {
                    span.style = span
                        .style
                        .bg(DEFAULT_THEME.error)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD);
                }
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                for span in &mut spans {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut final_spans = vec![Span::styled(line_num_str, num_style)];
            final_spans.extend(spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_token_is_reversed() {
        let spans = highlight_line("1a2o", Some(3));
        let reversed: Vec<bool> = spans
            .iter()
            .map(|span| span.style.add_modifier.contains(Modifier::REVERSED))
            .collect();
        assert_eq!(reversed, vec![false, false, true, true]);
    }

    #[test]
    fn test_opcode_groups_are_coloured() {
        assert_eq!(char_style('7').fg, Some(DEFAULT_THEME.number));
        assert_eq!(char_style('m').fg, Some(DEFAULT_THEME.arithmetic));
        assert_eq!(char_style('o').fg, Some(DEFAULT_THEME.output));
        assert_eq!(char_style('f').fg, Some(DEFAULT_THEME.function));
        assert_eq!(char_style('h').fg, Some(DEFAULT_THEME.error));
        assert!(char_style('?')
            .add_modifier
            .contains(Modifier::CROSSED_OUT));
    }
}
