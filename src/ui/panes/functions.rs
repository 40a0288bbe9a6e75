//! Function table pane: the ten slots and their recorded bodies

use crate::memory::functions::FunctionTable;
use crate::parser::Instruction;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn body_text(body: &[Instruction]) -> String {
    body.iter().map(|instruction| instruction.to_string()).collect()
}

/// Render the function table pane
///
/// The slot currently being recorded into is marked with an arrow.
pub fn render_functions_pane(
    frame: &mut Frame,
    area: Rect,
    functions: &FunctionTable,
    recording: Option<u8>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let declared = functions.iter().filter(|(_, body)| !body.is_empty()).count();
    let block = Block::default()
        .title(format!(" Functions ({} declared) ", declared))
        .borders(Borders::ALL)
        .border_style(border_style);

    let items: Vec<ListItem> = functions
        .iter()
        .map(|(slot, body)| {
            let is_recording = recording == Some(slot);
            let marker = if is_recording { "▶ " } else { "  " };
            let slot_style = if is_recording {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.function)
            };
            let body_span = if body.is_empty() {
                Span::styled("(empty)", Style::default().fg(DEFAULT_THEME.comment))
            } else {
                Span::styled(body_text(body), Style::default().fg(DEFAULT_THEME.fg))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{}f ", marker, slot), slot_style),
                body_span,
            ]))
        })
        .collect();

    let total_items = items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Opcode;

    #[test]
    fn test_body_text_joins_instructions() {
        let body = [
            Instruction::new(3, Opcode::Add),
            Instruction::new(1, Opcode::Output),
        ];
        assert_eq!(body_text(&body), "3a1o");
        assert_eq!(body_text(&[]), "");
    }
}
