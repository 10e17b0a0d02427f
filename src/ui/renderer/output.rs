//! Output pane: the console scrollback.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::state::AppState;

use super::helpers::render_scrollbar_bordered;

pub fn render_output(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let title = if state.scroll > 0 {
        format!(" Weather Terminal [+{}] ", state.scroll)
    } else {
        " Weather Terminal ".to_string()
    };
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(t.border_style());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Leave a column for the scrollbar
    let wrap_width = inner.width.saturating_sub(1) as usize;
    let lines = state.wrapped_lines(wrap_width);

    let visible_height = inner.height as usize;
    let total_lines = lines.len();
    let max_start = total_lines.saturating_sub(visible_height);
    let start = max_start.saturating_sub(state.scroll);

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(start)
        .take(visible_height)
        .map(|(kind, text)| Line::from(Span::styled(text, t.block_style(kind))))
        .collect();

    frame.render_widget(Paragraph::new(visible), inner);

    render_scrollbar_bordered(frame, area, total_lines, start);
}
