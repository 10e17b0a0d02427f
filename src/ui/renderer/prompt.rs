//! The `C:\>` input line with a block cursor.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::constants::PROMPT;
use crate::ui::state::AppState;

pub fn render_prompt(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;
    let text_style = Style::default().fg(t.text_primary);

    let before_cursor = &state.input[..state.cursor_pos];
    let after_cursor = &state.input[state.cursor_pos..];
    let cursor_len = after_cursor
        .chars()
        .next()
        .map(char::len_utf8)
        .unwrap_or(0);
    let under_cursor = if cursor_len == 0 {
        " "
    } else {
        &after_cursor[..cursor_len]
    };

    let line = Line::from(vec![
        Span::styled(PROMPT, t.prompt_style()),
        Span::styled(before_cursor.to_string(), text_style),
        Span::styled(
            under_cursor.to_string(),
            Style::default().fg(t.bg_dark).bg(t.accent),
        ),
        Span::styled(after_cursor[cursor_len..].to_string(), text_style),
    ]);

    // Keep the cursor in view on long input
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_x = PROMPT.chars().count() + state.cursor_column();
    let offset = (cursor_x + 1).saturating_sub(inner_width) as u16;

    let prompt = Paragraph::new(line).scroll((0, offset)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(prompt, area);
}
