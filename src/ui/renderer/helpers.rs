//! Shared rendering helpers: scrollbar, keybind badges.

use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::ui::theme::Theme;

/// Render a vertical scrollbar inside a bordered area (1px vertical margin).
pub fn render_scrollbar_bordered(frame: &mut Frame, area: Rect, total: usize, position: usize) {
    let visible_height = area.height.saturating_sub(2) as usize;
    if visible_height == 0 || total <= visible_height {
        return;
    }
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"));
    let mut scrollbar_state = ScrollbarState::new(total).position(position);
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

/// Inverted key label, e.g. ` Enter `.
pub fn badge<'a>(key: &str, color: Color, t: &Theme) -> Span<'a> {
    Span::styled(
        format!(" {} ", key),
        Style::default()
            .fg(t.bg_dark)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

/// Dimmed label text following a badge.
pub fn dim<'a>(text: &str, t: &Theme) -> Span<'a> {
    Span::styled(text.to_string(), Style::default().fg(t.text_dim))
}
