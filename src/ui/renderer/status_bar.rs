//! Status bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::ui::state::AppState;
use crate::utils::{loading_dots, spinner_char};

use super::helpers::{badge, dim};

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let t = &state.theme;

    let mut spans = vec![
        Span::styled(" ", Style::default()),
        badge("Enter", t.accent, t),
        dim(" Run ", t),
        badge("↑↓", t.accent, t),
        dim(" History ", t),
        badge("PgUp/PgDn", t.accent, t),
        dim(" Scroll ", t),
        badge("Esc", t.accent, t),
        dim(" Quit ", t),
    ];

    if let Some(zone) = &state.monitor_zone {
        spans.push(Span::styled(
            format!("  Monitoring {} ", zone),
            Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
        ));
    }

    if state.pending > 0 {
        spans.push(Span::styled(
            format!(
                "  {} {} running{} ",
                spinner_char(state.tick_count),
                state.pending,
                loading_dots(state.tick_count / 4)
            ),
            Style::default().fg(t.success),
        ));
    }

    // Auto-expiring message (e.g. log write failure)
    if let Some((msg, when)) = &state.status_message {
        if when.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS {
            spans.push(Span::styled(
                format!("  {} ", msg),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
