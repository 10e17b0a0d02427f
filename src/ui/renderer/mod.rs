//! Renderer module: split into focused submodules.
//!
//! - `output`: Scrollback of command echoes, results and alert callouts
//! - `prompt`: The `C:\>` input line
//! - `status_bar`: Bottom status bar with monitor zone, pending work and keybinds
//! - `helpers`: Shared rendering utilities

mod helpers;
mod output;
mod prompt;
mod status_bar;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::state::AppState;

/// Top-level render function.
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Output pane
            Constraint::Length(3), // Prompt
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    output::render_output(frame, chunks[0], state);
    prompt::render_prompt(frame, chunks[1], state);
    status_bar::render_status_bar(frame, chunks[2], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use ratatui::{backend::TestBackend, Terminal};

    use crate::ui::Theme;

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn renders_output_prompt_and_status() {
        let mut state = AppState::new(Theme::default(), Duration::ZERO);
        state.push_command("weather KPNS");
        state.push_result("Weather for KPNS:\nTemperature: 21°C");
        state.reveal_all();
        state.set_input("forecast");
        state.monitor_zone = Some("FLZ204".to_string());

        let screen = draw(&state, 80, 14);
        assert!(screen.contains("C:\\> weather KPNS"));
        assert!(screen.contains("Temperature: 21°C"));
        assert!(screen.contains("forecast"));
        assert!(screen.contains("FLZ204"));
    }

    #[test]
    fn shows_newest_output_when_overflowing() {
        let mut state = AppState::new(Theme::default(), Duration::ZERO);
        for i in 0..40 {
            state.push_result(&format!("line {}", i));
        }
        state.reveal_all();

        let screen = draw(&state, 60, 12);
        assert!(screen.contains("line 39"));
        assert!(!screen.contains("line 0 "));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut state = AppState::new(Theme::default(), Duration::ZERO);
        state.push_result("Error: Zone not found");
        state.reveal_all();
        draw(&state, 5, 3);
    }
}
