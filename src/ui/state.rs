use std::time::{Duration, Instant};

use crate::constants::PROMPT;

use super::theme::Theme;

/// How a block of output is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Echo of a submitted line.
    Command,
    Result,
    /// A result starting with `Error:`.
    Error,
    /// Shown but not logged, e.g. `clear log` confirmation.
    Notice,
    /// New-alert notification from the monitor.
    AlertCallout,
}

/// One entry of the output pane. Lines appear one at a time.
#[derive(Debug, Clone)]
pub struct OutputBlock {
    pub kind: BlockKind,
    pub lines: Vec<String>,
    pub revealed: usize,
}

impl OutputBlock {
    fn new(kind: BlockKind, text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        // Echoes are shown at once; everything else reveals line by line.
        let revealed = if kind == BlockKind::Command { lines.len() } else { 0 };
        Self {
            kind,
            lines,
            revealed,
        }
    }

    pub fn visible_lines(&self) -> &[String] {
        &self.lines[..self.revealed]
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed >= self.lines.len()
    }
}

/// Everything the renderer draws.
pub struct AppState {
    pub theme: Theme,
    pub blocks: Vec<OutputBlock>,

    // ── Prompt ──────────────────────────────────────────────────
    pub input: String,
    /// Byte offset into `input`, always on a char boundary.
    pub cursor_pos: usize,

    /// Lines scrolled up from the bottom of the output.
    pub scroll: usize,

    // ── Status bar ──────────────────────────────────────────────
    pub pending: usize,
    pub monitor_zone: Option<String>,
    pub tick_count: u64,
    pub status_message: Option<(String, Instant)>,

    reveal_delay: Duration,
    last_reveal: Option<Instant>,
}

impl AppState {
    pub fn new(theme: Theme, reveal_delay: Duration) -> Self {
        Self {
            theme,
            blocks: Vec::new(),
            input: String::new(),
            cursor_pos: 0,
            scroll: 0,
            pending: 0,
            monitor_zone: None,
            tick_count: 0,
            status_message: None,
            reveal_delay,
            last_reveal: None,
        }
    }

    // ── Output ──────────────────────────────────────────────────

    fn push_block(&mut self, kind: BlockKind, text: &str) {
        self.blocks.push(OutputBlock::new(kind, text));
        self.scroll = 0;
    }

    pub fn push_command(&mut self, line: &str) {
        self.push_block(BlockKind::Command, &format!("{}{}", PROMPT, line));
    }

    /// A command result; text starting with `Error:` is styled as an error.
    pub fn push_result(&mut self, text: &str) {
        let kind = if text.starts_with("Error:") {
            BlockKind::Error
        } else {
            BlockKind::Result
        };
        self.push_block(kind, text);
    }

    pub fn push_notice(&mut self, text: &str) {
        self.push_block(BlockKind::Notice, text);
    }

    pub fn push_alert(&mut self, text: &str) {
        self.push_block(BlockKind::AlertCallout, text);
    }

    pub fn clear_output(&mut self) {
        self.blocks.clear();
        self.scroll = 0;
        self.last_reveal = None;
    }

    /// Reveal whatever lines are due at `now`. The first pending line shows
    /// immediately, then one per reveal delay. Blocks reveal in order.
    pub fn tick_reveal(&mut self, now: Instant) {
        if self.reveal_delay.is_zero() {
            self.reveal_all();
            return;
        }
        if !self.is_revealing() {
            self.last_reveal = None;
            return;
        }

        let due = match self.last_reveal {
            None => 1,
            Some(last) => {
                let elapsed = now.saturating_duration_since(last).as_millis();
                (elapsed / self.reveal_delay.as_millis()) as usize
            }
        };
        if due == 0 {
            return;
        }

        let mut remaining = due;
        for block in self.blocks.iter_mut().filter(|b| !b.is_revealed()) {
            let step = remaining.min(block.lines.len() - block.revealed);
            block.revealed += step;
            remaining -= step;
            if remaining == 0 {
                break;
            }
        }
        self.last_reveal = Some(now);
    }

    pub fn reveal_all(&mut self) {
        for block in &mut self.blocks {
            block.revealed = block.lines.len();
        }
        self.last_reveal = None;
    }

    pub fn is_revealing(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_revealed())
    }

    /// Visible output wrapped to `width`, with a blank line after every
    /// non-echo block.
    pub fn wrapped_lines(&self, width: usize) -> Vec<(BlockKind, String)> {
        let width = width.max(1);
        let mut out = Vec::new();
        for block in &self.blocks {
            for line in block.visible_lines() {
                if line.is_empty() {
                    out.push((block.kind, String::new()));
                    continue;
                }
                for piece in textwrap::wrap(line, width) {
                    out.push((block.kind, piece.into_owned()));
                }
            }
            if block.kind != BlockKind::Command && block.revealed > 0 {
                out.push((block.kind, String::new()));
            }
        }
        out
    }

    // ── Scrolling ───────────────────────────────────────────────

    pub fn scroll_up(&mut self, lines: usize) {
        let limit: usize = self.blocks.iter().map(|b| b.revealed + 1).sum();
        self.scroll = (self.scroll + lines).min(limit);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    // ── Input line ──────────────────────────────────────────────

    pub fn input_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn input_backspace(&mut self) {
        if self.cursor_pos > 0 {
            let prev = self.prev_boundary();
            self.input.remove(prev);
            self.cursor_pos = prev;
        }
    }

    pub fn input_delete(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.input.remove(self.cursor_pos);
        }
    }

    fn prev_boundary(&self) -> usize {
        self.input[..self.cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    pub fn cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.prev_boundary();
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_pos < self.input.len() {
            self.cursor_pos = self.input[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.input.len());
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_pos = self.input.len();
    }

    /// Replace the input line (history recall), cursor at the end.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor_pos = self.input.len();
    }

    /// Take the input line for submission, leaving the prompt empty.
    pub fn take_input(&mut self) -> String {
        self.cursor_pos = 0;
        std::mem::take(&mut self.input)
    }

    /// Column of the cursor within the input text.
    pub fn cursor_column(&self) -> usize {
        self.input[..self.cursor_pos].chars().count()
    }

    // ── Status ──────────────────────────────────────────────────

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }
}
