use ratatui::style::{Color, Modifier, Style};

use super::state::BlockKind;

/// All available built-in theme names.
pub const BUILTIN_THEME_NAMES: &[&str] = &["default", "amber", "mono"];

/// Every color the console uses, in one struct.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Chrome ───────────────────────────────────────────────
    pub accent: Color,
    pub bg_dark: Color,
    pub border: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,

    // ── Output blocks ────────────────────────────────────────
    pub prompt: Color,
    pub command: Color,
    pub result: Color,
    pub error: Color,
    pub notice: Color,
    pub alert: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub warning: Color,
    pub success: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Default dark theme: blue chrome, green results.
    pub fn default_dark() -> Self {
        Self {
            accent: Color::Rgb(99, 179, 237),
            bg_dark: Color::Rgb(22, 22, 30),
            border: Color::Rgb(55, 55, 75),
            text_primary: Color::Rgb(220, 220, 235),
            text_dim: Color::Rgb(120, 120, 145),
            prompt: Color::Rgb(72, 199, 142),
            command: Color::Rgb(129, 230, 217),
            result: Color::Rgb(0, 255, 0),
            error: Color::Rgb(255, 85, 85),
            notice: Color::Rgb(120, 120, 145),
            alert: Color::Rgb(255, 136, 0),
            warning: Color::Rgb(255, 193, 69),
            success: Color::Rgb(72, 199, 142),
        }
    }

    /// Amber phosphor palette.
    pub fn amber() -> Self {
        Self {
            accent: Color::Rgb(255, 176, 0),
            bg_dark: Color::Rgb(28, 20, 8),
            border: Color::Rgb(120, 80, 10),
            text_primary: Color::Rgb(255, 191, 64),
            text_dim: Color::Rgb(180, 120, 20),
            prompt: Color::Rgb(255, 204, 0),
            command: Color::Rgb(255, 214, 102),
            result: Color::Rgb(255, 176, 0),
            error: Color::Rgb(255, 96, 48),
            notice: Color::Rgb(180, 120, 20),
            alert: Color::Rgb(255, 240, 200),
            warning: Color::Rgb(255, 240, 200),
            success: Color::Rgb(255, 204, 0),
        }
    }

    /// Terminal default colors only, for limited or light terminals.
    pub fn mono() -> Self {
        Self {
            accent: Color::White,
            bg_dark: Color::Black,
            border: Color::Gray,
            text_primary: Color::Reset,
            text_dim: Color::Gray,
            prompt: Color::Reset,
            command: Color::Reset,
            result: Color::Reset,
            error: Color::Reset,
            notice: Color::Gray,
            alert: Color::Reset,
            warning: Color::Reset,
            success: Color::Reset,
        }
    }

    /// Look up a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "amber" => Some(Self::amber()),
            "mono" => Some(Self::mono()),
            _ => None,
        }
    }

    // ── Style helpers ────────────────────────────────────────

    pub fn block_style(&self, kind: BlockKind) -> Style {
        match kind {
            BlockKind::Command => Style::default()
                .fg(self.command)
                .add_modifier(Modifier::BOLD),
            BlockKind::Result => Style::default().fg(self.result),
            BlockKind::Error => Style::default().fg(self.error),
            BlockKind::Notice => Style::default()
                .fg(self.notice)
                .add_modifier(Modifier::ITALIC),
            BlockKind::AlertCallout => Style::default()
                .fg(self.alert)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        }
    }

    pub fn prompt_style(&self) -> Style {
        Style::default()
            .fg(self.prompt)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}
