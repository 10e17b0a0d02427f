//! Application struct and event loop.
//!
//! Owns the terminal, the interpreter, and the channels that bring command
//! results and alert notifications back from background tasks.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::alerts::{AlertMonitor, MonitorEvent};
use crate::commands::{CommandContext, CommandOutput, CommandRegistry};
use crate::config::Config;
use crate::constants::*;
use crate::interpreter::{self, Interpreter};
use crate::notifications::{self, Notifier};
use crate::store::LogStore;
use crate::ui::theme::BUILTIN_THEME_NAMES;
use crate::ui::{self, AppState, Theme};
use crate::weather::{NwsClient, WeatherService};

const WELCOME: &str = "Weather Terminal. Type 'help' for available commands.";

/// A finished command on its way back to the UI loop.
struct CommandEvent {
    raw: String,
    output: CommandOutput,
}

/// Wire up the weather client, log store and alert monitor from config.
pub fn build_context(
    config: &Config,
) -> Result<(CommandContext, mpsc::UnboundedReceiver<MonitorEvent>)> {
    let weather: Arc<dyn WeatherService> =
        Arc::new(NwsClient::new(config).context("Failed to create weather client")?);

    let store = LogStore::open(Some(&config.log_db_path))
        .with_context(|| format!("Failed to open log store {}", config.log_db_path.display()))?;

    let (monitor_tx, monitor_rx) = mpsc::unbounded_channel();
    let monitor = AlertMonitor::new(
        Arc::clone(&weather),
        Duration::from_secs(config.alert_poll_secs),
        monitor_tx,
    );

    let ctx = CommandContext {
        weather,
        store: store.shared(),
        monitor: Arc::new(monitor),
    };
    Ok((ctx, monitor_rx))
}

/// Main application struct.
pub struct App {
    state: AppState,
    interpreter: Interpreter,
    ctx: CommandContext,
    notifier: Notifier,

    // Channels
    command_tx: mpsc::UnboundedSender<CommandEvent>,
    command_rx: mpsc::UnboundedReceiver<CommandEvent>,
    monitor_rx: mpsc::UnboundedReceiver<MonitorEvent>,

    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let (ctx, monitor_rx) = build_context(config)?;

        let theme = Theme::by_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(
                theme = %config.theme,
                available = ?BUILTIN_THEME_NAMES,
                "unknown theme, using default"
            );
            Theme::default()
        });
        let state = AppState::new(theme, Duration::from_millis(config.reveal_delay_ms));

        Ok(Self::from_parts(
            state,
            ctx,
            monitor_rx,
            Notifier::new(config.bell),
        ))
    }

    fn from_parts(
        mut state: AppState,
        ctx: CommandContext,
        monitor_rx: mpsc::UnboundedReceiver<MonitorEvent>,
        notifier: Notifier,
    ) -> Self {
        state.push_notice(WELCOME);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        Self {
            state,
            interpreter: Interpreter::new(CommandRegistry::with_builtins()),
            ctx,
            notifier,
            command_tx,
            command_rx,
            monitor_rx,
            should_quit: false,
        }
    }

    /// Run the main event loop. Returns when the user quits.
    pub async fn run(&mut self) -> Result<()> {
        // Terminal init
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        tracing::info!(bell = self.notifier.bell_enabled(), "console started");
        let result = self.event_loop(&mut terminal);

        // Cleanup
        self.ctx.monitor.stop();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        tracing::info!("console stopped");

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.drain_command_events();
            self.drain_monitor_events();

            self.state.tick_count = self.state.tick_count.wrapping_add(1);
            self.state.tick_reveal(Instant::now());
            self.state.monitor_zone = self.ctx.monitor.active_zone();

            terminal.draw(|frame| ui::render(frame, &self.state))?;

            if self.should_quit {
                return Ok(());
            }

            if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
            }
        }
    }

    // ── Channel draining ─────────────────────────────────────────

    fn drain_command_events(&mut self) {
        while let Ok(event) = self.command_rx.try_recv() {
            self.handle_command_event(event);
        }
    }

    /// Render a finished command and log it. The log timestamp is the
    /// moment the result reaches the screen.
    fn handle_command_event(&mut self, event: CommandEvent) {
        self.state.pending = self.state.pending.saturating_sub(1);

        match &event.output {
            CommandOutput::Text(text) if !text.is_empty() => self.state.push_result(text),
            CommandOutput::Text(_) => {}
            CommandOutput::Notice(text) => self.state.push_notice(text),
            CommandOutput::ClearScreen => self.state.clear_output(),
            CommandOutput::Exit => self.should_quit = true,
        }

        let logged = interpreter::record_result(&self.ctx.store, &event.raw, &event.output, Local::now());
        if !logged && event.output.loggable().is_some() {
            self.state.set_status("Could not write log entry");
        }
    }

    fn drain_monitor_events(&mut self) {
        while let Ok(event) = self.monitor_rx.try_recv() {
            self.handle_monitor_event(event);
        }
    }

    fn handle_monitor_event(&mut self, event: MonitorEvent) {
        if !self.ctx.monitor.is_current(event.generation) {
            tracing::debug!(zone = %event.zone, id = %event.alert.id, "dropping stale alert");
            return;
        }
        self.state
            .push_alert(&notifications::alert_callout(&event.alert));
        self.notifier.ring();
    }

    // ── Command dispatch ─────────────────────────────────────────

    /// Submit the prompt line. The command runs on its own task and its
    /// output comes back through `command_rx`.
    fn submit_line(&mut self) {
        let line = self.state.take_input();
        let Some(submission) = self.interpreter.submit(&line) else {
            return;
        };

        self.state.push_command(&submission.raw);
        self.state.pending += 1;

        let tx = self.command_tx.clone();
        let ctx = self.ctx.clone();
        tokio::spawn(async move {
            let raw = submission.raw.clone();
            let output = submission.run(ctx).await;
            let _ = tx.send(CommandEvent { raw, output });
        });
    }

    // ── Key handling ─────────────────────────────────────────────

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Enter => self.submit_line(),
            KeyCode::Up => {
                if let Some(line) = self.interpreter.history_mut().prev() {
                    let line = line.to_string();
                    self.state.set_input(&line);
                }
            }
            KeyCode::Down => {
                let line = self.interpreter.history_mut().next().to_string();
                self.state.set_input(&line);
            }
            KeyCode::Left => self.state.cursor_left(),
            KeyCode::Right => self.state.cursor_right(),
            KeyCode::Home => self.state.cursor_home(),
            KeyCode::End => self.state.cursor_end(),
            KeyCode::Backspace => self.state.input_backspace(),
            KeyCode::Delete => self.state.input_delete(),
            KeyCode::PageUp => self.state.scroll_up(PAGE_SIZE),
            KeyCode::PageDown => self.state.scroll_down(PAGE_SIZE),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.input_char(c);
            }
            _ => {}
        }
        false
    }
}
