//! Line-level command processing: trim, record history, tokenize, resolve,
//! and log results.
//!
//! Execution itself is split off as a [`Submission`] so the caller decides
//! where the handler future runs (the TUI spawns it, `-c` awaits it inline).

mod history;

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::commands::{CommandContext, CommandHandler, CommandOutput, CommandRegistry, Resolution};
use crate::store::{self, LogEntry, SharedLogStore};
use crate::utils;

pub use history::History;

/// Split a line on spaces, dropping empty tokens, so `weather  KPNS` still
/// reaches the station argument.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Verbs whose effect outlives the command and needs the interactive console.
const CONSOLE_ONLY_VERBS: &[&str] = &["alert monitor"];

/// Text shown (and logged) for an unregistered verb.
pub fn not_found_text(verb: &str) -> String {
    format!(
        "Error: Command '{}' not found. Type 'help' for available commands.",
        verb
    )
}

enum Dispatch {
    Handler {
        handler: Arc<dyn CommandHandler>,
        args: Vec<String>,
    },
    NotFound,
}

/// A resolved, not yet executed command line.
pub struct Submission {
    /// Trimmed input, original case.
    pub raw: String,
    /// Lower-cased verb as resolved (or the unknown first token).
    pub verb: String,
    dispatch: Dispatch,
}

impl Submission {
    pub async fn run(self, ctx: CommandContext) -> CommandOutput {
        match self.dispatch {
            Dispatch::Handler { handler, args } => handler.execute(&ctx, &args).await,
            Dispatch::NotFound => CommandOutput::Text(not_found_text(&self.verb)),
        }
    }
}

pub struct Interpreter {
    registry: CommandRegistry,
    history: History,
}

impl Interpreter {
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            history: History::new(),
        }
    }

    #[cfg(test)]
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Accept a line from the prompt. Blank lines are ignored entirely:
    /// no history entry, nothing to run.
    pub fn submit(&mut self, line: &str) -> Option<Submission> {
        let raw = line.trim();
        if raw.is_empty() {
            return None;
        }
        self.history.push(raw);

        let tokens = tokenize(raw);
        let (verb, dispatch) = match self.registry.resolve(&tokens) {
            Resolution::Found { verb, handler, args } => (verb, Dispatch::Handler { handler, args }),
            Resolution::NotFound { verb } => (verb, Dispatch::NotFound),
        };
        tracing::debug!(verb = %verb, "command submitted");

        Some(Submission {
            raw: raw.to_string(),
            verb,
            dispatch,
        })
    }

    /// Submit, run and log a line in one go. Used outside the TUI, where
    /// nothing keeps a background monitor alive, so console-only verbs are
    /// refused.
    pub async fn execute_line(&mut self, ctx: &CommandContext, line: &str) -> Option<CommandOutput> {
        let submission = self.submit(line)?;
        let raw = submission.raw.clone();
        let output = if CONSOLE_ONLY_VERBS.contains(&submission.verb.as_str()) {
            CommandOutput::Text(format!(
                "Error: '{}' needs the interactive console",
                submission.verb
            ))
        } else {
            submission.run(ctx.clone()).await
        };
        record_result(&ctx.store, &raw, &output, Local::now());
        Some(output)
    }
}

/// Append a rendered result to the log under `now`'s date. Only non-empty
/// [`CommandOutput::Text`] is logged. Returns whether an entry was written.
pub fn record_result(
    store: &SharedLogStore,
    raw: &str,
    output: &CommandOutput,
    now: DateTime<Local>,
) -> bool {
    let Some(response) = output.loggable() else {
        return false;
    };
    let entry = LogEntry::new(raw, response, &utils::timestamp(now));
    match store::lock(store).append(&utils::date_key(now), entry) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(command = %raw, error = %e, "failed to write log entry");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::commands::tests::context;
    use crate::weather::fake::FakeWeather;

    fn interpreter() -> Interpreter {
        Interpreter::new(CommandRegistry::with_builtins())
    }

    #[test]
    fn tokenize_drops_repeated_spaces() {
        assert_eq!(tokenize("  weather   KPNS "), vec!["weather", "KPNS"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn blank_line_is_ignored() {
        let mut interp = interpreter();
        assert!(interp.submit("").is_none());
        assert!(interp.submit("    ").is_none());
        assert!(interp.history().is_empty());
    }

    #[test]
    fn history_records_trimmed_original_case() {
        let mut interp = interpreter();
        let sub = interp.submit("  Weather KPNS  ").unwrap();
        assert_eq!(sub.raw, "Weather KPNS");
        assert_eq!(sub.verb, "weather");
        assert_eq!(interp.history().entries(), ["Weather KPNS"]);
        assert_eq!(interp.history_mut().prev(), Some("Weather KPNS"));
    }

    #[tokio::test]
    async fn unknown_verb_is_error_text_and_logged() {
        let (ctx, _rx) = context(FakeWeather::new());
        let mut interp = interpreter();

        let output = interp.execute_line(&ctx, "Foo bar").await.unwrap();
        assert_eq!(
            output,
            CommandOutput::text("Error: Command 'foo' not found. Type 'help' for available commands.")
        );

        let logged = store::lock(&ctx.store).get_for_date(&utils::today());
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].command, "Foo bar");
        assert_eq!(logged[0].response, output.loggable().unwrap());
    }

    #[tokio::test]
    async fn clear_and_clear_log_write_nothing() {
        let (ctx, _rx) = context(FakeWeather::new());
        let mut interp = interpreter();

        interp.execute_line(&ctx, "clear").await;
        interp.execute_line(&ctx, "clear log").await;
        assert!(store::lock(&ctx.store).get_all().is_empty());

        interp.execute_line(&ctx, "help").await;
        interp.execute_line(&ctx, "clear log").await;
        assert!(store::lock(&ctx.store).get_for_date(&utils::today()).is_empty());
    }

    #[tokio::test]
    async fn usage_error_is_logged_with_raw_command() {
        let (ctx, _rx) = context(FakeWeather::new());
        let mut interp = interpreter();

        interp.execute_line(&ctx, "WEATHER").await;
        let logged = store::lock(&ctx.store).get_for_date(&utils::today());
        assert_eq!(logged[0].command, "WEATHER");
        assert_eq!(
            logged[0].response,
            "Error: Please specify a station code (e.g., weather KPNS)"
        );
    }

    #[tokio::test]
    async fn alert_monitor_refused_outside_console() {
        let (ctx, _rx) = context(FakeWeather::new().with_alerts("FLZ204", Ok(vec![])));
        let mut interp = interpreter();

        let output = interp.execute_line(&ctx, "alert monitor FLZ204").await.unwrap();
        assert_eq!(
            output,
            CommandOutput::text("Error: 'alert monitor' needs the interactive console")
        );
        assert_eq!(ctx.monitor.active_zone(), None);

        let logged = store::lock(&ctx.store).get_for_date(&utils::today());
        assert_eq!(logged.len(), 1);
        assert!(!logged[0].response.contains("Monitoring alerts"));
    }

    #[tokio::test]
    async fn repeated_spaces_still_reach_the_argument() {
        let fake = FakeWeather::new()
            .with_observation("KPNS", Ok(crate::weather::Observation::default()));
        let (ctx, _rx) = context(fake);
        let mut interp = interpreter();

        let output = interp.execute_line(&ctx, "weather  KPNS").await.unwrap();
        assert!(output.loggable().unwrap().starts_with("Weather for KPNS:"));
    }

    #[test]
    fn record_uses_render_time_for_date_and_timestamp() {
        let store = crate::store::LogStore::open(None).unwrap().shared();
        let now = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();

        assert!(record_result(&store, "help", &CommandOutput::text("x"), now));
        assert!(!record_result(&store, "clear", &CommandOutput::ClearScreen, now));
        assert!(!record_result(&store, "exit", &CommandOutput::Exit, now));
        assert!(!record_result(&store, "noop", &CommandOutput::text(""), now));

        let logged = store::lock(&store).get_for_date("2024-03-05");
        assert_eq!(logged, vec![LogEntry::new("help", "x", "2024-03-05 14:07:09")]);
    }

    #[test]
    fn record_reports_write_failure() {
        let store = crate::store::LogStore::open(None).unwrap();
        store.drop_table();
        let store = store.shared();

        assert!(!record_result(&store, "help", &CommandOutput::text("x"), Local::now()));
    }
}
