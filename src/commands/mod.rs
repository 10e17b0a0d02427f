//! Command registry: verb strings mapped to async handlers.
//!
//! Verbs are one or two words. When resolving, the two-word key built from
//! the first two tokens wins over the single-word key, so `alert monitor X`
//! never reaches the `alert` handler.

mod builtin;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::alerts::AlertMonitor;
use crate::store::SharedLogStore;
use crate::weather::WeatherService;

/// What a handler hands back to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Shown and, when non-empty, logged.
    Text(String),
    /// Shown but never logged.
    Notice(String),
    /// Wipe the output pane.
    ClearScreen,
    /// Leave the console.
    Exit,
}

impl CommandOutput {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Text to render, if any.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Notice(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Text that belongs in the log store, if any.
    pub fn loggable(&self) -> Option<&str> {
        match self {
            Self::Text(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Everything a handler may touch besides its arguments.
#[derive(Clone)]
pub struct CommandContext {
    pub weather: Arc<dyn WeatherService>,
    pub store: SharedLogStore,
    pub monitor: Arc<AlertMonitor>,
}

/// One verb's behavior. Sync handlers simply never await.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> CommandOutput;
}

/// Result of looking up a token list.
pub enum Resolution {
    Found {
        verb: String,
        handler: Arc<dyn CommandHandler>,
        args: Vec<String>,
    },
    /// `verb` is the lower-cased first token.
    NotFound { verb: String },
}

impl Resolution {
    #[cfg(test)]
    pub fn verb(&self) -> &str {
        match self {
            Self::Found { verb, .. } | Self::NotFound { verb } => verb,
        }
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in verb.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// Register `handler` under `verb` (one or two space-separated words).
    /// A later registration for the same verb replaces the earlier one.
    pub fn register(&mut self, verb: &str, handler: impl CommandHandler + 'static) {
        self.handlers
            .insert(verb.to_lowercase(), Arc::new(handler));
    }

    #[cfg(test)]
    pub fn contains(&self, verb: &str) -> bool {
        self.handlers.contains_key(&verb.to_lowercase())
    }

    /// Registered verbs, sorted.
    #[cfg(test)]
    pub fn verbs(&self) -> Vec<&str> {
        let mut verbs: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        verbs.sort_unstable();
        verbs
    }

    /// Match `tokens` against the registry. Verb tokens are compared
    /// lower-cased; arguments are returned untouched.
    pub fn resolve(&self, tokens: &[String]) -> Resolution {
        let Some(first) = tokens.first() else {
            return Resolution::NotFound {
                verb: String::new(),
            };
        };
        let first = first.to_lowercase();

        if let Some(second) = tokens.get(1) {
            let pair = format!("{} {}", first, second.to_lowercase());
            if let Some(handler) = self.handlers.get(&pair) {
                return Resolution::Found {
                    verb: pair,
                    handler: Arc::clone(handler),
                    args: tokens[2..].to_vec(),
                };
            }
        }

        match self.handlers.get(&first) {
            Some(handler) => Resolution::Found {
                verb: first,
                handler: Arc::clone(handler),
                args: tokens[1..].to_vec(),
            },
            None => Resolution::NotFound { verb: first },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::Duration;

    use tokio::sync::mpsc;

    use crate::alerts::MonitorEvent;
    use crate::store::LogStore;
    use crate::weather::fake::FakeWeather;

    pub(crate) fn context(
        fake: FakeWeather,
    ) -> (CommandContext, mpsc::UnboundedReceiver<MonitorEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let weather: Arc<dyn WeatherService> = Arc::new(fake);
        let monitor = AlertMonitor::new(Arc::clone(&weather), Duration::from_secs(60), tx);
        let ctx = CommandContext {
            weather,
            store: LogStore::open(None).unwrap().shared(),
            monitor: Arc::new(monitor),
        };
        (ctx, rx)
    }

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    fn found(registry: &CommandRegistry, line: &str) -> (String, Vec<String>) {
        match registry.resolve(&tokens(line)) {
            Resolution::Found { verb, args, .. } => (verb, args),
            Resolution::NotFound { verb } => panic!("'{}' not found", verb),
        }
    }

    struct Echo;

    #[async_trait]
    impl CommandHandler for Echo {
        async fn execute(&self, _ctx: &CommandContext, args: &[String]) -> CommandOutput {
            CommandOutput::text(args.join(","))
        }
    }

    #[test]
    fn two_word_verb_wins() {
        let registry = CommandRegistry::with_builtins();
        assert_eq!(
            found(&registry, "alert monitor FLZ204"),
            ("alert monitor".to_string(), vec!["FLZ204".to_string()])
        );
        assert_eq!(
            found(&registry, "alert FLZ204"),
            ("alert".to_string(), vec!["FLZ204".to_string()])
        );
        assert_eq!(found(&registry, "clear log").0, "clear log");
        assert_eq!(found(&registry, "clear").0, "clear");
        assert_eq!(found(&registry, "weather raw KPNS").0, "weather raw");
    }

    #[test]
    fn verbs_case_insensitive_args_untouched() {
        let registry = CommandRegistry::with_builtins();
        assert_eq!(
            found(&registry, "ALERT Monitor flz204"),
            ("alert monitor".to_string(), vec!["flz204".to_string()])
        );
        assert_eq!(
            found(&registry, "Weather KpNs"),
            ("weather".to_string(), vec!["KpNs".to_string()])
        );
    }

    #[test]
    fn two_word_verb_without_argument_still_matches() {
        let registry = CommandRegistry::with_builtins();
        assert_eq!(
            found(&registry, "weather raw"),
            ("weather raw".to_string(), vec![])
        );
    }

    #[test]
    fn unknown_verb_reports_lowercased_first_token() {
        let registry = CommandRegistry::with_builtins();
        match registry.resolve(&tokens("FOO bar")) {
            Resolution::NotFound { verb } => assert_eq!(verb, "foo"),
            Resolution::Found { verb, .. } => panic!("unexpected match {}", verb),
        }
    }

    #[test]
    fn empty_tokens_not_found() {
        let registry = CommandRegistry::with_builtins();
        assert_eq!(registry.resolve(&[]).verb(), "");
    }

    #[test]
    fn builtins_cover_every_verb() {
        let registry = CommandRegistry::with_builtins();
        assert_eq!(
            registry.verbs(),
            vec![
                "alert",
                "alert monitor",
                "alert stop",
                "clear",
                "clear log",
                "exit",
                "forecast",
                "help",
                "log",
                "weather",
                "weather raw",
            ]
        );
    }

    #[tokio::test]
    async fn custom_handler_receives_remaining_tokens() {
        let mut registry = CommandRegistry::new();
        registry.register("Say Hi", Echo);
        assert!(registry.contains("say hi"));

        let (ctx, _rx) = context(FakeWeather::new());
        match registry.resolve(&tokens("say HI a B")) {
            Resolution::Found { handler, args, .. } => {
                assert_eq!(
                    handler.execute(&ctx, &args).await,
                    CommandOutput::text("a,B")
                );
            }
            Resolution::NotFound { verb } => panic!("'{}' not found", verb),
        }
    }

    #[test]
    fn output_log_and_display_rules() {
        assert_eq!(CommandOutput::text("x").loggable(), Some("x"));
        assert_eq!(CommandOutput::text("").loggable(), None);
        assert_eq!(CommandOutput::text("").display_text(), None);
        assert_eq!(CommandOutput::Notice("n".into()).loggable(), None);
        assert_eq!(CommandOutput::Notice("n".into()).display_text(), Some("n"));
        assert_eq!(CommandOutput::ClearScreen.loggable(), None);
        assert_eq!(CommandOutput::Exit.display_text(), None);
    }
}
