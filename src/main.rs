//! # wxterm - Terminal Weather Console
//!
//! A retro command-line console for the National Weather Service API:
//! current observations, raw METAR, zone forecasts and alerts, a background
//! alert monitor, and a date-partitioned log of every response.

mod alerts;
mod app;
mod commands;
mod config;
pub mod constants;
mod interpreter;
mod notifications;
mod store;
mod ui;
mod utils;
mod weather;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::CommandRegistry;
use config::Config;
use constants::{diagnostics_log_path, MIN_ALERT_POLL_SECS};
use interpreter::Interpreter;

/// wxterm - Terminal Weather Console
#[derive(Parser, Debug)]
#[command(name = "wxterm", version, about = "A terminal console for National Weather Service data")]
struct Cli {
    /// Weather API base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Alert monitor poll interval in seconds
    #[arg(long, value_name = "SECS")]
    poll_secs: Option<u64>,

    /// Color theme (default, amber, mono)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// Don't ring the terminal bell on new alerts
    #[arg(long)]
    no_bell: bool,

    /// Debug-level diagnostics in the log file
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Run a single command, print its output and exit
    #[arg(short = 'c', value_name = "COMMAND")]
    command: Option<String>,
}

/// Send diagnostics to a file; the console owns the terminal. If the file
/// can't be opened, diagnostics are off.
fn init_tracing(verbose: bool) {
    let path = diagnostics_log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// `-c` mode: same interpreter and log store, no TUI.
async fn run_once(config: &Config, line: &str) -> Result<()> {
    let (ctx, _monitor_rx) = app::build_context(config)?;
    let mut interpreter = Interpreter::new(CommandRegistry::with_builtins());

    if let Some(output) = interpreter.execute_line(&ctx, line).await {
        if let Some(text) = output.display_text() {
            println!("{}", text);
        }
    }
    ctx.monitor.stop();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(url) = cli.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(secs) = cli.poll_secs {
        config.alert_poll_secs = secs.max(MIN_ALERT_POLL_SECS);
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if cli.no_bell {
        config.bell = false;
    }

    init_tracing(cli.verbose);
    tracing::debug!(?config, "configuration loaded");

    if let Some(line) = cli.command {
        return run_once(&config, &line).await;
    }

    let mut app = app::App::new(&config)?;
    app.run().await
}
