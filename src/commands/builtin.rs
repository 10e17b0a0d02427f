//! The console's built-in verbs.

use async_trait::async_trait;

use super::{CommandContext, CommandHandler, CommandOutput, CommandRegistry};
use crate::store;
use crate::utils;
use crate::weather::format;

const HELP_TEXT: &str = "Available commands:
weather [station] - Get weather data for a specific station (e.g., weather KPNS)
weather raw [station] - Get raw METAR data for a station (e.g., weather raw KPNS)
forecast [zone] - Get forecast for a specific zone (e.g., forecast FLZ204)
alert [zone] - Get weather alerts for a specific zone (e.g., alert FLZ204)
alert monitor [zone] - Monitor for new weather alerts every minute for a specific zone (e.g., alert monitor FLZ204)
alert stop - Stop monitoring alerts
clear log - Clear today's weather logs
log - View all logged responses
log [YYYY-MM-DD] - View logged responses for specific date
clear - Clear the terminal
help - Show this help message
exit - Close the terminal";

pub(super) fn register_all(registry: &mut CommandRegistry) {
    registry.register("help", Help);
    registry.register("clear", Clear);
    registry.register("weather", Weather { raw: false });
    registry.register("weather raw", Weather { raw: true });
    registry.register("forecast", Forecast);
    registry.register("alert", Alerts);
    registry.register("alert monitor", AlertMonitorStart);
    registry.register("alert stop", AlertMonitorStop);
    registry.register("log", Log);
    registry.register("clear log", ClearLog);
    registry.register("exit", Exit);
}

fn error(message: impl std::fmt::Display) -> CommandOutput {
    CommandOutput::Text(format!("Error: {}", message))
}

// ── Static ────────────────────────────────────────────────────────

struct Help;

#[async_trait]
impl CommandHandler for Help {
    async fn execute(&self, _ctx: &CommandContext, _args: &[String]) -> CommandOutput {
        CommandOutput::text(HELP_TEXT)
    }
}

/// Clearing the screen also ends alert monitoring.
struct Clear;

#[async_trait]
impl CommandHandler for Clear {
    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> CommandOutput {
        ctx.monitor.stop();
        CommandOutput::ClearScreen
    }
}

struct Exit;

#[async_trait]
impl CommandHandler for Exit {
    async fn execute(&self, _ctx: &CommandContext, _args: &[String]) -> CommandOutput {
        CommandOutput::Exit
    }
}

// ── Weather queries ───────────────────────────────────────────────

struct Weather {
    raw: bool,
}

#[async_trait]
impl CommandHandler for Weather {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> CommandOutput {
        let Some(station) = args.first() else {
            let example = if self.raw { "weather raw KPNS" } else { "weather KPNS" };
            return error(format!(
                "Please specify a station code (e.g., {})",
                example
            ));
        };

        match ctx.weather.latest_observation(station).await {
            Ok(obs) if self.raw => CommandOutput::Text(format::raw_metar(station, &obs)),
            Ok(obs) => CommandOutput::Text(format::observation(station, &obs)),
            Err(e) => {
                tracing::debug!(station = %station, error = %e, "observation fetch failed");
                error(e)
            }
        }
    }
}

struct Forecast;

#[async_trait]
impl CommandHandler for Forecast {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> CommandOutput {
        let Some(zone) = args.first() else {
            return error("Please specify a zone code (e.g., forecast FLZ204)");
        };
        match ctx.weather.zone_forecast(zone).await {
            Ok(periods) => CommandOutput::Text(format::forecast(zone, &periods)),
            Err(e) => error(e),
        }
    }
}

struct Alerts;

#[async_trait]
impl CommandHandler for Alerts {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> CommandOutput {
        let Some(zone) = args.first() else {
            return error("Please specify a zone code (e.g., alert FLZ204)");
        };
        match ctx.weather.active_alerts(zone).await {
            Ok(alerts) => CommandOutput::Text(format::alerts(zone, &alerts)),
            Err(e) => error(e),
        }
    }
}

// ── Alert monitor ─────────────────────────────────────────────────

struct AlertMonitorStart;

#[async_trait]
impl CommandHandler for AlertMonitorStart {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> CommandOutput {
        let Some(zone) = args.first() else {
            return error("Please specify a zone code (e.g., alert monitor FLZ204)");
        };
        if !ctx.monitor.start(zone).await {
            return CommandOutput::Notice(format!(
                "Monitoring for zone {} was replaced before it started.",
                zone
            ));
        }
        CommandOutput::Text(format!(
            "Monitoring alerts for zone {}. Type 'clear' or 'alert stop' to stop monitoring.",
            zone
        ))
    }
}

struct AlertMonitorStop;

#[async_trait]
impl CommandHandler for AlertMonitorStop {
    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> CommandOutput {
        match ctx.monitor.stop() {
            Some(zone) => CommandOutput::Text(format!("Stopped monitoring alerts for zone {}", zone)),
            None => CommandOutput::text("No alert monitor is running"),
        }
    }
}

// ── Log ───────────────────────────────────────────────────────────

struct Log;

#[async_trait]
impl CommandHandler for Log {
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> CommandOutput {
        let Some(date) = args.first() else {
            let all = store::lock(&ctx.store).get_all();
            if all.is_empty() {
                return CommandOutput::text("No logs found");
            }
            return CommandOutput::Text(all.join("\n"));
        };

        if !utils::is_valid_date(date) {
            return error(format!("Invalid date '{}'. Use YYYY-MM-DD", date));
        }

        let entries = store::lock(&ctx.store).get_for_date(date);
        if entries.is_empty() {
            return CommandOutput::Text(format!("No logs found for {}", date));
        }
        let texts: Vec<String> = entries.iter().map(|e| e.to_text()).collect();
        CommandOutput::Text(texts.join("\n"))
    }
}

/// Drops today's bucket. The confirmation is a notice so the day stays empty.
struct ClearLog;

#[async_trait]
impl CommandHandler for ClearLog {
    async fn execute(&self, ctx: &CommandContext, _args: &[String]) -> CommandOutput {
        let date = utils::today();
        let result = store::lock(&ctx.store).clear_date(&date);
        if let Err(e) = result {
            tracing::error!(date = %date, error = %e, "failed to clear log");
            return CommandOutput::Notice(format!("Error: Could not clear logs for {}: {}", date, e));
        }
        CommandOutput::Notice(format!("Logs cleared for {}", date))
    }
}
