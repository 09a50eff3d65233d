use crate::config::{ClientConfig, ConfigError};
use chrono::DateTime;
use serde_json::Value;
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::EnvFilter;
use vpnc_engine::{Controller, RandomOutcome, SystemClock};
use vpnc_log::EventLogStore;

pub const LOG_FILTER_ENV: &str = "VPN_CLIENT_LOG";

pub type ClientController = Controller<EventLogStore, RandomOutcome, SystemClock>;

/// Diagnostics go to stderr; stdout stays reserved for command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

pub fn resolve_config_or_exit(config: Option<&str>, events: Option<&str>) -> ClientConfig {
    ClientConfig::resolve(config, events).unwrap_or_else(|e: ConfigError| {
        eprintln!("error: {e}");
        process::exit(1);
    })
}

pub fn build_controller(config: &ClientConfig, seed: Option<u64>) -> ClientController {
    let outcomes = match seed {
        Some(seed) => RandomOutcome::seeded(seed),
        None => RandomOutcome::from_os_rng(),
    };
    Controller::new(
        EventLogStore::new(&config.events_path),
        outcomes,
        SystemClock,
    )
}

/// Render epoch milliseconds as a UTC wall-clock string.
pub fn format_timestamp(millis: i64, pattern: &str) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(instant) => instant.naive_utc().format(pattern).to_string(),
        None => millis.to_string(),
    }
}

pub fn exit_with_error(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("error: {context}: {err}");
    process::exit(1);
}

pub fn print_json(payload: &Value) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render json output: {err}");
        process::exit(1);
    });
    println!("{rendered}");
}
