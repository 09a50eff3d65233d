use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::process;

#[derive(Parser)]
#[command(
    name = "vpn-client",
    about = "Simulated VPN client: bring the connection up or down and inspect its event log",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the events JSON log (overrides the config file)
    #[arg(long, global = true, env = "VPN_CLIENT_EVENTS")]
    pub events: Option<String>,

    /// Path to a TOML config file (default: ./vpn-client.toml when present)
    #[arg(long, global = true, env = "VPN_CLIENT_CONFIG")]
    pub config: Option<String>,

    /// Seed for the simulated transition outcome
    #[arg(long, global = true, env = "VPN_CLIENT_SEED", hide = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current status, and uptime when up
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bring the connection up (may fail)
    Up {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bring the connection down (may fail)
    Down {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List recorded events, optionally filtered and sorted
    History {
        /// Inclusive lower bound: YYYY-MM-DD, RFC 3339, or epoch millis
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// Inclusive upper bound: YYYY-MM-DD, RFC 3339, or epoch millis.
        /// A bare date covers the whole day through 23:59:59.999 UTC, not
        /// just midnight at its start
        #[arg(short = 't', long)]
        to: Option<String>,

        /// Sort by timestamp: asc or desc (anything else keeps log order)
        #[arg(short = 's', long)]
        sort: Option<String>,

        /// Only events with this status (STARTING, STOPPING, UP, DOWN, FAILED)
        #[arg(short = 'S', long)]
        status: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Parse argv; an unknown command also lists the available ones.
    pub fn parse_or_exit() -> Self {
        Self::try_parse().unwrap_or_else(|err| {
            if err.kind() != ErrorKind::InvalidSubcommand {
                err.exit();
            }
            let _ = err.print();
            eprintln!();
            eprintln!("Commands:");
            for name in command_names() {
                eprintln!("  {name}");
            }
            process::exit(err.exit_code());
        })
    }
}

pub fn command_names() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .map(|sub| sub.get_name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_cover_the_four_commands() {
        assert_eq!(command_names(), ["status", "up", "down", "history"]);
    }

    #[test]
    fn unknown_command_is_an_invalid_subcommand() {
        let err = Cli::try_parse_from(["vpn-client", "unknownCommand"])
            .err()
            .expect("unknown command should not parse");
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn upper_bound_help_explains_whole_day() {
        let mut command = Cli::command();
        let history = command
            .find_subcommand_mut("history")
            .expect("history subcommand exists");
        let help = history.render_long_help().to_string();
        assert!(help.contains("23:59:59.999"), "{help}");
    }
}
