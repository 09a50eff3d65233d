//! vpn-client CLI: the `vpn-client` command.

mod cli;
mod commands;
mod config;
mod support;

use cli::{Cli, Commands};
use vpnc_engine::TransitionKind;

fn main() {
    support::init_tracing();
    let cli = Cli::parse_or_exit();
    let config = support::resolve_config_or_exit(cli.config.as_deref(), cli.events.as_deref());
    tracing::debug!(events = %config.events_path.display(), "resolved config");

    match cli.command {
        Commands::Status { json } => commands::status::run(&config, json),

        Commands::Up { json } => {
            commands::transition::run(&config, cli.seed, TransitionKind::Up, json)
        }

        Commands::Down { json } => {
            commands::transition::run(&config, cli.seed, TransitionKind::Down, json)
        }

        Commands::History {
            from,
            to,
            sort,
            status,
            json,
        } => commands::history::run(
            &config,
            commands::history::Args {
                from,
                to,
                sort,
                status,
                json,
            },
        ),
    }
}
