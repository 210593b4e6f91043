use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{facts, set, strategy, Cli, CliSubcommand};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        CliSubcommand::Set {
            hostname,
            ip,
            alias,
            no_persist,
            no_reboot,
            target,
        } => set(hostname, ip, alias, *no_persist, *no_reboot, target)?,
        CliSubcommand::Facts { root } => facts(root)?,
        CliSubcommand::Strategy { target } => strategy(target)?,
    }

    Ok(())
}
