mod cli;
mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file in effect: `--config` / `AKUVOX_CONFIG`, else the platform path.
pub(crate) fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(akuvox_config::config_path)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Completions(args) = &cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "akuvox", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = akuvox_config::load_config_from(&config_file(&cli.global))?;
    tracing::debug!(command = ?cli.command, "dispatching command");

    match &cli.command {
        Command::Keys(args) => commands::keys::handle(args, &cli.global, &cfg),
        Command::Watch(args) => commands::watch::handle(args, &cli.global, &cfg).await,
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, &cfg),
        Command::Completions(_) => Ok(()),
    }
}
