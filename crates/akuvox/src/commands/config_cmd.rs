//! `akuvox config` -- inspect configuration.

use akuvox_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    let rendered = match args.command {
        ConfigCommand::Show => cfg.to_toml()?,
        ConfigCommand::Path => crate::config_file(global).display().to_string(),
    };
    output::print_output(rendered.trim_end(), global.quiet);
    Ok(())
}
