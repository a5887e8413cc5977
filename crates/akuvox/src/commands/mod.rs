//! Command handlers.

pub mod config_cmd;
pub mod keys;
pub mod watch;

use std::path::PathBuf;

use akuvox_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the store path: `--store` / `AKUVOX_STORE` first, then config.
pub(crate) fn store_path(global: &GlobalOpts, cfg: &Config) -> Result<PathBuf, CliError> {
    global
        .store
        .clone()
        .or_else(|| cfg.store_path.clone())
        .ok_or_else(|| CliError::NoStore {
            config_path: crate::config_file(global).display().to_string(),
        })
}
