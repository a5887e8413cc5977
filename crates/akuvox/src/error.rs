//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use akuvox_config::ConfigError;
use akuvox_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const STORE: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Store ────────────────────────────────────────────────────────

    #[error("No door key store configured")]
    #[diagnostic(
        code(akuvox::no_store),
        help(
            "Pass --store <PATH>, set AKUVOX_STORE, or set store_path in\n\
             {config_path}"
        )
    )]
    NoStore { config_path: String },

    #[error("Could not read door key store at {path}")]
    #[diagnostic(
        code(akuvox::store_unreadable),
        help("Check that the integration has written its storage file.")
    )]
    StoreUnreadable {
        path: String,
        #[source]
        source: CoreError,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(akuvox::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(akuvox::config))]
    Config(#[from] ConfigError),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn store(path: &std::path::Path, source: CoreError) -> Self {
        Self::StoreUnreadable {
            path: path.display().to_string(),
            source,
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoStore { .. } | Self::Config(_) => exit_code::CONFIG,
            Self::StoreUnreadable { .. } => exit_code::STORE,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}
