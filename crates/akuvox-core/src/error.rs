// ── Core error types ──
//
// Errors produced while turning persisted door-key records into
// credentials, or while driving the retrieval loop. The poller and the
// credential rebuild never hand these to their callers: they end up in a
// log line and the offending record (or tick) is skipped.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Record errors ────────────────────────────────────────────────
    #[error("Could not parse validity window for key {key_id}: {begin} and {end}")]
    UnparseableWindow {
        key_id: String,
        begin: String,
        end: String,
    },

    #[error("Door key record {key_id} has a missing or invalid '{field}' field")]
    InvalidRecord { key_id: String, field: &'static str },

    // ── Store errors ─────────────────────────────────────────────────
    #[error("Failed to read door key store: {0}")]
    Store(#[from] std::io::Error),

    #[error("Door key store is not valid JSON: {0}")]
    StoreFormat(#[from] serde_json::Error),

    // ── Retrieval errors ─────────────────────────────────────────────
    #[error("Door log retrieval failed: {message}")]
    Retrieval { message: String },
}
