// ── Door key domain model ──
//
// Canonical types for temporary door keys. Everything here is built from
// persisted records by `crate::convert` and rebuilt wholesale on every
// refresh; nothing in this module is mutated after construction.

pub mod credential;

pub use credential::{Credential, CredentialAttributes};
