//! Background sync core for Akuvox SmartPlus door-access integrations.
//!
//! - **[`DoorLogPoller`]** — supervises the one background task that keeps
//!   the personal door log fresh. [`start()`](DoorLogPoller::start) launches
//!   an injected [`RetrieveFn`]; [`stop()`](DoorLogPoller::stop) cancels it
//!   through a `CancellationToken` and waits for it to exit. Neither call
//!   ever fails.
//!
//! - **[`Credential`]** — a temporary door key with a validity window,
//!   built from a loosely-typed persisted record by [`convert`]. Activity is
//!   snapshotted when the credential is built.
//!
//! - **[`CredentialView`]** — owns the credentials of the latest rebuild,
//!   materialized on demand from [`store::load_door_keys`].

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod poller;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::PollerConfig;
pub use convert::{DateLayout, ValidityWindow, credentials_from_records, parse_validity_window};
pub use error::CoreError;
pub use model::{Credential, CredentialAttributes};
pub use poller::{DoorLogPoller, PollContext, RetrieveFn, periodic, retrieve_fn};
pub use store::{CredentialView, RawDoorKey};
