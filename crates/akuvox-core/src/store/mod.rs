// ── Door key storage ──
//
// Reading persisted door-key records and materializing them into a
// credential view on demand.

pub mod persisted;
mod view;

pub use persisted::{RawDoorKey, load_door_keys, load_door_keys_async, parse_door_keys};
pub use view::CredentialView;
