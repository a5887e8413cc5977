// ── Credential view ──
//
// Owns the credentials of the latest rebuild. Each rebuild replaces the
// whole set; nothing is carried over from the previous one.

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use super::RawDoorKey;
use crate::convert::credentials_from_records;
use crate::model::Credential;

/// The set of temporary door keys materialized from persisted records.
#[derive(Debug, Clone, Default)]
pub struct CredentialView {
    credentials: Vec<Credential>,
    last_rebuild: Option<NaiveDateTime>,
}

impl CredentialView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a view in one step.
    pub fn from_records(records: &[RawDoorKey], now: NaiveDateTime) -> Self {
        let mut view = Self::new();
        view.rebuild(records, now);
        view
    }

    /// Replace every credential with a fresh build of `records`,
    /// snapshotting activity against `now`.
    pub fn rebuild(&mut self, records: &[RawDoorKey], now: NaiveDateTime) {
        self.credentials = credentials_from_records(records, now);
        self.last_rebuild = Some(now);
        debug!(
            records = records.len(),
            credentials = self.credentials.len(),
            "rebuilt door key view"
        );
    }

    /// [`rebuild`](Self::rebuild) against the local wall clock.
    pub fn rebuild_now(&mut self, records: &[RawDoorKey]) {
        self.rebuild(records, Local::now().naive_local());
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Credentials that were active when the view was last rebuilt.
    pub fn active(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter().filter(|c| c.is_key_active())
    }

    /// Look a credential up by its display name. Names are not
    /// deduplicated; when several records collide the last one wins.
    pub fn by_name(&self, name: &str) -> Option<&Credential> {
        self.credentials.iter().rev().find(|c| c.name() == name)
    }

    /// The instant the current set was evaluated at, if ever built.
    pub fn last_rebuild(&self) -> Option<NaiveDateTime> {
        self.last_rebuild
    }

    pub fn into_credentials(self) -> Vec<Credential> {
        self.credentials
    }
}
