// ── Temporary door key ──

use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::Serialize;

/// A temporary door access key with a validity window and usage quota.
///
/// Timestamps are naive wall-clock times, the way the SmartPlus API
/// reports them. The activity snapshot is taken once, when the credential
/// is built from its record; rebuild to refresh it.
///
/// Two credentials are equal when their [`name`](Self::name)s are.
#[derive(Debug, Clone)]
pub struct Credential {
    pub key_id: String,
    pub description: String,
    pub key_code: String,
    pub begin_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub allowed_times: i64,
    pub access_times: i64,
    pub qr_code_url: String,
    pub(crate) active: bool,
}

impl Credential {
    /// Whether `at` falls inside `[begin_time, end_time]`, inclusive.
    ///
    /// An inverted window is never active.
    pub fn is_active_at(&self, at: NaiveDateTime) -> bool {
        self.begin_time <= at && at <= self.end_time
    }

    pub fn expired_at(&self, at: NaiveDateTime) -> bool {
        !self.is_active_at(at)
    }

    /// Activity as evaluated when this credential was built.
    pub fn is_key_active(&self) -> bool {
        self.active
    }

    pub fn expired(&self) -> bool {
        !self.active
    }

    /// Display name, also used as the externally visible unique id.
    pub fn name(&self) -> String {
        format!("{} {}", self.description, self.key_id)
            .trim()
            .to_owned()
    }

    /// Re-take the activity snapshot against `at`.
    pub(crate) fn evaluated_at(mut self, at: NaiveDateTime) -> Self {
        self.active = self.is_active_at(at);
        self
    }

    /// State attributes exposed alongside the credential.
    pub fn attributes(&self) -> CredentialAttributes<'_> {
        CredentialAttributes {
            key_id: &self.key_id,
            description: &self.description,
            key_code: &self.key_code,
            enabled: self.active,
            begin_time: self.begin_time,
            end_time: self.end_time,
            access_times: self.access_times,
            allowed_times: self.allowed_times,
            qr_code_url: &self.qr_code_url,
            expired: !self.active,
        }
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Credential {}

impl Hash for Credential {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

/// Serializable attribute map for a [`Credential`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialAttributes<'a> {
    pub key_id: &'a str,
    pub description: &'a str,
    pub key_code: &'a str,
    pub enabled: bool,
    pub begin_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub access_times: i64,
    pub allowed_times: i64,
    pub qr_code_url: &'a str,
    pub expired: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    pub(crate) fn credential(begin: NaiveDateTime, end: NaiveDateTime) -> Credential {
        Credential {
            key_id: "1001".into(),
            description: "Cleaner".into(),
            key_code: "482913".into(),
            begin_time: begin,
            end_time: end,
            allowed_times: 10,
            access_times: 2,
            qr_code_url: "https://example.invalid/qr/1001".into(),
            active: false,
        }
    }

    #[test]
    fn active_inside_window_and_expired_after() {
        let key = credential(at(2024, 1, 1, 0), at(2024, 1, 2, 0));

        assert!(key.is_active_at(at(2024, 1, 1, 12)));
        assert!(!key.is_active_at(at(2024, 1, 3, 0)));
        assert!(key.expired_at(at(2024, 1, 3, 0)));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let key = credential(at(2024, 1, 1, 0), at(2024, 1, 2, 0));

        assert!(key.is_active_at(at(2024, 1, 1, 0)));
        assert!(key.is_active_at(at(2024, 1, 2, 0)));
        assert!(!key.is_active_at(at(2023, 12, 31, 23)));
    }

    #[test]
    fn inverted_window_is_never_active() {
        let key = credential(at(2024, 1, 2, 0), at(2024, 1, 1, 0));

        assert!(!key.is_active_at(at(2024, 1, 1, 12)));
        assert!(!key.is_active_at(at(2024, 1, 2, 0)));
    }

    #[test]
    fn snapshot_does_not_follow_the_clock() {
        let key = credential(at(2024, 1, 1, 0), at(2024, 1, 2, 0)).evaluated_at(at(2024, 1, 1, 6));

        assert!(key.is_key_active());
        assert!(!key.expired());
        // Still reports the snapshot even though this instant is past the window.
        assert!(key.expired_at(at(2024, 6, 1, 0)));
        assert!(key.is_key_active());
    }

    #[test]
    fn name_joins_description_and_key_id() {
        let mut key = credential(at(2024, 1, 1, 0), at(2024, 1, 2, 0));
        assert_eq!(key.name(), "Cleaner 1001");

        key.description = String::new();
        assert_eq!(key.name(), "1001");
    }

    #[test]
    fn equality_follows_the_name() {
        let key = credential(at(2024, 1, 1, 0), at(2024, 1, 2, 0));
        let same_name =
            credential(at(2024, 5, 1, 0), at(2024, 6, 1, 0)).evaluated_at(at(2024, 5, 2, 0));
        assert_eq!(key, same_name);

        let mut other = key.clone();
        other.key_id = "1002".into();
        assert_ne!(key, other);

        let names: HashSet<Credential> = [key, same_name, other].into_iter().collect();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn attributes_mirror_snapshot() {
        let key = credential(at(2024, 1, 1, 0), at(2024, 1, 2, 0)).evaluated_at(at(2024, 2, 1, 0));
        let attrs = serde_json::to_value(key.attributes()).unwrap();

        assert_eq!(attrs["key_id"], "1001");
        assert_eq!(attrs["enabled"], false);
        assert_eq!(attrs["expired"], true);
        assert_eq!(attrs["allowed_times"], 10);
        assert_eq!(attrs["begin_time"], "2024-01-01T00:00:00");
    }
}
