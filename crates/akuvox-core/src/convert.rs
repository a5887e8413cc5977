// ── Record-to-domain conversions ──
//
// Bridges loosely-typed persisted door-key records into `Credential`
// values. SmartPlus has changed its timestamp layout between firmware
// releases, so the validity window is parsed against a short list of
// known layouts. Conversion failures are per record: a bad record is
// logged and dropped, the rest of the batch is still built.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::CoreError;
use crate::model::Credential;
use crate::store::RawDoorKey;

// ── Timestamp layouts ──────────────────────────────────────────────

/// Timestamp layouts observed from the SmartPlus API, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `15-03-2024 10:00:00`
    DayMonthYear,
    /// `2024-03-15 10:00:00`
    YearMonthDay,
    /// `2024/03/15 10:00:00`
    YearMonthDaySlashed,
}

impl DateLayout {
    pub const ALL: [Self; 3] = [
        Self::DayMonthYear,
        Self::YearMonthDay,
        Self::YearMonthDaySlashed,
    ];

    pub const fn pattern(self) -> &'static str {
        match self {
            Self::DayMonthYear => "%d-%m-%Y %H:%M:%S",
            Self::YearMonthDay => "%Y-%m-%d %H:%M:%S",
            Self::YearMonthDaySlashed => "%Y/%m/%d %H:%M:%S",
        }
    }

    /// Parse `raw` with this layout. The year must be written with
    /// exactly four digits.
    pub fn parse(self, raw: &str) -> Option<NaiveDateTime> {
        let year = self.year_field(raw)?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        NaiveDateTime::parse_from_str(raw, self.pattern()).ok()
    }

    /// The raw year digits of `raw` as this layout would read them.
    fn year_field(self, raw: &str) -> Option<&str> {
        let date = raw.split_whitespace().next()?;
        match self {
            Self::DayMonthYear => date.rsplit('-').next(),
            Self::YearMonthDay => date.split('-').next(),
            Self::YearMonthDaySlashed => date.split('/').next(),
        }
    }
}

/// A parsed `[begin, end]` window and the layout that matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
    pub layout: DateLayout,
}

/// Parse both ends of a validity window with the same layout.
///
/// Layouts are tried in [`DateLayout::ALL`] order and the first one that
/// accepts *both* strings wins. Layouts are never mixed between begin and
/// end. This is a heuristic, not a validator: a day/month swap that still
/// fits a layout is accepted as-is.
pub fn parse_validity_window(begin_raw: &str, end_raw: &str) -> Option<ValidityWindow> {
    DateLayout::ALL.into_iter().find_map(|layout| {
        let begin = layout.parse(begin_raw)?;
        let end = layout.parse(end_raw)?;
        debug!(format = layout.pattern(), "parsed door key dates");
        Some(ValidityWindow { begin, end, layout })
    })
}

// ── Loose value helpers ─────────────────────────────────────────────

/// Render a scalar JSON value as a string. Strings are taken verbatim,
/// numbers and booleans use their display form.
fn loose_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Read an integer from a number, an integral float such as `5.0`, or an
/// integer-valued string.
#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
fn loose_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e18)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ── Credential ────────────────────────────────────────────────────

impl Credential {
    /// Build a credential from a persisted record, snapshotting its
    /// activity against `now`.
    pub fn try_from_record(raw: &RawDoorKey, now: NaiveDateTime) -> Result<Self, CoreError> {
        let key_id = loose_string(&raw.key_id).ok_or_else(|| CoreError::InvalidRecord {
            key_id: "<unknown>".into(),
            field: "key_id",
        })?;

        let invalid = |field: &'static str| CoreError::InvalidRecord {
            key_id: key_id.clone(),
            field,
        };

        let begin_raw = loose_string(&raw.begin_time).ok_or_else(|| invalid("begin_time"))?;
        let end_raw = loose_string(&raw.end_time).ok_or_else(|| invalid("end_time"))?;
        let window = parse_validity_window(&begin_raw, &end_raw).ok_or_else(|| {
            CoreError::UnparseableWindow {
                key_id: key_id.clone(),
                begin: begin_raw.clone(),
                end: end_raw.clone(),
            }
        })?;

        let credential = Self {
            description: loose_string(&raw.description).ok_or_else(|| invalid("description"))?,
            key_code: loose_string(&raw.key_code).ok_or_else(|| invalid("key_code"))?,
            begin_time: window.begin,
            end_time: window.end,
            allowed_times: loose_int(&raw.allowed_times).ok_or_else(|| invalid("allowed_times"))?,
            access_times: loose_int(&raw.access_times).ok_or_else(|| invalid("access_times"))?,
            qr_code_url: loose_string(&raw.qr_code_url).ok_or_else(|| invalid("qr_code_url"))?,
            active: false,
            key_id,
        };

        Ok(credential.evaluated_at(now))
    }
}

/// Build credentials for a batch of records, dropping the ones that fail.
pub fn credentials_from_records(records: &[RawDoorKey], now: NaiveDateTime) -> Vec<Credential> {
    records
        .iter()
        .filter_map(|raw| match Credential::try_from_record(raw, now) {
            Ok(credential) => {
                debug!(name = %credential.name(), "adding temporary door key");
                Some(credential)
            }
            Err(CoreError::UnparseableWindow { key_id, begin, end }) => {
                error!(%key_id, %begin, %end, "could not parse dates for door key");
                None
            }
            Err(e) => {
                error!(error = %e, "skipping door key record");
                None
            }
        })
        .collect()
}
