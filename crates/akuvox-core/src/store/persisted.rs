// ── Persisted door-key records ──
//
// The retrieval loop writes the personal door log into the host's storage
// document. Values in that document are loosely typed: SmartPlus sends
// ids and counters as either strings or numbers depending on the endpoint.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CoreError;

/// One door-key record as persisted, before any validation.
///
/// Every field is kept as a raw JSON value; [`crate::convert`] decides
/// what is acceptable. Unknown fields are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDoorKey {
    #[serde(default)]
    pub key_id: Value,
    #[serde(default)]
    pub description: Value,
    #[serde(default)]
    pub key_code: Value,
    #[serde(default)]
    pub begin_time: Value,
    #[serde(default)]
    pub end_time: Value,
    #[serde(default)]
    pub allowed_times: Value,
    #[serde(default)]
    pub access_times: Value,
    #[serde(default)]
    pub qr_code_url: Value,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Parse door-key records out of a storage document.
///
/// Accepts the wrapped storage layout (`{"version": 1, "data": {...}}`)
/// as well as a bare device-data object. A document without
/// `door_keys_data` has no keys. Entries that are not objects are skipped.
pub fn parse_door_keys(json: &str) -> Result<Vec<RawDoorKey>, CoreError> {
    let doc: Value = serde_json::from_str(json)?;
    let device_data = doc.get("data").filter(|d| d.is_object()).unwrap_or(&doc);

    let Some(entries) = device_data.get("door_keys_data").and_then(Value::as_array) else {
        debug!("storage document has no door_keys_data");
        return Ok(Vec::new());
    };

    let keys = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match RawDoorKey::deserialize(entry) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed door key entry");
                None
            }
        })
        .collect();

    Ok(keys)
}

/// Read and parse the storage document at `path`.
pub fn load_door_keys(path: &Path) -> Result<Vec<RawDoorKey>, CoreError> {
    let raw = std::fs::read_to_string(path)?;
    let keys = parse_door_keys(&raw)?;
    debug!(path = %path.display(), count = keys.len(), "loaded door key records");
    Ok(keys)
}

/// [`load_door_keys`] on the blocking pool, for use inside async tasks.
pub async fn load_door_keys_async(path: PathBuf) -> Result<Vec<RawDoorKey>, CoreError> {
    tokio::task::spawn_blocking(move || load_door_keys(&path))
        .await
        .map_err(std::io::Error::from)?
}
