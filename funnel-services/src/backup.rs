//! Backup and restore
//!
//! The backup document is the persisted representation verbatim: one JSON
//! object whose keys are the storage keys, array collections as arrays, the
//! settings key as an object. Export-then-import is lossless.
//!
//! Import is loud about an unusable payload (not JSON, not an object) and
//! quiet about individually unusable keys: unknown keys and wrong-shaped
//! values are skipped, never partially applied.

use funnel_core::{keys, CrmError, CrmResult};
use funnel_store::Store;
use serde_json::Value;

/// What an import actually touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Keys whose storage was overwritten.
    pub imported: Vec<String>,
    /// Keys present in the payload but skipped (unknown or wrong shape).
    pub skipped: Vec<String>,
}

/// Serialize every registered storage key into one pretty-printed JSON
/// document. Missing or corrupt collections export as empty arrays; missing
/// settings export as `null`.
pub fn export_data(store: &Store) -> String {
    let mut doc = serde_json::Map::new();

    for key in keys::ARRAY_KEYS {
        let value = store
            .read_raw(key)
            .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
            .filter(Value::is_array)
            .unwrap_or_else(|| Value::Array(Vec::new()));
        doc.insert(key.to_string(), value);
    }

    let settings = store
        .read_raw(keys::SETTINGS)
        .and_then(|raw| serde_json::from_str::<Value>(&raw).ok())
        .unwrap_or(Value::Null);
    doc.insert(keys::SETTINGS.to_string(), settings);

    // A Map<String, Value> cannot fail to serialize.
    serde_json::to_string_pretty(&Value::Object(doc)).unwrap_or_else(|_| String::from("{}"))
}

/// Parse a backup document and overwrite storage for every usable key.
pub fn import_data(store: &Store, json: &str) -> CrmResult<ImportSummary> {
    let doc: Value = serde_json::from_str(json).map_err(|e| CrmError::InvalidBackup {
        reason: e.to_string(),
    })?;
    let obj = doc.as_object().ok_or_else(|| CrmError::InvalidBackup {
        reason: String::from("top-level value is not an object"),
    })?;

    let mut summary = ImportSummary::default();
    for (key, value) in obj {
        let usable = (keys::is_array_key(key) && value.is_array())
            || (key == keys::SETTINGS && value.is_object());
        if usable {
            store.write_raw(key, &value.to_string());
            summary.imported.push(key.clone());
        } else {
            tracing::debug!(key, "skipping backup key");
            summary.skipped.push(key.clone());
        }
    }
    Ok(summary)
}
