use serde::{Deserialize, Serialize};
use tt_engine::Attempt;

const CURRENT_SCHEMA_VERSION: u32 = 1;

/// The on-disk aggregate: `{schemaVersion: 1, attempts: [Attempt...]}`.
/// Legacy shapes (a bare array, or an object missing `schemaVersion`)
/// are coerced to this on read and never written back in the legacy
/// shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptHistory {
    pub schema_version: u32,
    pub attempts: Vec<Attempt>,
}

impl AttemptHistory {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            attempts: Vec::new(),
        }
    }

    /// Parse a raw document, recognizing the current `{schemaVersion,
    /// attempts}` shape, a bare array of attempts, or an object missing
    /// `schemaVersion` — all coerced to the current shape. Any other
    /// shape, or invalid JSON, is reported to the caller so it can be
    /// logged and coerced to [`AttemptHistory::empty`].
    pub(crate) fn from_json(raw: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        match value {
            serde_json::Value::Array(_) => {
                let attempts: Vec<Attempt> = serde_json::from_value(value)?;
                Ok(Self {
                    schema_version: CURRENT_SCHEMA_VERSION,
                    attempts,
                })
            }
            serde_json::Value::Object(mut map) => {
                map.entry("schemaVersion")
                    .or_insert(serde_json::Value::Number(CURRENT_SCHEMA_VERSION.into()));
                let history: Self = serde_json::from_value(serde_json::Value::Object(map))?;
                Ok(history)
            }
            other => Err(serde::de::Error::custom(format!(
                "expected a JSON object or array, got {other}"
            ))),
        }
    }

    pub(crate) fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
