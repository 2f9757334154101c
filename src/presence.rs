//! The rich presence payload handed to the presence transport.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::*;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Presence {
    /// Start of the elapsed time counter, in milliseconds since the epoch
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub large_image_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub large_image_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub small_image_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub small_image_text: Option<String>,
    /// At most one button
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub buttons: Option<Vec<Button>>,
}

impl Presence {
    /// Reads a payload from a JSON object. Any other JSON value is rejected.
    pub fn from_json(json: &str, source: &str) -> Result<Self> {
        let snapshot_error = |cause: String| Error::SnapshotError {
            location: ConfigType::PRESENCE,
            file: source.to_string(),
            cause,
        };

        let value: Value = serde_json::from_str(json).map_err(|e| snapshot_error(e.to_string()))?;
        if !value.is_object() {
            return Err(snapshot_error("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| snapshot_error(e.to_string()))
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
