use serde::{Deserialize, Serialize};

use crate::error::{DeckError, DeckResult};

use super::{DeckConfig, DeckSnapshot};

pub const DECK_CONFIG_JSON_SCHEMA_V1: u32 = 1;
pub const DECK_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: DeckConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: DeckSnapshot,
}

fn is_versioned(value: &serde_json::Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("schema_version"))
}

impl DeckConfig {
    /// Parses either a bare config object or a versioned contract payload,
    /// then validates it.
    pub fn from_json_str(input: &str) -> DeckResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| DeckError::InvalidConfig(format!("failed to parse config json: {e}")))?;

        let config = if is_versioned(&value) {
            let payload: DeckConfigJsonContractV1 = serde_json::from_value(value).map_err(|e| {
                DeckError::InvalidConfig(format!("failed to parse config contract payload: {e}"))
            })?;
            if payload.schema_version != DECK_CONFIG_JSON_SCHEMA_V1 {
                return Err(DeckError::InvalidConfig(format!(
                    "unsupported config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value)
                .map_err(|e| DeckError::InvalidConfig(format!("failed to parse config json: {e}")))?
        };

        config.validate()?;
        Ok(config)
    }

    pub fn to_json_contract_v1_pretty(&self) -> DeckResult<String> {
        let payload = DeckConfigJsonContractV1 {
            schema_version: DECK_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DeckError::InvalidConfig(format!("failed to serialize config contract v1: {e}"))
        })
    }
}

impl DeckSnapshot {
    pub fn to_json_pretty(&self) -> DeckResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DeckError::InvalidData(format!("failed to serialize snapshot json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> DeckResult<String> {
        let payload = DeckSnapshotJsonContractV1 {
            schema_version: DECK_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DeckError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> DeckResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<DeckSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: DeckSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DeckError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != DECK_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(DeckError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
