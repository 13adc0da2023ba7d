// crates/millops-core/src/snapshot.rs

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MillopsError, Result};
use crate::notifications::calculate_magnet_notifications;
use crate::types::{Bin, CleaningRecord, Godown, Magnet, Notification, TransferSession};

/// A full backend snapshot: everything one evaluation needs, as the REST
/// layer hands it over. Every collection defaults to empty so partial
/// payloads still deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transfer_sessions: Vec<TransferSession>,
    #[serde(default)]
    pub cleaning_records: Vec<CleaningRecord>,
    #[serde(default)]
    pub route_mappings: Vec<Value>,
    #[serde(default)]
    pub magnets: Vec<Magnet>,
    #[serde(default)]
    pub godowns: Vec<Godown>,
    #[serde(default)]
    pub bins: Vec<Bin>,
}

impl Snapshot {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.transfer_sessions.is_empty()
            && self.cleaning_records.is_empty()
            && self.route_mappings.is_empty()
            && self.magnets.is_empty()
            && self.godowns.is_empty()
            && self.bins.is_empty()
    }

    pub fn session(&self, id: i64) -> Result<&TransferSession> {
        self.transfer_sessions
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| {
                MillopsError::Validation(format!("no transfer session with id {id} in snapshot"))
            })
    }

    /// Run the cleaning-due evaluation over this snapshot at `now`.
    pub fn notifications(&self, now: DateTime<Utc>) -> Vec<Notification> {
        calculate_magnet_notifications(
            &self.transfer_sessions,
            &self.cleaning_records,
            &self.route_mappings,
            &self.magnets,
            &self.godowns,
            &self.bins,
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_payload_defaults_to_empty_collections() {
        let snapshot = Snapshot::from_json_str(r#"{ "magnets": [] }"#).expect("parse snapshot");
        assert!(snapshot.is_empty());
        assert!(snapshot.transfer_sessions.is_empty());
    }

    #[test]
    fn unknown_session_id_is_a_validation_error() {
        let snapshot = Snapshot::default();
        let err = snapshot.session(42).expect_err("missing session");
        assert!(matches!(err, MillopsError::Validation(_)));
    }
}
