// crates/millops-core/src/types.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ferrous-contaminant trap installed along a transfer route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magnet {
    pub id: i64,
    pub name: String,
}

/// Bulk storage warehouse; source side of a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Godown {
    pub id: i64,
    pub name: String,
}

/// Discrete storage container; destination side of a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub id: i64,
    pub bin_number: String,
}

/// One magnet requirement attached to a multi-magnet transfer session.
///
/// The backend column is named `cleaning_interval_hours` but has always
/// stored seconds; the Rust field carries the honest name and keeps the
/// wire name through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMagnet {
    pub magnet_id: i64,
    #[serde(rename = "cleaning_interval_hours")]
    pub cleaning_interval_secs: i64,
    #[serde(default)]
    pub magnet: Option<Magnet>,
}

/// An ongoing (or finished) material transfer from a godown to a bin.
///
/// Sessions come in two shapes: the legacy single-magnet binding via the
/// session-level `magnet_id` + interval pair, and the newer
/// `session_magnets` list. Both deserialize here; the evaluator decides
/// which binding applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSession {
    pub id: i64,
    pub status: String,
    pub start_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub stop_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source_godown_id: Option<i64>,
    #[serde(default)]
    pub destination_bin_id: Option<i64>,
    #[serde(default)]
    pub magnet_id: Option<i64>,
    #[serde(default, rename = "cleaning_interval_hours")]
    pub cleaning_interval_secs: Option<i64>,
    #[serde(default)]
    pub session_magnets: Vec<SessionMagnet>,
}

impl TransferSession {
    /// A session is live for cleaning-due evaluation iff its status is
    /// "active" (case-insensitive) and it has no stop timestamp. The stop
    /// timestamp wins over the status text.
    pub fn is_live(&self) -> bool {
        self.status.eq_ignore_ascii_case("active") && self.stop_timestamp.is_none()
    }
}

/// A logged magnet-cleaning event, optionally tied to one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningRecord {
    pub magnet_id: i64,
    #[serde(default)]
    pub transfer_session_id: Option<i64>,
    pub cleaning_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    #[serde(rename = "MAGNET_CLEANING_REQUIRED")]
    MagnetCleaningRequired,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::MagnetCleaningRequired => "MAGNET_CLEANING_REQUIRED",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One due-for-cleaning alert, synthesized fresh on every evaluation.
///
/// Serialized camelCase to match the payload the alerting UI consumes;
/// `id` is deterministic per magnet/session pair so callers can
/// de-duplicate across repeated evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub magnet_id: i64,
    pub magnet_name: String,
    pub session_id: i64,
    pub source_godown_name: String,
    pub destination_bin_number: String,
    pub interval_number: i64,
    #[serde(rename = "cleaningIntervalHours")]
    pub cleaning_interval_secs: i64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_deserializes_with_wire_field_names() {
        let json = r#"{
            "id": 7,
            "status": "ACTIVE",
            "start_timestamp": "2025-10-29T12:00:00Z",
            "source_godown_id": 2,
            "destination_bin_id": 3,
            "session_magnets": [
                { "magnet_id": 5, "cleaning_interval_hours": 600,
                  "magnet": { "id": 5, "name": "Inlet magnet" } }
            ]
        }"#;

        let session: TransferSession = serde_json::from_str(json).expect("session parse");
        assert!(session.is_live());
        assert_eq!(session.magnet_id, None);
        assert_eq!(session.session_magnets.len(), 1);
        assert_eq!(session.session_magnets[0].cleaning_interval_secs, 600);
        assert_eq!(
            session.session_magnets[0].magnet.as_ref().map(|m| m.name.as_str()),
            Some("Inlet magnet")
        );
    }

    #[test]
    fn stop_timestamp_overrides_active_status() {
        let json = r#"{
            "id": 8,
            "status": "active",
            "start_timestamp": "2025-10-29T12:00:00Z",
            "stop_timestamp": "2025-10-29T12:00:08Z"
        }"#;

        let session: TransferSession = serde_json::from_str(json).expect("session parse");
        assert!(!session.is_live());
    }

    #[test]
    fn notification_serializes_to_ui_payload_shape() {
        let notification = Notification {
            id: "magnet-5-session-7".into(),
            kind: NotificationKind::MagnetCleaningRequired,
            magnet_id: 5,
            magnet_name: "Inlet magnet".into(),
            session_id: 7,
            source_godown_name: "Godown A".into(),
            destination_bin_number: "B-04".into(),
            interval_number: 2,
            cleaning_interval_secs: 600,
            message: "Magnet Inlet magnet requires cleaning".into(),
        };

        let value = serde_json::to_value(&notification).expect("serialize notification");
        assert_eq!(value["type"], "MAGNET_CLEANING_REQUIRED");
        assert_eq!(value["magnetId"], 5);
        assert_eq!(value["sourceGodownName"], "Godown A");
        assert_eq!(value["cleaningIntervalHours"], 600);
        assert_eq!(value["intervalNumber"], 2);
    }
}
