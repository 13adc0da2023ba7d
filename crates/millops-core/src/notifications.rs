// crates/millops-core/src/notifications.rs
//
// Cleaning-due evaluation for magnets on active godown-to-bin transfers.
//
// Time since session start is split into half-open intervals of the
// configured cleaning interval: interval k covers [start + k*I, start +
// (k+1)*I). Interval 0 is a grace window in which nothing is ever due. For
// any later interval the magnet is due unless a cleaning record for the
// same magnet and session exists at or after the current interval's start
// boundary.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::ReferenceCatalog;
use crate::types::{
    Bin, CleaningRecord, Godown, Magnet, Notification, NotificationKind, TransferSession,
};

/// One magnet obligation on a session, normalized from either binding
/// shape so the interval math runs through a single code path.
struct MagnetRequirement<'a> {
    magnet_id: i64,
    interval_secs: i64,
    embedded: Option<&'a Magnet>,
}

/// Flatten a session's magnet binding into requirements.
///
/// A non-empty `session_magnets` list wins; otherwise the legacy
/// session-level pair applies. A session with neither contributes nothing.
fn magnet_requirements(session: &TransferSession) -> Vec<MagnetRequirement<'_>> {
    if !session.session_magnets.is_empty() {
        return session
            .session_magnets
            .iter()
            .map(|entry| MagnetRequirement {
                magnet_id: entry.magnet_id,
                interval_secs: entry.cleaning_interval_secs,
                embedded: entry.magnet.as_ref(),
            })
            .collect();
    }

    match (session.magnet_id, session.cleaning_interval_secs) {
        (Some(magnet_id), Some(interval_secs)) => vec![MagnetRequirement {
            magnet_id,
            interval_secs,
            embedded: None,
        }],
        (Some(magnet_id), None) => {
            warn!(
                session_id = session.id,
                magnet_id, "session magnet has no cleaning interval, skipping"
            );
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn intervals_passed(start: DateTime<Utc>, now: DateTime<Utc>, interval_secs: i64) -> i64 {
    let elapsed = now.signed_duration_since(start).num_seconds();
    if elapsed < 0 {
        return 0;
    }
    elapsed / interval_secs
}

fn interval_start(start: DateTime<Utc>, interval_secs: i64, interval_number: i64) -> DateTime<Utc> {
    start + Duration::seconds(interval_secs * interval_number)
}

/// Returns the current interval number if the magnet is overdue on this
/// session, `None` when it is in grace, already cleaned for the current
/// interval, or carries an unusable interval configuration.
fn due_interval(
    session: &TransferSession,
    magnet_id: i64,
    interval_secs: i64,
    cleaning_records: &[CleaningRecord],
    now: DateTime<Utc>,
) -> Option<i64> {
    if interval_secs <= 0 {
        warn!(
            session_id = session.id,
            magnet_id, interval_secs, "non-positive cleaning interval, skipping"
        );
        return None;
    }

    let passed = intervals_passed(session.start_timestamp, now, interval_secs);
    if passed == 0 {
        return None;
    }

    let current_start = interval_start(session.start_timestamp, interval_secs, passed);
    let cleaned = cleaning_records.iter().any(|record| {
        record.magnet_id == magnet_id
            && record.transfer_session_id == Some(session.id)
            && record.cleaning_timestamp >= current_start
    });

    if cleaned {
        None
    } else {
        Some(passed)
    }
}

/// Evaluate every live session against the cleaning log and return one
/// notification per overdue magnet/session pair, in session order then
/// `session_magnets` order.
///
/// `route_mappings` is accepted for call-shape compatibility with older
/// callers and is never inspected. The clock is an explicit argument;
/// repeated calls with the same inputs yield the same output.
pub fn calculate_magnet_notifications(
    sessions: &[TransferSession],
    cleaning_records: &[CleaningRecord],
    _route_mappings: &[Value],
    magnets: &[Magnet],
    godowns: &[Godown],
    bins: &[Bin],
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let catalog = ReferenceCatalog::new(magnets, godowns, bins);
    let mut notifications = Vec::new();

    for session in sessions.iter().filter(|s| s.is_live()) {
        for requirement in magnet_requirements(session) {
            let Some(interval_number) = due_interval(
                session,
                requirement.magnet_id,
                requirement.interval_secs,
                cleaning_records,
                now,
            ) else {
                continue;
            };

            // Embedded magnet rows win over the reference list; any pair
            // whose labels cannot be resolved is dropped rather than
            // emitted half-populated.
            let Some(magnet) = requirement
                .embedded
                .or_else(|| catalog.magnet(requirement.magnet_id))
            else {
                debug!(
                    session_id = session.id,
                    magnet_id = requirement.magnet_id,
                    "magnet not resolvable, suppressing notification"
                );
                continue;
            };
            let Some(godown) = session.source_godown_id.and_then(|id| catalog.godown(id)) else {
                debug!(
                    session_id = session.id,
                    godown_id = ?session.source_godown_id,
                    "source godown not resolvable, suppressing notification"
                );
                continue;
            };
            let Some(bin) = session.destination_bin_id.and_then(|id| catalog.bin(id)) else {
                debug!(
                    session_id = session.id,
                    bin_id = ?session.destination_bin_id,
                    "destination bin not resolvable, suppressing notification"
                );
                continue;
            };

            notifications.push(Notification {
                id: format!("magnet-{}-session-{}", requirement.magnet_id, session.id),
                kind: NotificationKind::MagnetCleaningRequired,
                magnet_id: requirement.magnet_id,
                magnet_name: magnet.name.clone(),
                session_id: session.id,
                source_godown_name: godown.name.clone(),
                destination_bin_number: bin.bin_number.clone(),
                interval_number,
                cleaning_interval_secs: requirement.interval_secs,
                message: format!(
                    "Magnet {} requires cleaning for the transfer from {} to bin {} (interval {})",
                    magnet.name, godown.name, bin.bin_number, interval_number
                ),
            });
        }
    }

    notifications
}

/// Single-session yes/no query over the legacy single-magnet binding.
///
/// Mirrors the legacy branch of [`calculate_magnet_notifications`] without
/// touching reference data: liveness, grace interval, and boundary
/// semantics are identical.
pub fn should_show_notification_for_session(
    session: &TransferSession,
    cleaning_records: &[CleaningRecord],
    now: DateTime<Utc>,
) -> bool {
    if !session.is_live() {
        return false;
    }
    let (Some(magnet_id), Some(interval_secs)) =
        (session.magnet_id, session.cleaning_interval_secs)
    else {
        return false;
    };

    due_interval(session, magnet_id, interval_secs, cleaning_records, now).is_some()
}
