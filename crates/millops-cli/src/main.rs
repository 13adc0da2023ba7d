// crates/millops-cli/src/main.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};
use millops_core::{should_show_notification_for_session, Snapshot};

/// A CLI for the mill precleaning compliance checks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Evaluates a backend snapshot and lists magnets due for cleaning.
    Notifications {
        /// Snapshot JSON file (sessions, cleaning records, reference rows).
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Evaluation instant (RFC 3339); defaults to the current time.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Emit the notification payloads as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Checks a single legacy-bound session for an overdue magnet.
    CheckSession {
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Transfer session id to check.
        #[arg(long)]
        session: i64,
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Notifications { snapshot, at, json } => {
            let snapshot = load_snapshot(&snapshot)?;
            let now = at.unwrap_or_else(Utc::now);
            handle_notifications(&snapshot, now, json)?;
        }
        Commands::CheckSession { snapshot, session, at } => {
            let snapshot = load_snapshot(&snapshot)?;
            let now = at.unwrap_or_else(Utc::now);
            handle_check_session(&snapshot, session, now)?;
        }
    }

    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let snapshot = Snapshot::load(path)
        .with_context(|| format!("failed to load snapshot file {}", path.display()))?;
    if snapshot.is_empty() {
        eprintln!("WARNING: snapshot {} is empty", path.display());
    }
    Ok(snapshot)
}

fn handle_notifications(snapshot: &Snapshot, now: DateTime<Utc>, json: bool) -> Result<()> {
    let notifications = snapshot.notifications(now);

    if json {
        println!("{}", serde_json::to_string_pretty(&notifications)?);
        return Ok(());
    }

    if notifications.is_empty() {
        println!("No magnets due for cleaning at {now}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Magnet",
        "Session",
        "Interval",
        "Source godown",
        "Destination bin",
    ]);
    for notification in &notifications {
        table.add_row(vec![
            notification.magnet_name.clone(),
            notification.session_id.to_string(),
            notification.interval_number.to_string(),
            notification.source_godown_name.clone(),
            notification.destination_bin_number.clone(),
        ]);
    }
    println!("{table}");
    println!(
        "\n{} magnet(s) due for cleaning at {now}.",
        notifications.len()
    );

    Ok(())
}

fn handle_check_session(snapshot: &Snapshot, session_id: i64, now: DateTime<Utc>) -> Result<()> {
    let session = snapshot.session(session_id)?;
    let due = should_show_notification_for_session(session, &snapshot.cleaning_records, now);

    if due {
        println!("Session {session_id}: magnet cleaning is due at {now}.");
    } else {
        println!("Session {session_id}: no cleaning due at {now}.");
    }

    Ok(())
}
