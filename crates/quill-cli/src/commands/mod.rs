//! Command handlers

pub mod blog;
pub mod config;
pub mod ebook;
pub mod generate;
pub mod social;
pub mod status;

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use quill_core::{Entity, SyncAdapter, SyncError};
use uuid::Uuid;

use crate::output::Output;

/// Mirror a create or update to the remote backend.
///
/// The local mutation is already committed; a remote failure is shown as a
/// warning and never interrupts the command.
pub(crate) async fn mirror_upsert<T: Entity>(adapter: &SyncAdapter, entity: &T, output: &Output) {
    if let Err(e) = adapter.mirror_upsert(entity).await {
        warn_sync(&e, output);
    }
}

/// Mirror a delete to the remote backend, warning on failure
pub(crate) async fn mirror_delete<T: Entity>(adapter: &SyncAdapter, id: Uuid, output: &Output) {
    if let Err(e) = adapter.mirror_delete::<T>(id).await {
        warn_sync(&e, output);
    }
}

fn warn_sync(error: &SyncError, output: &Output) {
    if !output.is_quiet() {
        eprintln!("⚠ Remote sync failed: {}", error);
        eprintln!("  Your change is saved locally.");
    }
}

/// Resolve an id argument (full UUID or unambiguous prefix) against the
/// given candidates. Labels are shown when a prefix is ambiguous.
pub(crate) fn resolve_id<'a, I>(input: &str, candidates: I, kind: &str) -> Result<Uuid>
where
    I: IntoIterator<Item = (Uuid, &'a str)>,
{
    // Try full UUID first
    if let Ok(uuid) = Uuid::parse_str(input) {
        return Ok(uuid);
    }

    // Try prefix match
    let matches: Vec<(Uuid, &str)> = candidates
        .into_iter()
        .filter(|(id, _)| id.to_string().starts_with(input))
        .collect();

    match matches.len() {
        0 => bail!("No {} found matching: {}", kind, input),
        1 => Ok(matches[0].0),
        _ => {
            eprintln!("Multiple {}s match '{}':", kind, input);
            for (id, label) in &matches {
                eprintln!("  {} - {}", id, label);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Parse a schedule argument.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM` (UTC), or a bare `YYYY-MM-DD`
/// (midnight UTC).
pub(crate) fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    bail!(
        "Invalid date '{}'. Use YYYY-MM-DD, 'YYYY-MM-DD HH:MM', or RFC 3339.",
        input
    )
}

/// Split a comma-separated flag value into trimmed, non-empty items
pub(crate) fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
