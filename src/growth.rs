// File: src/growth.rs
//! First-seen bookkeeping for learned items.
//!
//! Every run registers keys the state has not seen before, appends one
//! snapshot of the category counts and reports what was added in the last day
//! and week. First-seen timestamps are never rewritten, so an item that drops
//! out of the profile and comes back keeps its original date.

use crate::core::types::{Category, PerCategory, Profile};
use crate::error::StoreError;
use crate::persistence::{load_growth_state, save_growth_state, Store};
use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Persisted as `viewer_state.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthState {
    /// Per category: key -> ISO-8601 first-seen timestamp.
    #[serde(default)]
    pub entries: PerCategory<BTreeMap<String, String>>,
    #[serde(default)]
    pub snapshots: Vec<Snapshot>,
    #[serde(default)]
    pub last_run: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ts: String,
    pub counts: SnapshotCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotCounts {
    #[serde(flatten)]
    pub categories: PerCategory<usize>,
    #[serde(default)]
    pub total: usize,
}

/// What one tracker run observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthReport {
    pub new_since_last_run: PerCategory<Vec<String>>,
    pub added_today: PerCategory<usize>,
    pub added_this_week: PerCategory<usize>,
    /// Current total minus the total of the oldest snapshot.
    pub growth_since_first_tracking: i64,
    pub snapshot_count: usize,
    /// `last_run` before this run, if any.
    pub previous_run: Option<String>,
    pub state_path: PathBuf,
}

impl GrowthReport {
    pub fn new_item_count(&self) -> usize {
        Category::ALL
            .iter()
            .map(|&c| self.new_since_last_run.get(c).len())
            .sum()
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parses a stored timestamp. Accepts RFC 3339 and naive ISO-8601 (read as
/// UTC); anything else is `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Updates `state` from `profile` as of `now` and reports the run.
///
/// Steps, in order: register unseen keys, count first-seen timestamps inside
/// the 1 and 7 day windows, compare the total against the oldest snapshot,
/// append a new snapshot and stamp `last_run`.
pub fn track(profile: &Profile, state: &mut GrowthState, now: DateTime<Utc>, state_path: &Path) -> GrowthReport {
    let stamp = format_timestamp(now);

    let new_since_last_run = PerCategory::from_fn(|category| {
        let seen = state.entries.get_mut(category);
        let mut fresh = Vec::new();
        for key in profile.keys(category) {
            if !seen.contains_key(key) {
                seen.insert(key.to_string(), stamp.clone());
                fresh.push(key.to_string());
            }
        }
        fresh
    });

    let added_today = added_within(state, now, Duration::days(1));
    let added_this_week = added_within(state, now, Duration::days(7));

    let counts = PerCategory::from_fn(|category| profile.count(category));
    let total = counts.sum();
    let baseline = state.snapshots.first().map_or(total, |s| s.counts.total);
    let growth_since_first_tracking = total as i64 - baseline as i64;

    state.snapshots.push(Snapshot {
        ts: stamp.clone(),
        counts: SnapshotCounts { categories: counts, total },
    });
    let previous_run = state.last_run.replace(stamp);

    GrowthReport {
        new_since_last_run,
        added_today,
        added_this_week,
        growth_since_first_tracking,
        snapshot_count: state.snapshots.len(),
        previous_run,
        state_path: state_path.to_path_buf(),
    }
}

/// Per category, how many first-seen timestamps fall on or after `now - window`.
/// Unparseable timestamps count as `now`.
fn added_within(state: &GrowthState, now: DateTime<Utc>, window: Duration) -> PerCategory<usize> {
    let cutoff = now - window;
    PerCategory::from_fn(|category| {
        state
            .entries
            .get(category)
            .values()
            .filter(|raw| {
                let ts = parse_timestamp(raw).unwrap_or_else(|| {
                    warn!("unreadable timestamp {:?} in viewer state, treating as now", raw);
                    now
                });
                ts >= cutoff
            })
            .count()
    })
}

/// Runs the tracker against a store: load state, track, write state back.
pub struct GrowthTracker<S: Store> {
    store: S,
    state_path: PathBuf,
}

impl<S: Store> GrowthTracker<S> {
    pub fn new(store: S, state_path: impl Into<PathBuf>) -> Self {
        Self { store, state_path: state_path.into() }
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn run(&self, profile: &Profile, now: DateTime<Utc>) -> Result<GrowthReport, StoreError> {
        let mut state = load_growth_state(&self.store, &self.state_path);
        let report = track(profile, &mut state, now, &self.state_path);
        debug!(
            "growth: {} new item(s), snapshot #{}",
            report.new_item_count(),
            report.snapshot_count
        );
        save_growth_state(&self.store, &self.state_path, &state)?;
        Ok(report)
    }
}
