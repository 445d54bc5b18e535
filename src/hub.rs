//! The hub owns one canonical in-memory copy of every document slot.
//!
//! Constructed once at process start and shared by handle. Each slot sits
//! behind its own lock, so mutations of the same document type serialize
//! (read-normalize-mutate-write is never interleaved), while different
//! document types never block each other. Cross-document reads (dashboard,
//! journal snapshot) take one lock at a time and are best-effort, not
//! transactional.

use std::sync::{Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AxisResult, StateError};
use crate::paths::AxisPaths;
use crate::state::journal::{self, DailyFields, EntryKind, JournalDoc, WeeklyFields};
use crate::state::projects::{self, ProjectsDoc};
use crate::state::reality::{self, RealityDoc};
use crate::state::resources::{self, ResourcesDoc};
use crate::state::today::{self, TodayItem, TodayState};
use crate::state::week::{self, WeekState};
use crate::store::{Slot, SlotStore};

pub struct Hub {
    store: SlotStore,
    today: Mutex<TodayState>,
    week: Mutex<WeekState>,
    projects: Mutex<ProjectsDoc>,
    resources: Mutex<ResourcesDoc>,
    reality: Mutex<RealityDoc>,
    journal: Mutex<JournalDoc>,
}

/// A poisoned lock still guards a consistent document (every mutation
/// leaves the canonical shape in place before persisting), so take the
/// guard back instead of propagating the panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn current_date() -> NaiveDate {
    Local::now().date_naive()
}

/// Load one slot, constructing and persisting the built-in default when the
/// slot is absent or unparsable. This is the only path that writes a
/// default over a slot.
fn load_slot<T: Serialize>(
    store: &SlotStore,
    slot: Slot,
    normalize: impl FnOnce(&Value) -> AxisResult<T>,
    default: impl FnOnce() -> T,
) -> AxisResult<T> {
    match store.read(slot) {
        Some(raw) => normalize(&raw),
        None => {
            let doc = default();
            store.write(slot, &doc)?;
            tracing::info!(slot = %slot, "initialized slot with built-in default");
            Ok(doc)
        }
    }
}

impl Hub {
    /// Load every slot from the given data directory.
    pub fn open(paths: AxisPaths) -> AxisResult<Self> {
        paths.ensure_dirs()?;
        let store = SlotStore::new(paths);
        let on = current_date();

        let today = load_slot(
            &store,
            Slot::Today,
            |raw| Ok(today::normalize(Some(raw), on)),
            || today::default_doc(on),
        )?;
        let week = load_slot(
            &store,
            Slot::Week,
            |raw| Ok(week::normalize(Some(raw), on)),
            || week::default_doc(on),
        )?;
        let projects = load_slot(
            &store,
            Slot::Projects,
            |raw| projects::normalize(Some(raw)).map_err(Into::into),
            projects::default_doc,
        )?;
        let resources = load_slot(
            &store,
            Slot::Resources,
            |raw| resources::normalize(Some(raw)).map_err(Into::into),
            resources::default_doc,
        )?;
        let reality = load_slot(
            &store,
            Slot::Reality,
            |raw| Ok(reality::normalize(Some(raw))),
            reality::default_doc,
        )?;
        let journal = load_slot(
            &store,
            Slot::Journal,
            |raw| Ok(journal::normalize(Some(raw))),
            JournalDoc::default,
        )?;

        tracing::info!(data_dir = %store.paths().data_dir.display(), "state hub loaded");

        Ok(Self {
            store,
            today: Mutex::new(today),
            week: Mutex::new(week),
            projects: Mutex::new(projects),
            resources: Mutex::new(resources),
            reality: Mutex::new(reality),
            journal: Mutex::new(journal),
        })
    }

    pub fn paths(&self) -> &AxisPaths {
        self.store.paths()
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Today document. Re-normalized on every read so the daily rollover
    /// applies without a background job; nothing is persisted here.
    pub fn today(&self) -> TodayState {
        let mut guard = lock(&self.today);
        guard.roll_over(current_date());
        guard.clone()
    }

    /// Week document. Canonical in memory; the stored week id is kept even
    /// across a week boundary (only an absent or blank one defaults).
    pub fn week(&self) -> WeekState {
        lock(&self.week).clone()
    }

    pub fn projects(&self) -> ProjectsDoc {
        lock(&self.projects).clone()
    }

    pub fn resources(&self) -> ResourcesDoc {
        lock(&self.resources).clone()
    }

    pub fn reality(&self) -> RealityDoc {
        lock(&self.reality).clone()
    }

    // ── Today mutations ───────────────────────────────────────────────────

    /// Replace the top3 from free text. Clears every `done` flag.
    pub fn set_top3(&self, texts: &[String]) -> AxisResult<TodayState> {
        let mut guard = lock(&self.today);
        guard.roll_over(current_date());
        guard.replace_top3(texts);
        self.store.write(Slot::Today, &*guard)?;
        Ok(guard.clone())
    }

    /// Set the `done` flag on one top3 item.
    pub fn set_top3_done(&self, item_id: &str, done: bool) -> AxisResult<TodayItem> {
        let mut guard = lock(&self.today);
        guard.roll_over(current_date());
        let item = guard.set_done(item_id, done)?;
        self.store.write(Slot::Today, &*guard)?;
        Ok(item)
    }

    /// Legacy toggle route: `kind` selects the top3/legacy-outcomes path or
    /// the opaque actions list.
    pub fn set_today_done_legacy(
        &self,
        kind: &str,
        item_id: &str,
        done: bool,
    ) -> AxisResult<Value> {
        let mut guard = lock(&self.today);
        guard.roll_over(current_date());
        let item = match kind {
            "outcomes" => guard.set_done_legacy_outcomes(item_id, done)?,
            "actions" => guard.set_done_actions(item_id, done)?,
            _ => {
                return Err(StateError::UnknownKind {
                    kind: kind.to_string(),
                }
                .into());
            }
        };
        self.store.write(Slot::Today, &*guard)?;
        Ok(item)
    }

    // ── Week mutations ────────────────────────────────────────────────────

    pub fn set_week_outcomes(&self, texts: &[String]) -> AxisResult<WeekState> {
        let mut guard = lock(&self.week);
        guard.replace_outcomes(texts);
        self.store.write(Slot::Week, &*guard)?;
        Ok(guard.clone())
    }

    pub fn set_week_blockers(&self, texts: &[String]) -> AxisResult<WeekState> {
        let mut guard = lock(&self.week);
        guard.replace_blockers(texts);
        self.store.write(Slot::Week, &*guard)?;
        Ok(guard.clone())
    }

    /// Full week replacement through the normalizer; this is how the
    /// frontend edits `mode` and the anchors.
    pub fn replace_week(&self, raw: &Value) -> AxisResult<WeekState> {
        let doc = week::normalize(Some(raw), current_date());
        let mut guard = lock(&self.week);
        *guard = doc;
        self.store.write(Slot::Week, &*guard)?;
        Ok(guard.clone())
    }

    // ── Projects / resources / reality mutations ─────────────────────────

    /// Full projects replacement. Rejected wholesale (memory and file both
    /// untouched) when more than [`projects::MAX_ACTIVE`] are active.
    pub fn replace_projects(&self, raw: &Value) -> AxisResult<ProjectsDoc> {
        let doc = projects::normalize(Some(raw))?;
        if doc.active_count() > projects::MAX_ACTIVE {
            return Err(StateError::TooManyActive {
                limit: projects::MAX_ACTIVE,
            }
            .into());
        }
        let mut guard = lock(&self.projects);
        *guard = doc;
        self.store.write(Slot::Projects, &*guard)?;
        Ok(guard.clone())
    }

    pub fn replace_resources(&self, raw: &Value) -> AxisResult<ResourcesDoc> {
        let doc = resources::normalize(Some(raw))?;
        let mut guard = lock(&self.resources);
        *guard = doc;
        self.store.write(Slot::Resources, &*guard)?;
        Ok(guard.clone())
    }

    pub fn replace_reality(&self, raw: &Value) -> AxisResult<RealityDoc> {
        let doc = reality::normalize(Some(raw));
        let mut guard = lock(&self.reality);
        *guard = doc;
        self.store.write(Slot::Reality, &*guard)?;
        Ok(guard.clone())
    }

    // ── Journal ───────────────────────────────────────────────────────────

    /// Best-effort frozen copy of Today/Week/Projects, one lock at a time.
    fn snapshot(&self) -> Value {
        let today = self.today();
        let week = self.week();
        let projects = self.projects();
        journal::snapshot(&today, &week, &projects)
    }

    pub fn journal_append_daily(&self, fields: &DailyFields) -> AxisResult<Value> {
        let snapshot = self.snapshot();
        let mut guard = lock(&self.journal);
        let entry = guard.append_daily(fields, snapshot);
        self.store.write(Slot::Journal, &*guard)?;
        tracing::debug!(kind = "daily", "journal entry appended");
        Ok(entry)
    }

    pub fn journal_append_weekly(&self, fields: &WeeklyFields) -> AxisResult<Value> {
        let snapshot = self.snapshot();
        let mut guard = lock(&self.journal);
        let entry = guard.append_weekly(fields, snapshot);
        self.store.write(Slot::Journal, &*guard)?;
        tracing::debug!(kind = "weekly", "journal entry appended");
        Ok(entry)
    }

    pub fn journal_list(&self, limit: Option<usize>, kind: Option<EntryKind>) -> Vec<Value> {
        lock(&self.journal).list(limit, kind)
    }

    pub fn journal_entry(&self, id: &str) -> AxisResult<Value> {
        Ok(lock(&self.journal).get(id)?.clone())
    }

    pub fn journal_patch(&self, id: &str, patch: &Map<String, Value>) -> AxisResult<Value> {
        let mut guard = lock(&self.journal);
        let entry = guard.patch(id, patch)?;
        self.store.write(Slot::Journal, &*guard)?;
        Ok(entry)
    }

    pub fn journal_delete(&self, id: &str) -> AxisResult<(String, String)> {
        let mut guard = lock(&self.journal);
        let removed = guard.remove(id)?;
        self.store.write(Slot::Journal, &*guard)?;
        Ok(removed)
    }

    /// Number of journal entries currently held.
    pub fn journal_len(&self) -> usize {
        lock(&self.journal).entries.len()
    }

    /// The whole journal document.
    pub fn journal(&self) -> JournalDoc {
        lock(&self.journal).clone()
    }
}
