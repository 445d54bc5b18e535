//! Journal document: append-only daily and weekly review entries.
//!
//! Entries are heterogeneous by `type` and stored as raw JSON objects; the
//! normalizer only guarantees `entries` is a list of objects. Identity
//! fields (`id`, `type`, `created_at`) and the state snapshot taken at
//! creation are immutable; only the type-specific content fields accept
//! patches.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::error::StateError;
use crate::state::projects::ProjectsDoc;
use crate::state::raw;
use crate::state::today::TodayState;
use crate::state::week::WeekState;

/// Default number of entries returned by a list.
pub const DEFAULT_LIMIT: usize = 50;

/// Upper bound on a caller-supplied list limit.
pub const MAX_LIMIT: usize = 200;

/// Journal entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Daily,
    Weekly,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Daily => "daily",
            EntryKind::Weekly => "weekly",
        }
    }

    pub fn parse(s: &str) -> Option<EntryKind> {
        match s {
            "daily" => Some(EntryKind::Daily),
            "weekly" => Some(EntryKind::Weekly),
            _ => None,
        }
    }
}

/// Content fields of a daily entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyFields {
    #[serde(default)]
    pub wins: Vec<String>,
    #[serde(default)]
    pub miss: String,
    #[serde(default)]
    pub fix: String,
}

/// Content fields of a weekly entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeeklyFields {
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub constraint: String,
    #[serde(default)]
    pub decision: String,
    #[serde(default)]
    pub next_focus: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalDoc {
    pub entries: Vec<Value>,
}

/// Normalize a raw document: `entries` coerced to a list, non-object
/// entries dropped, per-entry schema left alone.
pub fn normalize(raw_doc: Option<&Value>) -> JournalDoc {
    let doc = raw::document(raw_doc);
    let entries = raw::list_field(doc, "entries")
        .iter()
        .filter(|entry| entry.is_object())
        .cloned()
        .collect();
    JournalDoc { entries }
}

/// Frozen cross-document state embedded in an entry at creation time.
pub fn snapshot(today: &TodayState, week: &WeekState, projects: &ProjectsDoc) -> Value {
    let active: Vec<&str> = projects.active().map(|p| p.key.as_str()).collect();
    json!({
        "today": { "date": today.date, "top3": today.top3 },
        "week": { "week_id": week.week_id, "mode": week.mode, "outcomes": week.outcomes },
        "projects": { "active": active },
    })
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

fn entry_kind(entry: &Value) -> &str {
    entry.get("type").and_then(Value::as_str).unwrap_or("")
}

fn trim_texts(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().map(raw::coerce_str).collect())
        .unwrap_or_default()
}

impl JournalDoc {
    /// Append a fresh daily entry. The snapshot is frozen at creation;
    /// later state mutations never change it.
    pub fn append_daily(&mut self, fields: &DailyFields, snapshot: Value) -> Value {
        let entry = json!({
            "id": Uuid::new_v4().to_string(),
            "type": EntryKind::Daily.as_str(),
            "created_at": Utc::now().to_rfc3339(),
            "wins": trim_texts(&fields.wins),
            "miss": fields.miss.trim(),
            "fix": fields.fix.trim(),
            "snapshot": snapshot,
        });
        self.entries.push(entry.clone());
        entry
    }

    /// Append a fresh weekly entry.
    pub fn append_weekly(&mut self, fields: &WeeklyFields, snapshot: Value) -> Value {
        let entry = json!({
            "id": Uuid::new_v4().to_string(),
            "type": EntryKind::Weekly.as_str(),
            "created_at": Utc::now().to_rfc3339(),
            "outcomes": trim_texts(&fields.outcomes),
            "constraint": fields.constraint.trim(),
            "decision": fields.decision.trim(),
            "next_focus": fields.next_focus.trim(),
            "snapshot": snapshot,
        });
        self.entries.push(entry.clone());
        entry
    }

    /// Entries newest-first, optionally filtered by kind, capped at `limit`
    /// (clamped to 1..=[`MAX_LIMIT`], default [`DEFAULT_LIMIT`]).
    pub fn list(&self, limit: Option<usize>, kind: Option<EntryKind>) -> Vec<Value> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        self.entries
            .iter()
            .rev()
            .filter(|entry| match kind {
                Some(k) => entry_kind(entry) == k.as_str(),
                None => true,
            })
            .take(limit)
            .cloned()
            .collect()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Result<&Value, StateError> {
        self.entries
            .iter()
            .find(|entry| entry_id(entry) == Some(id))
            .ok_or_else(|| StateError::EntryNotFound { id: id.to_string() })
    }

    /// Patch the type-legal content fields of an entry.
    ///
    /// Daily entries accept `wins`/`miss`/`fix`; weekly entries accept
    /// `outcomes`/`constraint`/`decision`/`next_focus`. Every accepted
    /// field is re-trimmed exactly as at creation. Payload fields outside
    /// the entry's type, and the identity fields, are ignored.
    pub fn patch(&mut self, id: &str, patch: &Map<String, Value>) -> Result<Value, StateError> {
        let Some(pos) = self
            .entries
            .iter()
            .position(|entry| entry_id(entry) == Some(id))
        else {
            return Err(StateError::EntryNotFound { id: id.to_string() });
        };

        let entry = &mut self.entries[pos];
        let legal: &[&str] = match EntryKind::parse(entry_kind(entry)) {
            Some(EntryKind::Daily) => &["wins", "miss", "fix"],
            Some(EntryKind::Weekly) => &["outcomes", "constraint", "decision", "next_focus"],
            None => &[],
        };

        if let Some(obj) = entry.as_object_mut() {
            for field in legal {
                let Some(value) = patch.get(*field) else {
                    continue;
                };
                let cleaned = match *field {
                    "wins" | "outcomes" => Value::from(trim_texts(&string_list(value))),
                    _ => Value::String(raw::coerce_str(value).trim().to_string()),
                };
                obj.insert((*field).to_string(), cleaned);
            }
        }
        Ok(entry.clone())
    }

    /// Remove an entry by id. Returns the removed entry's id and type for
    /// confirmation.
    pub fn remove(&mut self, id: &str) -> Result<(String, String), StateError> {
        let Some(pos) = self
            .entries
            .iter()
            .position(|entry| entry_id(entry) == Some(id))
        else {
            return Err(StateError::EntryNotFound { id: id.to_string() });
        };
        let entry = self.entries.remove(pos);
        Ok((id.to_string(), entry_kind(&entry).to_string()))
    }
}
