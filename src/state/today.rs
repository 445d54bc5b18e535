//! Today document: the day's top-3 tasks with a daily completion rollover.
//!
//! The canonical shape also carries three legacy lists (`outcomes`,
//! `actions`, `blockers`) as opaque passthrough for older frontends. They
//! are coerced to lists but never validated item by item; the backend
//! assigns them no semantics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::StateError;
use crate::state::fixed3::{self, PLACEHOLDER, slot_id};
use crate::state::raw;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayItem {
    pub id: String,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayState {
    pub date: String,
    pub top3: Vec<TodayItem>,
    #[serde(default)]
    pub outcomes: Vec<Value>,
    #[serde(default)]
    pub actions: Vec<Value>,
    #[serde(default)]
    pub blockers: Vec<Value>,
}

/// Built-in first-run document.
pub fn default_doc(on: NaiveDate) -> TodayState {
    let seed = |id: &str, text: &str| TodayItem {
        id: id.to_string(),
        text: text.to_string(),
        done: false,
    };
    TodayState {
        date: on.to_string(),
        top3: vec![
            seed("t1", "Hardest task first"),
            seed("t2", "Second needle-mover"),
            seed("t3", "Third needle-mover"),
        ],
        outcomes: Vec::new(),
        actions: Vec::new(),
        blockers: Vec::new(),
    }
}

/// Normalize a raw document to canonical shape for the given date.
///
/// `top3` resolves from an existing `top3` list, else from a non-empty
/// legacy `outcomes` list mapped positionally, else from the built-in
/// default. A stored date other than `on` clears every `done` flag (texts
/// are kept), and `date` always comes out as `on`.
pub fn normalize(raw_doc: Option<&Value>, on: NaiveDate) -> TodayState {
    let doc = raw::document(raw_doc);
    let today = on.to_string();
    let stored_date = raw::text_field(doc, "date");

    let mut top3 = match doc.get("top3").and_then(Value::as_array) {
        Some(items) => normalize_items(items),
        None => {
            let legacy = raw::list_field(doc, "outcomes");
            if legacy.is_empty() {
                default_doc(on).top3
            } else {
                normalize_items(legacy)
            }
        }
    };

    if stored_date != today {
        for item in &mut top3 {
            item.done = false;
        }
    }

    TodayState {
        date: today,
        top3,
        outcomes: raw::list_field(doc, "outcomes").to_vec(),
        actions: raw::list_field(doc, "actions").to_vec(),
        blockers: raw::list_field(doc, "blockers").to_vec(),
    }
}

fn normalize_items(items: &[Value]) -> Vec<TodayItem> {
    let parsed = items
        .iter()
        .take(fixed3::FIXED_LEN)
        .enumerate()
        .map(|(i, item)| {
            let obj = raw::entry(item);
            let text = raw::text_field(obj, "text");
            TodayItem {
                id: raw::id_field(obj, "id").unwrap_or_else(|| slot_id("t", i)),
                text: if text.is_empty() {
                    PLACEHOLDER.to_string()
                } else {
                    text
                },
                done: raw::bool_field(obj, "done"),
            }
        })
        .collect();
    fixed3::pad_to_three(parsed, |i| TodayItem {
        id: slot_id("t", i),
        text: PLACEHOLDER.to_string(),
        done: false,
    })
}

impl TodayState {
    /// Re-apply the date rollover to an already-canonical document.
    pub fn roll_over(&mut self, on: NaiveDate) {
        let today = on.to_string();
        if self.date != today {
            tracing::info!(from = %self.date, to = %today, "daily rollover, clearing done flags");
            for item in &mut self.top3 {
                item.done = false;
            }
            self.date = today;
        }
    }

    /// Replace the whole top3 from free text. Editing text clears completion
    /// state: every `done` comes back false.
    pub fn replace_top3(&mut self, texts: &[String]) {
        self.top3 = fixed3::three_texts(texts)
            .into_iter()
            .enumerate()
            .map(|(i, text)| TodayItem {
                id: slot_id("t", i),
                text,
                done: false,
            })
            .collect();
    }

    /// Set the `done` flag on the top3 item with the given id.
    pub fn set_done(&mut self, item_id: &str, done: bool) -> Result<TodayItem, StateError> {
        match self.top3.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.done = done;
                Ok(item.clone())
            }
            None => Err(StateError::ItemNotFound {
                id: item_id.to_string(),
            }),
        }
    }

    /// Legacy toggle path: the canonical top3 first, then the opaque legacy
    /// `outcomes` list.
    pub fn set_done_legacy_outcomes(
        &mut self,
        item_id: &str,
        done: bool,
    ) -> Result<Value, StateError> {
        if let Ok(item) = self.set_done(item_id, done) {
            return Ok(json!({"id": item.id, "text": item.text, "done": item.done}));
        }
        set_done_in(&mut self.outcomes, item_id, done)
    }

    /// Legacy toggle on the opaque `actions` list.
    pub fn set_done_actions(&mut self, item_id: &str, done: bool) -> Result<Value, StateError> {
        set_done_in(&mut self.actions, item_id, done)
    }
}

fn set_done_in(list: &mut [Value], item_id: &str, done: bool) -> Result<Value, StateError> {
    for item in list.iter_mut() {
        if let Some(obj) = item.as_object_mut() {
            if obj.get("id").and_then(Value::as_str) == Some(item_id) {
                obj.insert("done".to_string(), Value::Bool(done));
                return Ok(item.clone());
            }
        }
    }
    Err(StateError::ItemNotFound {
        id: item_id.to_string(),
    })
}
