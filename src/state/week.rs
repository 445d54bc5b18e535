//! Week document: weekly outcomes, blockers, mode, and anchor habits.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::fixed3::{self, PLACEHOLDER, slot_id};
use crate::state::raw;

/// Default week mode; the frontend's other mode is `"LOCKED IN"`.
pub const MODE_OFF: &str = "OFF";

/// Current ISO-calendar week id, e.g. `2026-W32`.
pub fn iso_week_id(on: NaiveDate) -> String {
    let iso = on.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSlot {
    pub id: String,
    pub text: String,
}

/// The four weekly anchor habits, each an independent boolean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anchors {
    #[serde(default)]
    pub sleep_5_nights: bool,
    #[serde(default)]
    pub training_4_sessions: bool,
    #[serde(default)]
    pub daily_top3_5_days: bool,
    #[serde(default)]
    pub ai_daily_exposure: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekState {
    pub week_id: String,
    pub mode: String,
    pub outcomes: Vec<WeekSlot>,
    pub blockers: Vec<WeekSlot>,
    pub anchors: Anchors,
}

/// Built-in first-run document.
pub fn default_doc(on: NaiveDate) -> WeekState {
    let slot = |id: &str, text: &str| WeekSlot {
        id: id.to_string(),
        text: text.to_string(),
    };
    WeekState {
        week_id: iso_week_id(on),
        mode: MODE_OFF.to_string(),
        outcomes: vec![
            slot("w1", "Income/Career: ______"),
            slot("w2", "AI/Leverage: ______"),
            slot("w3", "Health/Stability: ______"),
        ],
        blockers: vec![
            slot("b1", PLACEHOLDER),
            slot("b2", PLACEHOLDER),
            slot("b3", PLACEHOLDER),
        ],
        anchors: Anchors::default(),
    }
}

/// Normalize a raw document to canonical shape for the given date.
///
/// `week_id` defaults to the current ISO week id when missing or blank;
/// `mode` defaults to [`MODE_OFF`]; outcomes and blockers are padded and
/// truncated to exactly three slots independently; each anchor coerces to
/// a boolean on its own.
pub fn normalize(raw_doc: Option<&Value>, on: NaiveDate) -> WeekState {
    let doc = raw::document(raw_doc);

    let week_id = or_default(raw::text_field(doc, "week_id"), || iso_week_id(on));
    let mode = or_default(raw::text_field(doc, "mode"), || MODE_OFF.to_string());

    let anchors_obj = raw::document(doc.get("anchors"));
    let anchors = Anchors {
        sleep_5_nights: raw::bool_field(anchors_obj, "sleep_5_nights"),
        training_4_sessions: raw::bool_field(anchors_obj, "training_4_sessions"),
        daily_top3_5_days: raw::bool_field(anchors_obj, "daily_top3_5_days"),
        ai_daily_exposure: raw::bool_field(anchors_obj, "ai_daily_exposure"),
    };

    WeekState {
        week_id,
        mode,
        outcomes: normalize_slots(raw::list_field(doc, "outcomes"), "w"),
        blockers: normalize_slots(raw::list_field(doc, "blockers"), "b"),
        anchors,
    }
}

fn or_default(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() { fallback() } else { value }
}

fn normalize_slots(items: &[Value], prefix: &str) -> Vec<WeekSlot> {
    let parsed = items
        .iter()
        .take(fixed3::FIXED_LEN)
        .enumerate()
        .map(|(i, item)| {
            let obj = raw::entry(item);
            let text = raw::text_field(obj, "text");
            WeekSlot {
                id: raw::id_field(obj, "id").unwrap_or_else(|| slot_id(prefix, i)),
                text: if text.is_empty() {
                    PLACEHOLDER.to_string()
                } else {
                    text
                },
            }
        })
        .collect();
    fixed3::pad_to_three(parsed, |i| WeekSlot {
        id: slot_id(prefix, i),
        text: PLACEHOLDER.to_string(),
    })
}

impl WeekState {
    /// Replace the three outcomes from free text.
    pub fn replace_outcomes(&mut self, texts: &[String]) {
        self.outcomes = fixed_slots("w", texts);
    }

    /// Replace the three blockers from free text.
    pub fn replace_blockers(&mut self, texts: &[String]) {
        self.blockers = fixed_slots("b", texts);
    }
}

fn fixed_slots(prefix: &str, texts: &[String]) -> Vec<WeekSlot> {
    fixed3::three_texts(texts)
        .into_iter()
        .enumerate()
        .map(|(i, text)| WeekSlot {
            id: slot_id(prefix, i),
            text,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn iso_week_id_formats_with_zero_padding() {
        assert_eq!(iso_week_id(day("2026-01-07")), "2026-W02");
        assert_eq!(iso_week_id(day("2026-08-06")), "2026-W32");
        // ISO years differ from calendar years at the boundary.
        assert_eq!(iso_week_id(day("2027-01-01")), "2026-W53");
    }

    #[test]
    fn normalize_is_idempotent() {
        let on = day("2026-08-06");
        let raw = json!({"outcomes": [{"text": "ship"}], "anchors": {"sleep_5_nights": true}});
        let once = normalize(Some(&raw), on);
        let twice = normalize(Some(&serde_json::to_value(&once).unwrap()), on);
        assert_eq!(once, twice);
    }

    #[test]
    fn defaults_apply_when_absent() {
        let on = day("2026-08-06");
        let doc = normalize(None, on);
        assert_eq!(doc.week_id, "2026-W32");
        assert_eq!(doc.mode, MODE_OFF);
        assert_eq!(doc.outcomes.len(), 3);
        assert_eq!(doc.blockers.len(), 3);
        assert_eq!(doc.outcomes[0].id, "w1");
        assert_eq!(doc.blockers[2].id, "b3");
        assert!(!doc.anchors.sleep_5_nights);
    }

    #[test]
    fn stored_week_id_wins_over_current_week() {
        let doc = normalize(Some(&json!({"week_id": "2020-W01"})), day("2026-08-06"));
        assert_eq!(doc.week_id, "2020-W01");
    }

    #[test]
    fn outcomes_and_blockers_pad_independently() {
        let raw = json!({
            "outcomes": [{"id": "w1", "text": "one"}, {"text": "two"}],
            "blockers": [{}, {}, {}, {"text": "dropped"}]
        });
        let doc = normalize(Some(&raw), day("2026-08-06"));
        assert_eq!(doc.outcomes[1].id, "w2");
        assert_eq!(doc.outcomes[1].text, "two");
        assert_eq!(doc.outcomes[2].text, PLACEHOLDER);
        assert_eq!(doc.blockers.len(), 3);
        assert!(doc.blockers.iter().all(|slot| slot.text == PLACEHOLDER));
    }

    #[test]
    fn anchors_coerce_independently() {
        let raw = json!({"anchors": {"sleep_5_nights": true, "training_4_sessions": "yes"}});
        let doc = normalize(Some(&raw), day("2026-08-06"));
        assert!(doc.anchors.sleep_5_nights);
        assert!(!doc.anchors.training_4_sessions);
        assert!(!doc.anchors.daily_top3_5_days);
    }

    #[test]
    fn malformed_anchors_object_defaults_to_all_false() {
        let doc = normalize(Some(&json!({"anchors": "nope"})), day("2026-08-06"));
        assert_eq!(doc.anchors, Anchors::default());
    }

    #[test]
    fn replace_outcomes_uses_canonical_ids() {
        let mut doc = default_doc(day("2026-08-06"));
        doc.replace_outcomes(&["  land the contract  ".to_string()]);
        assert_eq!(doc.outcomes[0].id, "w1");
        assert_eq!(doc.outcomes[0].text, "land the contract");
        assert_eq!(doc.outcomes[2].text, PLACEHOLDER);
        // Blockers untouched.
        assert_eq!(doc.blockers[0].text, PLACEHOLDER);
    }
}
