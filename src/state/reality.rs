//! Reality document: standing commitments that frame the week.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::raw;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub day: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealityDoc {
    pub commitments: Vec<Commitment>,
}

/// Built-in first-run document.
pub fn default_doc() -> RealityDoc {
    let commit = |id: &str, text: &str, day: &str| Commitment {
        id: id.to_string(),
        text: text.to_string(),
        day: day.to_string(),
    };
    RealityDoc {
        commitments: vec![
            commit("c1", "Mon/Wed: Training", "Mon/Wed"),
            commit("c2", "Tue: Language class", "Tue"),
            commit("c3", "Fri: Family/Admin", "Fri"),
        ],
    }
}

/// Normalize a raw document. Commitments need non-empty `id` and `text`;
/// `day` defaults to the empty string.
pub fn normalize(raw_doc: Option<&Value>) -> RealityDoc {
    let doc = raw::document(raw_doc);
    let commitments = raw::list_field(doc, "commitments")
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let id = raw::text_field(obj, "id");
            let text = raw::text_field(obj, "text");
            (!id.is_empty() && !text.is_empty()).then(|| Commitment {
                id,
                text,
                day: raw::text_field(obj, "day"),
            })
        })
        .collect();
    RealityDoc { commitments }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_is_idempotent() {
        let raw = json!({"commitments": [{"id": "c1", "text": "training"}]});
        let once = normalize(Some(&raw));
        let twice = normalize(Some(&serde_json::to_value(&once).unwrap()));
        assert_eq!(once, twice);
    }

    #[test]
    fn requires_id_and_text() {
        let raw = json!({"commitments": [
            {"id": "c1", "text": "keep"},
            {"id": "", "text": "no id"},
            {"id": "c3"},
            "junk"
        ]});
        let doc = normalize(Some(&raw));
        assert_eq!(doc.commitments.len(), 1);
        assert_eq!(doc.commitments[0].id, "c1");
        assert_eq!(doc.commitments[0].day, "");
    }

    #[test]
    fn non_list_commitments_reads_as_empty() {
        let doc = normalize(Some(&json!({"commitments": 5})));
        assert!(doc.commitments.is_empty());
    }
}
