//! Resources document: titled sections of reference links.
//!
//! Same filtering discipline as projects, but sections are rebuilt as bare
//! `{title, links}` pairs; unlike projects, extra fields do not pass
//! through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StateError;
use crate::state::links::{self, Link};
use crate::state::raw;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcesDoc {
    pub sections: Vec<Section>,
}

/// Built-in first-run document.
pub fn default_doc() -> ResourcesDoc {
    let section = |title: &str, label: &str, url: &str| Section {
        title: title.to_string(),
        links: vec![Link::new(label, url)],
    };
    ResourcesDoc {
        sections: vec![
            section("AI", "ChatGPT", "https://chat.openai.com/"),
            section("Trading", "TradingView", "https://tradingview.com/"),
            section("Career", "LinkedIn", "https://linkedin.com/"),
        ],
    }
}

/// Normalize a raw document. Sections need a non-empty trimmed `title`;
/// a non-list `sections` field is a validation error.
pub fn normalize(raw_doc: Option<&Value>) -> Result<ResourcesDoc, StateError> {
    let doc = raw::document(raw_doc);
    let items = match doc.get("sections") {
        None => &[][..],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => return Err(StateError::InvalidShape { field: "sections" }),
    };

    let sections = items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let title = raw::text_field(obj, "title");
            if title.is_empty() {
                return None;
            }
            Some(Section {
                title,
                links: links::normalize_links(raw::list_field(obj, "links")),
            })
        })
        .collect();

    Ok(ResourcesDoc { sections })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_is_idempotent() {
        let raw = json!({"sections": [{"title": "AI", "links": [{"label": "a", "url": "u"}]}]});
        let once = normalize(Some(&raw)).unwrap();
        let twice = normalize(Some(&serde_json::to_value(&once).unwrap())).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn non_list_sections_is_a_validation_error() {
        let err = normalize(Some(&json!({"sections": {"title": "x"}}))).unwrap_err();
        assert!(matches!(err, StateError::InvalidShape { field: "sections" }));
    }

    #[test]
    fn untitled_sections_are_dropped_and_extras_rebuilt_away() {
        let raw = json!({"sections": [
            {"title": "  ", "links": []},
            {"title": "Keep", "links": "not a list", "stray": true},
            17
        ]});
        let doc = normalize(Some(&raw)).unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Keep");
        assert!(doc.sections[0].links.is_empty());
        let round = serde_json::to_value(&doc).unwrap();
        assert!(round["sections"][0].get("stray").is_none());
    }
}
