//! Projects document: keyed project cards with activation flags and links.
//!
//! Unrecognized fields on a project pass through unchanged, so the frontend
//! can attach presentation data (e.g. `focus`) without the backend modeling
//! it. A non-list `projects` field is a caller contract violation and the
//! one place normalization fails; malformed entries are merely dropped.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StateError;
use crate::state::links::{self, Link};
use crate::state::raw;

/// Projects a document may activate at once.
pub const MAX_ACTIVE: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub key: String,
    pub name: String,
    pub is_active: bool,
    pub links: Vec<Link>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsDoc {
    pub projects: Vec<Project>,
}

impl ProjectsDoc {
    /// Active projects in document order.
    pub fn active(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.is_active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}

impl Project {
    /// First link with a non-empty URL, if any.
    pub fn primary_url(&self) -> Option<&str> {
        self.links
            .iter()
            .map(|link| link.url.as_str())
            .find(|url| !url.is_empty())
    }
}

/// Built-in first-run document.
pub fn default_doc() -> ProjectsDoc {
    let seed = |key: &str, name: &str, links: &[(&str, &str)]| Project {
        key: key.to_string(),
        name: name.to_string(),
        is_active: false,
        links: links
            .iter()
            .map(|(label, url)| Link::new(*label, *url))
            .collect(),
        extra: Map::new(),
    };
    ProjectsDoc {
        projects: vec![
            seed(
                "career",
                "Career / Job Search",
                &[
                    ("Trello", "https://trello.com/"),
                    ("Docs", "https://docs.google.com/"),
                    ("Gmail", "https://mail.google.com/"),
                    ("Calendar", "https://calendar.google.com/"),
                ],
            ),
            seed(
                "flowlogix",
                "FlowLogix",
                &[
                    ("Trello", "https://trello.com/"),
                    ("GitHub", "https://github.com/"),
                ],
            ),
            seed(
                "trading",
                "Trading",
                &[("TradingView", "https://tradingview.com/")],
            ),
        ],
    }
}

/// Normalize a raw document.
///
/// Drops non-object entries, entries missing `key` or `name`, and duplicate
/// keys (first occurrence wins); recomputes links and coerces `is_active`.
pub fn normalize(raw_doc: Option<&Value>) -> Result<ProjectsDoc, StateError> {
    let doc = raw::document(raw_doc);
    let items = match doc.get("projects") {
        None => &[][..],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => return Err(StateError::InvalidShape { field: "projects" }),
    };

    let mut seen = HashSet::new();
    let mut projects = Vec::new();
    for item in items {
        let Some(obj) = item.as_object() else {
            continue;
        };
        let key = raw::text_field(obj, "key");
        let name = raw::text_field(obj, "name");
        if key.is_empty() || name.is_empty() {
            continue;
        }
        if !seen.insert(key.clone()) {
            continue;
        }

        let mut extra = obj.clone();
        for field in ["key", "name", "is_active", "links"] {
            extra.remove(field);
        }

        projects.push(Project {
            key,
            name,
            is_active: raw::bool_field(obj, "is_active"),
            links: links::normalize_links(raw::list_field(obj, "links")),
            extra,
        });
    }

    Ok(ProjectsDoc { projects })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_is_idempotent() {
        let raw = json!({"projects": [
            {"key": "a", "name": "A", "is_active": true, "links": [], "focus": "deep work"}
        ]});
        let once = normalize(Some(&raw)).unwrap();
        let twice = normalize(Some(&serde_json::to_value(&once).unwrap())).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn non_list_projects_is_a_validation_error() {
        let err = normalize(Some(&json!({"projects": "oops"}))).unwrap_err();
        assert!(matches!(err, StateError::InvalidShape { field: "projects" }));
    }

    #[test]
    fn missing_projects_field_is_empty() {
        let doc = normalize(Some(&json!({}))).unwrap();
        assert!(doc.projects.is_empty());
    }

    #[test]
    fn drops_incomplete_and_duplicate_entries() {
        let raw = json!({"projects": [
            {"key": "a", "name": "First A"},
            {"key": "a", "name": "Second A"},
            {"key": "", "name": "No key"},
            {"key": "b"},
            "garbage",
            {"key": "c", "name": "C"}
        ]});
        let doc = normalize(Some(&raw)).unwrap();
        let keys: Vec<&str> = doc.projects.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, ["a", "c"]);
        assert_eq!(doc.projects[0].name, "First A");
    }

    #[test]
    fn links_filter_and_is_active_coerce() {
        let raw = json!({"projects": [{
            "key": "a",
            "name": "A",
            "is_active": "yes",
            "links": [{"label": "ok", "url": "https://x/"}, {"label": "", "url": "https://y/"}]
        }]});
        let doc = normalize(Some(&raw)).unwrap();
        assert!(!doc.projects[0].is_active);
        assert_eq!(doc.projects[0].links, vec![Link::new("ok", "https://x/")]);
    }

    #[test]
    fn extra_fields_pass_through() {
        let raw = json!({"projects": [
            {"key": "a", "name": "A", "focus": "close the deal", "color": "#fff"}
        ]});
        let doc = normalize(Some(&raw)).unwrap();
        assert_eq!(doc.projects[0].extra["focus"], json!("close the deal"));
        assert_eq!(doc.projects[0].extra["color"], json!("#fff"));
        // And they survive serialization at the top level of the project.
        let round = serde_json::to_value(&doc).unwrap();
        assert_eq!(round["projects"][0]["focus"], json!("close the deal"));
    }

    #[test]
    fn primary_url_skips_nothing_after_normalization() {
        let doc = default_doc();
        assert_eq!(doc.projects[0].primary_url(), Some("https://trello.com/"));
        let empty = Project {
            key: "x".into(),
            name: "X".into(),
            is_active: false,
            links: Vec::new(),
            extra: Map::new(),
        };
        assert_eq!(empty.primary_url(), None);
    }
}
