//! Shared `{label, url}` link filtering.
//!
//! Projects and resource sections both carry link lists with the same
//! discipline: a link survives only when both fields are non-empty after
//! trimming.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::raw;

/// A labeled URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Filter a raw list down to well-formed links.
pub fn normalize_links(items: &[Value]) -> Vec<Link> {
    items
        .iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let label = raw::text_field(obj, "label");
            let url = raw::text_field(obj, "url");
            (!label.is_empty() && !url.is_empty()).then_some(Link { label, url })
        })
        .collect()
}
