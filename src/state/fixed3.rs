//! Fixed-cardinality list normalization.
//!
//! Several fields always hold exactly three entries: today's top3 and the
//! week's outcomes and blockers. Ids are a pure function of (prefix,
//! position), so normalization is deterministic and never needs stored
//! counters. Blank or missing text becomes the placeholder glyph.

/// Placeholder text for an empty slot.
pub const PLACEHOLDER: &str = "—";

/// Canonical length of a fixed-cardinality field.
pub const FIXED_LEN: usize = 3;

/// Stable id for a slot position: `slot_id("t", 0)` is `"t1"`.
pub fn slot_id(prefix: &str, index: usize) -> String {
    format!("{prefix}{}", index + 1)
}

/// Clean up to three free-text values: trim each, replace blanks with the
/// placeholder, pad to exactly three.
pub fn three_texts(values: &[String]) -> [String; FIXED_LEN] {
    std::array::from_fn(|i| {
        let text = values.get(i).map(|v| v.trim()).unwrap_or("");
        if text.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            text.to_string()
        }
    })
}

/// Truncate-and-pad a list to exactly three entries, filling missing
/// positions from `fill(index)`.
pub fn pad_to_three<T>(mut items: Vec<T>, fill: impl Fn(usize) -> T) -> Vec<T> {
    items.truncate(FIXED_LEN);
    while items.len() < FIXED_LEN {
        let i = items.len();
        items.push(fill(i));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn slot_ids_are_one_based() {
        assert_eq!(slot_id("t", 0), "t1");
        assert_eq!(slot_id("w", 2), "w3");
    }

    #[test]
    fn three_texts_pads_and_truncates() {
        assert_eq!(three_texts(&[]), [PLACEHOLDER, PLACEHOLDER, PLACEHOLDER]);
        assert_eq!(three_texts(&texts(&["a"])), ["a", PLACEHOLDER, PLACEHOLDER]);
        assert_eq!(three_texts(&texts(&["a", "b", "c"])), ["a", "b", "c"]);
        assert_eq!(
            three_texts(&texts(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"])),
            ["a", "b", "c"]
        );
    }

    #[test]
    fn three_texts_trims_and_placeholders_blanks() {
        assert_eq!(
            three_texts(&texts(&["  ship it  ", "   ", "x"])),
            ["ship it", PLACEHOLDER, "x"]
        );
    }

    #[test]
    fn pad_to_three_fills_by_index() {
        let padded = pad_to_three(vec!["a".to_string()], |i| format!("fill{i}"));
        assert_eq!(padded, ["a", "fill1", "fill2"]);
    }
}
