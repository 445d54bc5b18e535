//! Diagnostic error types for the axis backend.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes and help text so users know exactly what
//! went wrong and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the axis backend.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum AxisError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    State(#[from] StateError),
}

// ---------------------------------------------------------------------------
// Path errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("failed to create data directory: {path}")]
    #[diagnostic(
        code(axis::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("failed to write slot \"{slot}\": {source}")]
    #[diagnostic(
        code(axis::store::io),
        help(
            "A filesystem operation failed. Check that the data directory exists, \
             has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        slot: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize slot \"{slot}\": {message}")]
    #[diagnostic(
        code(axis::store::serialize),
        help("The in-memory document could not be rendered as JSON. This is a bug.")
    )]
    Serialize { slot: &'static str, message: String },
}

// ---------------------------------------------------------------------------
// State errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StateError {
    #[error("'{field}' must be a list")]
    #[diagnostic(
        code(axis::state::invalid_shape),
        help("Send the document with \"{field}\" as a JSON array.")
    )]
    InvalidShape { field: &'static str },

    #[error("Max {limit} active projects allowed")]
    #[diagnostic(
        code(axis::state::too_many_active),
        help("Deactivate one project before activating another.")
    )]
    TooManyActive { limit: usize },

    #[error("item not found")]
    #[diagnostic(
        code(axis::state::item_not_found),
        help("No item with id \"{id}\" exists in the target list.")
    )]
    ItemNotFound { id: String },

    #[error("journal entry not found: {id}")]
    #[diagnostic(
        code(axis::state::entry_not_found),
        help("List entries with GET /api/v1/journal to see the known ids.")
    )]
    EntryNotFound { id: String },

    #[error("kind must be outcomes or actions, got \"{kind}\"")]
    #[diagnostic(
        code(axis::state::unknown_kind),
        help("The legacy toggle route only understands the outcomes and actions lists.")
    )]
    UnknownKind { kind: String },
}

impl StateError {
    /// Whether this error is a not-found condition (as opposed to a
    /// validation failure).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StateError::ItemNotFound { .. } | StateError::EntryNotFound { .. }
        )
    }
}

/// Convenience alias for functions returning axis results.
pub type AxisResult<T> = std::result::Result<T, AxisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_error_converts_to_axis_error() {
        let err = StateError::TooManyActive { limit: 3 };
        let axis: AxisError = err.into();
        assert!(matches!(
            axis,
            AxisError::State(StateError::TooManyActive { .. })
        ));
    }

    #[test]
    fn too_many_active_message_matches_api_contract() {
        let err = StateError::TooManyActive { limit: 3 };
        assert_eq!(format!("{err}"), "Max 3 active projects allowed");
    }

    #[test]
    fn not_found_classification() {
        assert!(StateError::ItemNotFound { id: "t9".into() }.is_not_found());
        assert!(StateError::EntryNotFound { id: "x".into() }.is_not_found());
        assert!(!StateError::InvalidShape { field: "projects" }.is_not_found());
        assert!(!StateError::UnknownKind { kind: "blockers".into() }.is_not_found());
    }
}
