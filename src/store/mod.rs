//! Document slot store: atomic JSON persistence for the state files.
//!
//! Each document type occupies one named slot (a single JSON file). Writes
//! go to a `.tmp` sibling and are renamed into place, so a crash or a
//! concurrent reader never observes a half-written document. Reads treat a
//! missing, unreadable, or unparsable slot as absent; a read never writes
//! anything back.

use std::fs;

use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::paths::AxisPaths;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Named persisted document slots, one per document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Today,
    Week,
    Projects,
    Resources,
    Reality,
    Journal,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Today,
        Slot::Week,
        Slot::Projects,
        Slot::Resources,
        Slot::Reality,
        Slot::Journal,
    ];

    /// Stable slot identifier.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Today => "today_state",
            Slot::Week => "week_state",
            Slot::Projects => "projects",
            Slot::Resources => "resources",
            Slot::Reality => "reality",
            Slot::Journal => "journal",
        }
    }

    /// File name of the slot inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Slot::Today => "today_state.json",
            Slot::Week => "week_state.json",
            Slot::Projects => "projects.json",
            Slot::Resources => "resources.json",
            Slot::Reality => "reality.json",
            Slot::Journal => "journal.json",
        }
    }

    /// Parse a slot identifier as produced by [`Slot::name`].
    pub fn parse(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Atomic read/write access to the document slots.
pub struct SlotStore {
    paths: AxisPaths,
}

impl SlotStore {
    pub fn new(paths: AxisPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AxisPaths {
        &self.paths
    }

    /// Read a slot's document.
    ///
    /// Returns `None` when the slot has never been written or its content
    /// cannot be parsed as a JSON object. Malformed content is absence, not
    /// an error, and is never overwritten here; only a constructive load
    /// path may write a default.
    pub fn read(&self, slot: Slot) -> Option<Value> {
        let path = self.paths.slot_file(slot);
        let bytes = fs::read(&path).ok()?;
        let value: Value = match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(slot = %slot, error = %e, "slot unparsable, treating as absent");
                return None;
            }
        };
        value.is_object().then_some(value)
    }

    /// Persist a document to its slot.
    ///
    /// Serialized with 2-space indentation, non-ASCII preserved literally,
    /// written to a `.tmp` sibling and atomically renamed onto the final
    /// path. The data directory is created as needed.
    pub fn write<T: Serialize>(&self, slot: Slot, doc: &T) -> StoreResult<()> {
        let path = self.paths.slot_file(slot);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                slot: slot.name(),
                source: e,
            })?;
        }

        let buf = serde_json::to_vec_pretty(doc).map_err(|e| StoreError::Serialize {
            slot: slot.name(),
            message: e.to_string(),
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &buf).map_err(|e| StoreError::Io {
            slot: slot.name(),
            source: e,
        })?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Io {
            slot: slot.name(),
            source: e,
        })?;
        Ok(())
    }
}
