//! Data-directory resolution for the axis backend.
//!
//! Every document slot lives in one writable base directory. Resolution
//! order: the `AXIS_DATA_DIR` environment override, then a `/data` volume
//! mount when one is present (production deploys mount persistent storage
//! there), then a local `./data` directory.

use std::path::PathBuf;

use crate::error::PathError;
use crate::store::Slot;

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "AXIS_DATA_DIR";

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Resolved location of the persisted state.
#[derive(Debug, Clone)]
pub struct AxisPaths {
    /// Base directory holding one JSON file per slot.
    pub data_dir: PathBuf,
}

impl AxisPaths {
    /// Resolve the data directory from the environment with standard
    /// fallbacks.
    pub fn resolve() -> Self {
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            let dir = dir.trim();
            if !dir.is_empty() {
                return Self {
                    data_dir: PathBuf::from(dir),
                };
            }
        }
        let mount = PathBuf::from("/data");
        if mount.exists() {
            return Self { data_dir: mount };
        }
        Self {
            data_dir: PathBuf::from("data"),
        }
    }

    /// Use an explicit data directory, bypassing resolution.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
        }
    }

    /// Create the data directory. Idempotent.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| PathError::CreateDir {
            path: self.data_dir.display().to_string(),
            source: e,
        })
    }

    /// File path for a slot's document.
    pub fn slot_file(&self, slot: Slot) -> PathBuf {
        self.data_dir.join(slot.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_files_derive_from_data_dir() {
        let paths = AxisPaths::at("/srv/axis");
        assert_eq!(
            paths.slot_file(Slot::Today),
            PathBuf::from("/srv/axis/today_state.json")
        );
        assert_eq!(
            paths.slot_file(Slot::Journal),
            PathBuf::from("/srv/axis/journal.json")
        );
    }

    #[test]
    fn resolve_yields_some_directory() {
        // Whatever the environment, resolution never fails.
        let paths = AxisPaths::resolve();
        assert!(!paths.data_dir.as_os_str().is_empty());
    }
}
