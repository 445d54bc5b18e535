//! Canonical document types and their normalizers.
//!
//! One normalizer per document type: a total function from an arbitrary
//! loaded JSON document (or an absent one) to the canonical shape for that
//! type. Normalizers are idempotent, and the time-dependent ones (today,
//! week) take the current date as a parameter so they stay pure. The only
//! normalizers that can fail are projects and resources, on a non-list
//! top-level field; malformed *items* are user data and are corrected or
//! dropped instead.

pub mod fixed3;
pub mod journal;
pub mod links;
pub mod projects;
pub mod raw;
pub mod reality;
pub mod resources;
pub mod today;
pub mod week;

pub use fixed3::{PLACEHOLDER, slot_id};
pub use links::Link;
