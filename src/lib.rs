//! # axis-api
//!
//! Backend for a single-user productivity dashboard. Six small JSON
//! documents (today's top-3 tasks, weekly outcomes and blockers, projects,
//! resource links, reality commitments, and a journal) are persisted as
//! files and served over a REST API.
//!
//! ## Architecture
//!
//! - **Document store** (`store`): atomic slot-file persistence, absence on
//!   malformed content
//! - **Normalizers** (`state`): total, idempotent coercion of raw documents
//!   into canonical shape
//! - **Hub** (`hub`): one canonical in-memory copy per document type behind
//!   a per-slot lock
//! - **Views** (`views`): read-only dashboard composition
//!
//! ## Library usage
//!
//! ```no_run
//! use axis_api::hub::Hub;
//! use axis_api::paths::AxisPaths;
//!
//! let hub = Hub::open(AxisPaths::resolve()).unwrap();
//! let dashboard = axis_api::views::dashboard(&hub);
//! println!("{}", dashboard.week.week_id);
//! ```

pub mod error;
pub mod hub;
pub mod paths;
pub mod state;
pub mod store;
pub mod views;
