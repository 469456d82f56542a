//! Audit logging for Kharcha
//!
//! Every create, update and delete made through a [`crate::session::Session`]
//! is appended to `audit.log` as one JSON line:
//!
//! - `AuditEntry`: timestamp, operation, record type and id, owning principal,
//!   and before/after snapshots.
//! - `AuditLogger`: appends entries and reads them back.
//! - `generate_diff`: one-line summary of the fields an update changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
