//! CloudTrail audit-record model and creation-event index
//!
//! CloudTrail archives are the source of truth for who created a resource.
//! [`types`] holds the decoded record model; [`index`] builds the per-region,
//! per-day lookup from resource identifier to creator identity.

pub mod index;
pub mod types;

pub use index::EventIndex;
pub use types::{AuditEvent, AuditLogFile, UserIdentity};
