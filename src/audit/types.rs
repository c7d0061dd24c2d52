//! Data types for decoded CloudTrail records

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Principal that performed the recorded API call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    /// Friendly name of the acting principal (absent for role/service activity)
    #[serde(default)]
    pub user_name: Option<String>,
    /// Service that made the call on the principal's behalf
    #[serde(default)]
    pub invoked_by: Option<String>,
    #[serde(default)]
    pub arn: Option<String>,
}

/// One decoded CloudTrail record
///
/// Immutable once decoded. `request_parameters` and `response_elements` keep
/// CloudTrail's loosely-schema'd payloads as raw JSON; the event index knows
/// which paths matter per event name. `response_elements` is null in the
/// archive when the API call failed, which disqualifies the event as a
/// creation record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub event_name: String,
    #[serde(default)]
    pub event_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_identity: UserIdentity,
    #[serde(default)]
    pub request_parameters: Option<serde_json::Value>,
    #[serde(default)]
    pub response_elements: Option<serde_json::Value>,
}

/// Top-level shape of one decompressed CloudTrail log file
#[derive(Debug, Deserialize)]
pub struct AuditLogFile {
    #[serde(rename = "Records", default)]
    pub records: Vec<AuditEvent>,
}
