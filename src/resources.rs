//! Typed models for the live resource inventory and scan findings

use serde::Serialize;

/// Tag attached to an EC2 instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

/// Tag attached to an Auto Scaling group
///
/// Group tags carry a `propagate_at_launch` flag controlling whether the tag
/// is copied onto instances the group spawns. Policy cares about the
/// propagated set, not the group's own set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTag {
    pub key: String,
    pub value: String,
    pub propagate_at_launch: bool,
}

/// A live compute resource from the region's current API snapshot
///
/// Supplied by the region driver, never reconstructed from the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LiveResource {
    Instance {
        instance_id: String,
        tags: Vec<ResourceTag>,
    },
    AutoScalingGroup {
        name: String,
        tags: Vec<GroupTag>,
    },
}

impl LiveResource {
    /// The resource identifier used for audit-log correlation
    pub fn id(&self) -> &str {
        match self {
            LiveResource::Instance { instance_id, .. } => instance_id,
            LiveResource::AutoScalingGroup { name, .. } => name,
        }
    }

    /// Display label for log output
    pub fn kind(&self) -> &'static str {
        match self {
            LiveResource::Instance { .. } => "instance",
            LiveResource::AutoScalingGroup { .. } => "autoscaling group",
        }
    }
}

/// Per-resource result of tag-gap evaluation
///
/// `owner` is `None` when no qualifying creation event exists in the day's
/// audit records. That is a log coverage gap, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipFinding {
    pub resource: LiveResource,
    pub owner: Option<String>,
    pub tag_missing: bool,
}
