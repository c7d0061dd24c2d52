//! Tagging-policy evaluation against the creation-event index
//!
//! Two pure functions: [`resolve_owner`] dispatches an owner lookup by
//! resource kind, and [`evaluate`] decides whether a live resource satisfies
//! the required-tag policy. Neither performs I/O.

use crate::audit::EventIndex;
use crate::resources::{LiveResource, OwnershipFinding};

/// Resolve the creator identity for a live resource
///
/// Thin dispatch so the detector stays kind-agnostic. `None` means the day's
/// trail has no qualifying creation record for this identifier.
pub fn resolve_owner(index: &EventIndex, resource: &LiveResource) -> Option<String> {
    match resource {
        LiveResource::Instance { instance_id, .. } => {
            index.instance_owner(instance_id).map(str::to_string)
        }
        LiveResource::AutoScalingGroup { name, .. } => {
            index.group_owner(name).map(str::to_string)
        }
    }
}

/// Evaluate one live resource against the required-tag policy
///
/// Instances satisfy policy when any tag carries the required key. Auto
/// Scaling groups must carry the key on a tag with `propagate_at_launch`
/// set: a group that holds the tag but does not propagate it still fails,
/// because its instances launch untagged.
///
/// The owner is resolved only for resources that fail policy; compliant
/// resources never touch the index.
pub fn evaluate(
    resource: &LiveResource,
    required_tag: &str,
    index: &EventIndex,
) -> OwnershipFinding {
    let tag_missing = match resource {
        LiveResource::Instance { tags, .. } => !tags.iter().any(|tag| tag.key == required_tag),
        LiveResource::AutoScalingGroup { tags, .. } => !tags
            .iter()
            .any(|tag| tag.propagate_at_launch && tag.key == required_tag),
    };

    let owner = if tag_missing {
        resolve_owner(index, resource)
    } else {
        None
    };

    OwnershipFinding {
        resource: resource.clone(),
        owner,
        tag_missing,
    }
}
