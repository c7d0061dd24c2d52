//! Creation-event index over one region-day of CloudTrail records

use std::collections::HashMap;

use super::types::AuditEvent;

/// EC2 API action that launches instances
const RUN_INSTANCES: &str = "RunInstances";
/// Auto Scaling API action that creates a group
const CREATE_AUTO_SCALING_GROUP: &str = "CreateAutoScalingGroup";

/// Lookup from created-resource identifier to creator identity
///
/// Built once per region scan from that day's records, never mutated
/// afterwards. A `RunInstances` record fans out to every instance id in its
/// response payload; a `CreateAutoScalingGroup` record names exactly one
/// group.
///
/// Tie-break: when two qualifying records claim the same identifier, the
/// record appearing first in the input sequence wins.
///
/// A record qualifies only when its response payload is present (a null
/// `responseElements` means the call failed and created nothing) and its
/// `userIdentity` carries a `userName`.
#[derive(Debug, Default)]
pub struct EventIndex {
    instance_owners: HashMap<String, String>,
    group_owners: HashMap<String, String>,
    event_count: usize,
}

impl EventIndex {
    /// Build the index with a single forward scan over the records
    pub fn build(events: &[AuditEvent]) -> Self {
        let mut index = EventIndex {
            event_count: events.len(),
            ..Default::default()
        };

        for event in events {
            let Some(user_name) = event.user_identity.user_name.as_deref() else {
                continue;
            };

            match event.event_name.as_str() {
                RUN_INSTANCES => {
                    let Some(response) = &event.response_elements else {
                        continue;
                    };
                    for instance_id in launched_instance_ids(response) {
                        index
                            .instance_owners
                            .entry(instance_id.to_string())
                            .or_insert_with(|| user_name.to_string());
                    }
                }
                CREATE_AUTO_SCALING_GROUP => {
                    if event.response_elements.is_none() {
                        continue;
                    }
                    let group_name = event
                        .request_parameters
                        .as_ref()
                        .and_then(|params| params.get("autoScalingGroupName"))
                        .and_then(|name| name.as_str());
                    if let Some(group_name) = group_name {
                        index
                            .group_owners
                            .entry(group_name.to_string())
                            .or_insert_with(|| user_name.to_string());
                    }
                }
                _ => {}
            }
        }

        index
    }

    /// Identity that launched the instance, if the trail covers it
    pub fn instance_owner(&self, instance_id: &str) -> Option<&str> {
        self.instance_owners.get(instance_id).map(String::as_str)
    }

    /// Identity that created the group, if the trail covers it
    pub fn group_owner(&self, group_name: &str) -> Option<&str> {
        self.group_owners.get(group_name).map(String::as_str)
    }

    /// Number of records the index was built from
    pub fn event_count(&self) -> usize {
        self.event_count
    }
}

/// Instance ids under `responseElements.instancesSet.items[].instanceId`
fn launched_instance_ids(response: &serde_json::Value) -> impl Iterator<Item = &str> {
    response
        .get("instancesSet")
        .and_then(|set| set.get("items"))
        .and_then(|items| items.as_array())
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("instanceId").and_then(|id| id.as_str()))
}
