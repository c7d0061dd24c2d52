#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tagtrail::audit::{AuditEvent, EventIndex, UserIdentity};
    use tagtrail::policy::{evaluate, resolve_owner};
    use tagtrail::resources::{GroupTag, LiveResource, ResourceTag};

    fn run_instances_event(user: &str, instance_id: &str) -> AuditEvent {
        AuditEvent {
            event_name: "RunInstances".to_string(),
            event_time: None,
            user_identity: UserIdentity {
                user_name: Some(user.to_string()),
                ..Default::default()
            },
            request_parameters: None,
            response_elements: Some(json!({
                "instancesSet": { "items": [{ "instanceId": instance_id }] }
            })),
        }
    }

    fn create_group_event(user: &str, group_name: &str) -> AuditEvent {
        AuditEvent {
            event_name: "CreateAutoScalingGroup".to_string(),
            event_time: None,
            user_identity: UserIdentity {
                user_name: Some(user.to_string()),
                ..Default::default()
            },
            request_parameters: Some(json!({ "autoScalingGroupName": group_name })),
            response_elements: Some(json!({})),
        }
    }

    fn instance(instance_id: &str, tags: &[(&str, &str)]) -> LiveResource {
        LiveResource::Instance {
            instance_id: instance_id.to_string(),
            tags: tags
                .iter()
                .map(|(key, value)| ResourceTag {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    fn group(name: &str, tags: &[(&str, &str, bool)]) -> LiveResource {
        LiveResource::AutoScalingGroup {
            name: name.to_string(),
            tags: tags
                .iter()
                .map(|(key, value, propagate)| GroupTag {
                    key: key.to_string(),
                    value: value.to_string(),
                    propagate_at_launch: *propagate,
                })
                .collect(),
        }
    }

    #[test]
    fn test_untagged_instance_with_known_creator() {
        let index = EventIndex::build(&[run_instances_event("alice", "i-aaa111")]);
        let resource = instance("i-aaa111", &[("Name", "web-1")]);

        let finding = evaluate(&resource, "Owner", &index);
        assert!(finding.tag_missing);
        assert_eq!(finding.owner.as_deref(), Some("alice"));
    }

    #[test]
    fn test_tagged_instance_passes_regardless_of_trail() {
        // A compliant resource never consults the audit trail
        let index = EventIndex::build(&[]);
        let resource = instance("i-aaa111", &[("Owner", "alice")]);

        let finding = evaluate(&resource, "Owner", &index);
        assert!(!finding.tag_missing);
        assert_eq!(finding.owner, None);
    }

    #[test]
    fn test_untagged_instance_without_trail_coverage() {
        let index = EventIndex::build(&[]);
        let resource = instance("i-aaa111", &[]);

        let finding = evaluate(&resource, "Owner", &index);
        assert!(finding.tag_missing);
        assert_eq!(finding.owner, None);
    }

    #[test]
    fn test_group_tag_without_propagation_still_fails_policy() {
        // The group carries the tag itself but will launch untagged
        // instances, which is exactly the gap the scan exists to catch.
        let index = EventIndex::build(&[create_group_event("carol", "web-asg")]);
        let resource = group("web-asg", &[("Owner", "carol", false)]);

        let finding = evaluate(&resource, "Owner", &index);
        assert!(finding.tag_missing);
        assert_eq!(finding.owner.as_deref(), Some("carol"));
    }

    #[test]
    fn test_group_with_propagated_tag_passes() {
        let index = EventIndex::build(&[]);
        let resource = group("web-asg", &[("Owner", "carol", true)]);

        let finding = evaluate(&resource, "Owner", &index);
        assert!(!finding.tag_missing);
    }

    #[test]
    fn test_group_with_other_propagated_tags_fails() {
        let index = EventIndex::build(&[]);
        let resource = group("web-asg", &[("Environment", "prod", true)]);

        let finding = evaluate(&resource, "Owner", &index);
        assert!(finding.tag_missing);
    }

    #[test]
    fn test_resolve_owner_dispatches_on_kind() {
        let index = EventIndex::build(&[
            run_instances_event("alice", "i-aaa111"),
            create_group_event("carol", "web-asg"),
        ]);

        assert_eq!(
            resolve_owner(&index, &instance("i-aaa111", &[])).as_deref(),
            Some("alice")
        );
        assert_eq!(
            resolve_owner(&index, &group("web-asg", &[])).as_deref(),
            Some("carol")
        );
        // An instance id never resolves through the group partition
        assert_eq!(resolve_owner(&index, &group("i-aaa111", &[])), None);
    }

    #[test]
    fn test_required_tag_key_is_exact_match() {
        let index = EventIndex::build(&[]);
        let resource = instance("i-aaa111", &[("owner", "alice")]);

        let finding = evaluate(&resource, "Owner", &index);
        assert!(finding.tag_missing);
    }
}
