//! Auto Scaling group inventory

use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_autoscaling as autoscaling;

use super::region_config;
use crate::resources::{GroupTag, LiveResource};

pub struct AutoScalingService {
    config: SdkConfig,
}

impl AutoScalingService {
    pub fn new(config: SdkConfig) -> Self {
        Self { config }
    }

    /// Snapshot of every Auto Scaling group in the region with its tags
    pub async fn list_groups(&self, region: &str) -> Result<Vec<LiveResource>> {
        let client = autoscaling::Client::new(&region_config(&self.config, region));
        let mut paginator = client.describe_auto_scaling_groups().into_paginator().send();

        let mut groups = Vec::new();
        while let Some(page) = paginator.next().await {
            let page = page.with_context(|| {
                format!("Failed to describe autoscaling groups in region {}", region)
            })?;
            for group in page.auto_scaling_groups.unwrap_or_default() {
                let Some(name) = group.auto_scaling_group_name else {
                    continue;
                };
                let tags = group
                    .tags
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|tag| {
                        Some(GroupTag {
                            key: tag.key?,
                            value: tag.value.unwrap_or_default(),
                            propagate_at_launch: tag.propagate_at_launch.unwrap_or(false),
                        })
                    })
                    .collect();
                groups.push(LiveResource::AutoScalingGroup { name, tags });
            }
        }

        Ok(groups)
    }
}
