//! EC2 region enumeration, instance inventory, and tag writes

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ec2 as ec2;

use super::region_config;
use crate::remediation::TagWriter;
use crate::resources::{LiveResource, ResourceTag};

pub struct EC2Service {
    config: SdkConfig,
}

impl EC2Service {
    pub fn new(config: SdkConfig) -> Self {
        Self { config }
    }

    fn client(&self, region: &str) -> ec2::Client {
        ec2::Client::new(&region_config(&self.config, region))
    }

    /// List every region visible to the account, in API order
    pub async fn list_regions(&self, bootstrap_region: &str) -> Result<Vec<String>> {
        let client = self.client(bootstrap_region);
        let response = client
            .describe_regions()
            .send()
            .await
            .context("Failed to enumerate regions")?;

        let regions = response
            .regions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|region| region.region_name)
            .collect();
        Ok(regions)
    }

    /// Snapshot of every instance in the region with its current tags
    pub async fn list_instances(&self, region: &str) -> Result<Vec<LiveResource>> {
        let client = self.client(region);
        let mut instances = Vec::new();

        let mut paginator = client.describe_instances().into_paginator().send();
        while let Some(result) = paginator
            .try_next()
            .await
            .with_context(|| format!("Failed to describe instances in region {}", region))?
        {
            for reservation in result.reservations.unwrap_or_default() {
                for instance in reservation.instances.unwrap_or_default() {
                    let Some(instance_id) = instance.instance_id else {
                        continue;
                    };
                    let tags = instance
                        .tags
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|tag| {
                            Some(ResourceTag {
                                key: tag.key?,
                                value: tag.value.unwrap_or_default(),
                            })
                        })
                        .collect();
                    instances.push(LiveResource::Instance { instance_id, tags });
                }
            }
        }

        Ok(instances)
    }

    /// Apply one tag to an instance
    pub async fn create_tag(
        &self,
        region: &str,
        instance_id: &str,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let client = self.client(region);
        let tag = ec2::types::Tag::builder().key(key).value(value).build();
        client
            .create_tags()
            .resources(instance_id)
            .tags(tag)
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to tag instance {} in region {}",
                    instance_id, region
                )
            })?;
        Ok(())
    }
}

/// [`TagWriter`] bound to one region's EC2 API
pub struct RegionTagWriter<'a> {
    ec2: &'a EC2Service,
    region: &'a str,
}

impl<'a> RegionTagWriter<'a> {
    pub fn new(ec2: &'a EC2Service, region: &'a str) -> Self {
        Self { ec2, region }
    }
}

#[async_trait]
impl TagWriter for RegionTagWriter<'_> {
    async fn write_tag(&self, resource: &LiveResource, key: &str, value: &str) -> Result<()> {
        match resource {
            LiveResource::Instance { instance_id, .. } => {
                self.ec2.create_tag(self.region, instance_id, key, value).await
            }
            LiveResource::AutoScalingGroup { name, .. } => Err(anyhow::anyhow!(
                "No tag write is wired for autoscaling group {}",
                name
            )),
        }
    }
}
