//! CloudTrail trail discovery

use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_cloudtrail as cloudtrail;

use super::region_config;

/// Where a trail delivers its log archives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailConfig {
    pub name: Option<String>,
    pub s3_bucket_name: String,
    pub s3_key_prefix: Option<String>,
}

pub struct CloudTrailService {
    config: SdkConfig,
}

impl CloudTrailService {
    pub fn new(config: SdkConfig) -> Self {
        Self { config }
    }

    /// Trails configured in the region
    ///
    /// An empty result is a valid state (the region simply has no trail and
    /// cannot be scanned). Trails without a delivery bucket are dropped here
    /// since there is nothing to fetch from them.
    pub async fn describe_trails(&self, region: &str) -> Result<Vec<TrailConfig>> {
        let client = cloudtrail::Client::new(&region_config(&self.config, region));
        let response = client
            .describe_trails()
            .send()
            .await
            .with_context(|| format!("Failed to describe trails in region {}", region))?;

        let trails = response
            .trail_list
            .unwrap_or_default()
            .into_iter()
            .filter_map(|trail| {
                Some(TrailConfig {
                    name: trail.name,
                    s3_bucket_name: trail.s3_bucket_name?,
                    s3_key_prefix: trail.s3_key_prefix,
                })
            })
            .collect();
        Ok(trails)
    }
}
