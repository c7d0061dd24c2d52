//! Caller identity lookup

use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_sts as sts;

pub struct StsService {
    config: SdkConfig,
}

impl StsService {
    pub fn new(config: SdkConfig) -> Self {
        Self { config }
    }

    /// Account id of the resolved credentials
    ///
    /// Needed to assemble the trail's S3 key prefix. Failure here means the
    /// session is unusable and the whole scan must stop before it starts.
    pub async fn account_id(&self) -> Result<String> {
        let client = sts::Client::new(&self.config);
        let response = client
            .get_caller_identity()
            .send()
            .await
            .context("Failed to resolve caller identity; check AWS credentials")?;
        response
            .account
            .context("Caller identity response carries no account id")
    }
}
