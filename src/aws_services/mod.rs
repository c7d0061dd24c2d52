//! AWS collaborator services
//!
//! One thin service struct per AWS API family. Each holds the shared SDK
//! config resolved at startup and builds a region-scoped client per call.
//! All network I/O for the scan lives here; the core modules stay pure.

pub mod autoscaling;
pub mod cloudtrail;
pub mod ec2;
pub mod s3_logs;
pub mod sts;

pub use autoscaling::AutoScalingService;
pub use cloudtrail::{CloudTrailService, TrailConfig};
pub use ec2::{EC2Service, RegionTagWriter};
pub use s3_logs::TrailLogStore;
pub use sts::StsService;

use aws_config::{Region, SdkConfig};

/// Clone the shared config with the target region substituted
pub(crate) fn region_config(config: &SdkConfig, region: &str) -> SdkConfig {
    config
        .to_builder()
        .region(Region::new(region.to_string()))
        .build()
}
