//! Region scan pipeline
//!
//! [`scan_region`] is the I/O-free core: index the day's audit records, then
//! evaluate every live resource against the tagging policy. [`run_scan`]
//! drives it across regions, feeding it trail archives and live inventory
//! from the AWS collaborator services and routing actionable findings to the
//! remediator.

use anyhow::Result;
use aws_config::SdkConfig;
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::audit::{AuditEvent, EventIndex};
use crate::aws_services::{
    AutoScalingService, CloudTrailService, EC2Service, RegionTagWriter, StsService, TrailConfig,
    TrailLogStore,
};
use crate::policy;
use crate::remediation::Remediator;
use crate::resources::{LiveResource, OwnershipFinding};

/// Region used for bootstrap calls (region enumeration, caller identity)
const BOOTSTRAP_REGION: &str = "us-east-1";

/// Scan parameters resolved from the CLI
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Tag key the policy requires on every resource
    pub required_tag: String,
    /// Report intended writes without issuing them
    pub dry_run: bool,
    /// Audit-log day to correlate against, an explicit input so runs are
    /// reproducible
    pub date: NaiveDate,
    /// Restrict the scan to these regions; empty means all visible regions
    pub regions: Vec<String>,
}

/// Evaluate one region's live resources against its audit records
///
/// Pure with respect to the cloud: everything it needs is passed in.
/// Returns one finding per live resource, in inventory order.
pub fn scan_region(
    region: &str,
    events: &[AuditEvent],
    resources: &[LiveResource],
    required_tag: &str,
) -> Vec<OwnershipFinding> {
    let index = EventIndex::build(events);
    debug!(
        "Indexed {} audit records for region {}",
        index.event_count(),
        region
    );

    let mut findings = Vec::with_capacity(resources.len());
    for resource in resources {
        let finding = policy::evaluate(resource, required_tag, &index);
        log_finding(region, required_tag, &finding);
        findings.push(finding);
    }
    findings
}

/// Pick the region's single trail, if any
///
/// Zero trails is a valid state: the region has no audit coverage and is
/// skipped. More than one trail violates the single-trail assumption the S3
/// prefix assembly relies on; picking silently would hide half the audit
/// record, so the conflict surfaces as an error for this region alone.
pub fn select_trail<'a>(
    region: &str,
    trails: &'a [TrailConfig],
) -> Result<Option<&'a TrailConfig>> {
    match trails {
        [] => Ok(None),
        [trail] => Ok(Some(trail)),
        multiple => anyhow::bail!(
            "region {} is unexpectedly configured with {} trails",
            region,
            multiple.len()
        ),
    }
}

/// One line per resource, leveled by how actionable the finding is
fn log_finding(region: &str, required_tag: &str, finding: &OwnershipFinding) {
    if !finding.tag_missing {
        return;
    }
    match (&finding.resource, finding.owner.as_deref()) {
        (LiveResource::Instance { instance_id, .. }, Some(owner)) => info!(
            "Instance {} in region {}, owned by {}, is missing an {} tag",
            instance_id, region, owner, required_tag
        ),
        (LiveResource::Instance { instance_id, .. }, None) => debug!(
            "Instance {} in region {} is missing an {} tag but does not appear in the audit trail",
            instance_id, region, required_tag
        ),
        (LiveResource::AutoScalingGroup { name, .. }, Some(owner)) => info!(
            "Autoscaling group {} in region {}, owned by {}, does not apply an {} tag to its instances",
            name, region, owner, required_tag
        ),
        (LiveResource::AutoScalingGroup { name, .. }, None) => debug!(
            "Autoscaling group {} in region {} does not apply an {} tag to its instances \
             but does not appear in the audit trail",
            name, region, required_tag
        ),
    }
}

/// Scan every selected region and remediate actionable findings
///
/// Per-region and per-resource failures are logged and skipped; only the
/// bootstrap steps (caller identity, region enumeration) abort the run.
pub async fn run_scan(config: SdkConfig, scan: &ScanConfig) -> Result<()> {
    let sts = StsService::new(config.clone());
    let ec2 = EC2Service::new(config.clone());
    let autoscaling = AutoScalingService::new(config.clone());
    let cloudtrail = CloudTrailService::new(config.clone());
    let log_store = TrailLogStore::new(config);

    let account_id = sts.account_id().await?;
    let mut regions = ec2.list_regions(BOOTSTRAP_REGION).await?;
    if !scan.regions.is_empty() {
        regions.retain(|region| scan.regions.contains(region));
    }
    info!(
        "Scanning {} regions for resources missing the {} tag on {}",
        regions.len(),
        scan.required_tag,
        scan.date
    );

    let remediator = Remediator::new(scan.required_tag.clone(), scan.dry_run);
    for region in &regions {
        if let Err(err) = scan_one_region(
            region,
            &account_id,
            scan,
            &ec2,
            &autoscaling,
            &cloudtrail,
            &log_store,
            &remediator,
        )
        .await
        {
            error!("Skipping region {}: {:#}", region, err);
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn scan_one_region(
    region: &str,
    account_id: &str,
    scan: &ScanConfig,
    ec2: &EC2Service,
    autoscaling: &AutoScalingService,
    cloudtrail: &CloudTrailService,
    log_store: &TrailLogStore,
    remediator: &Remediator,
) -> Result<()> {
    let trails = cloudtrail.describe_trails(region).await?;
    let Some(trail) = select_trail(region, &trails)? else {
        info!("Skipping region {} as it has no trail configured", region);
        return Ok(());
    };

    info!(
        "Fetching audit records for region {} from trail {}",
        region,
        trail.name.as_deref().unwrap_or("(unnamed)")
    );
    let events = log_store
        .fetch_records(
            region,
            &trail.s3_bucket_name,
            trail.s3_key_prefix.as_deref(),
            account_id,
            scan.date,
        )
        .await?;
    info!("Fetched {} audit records for region {}", events.len(), region);

    let mut resources = ec2.list_instances(region).await?;
    resources.extend(autoscaling.list_groups(region).await?);

    let findings = scan_region(region, &events, &resources, &scan.required_tag);

    let writer = RegionTagWriter::new(ec2, region);
    for finding in &findings {
        if let Err(err) = remediator.apply(finding, &writer).await {
            warn!(
                "Failed to remediate {} {} in region {}: {:#}",
                finding.resource.kind(),
                finding.resource.id(),
                region,
                err
            );
        }
    }

    Ok(())
}
