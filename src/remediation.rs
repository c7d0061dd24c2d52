//! Remediation of actionable findings

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::resources::{LiveResource, OwnershipFinding};

/// Write boundary for applying a tag to a live resource
///
/// Seam between the remediator and the cloud API so dry-run and test paths
/// never construct an AWS client.
#[async_trait]
pub trait TagWriter: Send + Sync {
    async fn write_tag(&self, resource: &LiveResource, key: &str, value: &str) -> Result<()>;
}

/// What the remediator did (or deliberately did not do) for one finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationOutcome {
    /// Tag written to the resource
    Applied,
    /// Dry-run mode, intended write logged only
    DryRun,
    /// Group propagation gaps are reported, never auto-fixed
    ReportedOnly,
    /// Nothing to do: tag present, or owner unknown
    Skipped,
}

/// Applies the required tag to findings with a known owner
///
/// Only instances are wired to an actual write. Enabling tag propagation on
/// a live Auto Scaling group changes what every future instance launches
/// with, so group findings stay report-only.
pub struct Remediator {
    dry_run: bool,
    required_tag: String,
}

impl Remediator {
    pub fn new(required_tag: impl Into<String>, dry_run: bool) -> Self {
        Self {
            dry_run,
            required_tag: required_tag.into(),
        }
    }

    /// Apply one finding through the writer
    ///
    /// Errors surface to the caller per resource; a failed write must not
    /// stop the remaining resources in the region.
    pub async fn apply(
        &self,
        finding: &OwnershipFinding,
        writer: &dyn TagWriter,
    ) -> Result<RemediationOutcome> {
        if !finding.tag_missing {
            return Ok(RemediationOutcome::Skipped);
        }
        let Some(owner) = finding.owner.as_deref() else {
            // No audit-trail coverage, nothing to attribute the resource to
            return Ok(RemediationOutcome::Skipped);
        };

        match &finding.resource {
            LiveResource::Instance { instance_id, .. } => {
                if self.dry_run {
                    info!(
                        "Dry run: would tag instance {} with {}={}",
                        instance_id, self.required_tag, owner
                    );
                    return Ok(RemediationOutcome::DryRun);
                }
                writer
                    .write_tag(&finding.resource, &self.required_tag, owner)
                    .await?;
                info!(
                    "Instance {} is now tagged with {}={}",
                    instance_id, self.required_tag, owner
                );
                Ok(RemediationOutcome::Applied)
            }
            LiveResource::AutoScalingGroup { name, .. } => {
                info!(
                    "Autoscaling group {} (owner {}) does not propagate the {} tag; \
                     not auto-fixed, propagation must be enabled manually",
                    name, owner, self.required_tag
                );
                Ok(RemediationOutcome::ReportedOnly)
            }
        }
    }
}
