//! tagtrail - CloudTrail-backed ownership-tag compliance scanner
//!
//! Audits an AWS account for EC2 instances and Auto Scaling groups that lack
//! a required ownership tag, recovering each resource's creator from the
//! CloudTrail archives the account's trail delivered to S3, and optionally
//! tagging instances with the recovered owner.
//!
//! # Architecture
//!
//! - [`audit`]: decoded CloudTrail record model and the creation-event index
//!   (identifier -> creator, first event in record order wins)
//! - [`resources`]: typed live-inventory model and the per-resource finding
//! - [`policy`]: owner resolution and tag-gap detection, including the
//!   propagate-at-launch rule for Auto Scaling groups
//! - [`remediation`]: dry-run-aware tag application behind a writer seam
//! - [`scan`]: the per-region pipeline and the multi-region driver
//! - [`aws_services`]: thin service structs over the AWS SDK clients; the
//!   only modules that touch the network
//!
//! The core pipeline ([`scan::scan_region`]) performs no I/O: audit records
//! and the live inventory are inputs, findings are the output.

#![warn(clippy::all, rust_2018_idioms)]

pub mod audit;
pub mod aws_services;
pub mod policy;
pub mod remediation;
pub mod resources;
pub mod scan;
