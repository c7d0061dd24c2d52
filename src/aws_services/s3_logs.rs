//! Fetching and decoding CloudTrail log archives from S3
//!
//! Trails deliver gzip-compressed JSON files under a date-partitioned key
//! prefix. This store lists the scan date's partition, downloads each
//! archive, and flattens the decoded records into one ordered sequence.

use std::io::Read;

use anyhow::{Context, Result};
use aws_config::SdkConfig;
use aws_sdk_s3 as s3;
use chrono::{Datelike, NaiveDate};
use flate2::read::GzDecoder;
use tracing::debug;

use super::region_config;
use crate::audit::{AuditEvent, AuditLogFile};

pub struct TrailLogStore {
    config: SdkConfig,
}

impl TrailLogStore {
    pub fn new(config: SdkConfig) -> Self {
        Self { config }
    }

    /// All audit records a trail delivered for one region and date
    ///
    /// Records are concatenated in object-listing order, which fixes the
    /// sequence the event index's first-match tie-break runs over.
    pub async fn fetch_records(
        &self,
        region: &str,
        bucket: &str,
        key_prefix: Option<&str>,
        account_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<AuditEvent>> {
        let client = s3::Client::new(&region_config(&self.config, region));
        let prefix = log_key_prefix(key_prefix, account_id, region, date);

        let mut records = Vec::new();
        let mut paginator = client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(&prefix)
            .into_paginator()
            .send();

        while let Some(page) = paginator.next().await {
            let page = page.with_context(|| {
                format!("Failed to list trail archives under s3://{}/{}", bucket, prefix)
            })?;
            for object in page.contents.unwrap_or_default() {
                let Some(key) = object.key else {
                    continue;
                };
                debug!("Fetching log archive {}", key);
                let body = client
                    .get_object()
                    .bucket(bucket)
                    .key(&key)
                    .send()
                    .await
                    .with_context(|| format!("Failed to fetch s3://{}/{}", bucket, key))?
                    .body
                    .collect()
                    .await
                    .with_context(|| format!("Failed to read body of s3://{}/{}", bucket, key))?
                    .into_bytes();

                let log_file = decode_archive(&body)
                    .with_context(|| format!("Failed to decode archive s3://{}/{}", bucket, key))?;
                records.extend(log_file.records);
            }
        }

        Ok(records)
    }
}

/// Date-partitioned key prefix a trail delivers under:
/// `{prefix}/AWSLogs/{account}/CloudTrail/{region}/{yyyy}/{mm}/{dd}/`
fn log_key_prefix(
    key_prefix: Option<&str>,
    account_id: &str,
    region: &str,
    date: NaiveDate,
) -> String {
    let partition = format!(
        "AWSLogs/{}/CloudTrail/{}/{:04}/{:02}/{:02}/",
        account_id,
        region,
        date.year(),
        date.month(),
        date.day()
    );
    match key_prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}/{}", prefix.trim_end_matches('/'), partition),
        _ => partition,
    }
}

/// Gunzip one archive and parse its `Records` array
fn decode_archive(compressed: &[u8]) -> Result<AuditLogFile> {
    let mut decoder = GzDecoder::new(compressed);
    let mut json = String::new();
    decoder
        .read_to_string(&mut json)
        .context("Archive is not valid gzip")?;
    let log_file: AuditLogFile =
        serde_json::from_str(&json).context("Archive is not valid CloudTrail JSON")?;
    Ok(log_file)
}

#[cfg(test)]
mod tests {
    use super::log_key_prefix;
    use chrono::NaiveDate;

    #[test]
    fn test_key_prefix_without_trail_prefix() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        assert_eq!(
            log_key_prefix(None, "123456789012", "us-east-1", date),
            "AWSLogs/123456789012/CloudTrail/us-east-1/2026/08/25/"
        );
    }

    #[test]
    fn test_key_prefix_with_trail_prefix() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        assert_eq!(
            log_key_prefix(Some("audit/"), "123456789012", "eu-west-1", date),
            "audit/AWSLogs/123456789012/CloudTrail/eu-west-1/2026/01/02/"
        );
    }

    #[test]
    fn test_key_prefix_empty_string_is_ignored() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();
        assert_eq!(
            log_key_prefix(Some(""), "123456789012", "us-east-1", date),
            "AWSLogs/123456789012/CloudTrail/us-east-1/2026/08/25/"
        );
    }
}
