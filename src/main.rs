#![warn(clippy::all, rust_2018_idioms)]

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tagtrail::scan::{run_scan, ScanConfig};

/// Scan CloudTrail for instances and autoscaling groups without Owner tags
#[derive(Parser)]
#[command(name = "tagtrail", version, about)]
struct Args {
    /// Report intended tag writes without issuing them
    #[arg(long)]
    dryrun: bool,

    /// Log level verbosity
    #[arg(short = 'l', long, value_enum, default_value_t = LogLevel::Info)]
    loglevel: LogLevel,

    /// Tag key required on every instance and autoscaling group
    #[arg(long, default_value = "Owner")]
    tag: String,

    /// Audit-log day to correlate against (YYYY-MM-DD, default: yesterday UTC)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Scan only this region (repeatable, default: all visible regions)
    #[arg(long = "region")]
    regions: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn init_logging(level: LogLevel) -> Result<()> {
    // CLI level applies to this crate; AWS SDK internals stay at warn so a
    // debug scan is not drowned in smithy wire logs. RUST_LOG overrides both.
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder()
            .parse(format!(
                "tagtrail={level},aws_config=warn,aws_sigv4=warn,aws_smithy_runtime=warn,\
                 aws_smithy_runtime_api=warn,hyper=warn",
                level = level.as_str()
            ))
            .context("Failed to parse log filter")?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.loglevel)?;

    let date = args
        .date
        .unwrap_or_else(|| (Utc::now() - Duration::days(1)).date_naive());

    let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let scan = ScanConfig {
        required_tag: args.tag,
        dry_run: args.dryrun,
        date,
        regions: args.regions,
    };

    run_scan(config, &scan).await
}
