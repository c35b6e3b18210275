//! Command-line arguments.

use clap::Parser;
use simplelog::LevelFilter;
use url::Url;

/// Transfer form whose validation rules drift while you type.
#[derive(Debug, Parser)]
#[command(name = "driftform", version, about)]
pub struct Args {
    /// POST submissions to this URL instead of the built-in mock server.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<Url>,

    /// Request timeout for the HTTP endpoint, in seconds.
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub http_timeout: u64,

    /// Seconds between rule changes. 0 keeps the initial rules.
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub rule_interval: u64,

    /// Seed for the mock server and rule source.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probability that the mock server fails without a verdict.
    #[arg(long, default_value_t = 0.1, value_name = "P")]
    pub transport_failure_rate: f64,

    /// Log level written to the log file.
    #[arg(long, default_value = "debug", value_name = "LEVEL")]
    pub log_level: LevelFilter,
}
