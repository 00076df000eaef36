//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::tasks::LivenessSettings;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-worker")]
#[command(about = "An isolated, message-driven countdown timer service")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Progress report period in milliseconds
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Seconds between liveness probes sent to each timer
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    pub liveness_interval: u64,

    /// Seconds a liveness probe may go unanswered before the timer is dropped
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u64).range(1..))]
    pub liveness_timeout: u64,

    /// Drive a single timer over stdin/stdout instead of serving HTTP
    #[arg(long)]
    pub stdio: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn liveness(&self) -> LivenessSettings {
        LivenessSettings {
            interval: Duration::from_secs(self.liveness_interval),
            timeout: Duration::from_secs(self.liveness_timeout),
        }
    }
}
