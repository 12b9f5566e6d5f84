//! Server configuration

use routestats_core::UrlTracking;

/// Server configuration loaded from environment variables
pub struct Config {
    pub bind_address: String,
    pub metrics_prefix: String,
    pub tracking: UrlTracking,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            metrics_prefix: std::env::var("METRICS_PREFIX").unwrap_or_else(|_| "routestats".into()),
            tracking: UrlTracking {
                time_by_url: env_flag("METRICS_TIME_BY_URL"),
                count_by_url: env_flag("METRICS_COUNT_BY_URL"),
                status_code_by_url: env_flag("METRICS_STATUS_CODE_BY_URL"),
            },
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| parse_flag(&v)).unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
