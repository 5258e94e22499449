//! Configuration model loaded from external sources.

use std::path::PathBuf;

use serde::Deserialize;

use crate::schedule::DEFAULT_ALERT_THRESHOLD;

fn default_alert_threshold_days() -> u32 {
    DEFAULT_ALERT_THRESHOLD
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_token_file() -> PathBuf {
    PathBuf::from(".rutero-token")
}

#[derive(Clone, Debug, Deserialize)]
/// Settings for talking to the route backend.
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `http://localhost:5000/api`.
    pub api_url: String,
    /// File holding the bearer token between invocations.
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    #[serde(default = "default_alert_threshold_days")]
    pub alert_threshold_days: u32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}
