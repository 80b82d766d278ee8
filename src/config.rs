//! Runtime configuration
//!
//! Remote endpoints and the HTTP timeout, with environment overrides.
//! Outputs always land in the working directory.

use std::path::PathBuf;
use std::time::Duration;

/// GEO supplementary file download endpoint.
pub const DEFAULT_GEO_URL: &str = "https://www.ncbi.nlm.nih.gov/geo/download/";

/// g:Profiler g:GOSt endpoint.
pub const DEFAULT_GPROFILER_URL: &str = "https://biit.cs.ut.ee/gprofiler/api/gost/profile/";

/// Large enough for the GEO tables and a slow enrichment query.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    /// GEO download URL
    pub geo_url: String,

    /// g:Profiler profile URL
    pub gprofiler_url: String,

    /// Timeout applied to every HTTP request
    pub http_timeout_secs: u64,

    /// Where inputs are unpacked and outputs written
    pub work_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geo_url: DEFAULT_GEO_URL.to_string(),
            gprofiler_url: DEFAULT_GPROFILER_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            work_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("VOLCANO_GEO_URL") {
            config.geo_url = url;
        }

        if let Ok(url) = std::env::var("VOLCANO_GPROFILER_URL") {
            config.gprofiler_url = url;
        }

        if let Some(secs) = std::env::var("VOLCANO_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.http_timeout_secs = secs;
        }

        config
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Point inputs and outputs at another directory (tests use a tempdir).
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }
}
