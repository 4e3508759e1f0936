use serde::Deserialize;
use std::path::PathBuf;

/// Exporter configuration, loaded from a TOML file.
///
/// Defaults match the historically hard-coded values: exposition port
/// 9114, a 15 second poll interval, and a local stub-status URL.
#[derive(Debug, Clone, Deserialize)]
pub struct ExporterConfig {
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    pub source: SourceConfig,
}

/// Which status interface to poll.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// GET a stub-status endpoint each tick.
    HttpStatus {
        #[serde(default = "default_status_url")]
        url: String,
        #[serde(default = "default_fetch_timeout_secs")]
        timeout_secs: u64,
    },
    /// Scan a local access log each tick.
    AccessLog { path: PathBuf },
}

fn default_listen_port() -> u16 {
    9114
}

fn default_poll_interval_secs() -> u64 {
    15
}

fn default_status_url() -> String {
    "http://localhost:8080/nginx_status".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

impl ExporterConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval_secs == 0 {
            anyhow::bail!("poll_interval_secs must be greater than zero");
        }
        Ok(())
    }
}
