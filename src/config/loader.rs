use crate::config::constants;
use crate::models::payload_dto::ArticlePayload;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read scenario file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse scenario file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("vus must be at least 1")]
    InvalidVus,
    #[error("duration_secs must be at least 1")]
    InvalidDuration,
    #[error("pacing_secs must be a finite, non-negative number")]
    InvalidPacing,
    #[error("expected_status is not a valid HTTP status code: {0}")]
    InvalidStatus(u16),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub options: Options,
    #[serde(default)]
    pub payload: PayloadConfig,
    #[serde(default)]
    pub status_api: StatusApiConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TargetConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_expected_status")]
    pub expected_status: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Options {
    #[serde(default = "default_vus")]
    pub vus: u32,
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
    #[serde(default = "default_pacing_secs")]
    pub pacing_secs: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PayloadConfig {
    #[serde(default = "default_payload_user")]
    pub user: String,
    #[serde(default = "default_payload_file")]
    pub file: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatusApiConfig {
    #[serde(default = "default_status_api_enabled")]
    pub enabled: bool,
    #[serde(default = "default_status_api_addr")]
    pub addr: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ReportConfig {
    #[serde(default)]
    pub json_path: Option<PathBuf>,
}

impl Default for TargetConfig {
    fn default() -> TargetConfig {
        TargetConfig {
            url: default_url(),
            expected_status: default_expected_status(),
        }
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            vus: default_vus(),
            duration_secs: default_duration_secs(),
            pacing_secs: default_pacing_secs(),
        }
    }
}

impl Default for PayloadConfig {
    fn default() -> PayloadConfig {
        PayloadConfig {
            user: default_payload_user(),
            file: default_payload_file(),
        }
    }
}

impl Default for StatusApiConfig {
    fn default() -> StatusApiConfig {
        StatusApiConfig {
            enabled: default_status_api_enabled(),
            addr: default_status_api_addr(),
        }
    }
}

fn default_url() -> String {
    constants::DEFAULT_TARGET_URL.to_string()
}
fn default_expected_status() -> u16 {
    constants::DEFAULT_EXPECTED_STATUS
}
fn default_vus() -> u32 {
    constants::DEFAULT_VUS
}
fn default_duration_secs() -> u64 {
    constants::DEFAULT_DURATION_SECS
}
fn default_pacing_secs() -> f64 {
    constants::DEFAULT_PACING_SECS
}
fn default_payload_user() -> String {
    constants::DEFAULT_PAYLOAD_USER.to_string()
}
fn default_payload_file() -> String {
    constants::DEFAULT_PAYLOAD_FILE.to_string()
}
fn default_status_api_enabled() -> bool {
    true
}
fn default_status_api_addr() -> String {
    constants::STATUS_API_ADDR.to_string()
}

impl Config {
    /// Load a scenario from `input_file`, from the `LOADGEN_SCENARIO`
    /// environment variable, or fall back to the built-in scenario.
    pub fn new(input_file: Option<&str>) -> Result<Config, ConfigError> {
        let path = input_file
            .map(str::to_string)
            .or_else(|| std::env::var("LOADGEN_SCENARIO").ok());

        let config = match path {
            Some(p) => {
                let contents = fs::read_to_string(&p)?;
                serde_yaml::from_str(&contents)?
            }
            None => Config::default(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.options.vus == 0 {
            return Err(ConfigError::InvalidVus);
        }
        if self.options.duration_secs == 0 {
            return Err(ConfigError::InvalidDuration);
        }
        if !self.options.pacing_secs.is_finite() || self.options.pacing_secs < 0.0 {
            return Err(ConfigError::InvalidPacing);
        }
        if !(100..=599).contains(&self.target.expected_status) {
            return Err(ConfigError::InvalidStatus(self.target.expected_status));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.options.duration_secs)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_secs_f64(self.options.pacing_secs)
    }

    /// Request bodies are built fresh for every iteration.
    pub fn article_payload(&self) -> ArticlePayload {
        ArticlePayload {
            user: self.payload.user.clone(),
            file: self.payload.file.clone(),
        }
    }
}
