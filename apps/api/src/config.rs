use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::InferenceConfig;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_PROFILE: &str = "default";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Read once at startup and never reloaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub aws_region: String,
    pub aws_profile: String,
    pub inference: InferenceConfig,
    pub fetch_timeout: Duration,
    pub max_upload_bytes: usize,
    /// Reserved for future use. Nothing is written here.
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut inference = InferenceConfig::default();
        if let Ok(model_id) = std::env::var("BEDROCK_MODEL_ID") {
            inference.model_id = model_id;
        }
        inference.max_attempts = parse_env("INFERENCE_MAX_ATTEMPTS", inference.max_attempts)?;
        if inference.max_attempts == 0 {
            anyhow::bail!("INFERENCE_MAX_ATTEMPTS must be at least 1");
        }
        inference.timeout = match std::env::var("INFERENCE_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse::<u64>().with_context(|| {
                format!("INFERENCE_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'")
            })?)),
            Err(_) => None,
        };

        Ok(Config {
            aws_region: env_or("AWS_REGION", DEFAULT_REGION),
            aws_profile: env_or("AWS_PROFILE", DEFAULT_PROFILE),
            inference,
            fetch_timeout: Duration::from_secs(parse_env(
                "FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            data_dir: PathBuf::from(env_or("DATA_DIR", "data")),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            aws_region: DEFAULT_REGION.to_string(),
            aws_profile: DEFAULT_PROFILE.to_string(),
            inference: InferenceConfig::default(),
            fetch_timeout: Duration::from_secs(5),
            max_upload_bytes: 64 * 1024,
            data_dir: PathBuf::from("data"),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
