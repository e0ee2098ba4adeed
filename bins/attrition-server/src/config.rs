use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

pub const MODEL_PATH_ENV: &str = "ATTRITION_MODEL_PATH";
pub const SCALER_PATH_ENV: &str = "ATTRITION_SCALER_PATH";
pub const BIND_ENV: &str = "ATTRITION_BIND";
pub const PORT_ENV: &str = "PORT";

const DEFAULT_MODEL_PATH: &str = "model/attrition.model";
const DEFAULT_SCALER_PATH: &str = "model/attrition.range";
const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub bind: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let model_path = get(MODEL_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
        let scaler_path = get(SCALER_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCALER_PATH));

        let bind_raw = get(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let mut bind: SocketAddr = bind_raw
            .parse()
            .with_context(|| format!("{} is not a socket address: {}", BIND_ENV, bind_raw))?;

        if let Some(port) = get(PORT_ENV) {
            match port.parse::<u16>() {
                Ok(port) => bind.set_port(port),
                Err(_) => warn!(value = %port, "ignoring unparsable {}", PORT_ENV),
            }
        }

        Ok(Self {
            model_path,
            scaler_path,
            bind,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
