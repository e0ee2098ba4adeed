use std::time::Duration;

use anyhow::{bail, Context, Result};
use attrition_rs::Attrition;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(rename = "Attrition")]
    attrition: Attrition,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP client for the scoring service. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /`, returning the service's status message.
    pub async fn status(&self) -> Result<String> {
        let url = format!("{}/", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to reach scoring service at {}", url))?;
        let body: MessageResponse = check_status(response)
            .await?
            .json()
            .await
            .context("scoring service sent an unexpected status body")?;
        Ok(body.message)
    }

    /// `POST /predict` with a flat feature payload.
    pub async fn predict(&self, payload: &Map<String, Value>) -> Result<Attrition> {
        let url = format!("{}/predict", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("failed to reach scoring service at {}", url))?;
        let body: PredictResponse = check_status(response)
            .await?
            .json()
            .await
            .context("scoring service sent an unexpected prediction body")?;
        debug!(label = %body.attrition, "prediction received");
        Ok(body.attrition)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    bail!("scoring service rejected the request ({}): {}", status, message.trim())
}
