use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use tubesum_common::{Result, TubesumError};

use crate::llm_trait::InferenceClient;
use crate::types::{SummarizeRequest, UpstreamReply};

/// Hosted inference API client (Hugging Face style `<root>/<model>` routing)
#[derive(Debug, Clone)]
pub struct HfInferenceClient {
    root_url: String,
    client: Client,
}

impl HfInferenceClient {
    /// Create new inference client
    ///
    /// Only the bearer token and content type are sent. `timeout` of `None`
    /// leaves the request unbounded.
    pub fn new(
        root_url: impl Into<String>,
        api_key: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let root_url = root_url.into().trim_end_matches('/').to_string();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| TubesumError::config(format!("API key is not a valid header value: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Inference client initialized: {} (timeout: {:?})", root_url, timeout);
        Ok(Self { root_url, client })
    }

    /// Full endpoint URL for a model
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.root_url, model)
    }
}

#[async_trait]
impl InferenceClient for HfInferenceClient {
    async fn summarize(&self, model: &str, request: &SummarizeRequest) -> Result<UpstreamReply> {
        let url = self.endpoint(model);

        debug!(
            "Sending summarization request - Model: {}, Input length: {}, min_length: {}",
            model,
            request.inputs.chars().count(),
            request.parameters.min_length
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| TubesumError::network(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TubesumError::network(format!("Failed to read response body: {}", e)))?;

        debug!("Upstream replied - Status: {}, Body length: {}", status, body.len());

        Ok(UpstreamReply { status, body })
    }
}
