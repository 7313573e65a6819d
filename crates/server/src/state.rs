use std::sync::Arc;
use std::time::Duration;
use tubesum_common::{AppConfig, Result};
use tubesum_llm::{HfInferenceClient, InferenceClient};
use tubesum_transcript::{TranscriptProvider, YoutubeTranscriptClient};

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Upstream summarization backend
    pub inference: Arc<dyn InferenceClient>,

    /// Caption source
    pub transcripts: Arc<dyn TranscriptProvider>,
}

impl AppState {
    /// Create application state with the production clients
    pub fn new(config: AppConfig) -> Result<Self> {
        let inference = HfInferenceClient::new(
            config.upstream_api_root_url.clone(),
            &config.api_key,
            config.upstream_timeout_secs.map(Duration::from_secs),
        )?;
        let transcripts =
            YoutubeTranscriptClient::new(config.youtube_base_url.clone(), config.languages())?;

        Ok(Self::with_clients(
            config,
            Arc::new(inference),
            Arc::new(transcripts),
        ))
    }

    /// Create application state around existing clients
    pub fn with_clients(
        config: AppConfig,
        inference: Arc<dyn InferenceClient>,
        transcripts: Arc<dyn TranscriptProvider>,
    ) -> Self {
        Self {
            config,
            inference,
            transcripts,
        }
    }
}
