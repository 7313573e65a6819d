//! In-memory clients for route tests

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tubesum_common::{AppConfig, Result, TubesumError};
use tubesum_llm::{InferenceClient, SummarizeRequest, UpstreamReply};
use tubesum_transcript::{TranscriptFragment, TranscriptProvider};

use crate::state::AppState;

/// Replays one canned reply; `None` simulates a dead upstream
#[derive(Default)]
pub struct FakeInference {
    pub reply: Option<UpstreamReply>,
    pub calls: Mutex<Vec<(String, SummarizeRequest)>>,
}

impl FakeInference {
    pub fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(UpstreamReply::new(status, body)),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(String, SummarizeRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for FakeInference {
    async fn summarize(&self, model: &str, request: &SummarizeRequest) -> Result<UpstreamReply> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        self.reply
            .clone()
            .ok_or_else(|| TubesumError::network("connection refused"))
    }
}

/// Serves fixed fragments for one video id
pub struct FakeTranscripts {
    pub video_id: String,
    pub fragments: Vec<TranscriptFragment>,
}

#[async_trait]
impl TranscriptProvider for FakeTranscripts {
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>> {
        if video_id == self.video_id {
            Ok(self.fragments.clone())
        } else {
            Err(TubesumError::not_found(format!("video {} is unavailable", video_id)))
        }
    }
}

pub fn test_state(inference: Arc<FakeInference>) -> Arc<AppState> {
    let transcripts = FakeTranscripts {
        video_id: "Z6nkEZyS9nA".to_string(),
        fragments: vec![
            TranscriptFragment::new("Hello ", 0.0, 1.0),
            TranscriptFragment::new("world", 1.0, 1.0),
        ],
    };
    let config = AppConfig {
        api_key: "hf_test".to_string(),
        ..AppConfig::default()
    };
    Arc::new(AppState::with_clients(config, inference, Arc::new(transcripts)))
}
