use async_trait::async_trait;
use tubesum_common::Result;

use crate::types::TranscriptFragment;

/// Source of per-video caption fragments
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the ordered caption fragments for a video
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>>;
}
