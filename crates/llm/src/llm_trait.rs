use crate::types::{SummarizeRequest, UpstreamReply};
use async_trait::async_trait;
use tubesum_common::Result;

/// Common trait for summarization backends
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// POST one summarization request for `model` and return the raw reply.
    ///
    /// Only transport failures are errors; any HTTP status is a reply.
    async fn summarize(&self, model: &str, request: &SummarizeRequest) -> Result<UpstreamReply>;
}
