use serde::{Deserialize, Serialize};

/// Inference API summarization request
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeRequest {
    /// Text to summarize
    pub inputs: String,

    /// Generation parameters
    pub parameters: SummarizeParameters,
}

impl SummarizeRequest {
    /// Create a request with the fixed sampling/caching flags
    pub fn new(inputs: impl Into<String>, min_length: i64) -> Self {
        Self {
            inputs: inputs.into(),
            parameters: SummarizeParameters::with_min_length(min_length),
        }
    }
}

/// Generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeParameters {
    /// Minimum summary length in tokens
    pub min_length: i64,

    /// Greedy decoding when false
    pub do_sample: bool,

    /// Upstream result cache
    pub use_cache: bool,
}

impl SummarizeParameters {
    pub fn with_min_length(min_length: i64) -> Self {
        Self {
            min_length,
            do_sample: false,
            use_cache: false,
        }
    }
}

/// Raw upstream answer, uninterpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    /// HTTP status code
    pub status: u16,

    /// Response body text
    pub body: String,
}

impl UpstreamReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}
