/// Tubesum error types
#[derive(Debug, thiserror::Error)]
pub enum TubesumError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP transport error (DNS, refused connection, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered, but not in a usable way
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found (unknown video, no matching caption track)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transcripts exist in principle but cannot be retrieved for this video
    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    /// The provider is throttling us
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TubesumError {
    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create upstream error
    pub fn upstream<S: Into<String>>(msg: S) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create transcript unavailable error
    pub fn transcript_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::TranscriptUnavailable(msg.into())
    }

    /// Create rate limited error
    pub fn rate_limited<S: Into<String>>(msg: S) -> Self {
        Self::RateLimited(msg.into())
    }
}

impl TubesumError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::TranscriptUnavailable(_) => 404,
            Self::RateLimited(_) => 429,
            Self::Config(_) => 500,
            Self::Upstream(_) => 502,
            Self::Network(_) => 502,
            Self::Io(_) => 500,
            Self::Json(_) => 500,
            Self::Other(_) => 500,
        }
    }
}
