use serde::{Deserialize, Serialize};

/// Single caption fragment with timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptFragment {
    /// Caption text
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

impl TranscriptFragment {
    /// Create a new fragment
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Caption track advertised on a watch page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    /// Timed-text download URL
    pub base_url: String,

    /// Language code (e.g. "en", "de")
    pub language_code: String,

    /// "asr" for auto-generated tracks
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    /// Whether YouTube generated this track by speech recognition
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Concatenate fragments, each followed by a single space
pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    let mut transcript = String::new();
    for fragment in fragments {
        transcript.push_str(&fragment.text);
        transcript.push(' ');
    }
    transcript
}
