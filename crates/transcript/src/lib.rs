//! Tubesum transcript retrieval
//!
//! Fetches YouTube caption tracks and flattens them into plain text.

pub mod captions;
pub mod provider;
pub mod types;
pub mod youtube;

// Re-export main types
pub use provider::TranscriptProvider;
pub use types::{join_fragments, CaptionTrack, TranscriptFragment};
pub use youtube::YoutubeTranscriptClient;
