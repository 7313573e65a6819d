//! Tubesum upstream inference integration
//!
//! Thin client for a hosted summarization endpoint. It builds the request,
//! sends it once and hands back the raw status and body; interpretation is
//! left to the caller.

mod client;
mod llm_trait;
mod types;

pub use client::HfInferenceClient;
pub use llm_trait::InferenceClient;
pub use types::{SummarizeParameters, SummarizeRequest, UpstreamReply};
