//! YouTube caption retrieval
//!
//! The watch page embeds the player response, which lists the available
//! caption tracks. The preferred track is then downloaded as timed-text XML.

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, info, warn};
use tubesum_common::{Result, TubesumError};

use crate::captions::parse_timed_text;
use crate::provider::TranscriptProvider;
use crate::types::{CaptionTrack, TranscriptFragment};

const CONSENT_FORM_ACTION: &str = "action=\"https://consent.youtube.com/s\"";

/// Transcript provider backed by youtube.com
#[derive(Debug, Clone)]
pub struct YoutubeTranscriptClient {
    base_url: String,
    languages: Vec<String>,
    client: Client,
}

impl YoutubeTranscriptClient {
    /// Create new client
    ///
    /// `languages` is the caption language preference, most preferred first.
    pub fn new(base_url: impl Into<String>, languages: Vec<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("YouTube transcript client initialized: {} (languages: {:?})", base_url, languages);
        Ok(Self {
            base_url,
            languages,
            client,
        })
    }

    /// Fetch the watch page, passing the consent interstitial if shown
    async fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let html = self.fetch_page(video_id, None).await?;
        if !html.contains(CONSENT_FORM_ACTION) {
            return Ok(html);
        }

        debug!("Consent page served for {}, retrying with consent cookie", video_id);
        let token = consent_token(&html).ok_or_else(|| {
            TubesumError::transcript_unavailable("failed to create consent cookie")
        })?;

        let html = self.fetch_page(video_id, Some(&token)).await?;
        if html.contains(CONSENT_FORM_ACTION) {
            return Err(TubesumError::transcript_unavailable(
                "failed to create consent cookie",
            ));
        }
        Ok(html)
    }

    async fn fetch_page(&self, video_id: &str, consent: Option<&str>) -> Result<String> {
        let url = format!("{}/watch", self.base_url);
        let mut request = self
            .client
            .get(&url)
            .query(&[("v", video_id)])
            .header(ACCEPT_LANGUAGE, "en-US");
        if let Some(token) = consent {
            request = request.header(COOKIE, format!("CONSENT=YES+{}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| TubesumError::network(format!("Failed to reach {}: {}", url, e)))?;

        check_status(response, video_id)
            .await?
            .text()
            .await
            .map_err(|e| TubesumError::network(format!("Failed to read watch page: {}", e)))
    }

    async fn fetch_timed_text(&self, track: &CaptionTrack, video_id: &str) -> Result<String> {
        let response = self
            .client
            .get(&track.base_url)
            .header(ACCEPT_LANGUAGE, "en-US")
            .send()
            .await
            .map_err(|e| TubesumError::network(format!("Failed to download captions: {}", e)))?;

        check_status(response, video_id)
            .await?
            .text()
            .await
            .map_err(|e| TubesumError::network(format!("Failed to read captions: {}", e)))
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptClient {
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptFragment>> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(TubesumError::invalid_input("video id cannot be empty"));
        }

        let html = self.fetch_watch_page(video_id).await?;
        let tracks = extract_caption_tracks(&html, video_id)?;
        let track = select_track(&tracks, &self.languages, video_id)?;

        debug!(
            "Selected caption track for {}: language={}, generated={}",
            video_id,
            track.language_code,
            track.is_generated()
        );

        let xml = self.fetch_timed_text(track, video_id).await?;
        Ok(parse_timed_text(&xml))
    }
}

async fn check_status(response: Response, video_id: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!("YouTube returned {} for video {}", status, video_id);
    Err(match status {
        StatusCode::TOO_MANY_REQUESTS => {
            TubesumError::rate_limited("YouTube is receiving too many requests from this IP")
        }
        StatusCode::NOT_FOUND => TubesumError::not_found(format!("video {} is unavailable", video_id)),
        _ => TubesumError::upstream(format!("YouTube returned HTTP {}", status.as_u16())),
    })
}

fn consent_token(html: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"name="v" value="(.*?)""#).expect("valid consent pattern"));
    re.captures(html).map(|caps| caps[1].to_string())
}

/// Pull the caption track list out of a watch page
pub fn extract_caption_tracks(html: &str, video_id: &str) -> Result<Vec<CaptionTrack>> {
    let Some((_, rest)) = html.split_once("\"captions\":") else {
        if html.contains("class=\"g-recaptcha\"") {
            return Err(TubesumError::rate_limited(
                "YouTube is receiving too many requests from this IP",
            ));
        }
        if !html.contains("\"playabilityStatus\":") {
            return Err(TubesumError::not_found(format!("video {} is unavailable", video_id)));
        }
        return Err(TubesumError::transcript_unavailable(format!(
            "transcripts are disabled for video {}",
            video_id
        )));
    };

    let captions_json = rest
        .split(",\"videoDetails")
        .next()
        .unwrap_or(rest)
        .replace('\n', "");

    let captions: Value = serde_json::from_str(&captions_json).map_err(|e| {
        TubesumError::upstream(format!("Malformed captions data for video {}: {}", video_id, e))
    })?;

    let tracks = captions
        .get("playerCaptionsTracklistRenderer")
        .and_then(|renderer| renderer.get("captionTracks"))
        .cloned()
        .ok_or_else(|| {
            TubesumError::transcript_unavailable(format!(
                "transcripts are disabled for video {}",
                video_id
            ))
        })?;

    serde_json::from_value(tracks).map_err(|e| {
        TubesumError::upstream(format!("Malformed caption track for video {}: {}", video_id, e))
    })
}

/// Choose a track: languages in preference order, manual tracks before generated ones
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
    video_id: &str,
) -> Result<&'a CaptionTrack> {
    for language in languages {
        let manual = tracks
            .iter()
            .find(|t| !t.is_generated() && t.language_code == *language);
        let generated = || {
            tracks
                .iter()
                .find(|t| t.is_generated() && t.language_code == *language)
        };

        if let Some(track) = manual.or_else(generated) {
            return Ok(track);
        }
    }

    let available: Vec<&str> = tracks.iter().map(|t| t.language_code.as_str()).collect();
    Err(TubesumError::not_found(format!(
        "no transcript found for video {} in languages {:?} (available: {:?})",
        video_id, languages, available
    )))
}
