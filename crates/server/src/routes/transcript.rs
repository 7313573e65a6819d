use actix_web::{get, http::StatusCode, web, HttpResponse};
use std::sync::Arc;
use tracing::{info, warn};
use tubesum_transcript::join_fragments;

use crate::state::AppState;
use crate::types::{Envelope, TranscriptResponse};

/// GET /transcript/{video_id} - Full caption text of a video
#[get("/transcript/{video_id}")]
pub async fn get_transcript(
    video_id: web::Path<String>,
    state: web::Data<Arc<AppState>>,
) -> HttpResponse {
    match state.transcripts.fetch(&video_id).await {
        Ok(fragments) => {
            info!("Transcript fetched - Video: {}, Fragments: {}", video_id, fragments.len());
            HttpResponse::Ok().json(TranscriptResponse {
                transcript: join_fragments(&fragments),
            })
        }
        Err(e) => {
            warn!("Transcript unavailable - Video: {}: {}", video_id, e);
            let status = e.status_code();
            HttpResponse::build(
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            )
            .json(Envelope::failure(status, e.to_string()))
        }
    }
}
