use actix_web::{post, web, HttpResponse};
use futures::StreamExt;
use std::sync::Arc;
use tracing::warn;

use crate::state::AppState;
use crate::summary::{relay_summary, Rejection};
use crate::types::Envelope;

/// Hard cap on a buffered `/summary` body
///
/// Far above anything that can pass validation; beyond it the body is
/// refused as too long without being parsed.
pub const MAX_SUMMARY_BODY_BYTES: usize = 16 * 1024 * 1024;

/// POST /summary - Validate and relay a summarization request
///
/// The outcome travels in the envelope's `status`; the HTTP status is
/// always 200.
#[post("/summary")]
pub async fn post_summary(payload: web::Payload, state: web::Data<Arc<AppState>>) -> HttpResponse {
    let envelope = match read_body(payload).await {
        Ok(body) => {
            relay_summary(&*state.inference, &body, state.config.default_min_length).await
        }
        Err(envelope) => envelope,
    };

    HttpResponse::Ok().json(envelope)
}

// The stock `Bytes` extractor answers oversized bodies with a bare-text 413.
async fn read_body(mut payload: web::Payload) -> Result<web::BytesMut, Envelope> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!("Failed to read summary request body: {}", e);
            Envelope::from(Rejection::JSON_DECODE)
        })?;
        if body.len() + chunk.len() > MAX_SUMMARY_BODY_BYTES {
            warn!("Summary request body exceeds {} bytes", MAX_SUMMARY_BODY_BYTES);
            return Err(Rejection::TOO_LONG.into());
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
