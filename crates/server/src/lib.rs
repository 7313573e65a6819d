//! Tubesum HTTP server
//!
//! Actix-web REST API: YouTube transcript retrieval and a validating relay
//! to the upstream summarization API.

use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tubesum_common::{AppConfig, Result};

pub mod routes;
pub mod state;
pub mod summary;
pub mod types;

#[cfg(test)]
mod testing;

pub use state::AppState;
pub use summary::{classify_upstream, validate_summary_request, Rejection, SummaryRequest};
pub use types::Envelope;

/// Build the production clients and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);
    let bind_addr = state.config.server_bind_address();

    info!("Starting HTTP server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
