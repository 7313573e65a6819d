use actix_web::web;

pub mod root;
pub mod summary;
pub mod transcript;

/// Register every endpoint
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root::index)
        .service(root::docs)
        .service(transcript::get_transcript)
        .service(summary::post_summary);
}
