use actix_web::{get, HttpResponse};

use crate::types::{DocsResponse, EndpointDoc, RootResponse};

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(RootResponse {
        message: "Use endpoint /transcript/{video_id}".to_string(),
        docs: "To access docs, use endpoint /docs".to_string(),
    })
}

/// GET /docs - Endpoint overview
#[get("/docs")]
pub async fn docs() -> HttpResponse {
    HttpResponse::Ok().json(DocsResponse {
        endpoints: vec![
            EndpointDoc {
                method: "GET",
                path: "/",
                description: "Service banner",
            },
            EndpointDoc {
                method: "GET",
                path: "/docs",
                description: "This endpoint list",
            },
            EndpointDoc {
                method: "GET",
                path: "/transcript/{video_id}",
                description: "Concatenated caption text of a YouTube video",
            },
            EndpointDoc {
                method: "POST",
                path: "/summary",
                description: "Summarize {model, text, min_length?} through the inference API",
            },
        ],
    })
}
