use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::ProfileStore;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    /// "connected" or the ping error
    pub store: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<dyn ProfileStore>) -> impl Responder {
    let (mut response, status, store_state) = match store.ping().await {
        Ok(()) => (HttpResponse::Ok(), "healthy", "connected".to_string()),
        Err(e) => {
            log::warn!("⚠️  Health check: store unreachable - {}", e);
            (HttpResponse::ServiceUnavailable(), "degraded", e.to_string())
        }
    };

    response.json(HealthResponse {
        status: status.to_string(),
        service: "talent-match-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        store: store_state,
    })
}
