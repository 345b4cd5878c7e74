use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::{app_state::AppState, models::dto::response::HealthResponse};

/// Liveness probe: verifies database connectivity.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.db.health_check().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            environment: state.config.environment.clone(),
            database: "connected".to_string(),
        }),
        Err(err) => {
            log::error!("health check failed: {err}");
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unhealthy",
                "error": err.to_string(),
            }))
        }
    }
}
