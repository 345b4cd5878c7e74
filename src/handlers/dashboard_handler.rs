use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, templates};

/// Main dashboard page: user widgets first (newest first), then app widgets
/// in registration order.
#[get("/")]
pub async fn dashboard(state: web::Data<AppState>) -> HttpResponse {
    match state.widget_service.dashboard_cards().await {
        Ok(cards) => {
            let page = templates::render_dashboard(&cards, state.config.widget_refresh_interval_ms);
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(page)
        }
        Err(err) => {
            log::error!("failed to assemble dashboard: {err}");
            HttpResponse::ServiceUnavailable()
                .content_type("text/html; charset=utf-8")
                .body(templates::render_db_error_page(&err.to_string()))
        }
    }
}
