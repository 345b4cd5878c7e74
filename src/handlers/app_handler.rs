use actix_web::{delete, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth,
    errors::AppError,
    models::dto::{request::RegisterRequest, response::SimpleResponse},
};

/// Register a third-party app. Guarded by the shared registration token;
/// hands back the app's integration token.
#[post("/register")]
pub async fn register_app(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;
    auth::verify_registration_token(&request.registration_token, &state.config)?;

    let response = state.app_service.register(&request.app_name).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Delete an app widget and unregister the app behind it.
#[delete("/api/app-widgets/{app_id}")]
pub async fn delete_app_widget(
    state: web::Data<AppState>,
    app_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.app_service.unregister(&app_id).await?;

    Ok(HttpResponse::Ok().json(SimpleResponse {
        success: true,
        message: "App and widget deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_register_endpoint_rejects_invalid_body() {
        let app = test::init_service(App::new().service(register_app)).await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(serde_json::json!({ "app_name": "x" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        // missing registration_token never reaches the service layer
        assert!(resp.status().is_client_error() || resp.status().is_server_error());
    }
}
