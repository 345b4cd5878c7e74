use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{
            CreateUserWidgetRequest, DeleteUserWidgetRequest, EditUserWidgetRequest,
            ShareDataRequest,
        },
        response::{
            CreateUserWidgetResponse, RefreshAppWidgetResponse, ShareDataResponse, SimpleResponse,
            WidgetHtmlResponse,
        },
    },
};

/// Accept data and a rendering instruction from a registered app, generate
/// the widget, and store it in the app's slot.
#[post("/share-data")]
pub async fn share_data(
    state: web::Data<AppState>,
    request: web::Json<ShareDataRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let app = state
        .app_service
        .verify_integration_token(&request.integration_token)
        .await?;

    state
        .widget_service
        .share_app_data(&app, request.data, &request.render_prompt)
        .await?;

    Ok(HttpResponse::Ok().json(ShareDataResponse {
        success: true,
        message: "Data shared and widget generated successfully".to_string(),
    }))
}

/// Cached widget HTML for the periodic dashboard poll. No regeneration.
#[get("/widget/{app_id}/refresh")]
pub async fn cached_app_widget(
    state: web::Data<AppState>,
    app_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let html = state.widget_service.cached_app_widget_html(&app_id).await?;
    Ok(HttpResponse::Ok().json(WidgetHtmlResponse { html }))
}

#[post("/api/user-widgets/create")]
pub async fn create_user_widget(
    state: web::Data<AppState>,
    request: web::Json<CreateUserWidgetRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let widget_id = state
        .widget_service
        .create_user_widget(&request.prompt, request.widget_name)
        .await?;

    Ok(HttpResponse::Ok().json(CreateUserWidgetResponse {
        success: true,
        widget_id,
        message: "User widget created successfully".to_string(),
    }))
}

#[post("/api/user-widgets/edit")]
pub async fn edit_user_widget(
    state: web::Data<AppState>,
    request: web::Json<EditUserWidgetRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    state
        .widget_service
        .edit_user_widget(&request.widget_id, &request.prompt)
        .await?;

    Ok(HttpResponse::Ok().json(SimpleResponse {
        success: true,
        message: "User widget updated successfully".to_string(),
    }))
}

#[post("/api/user-widgets/delete")]
pub async fn delete_user_widget(
    state: web::Data<AppState>,
    request: web::Json<DeleteUserWidgetRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    state
        .widget_service
        .delete_user_widget(&request.widget_id)
        .await?;

    Ok(HttpResponse::Ok().json(SimpleResponse {
        success: true,
        message: "User widget deleted successfully".to_string(),
    }))
}

/// Regenerate a user widget, keeping its current look.
#[post("/api/user-widgets/{widget_id}/refresh")]
pub async fn refresh_user_widget(
    state: web::Data<AppState>,
    widget_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let html = state.widget_service.refresh_user_widget(&widget_id).await?;
    Ok(HttpResponse::Ok().json(WidgetHtmlResponse { html }))
}

/// Regenerate a user widget from its original prompt, allowing a new design.
#[post("/api/user-widgets/{widget_id}/full-refresh")]
pub async fn full_refresh_user_widget(
    state: web::Data<AppState>,
    widget_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let html = state
        .widget_service
        .full_refresh_user_widget(&widget_id)
        .await?;
    Ok(HttpResponse::Ok().json(WidgetHtmlResponse { html }))
}

#[post("/api/app-widgets/{app_id}/refresh")]
pub async fn refresh_app_widget(
    state: web::Data<AppState>,
    app_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let html = state.widget_service.refresh_app_widget(&app_id).await?;
    Ok(HttpResponse::Ok().json(RefreshAppWidgetResponse {
        success: true,
        html,
        message: "Widget refreshed successfully".to_string(),
    }))
}

#[post("/api/app-widgets/{app_id}/full-refresh")]
pub async fn full_refresh_app_widget(
    state: web::Data<AppState>,
    app_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let html = state
        .widget_service
        .full_refresh_app_widget(&app_id)
        .await?;
    Ok(HttpResponse::Ok().json(RefreshAppWidgetResponse {
        success: true,
        html,
        message: "Widget fully refreshed successfully".to_string(),
    }))
}
