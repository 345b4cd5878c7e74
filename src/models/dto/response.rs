use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub integration_token: String,
    pub app_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareDataResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserWidgetResponse {
    pub success: bool,
    pub widget_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimpleResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WidgetHtmlResponse {
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshAppWidgetResponse {
    pub success: bool,
    pub html: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub database: String,
}

/// View data for one dashboard cell. User widgets carry a `widget_id`, app
/// widgets an `app_id`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardCard {
    pub widget_id: Option<String>,
    pub app_id: Option<String>,
    pub title: String,
    pub user_created: bool,
    pub html: String,
}
