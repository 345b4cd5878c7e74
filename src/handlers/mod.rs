pub mod app_handler;
pub mod dashboard_handler;
pub mod health_handler;
pub mod widget_handler;
