pub mod app_service;
pub mod generation;
pub mod widget_service;
