pub mod app_repository;
pub mod widget_repository;

pub use app_repository::{AppRepository, MongoAppRepository};
pub use widget_repository::{MongoWidgetRepository, WidgetRepository};
