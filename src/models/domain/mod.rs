pub mod app;
pub mod widget;

pub use app::RegisteredApp;
pub use widget::Widget;
