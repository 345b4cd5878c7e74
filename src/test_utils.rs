use crate::models::domain::{RegisteredApp, Widget};


#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_app_has_an_id() {
        let app = test_app("weather");
        assert!(app.id.is_some());
        assert_eq!(app.app_name, "weather");
    }

    #[test]
    fn test_fixture_widgets_are_distinguishable() {
        let app_widget = test_app_widget("abc");
        let user_widget = test_user_widget("Clock");

        assert!(!app_widget.user_created);
        assert!(user_widget.user_created);
        assert!(app_widget.app_id.is_some());
        assert!(user_widget.app_id.is_none());
    }
}
