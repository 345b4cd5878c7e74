use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

fn empty_payload() -> Value {
    Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub registration_token: String,

    #[validate(length(min = 1, max = 100))]
    pub app_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ShareDataRequest {
    #[validate(length(min = 1))]
    pub integration_token: String,

    #[serde(default = "empty_payload")]
    pub data: Value,

    #[validate(length(min = 1, max = 10000))]
    pub render_prompt: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserWidgetRequest {
    #[validate(length(min = 1, max = 10000))]
    pub prompt: String,

    #[validate(length(max = 100))]
    pub widget_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditUserWidgetRequest {
    #[validate(length(min = 1))]
    pub widget_id: String,

    #[validate(length(min = 1, max = 10000))]
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteUserWidgetRequest {
    #[validate(length(min = 1))]
    pub widget_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            registration_token: "token".to_string(),
            app_name: "weather-station".to_string(),
        };
        assert!(request.validate().is_ok());

        let request = RegisterRequest {
            registration_token: "token".to_string(),
            app_name: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_share_data_defaults_to_empty_payload() {
        let request: ShareDataRequest = serde_json::from_str(
            r#"{"integration_token": "t", "render_prompt": "render"}"#,
        )
        .unwrap();
        assert_eq!(request.data, serde_json::json!({}));
        assert!(request.validate().is_ok());
    }
}
