use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn empty_payload() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A generated dashboard widget. App widgets carry an `app_id` and are
/// replaced in place on every data share; user widgets are created from a
/// bare prompt and addressed by their document id.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Widget {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default)]
    pub user_created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget_name: Option<String>,
    #[serde(default = "empty_payload")]
    pub data: Value,
    #[serde(default)]
    pub render_prompt: String,
    #[serde(default)]
    pub generated_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Widget {
    pub fn for_app(app_id: &str, data: Value, render_prompt: &str, generated_html: &str) -> Self {
        Widget {
            id: None,
            app_id: Some(app_id.to_string()),
            user_created: false,
            widget_name: None,
            data,
            render_prompt: render_prompt.to_string(),
            generated_html: generated_html.to_string(),
            created_at: None,
            updated_at: Utc::now(),
        }
    }

    pub fn for_user(widget_name: &str, render_prompt: &str, generated_html: &str) -> Self {
        let now = Utc::now();
        Widget {
            id: None,
            app_id: None,
            user_created: true,
            widget_name: Some(widget_name.to_string()),
            data: empty_payload(),
            render_prompt: render_prompt.to_string(),
            generated_html: generated_html.to_string(),
            created_at: Some(now),
            updated_at: now,
        }
    }

    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_app_widget_shape() {
        let widget = Widget::for_app("abc123", json!({"v": 1}), "render it", "<div>v</div>");
        assert_eq!(widget.app_id.as_deref(), Some("abc123"));
        assert!(!widget.user_created);
        assert!(widget.widget_name.is_none());
        assert_eq!(widget.data, json!({"v": 1}));
    }

    #[test]
    fn test_user_widget_shape() {
        let widget = Widget::for_user("My Widget", "a clock", "<div>12:00</div>");
        assert!(widget.app_id.is_none());
        assert!(widget.user_created);
        assert_eq!(widget.widget_name.as_deref(), Some("My Widget"));
        assert_eq!(widget.data, json!({}));
        assert!(widget.created_at.is_some());
    }
}
