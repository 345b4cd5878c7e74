use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A registered third-party application. Each app owns at most one widget
/// slot on the dashboard, keyed by its id.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RegisteredApp {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub app_name: String,
    pub integration_token: String,
    pub registration_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RegisteredApp {
    pub fn new(app_name: &str, integration_token: &str) -> Self {
        let now = Utc::now();
        RegisteredApp {
            id: None,
            app_name: app_name.to_string(),
            integration_token: integration_token.to_string(),
            registration_date: now,
            created_at: now,
        }
    }

    /// Hex form of the document id. Only absent on a not-yet-inserted value.
    pub fn id_hex(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_creation() {
        let app = RegisteredApp::new("weather-station", "token123");
        assert_eq!(app.app_name, "weather-station");
        assert_eq!(app.integration_token, "token123");
        assert!(app.id.is_none());
        assert!(app.id_hex().is_none());
        assert_eq!(app.registration_date, app.created_at);
    }
}
