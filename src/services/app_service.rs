use std::sync::Arc;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::RegisteredApp, dto::response::RegisterResponse},
    repositories::{AppRepository, WidgetRepository},
};

/// Registration and lifecycle of third-party apps.
pub struct AppService {
    apps: Arc<dyn AppRepository>,
    widgets: Arc<dyn WidgetRepository>,
}

impl AppService {
    pub fn new(apps: Arc<dyn AppRepository>, widgets: Arc<dyn WidgetRepository>) -> Self {
        Self { apps, widgets }
    }

    /// Register an app and mint its integration token.
    pub async fn register(&self, app_name: &str) -> AppResult<RegisterResponse> {
        let integration_token = mint_integration_token();
        let app = RegisteredApp::new(app_name, &integration_token);
        let app_id = self.apps.create(app).await?;

        log::info!("registered app '{}' with id {}", app_name, app_id);

        Ok(RegisterResponse {
            integration_token,
            app_id,
        })
    }

    /// Resolve an integration token to its app, or fail with Unauthorized.
    pub async fn verify_integration_token(&self, token: &str) -> AppResult<RegisteredApp> {
        self.apps
            .find_by_integration_token(token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid integration token".to_string()))
    }

    pub async fn list_apps(&self) -> AppResult<Vec<RegisteredApp>> {
        self.apps.find_all_ordered().await
    }

    /// Remove an app and whatever widget it shared.
    pub async fn unregister(&self, app_id: &str) -> AppResult<()> {
        self.widgets.delete_for_app(app_id).await?;
        let deleted = self.apps.delete(app_id).await?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "App with id '{}' not found",
                app_id
            )));
        }

        log::info!("unregistered app {}", app_id);
        Ok(())
    }
}

/// Opaque per-app credential: two concatenated v4 UUIDs, hex only.
fn mint_integration_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_tokens_are_long_and_unique() {
        let first = mint_integration_token();
        let second = mint_integration_token();

        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }
}
