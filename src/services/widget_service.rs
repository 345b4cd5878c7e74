use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{RegisteredApp, Widget},
        dto::response::DashboardCard,
    },
    repositories::{AppRepository, WidgetRepository},
    services::generation::{prompt, GenerationService},
    templates::NO_DATA_WIDGET,
};

const DEFAULT_USER_WIDGET_NAME: &str = "User Widget";

/// Widget lifecycle: generation-backed creation and refresh flows plus the
/// dashboard view assembly.
pub struct WidgetService {
    apps: Arc<dyn AppRepository>,
    widgets: Arc<dyn WidgetRepository>,
    generation: Arc<GenerationService>,
}

impl WidgetService {
    pub fn new(
        apps: Arc<dyn AppRepository>,
        widgets: Arc<dyn WidgetRepository>,
        generation: Arc<GenerationService>,
    ) -> Self {
        Self {
            apps,
            widgets,
            generation,
        }
    }

    /// Generate a widget for freshly shared app data and store it in the
    /// app's slot, replacing any previous widget.
    pub async fn share_app_data(
        &self,
        app: &RegisteredApp,
        data: Value,
        render_prompt: &str,
    ) -> AppResult<()> {
        let app_id = app.id_hex().ok_or_else(|| {
            AppError::InternalError("registered app is missing its id".to_string())
        })?;

        log::info!("sharing data for app '{}'", app.app_name);

        let html = self
            .generation
            .generate_widget_html(&data, render_prompt, false)
            .await;

        let widget = Widget::for_app(&app_id, data, render_prompt, &html);
        self.widgets.upsert_for_app(&widget).await
    }

    /// Cached HTML for an app's widget slot. No regeneration.
    pub async fn cached_app_widget_html(&self, app_id: &str) -> AppResult<String> {
        let widget = self
            .widgets
            .find_for_app(app_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Widget not found".to_string()))?;
        Ok(widget.generated_html)
    }

    pub async fn create_user_widget(
        &self,
        prompt_text: &str,
        widget_name: Option<String>,
    ) -> AppResult<String> {
        let html = self
            .generation
            .generate_widget_html(&Value::Null, prompt_text, true)
            .await;

        let name = widget_name.unwrap_or_else(|| DEFAULT_USER_WIDGET_NAME.to_string());
        let widget = Widget::for_user(&name, prompt_text, &html);
        let widget_id = self.widgets.insert_user_widget(&widget).await?;

        log::info!("created user widget {}", widget_id);
        Ok(widget_id)
    }

    /// Swap in a new prompt and regenerate from scratch.
    pub async fn edit_user_widget(&self, widget_id: &str, prompt_text: &str) -> AppResult<()> {
        let mut widget = self.find_user_widget(widget_id).await?;

        let html = self
            .generation
            .generate_widget_html(&Value::Null, prompt_text, true)
            .await;

        widget.render_prompt = prompt_text.to_string();
        widget.generated_html = html;
        widget.updated_at = Utc::now();
        self.widgets.replace_user_widget(&widget).await
    }

    pub async fn delete_user_widget(&self, widget_id: &str) -> AppResult<()> {
        let deleted = self.widgets.delete_user_widget(widget_id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("User widget not found".to_string()));
        }
        Ok(())
    }

    /// Regenerate with the same prompt while steering the model toward the
    /// widget's current look.
    pub async fn refresh_user_widget(&self, widget_id: &str) -> AppResult<String> {
        let mut widget = self.find_user_widget(widget_id).await?;

        let instruction =
            prompt::append_style_preservation(&widget.render_prompt, &widget.generated_html);
        let html = self
            .generation
            .generate_widget_html(&Value::Null, &instruction, true)
            .await;

        widget.generated_html = html.clone();
        widget.updated_at = Utc::now();
        self.widgets.replace_user_widget(&widget).await?;
        Ok(html)
    }

    /// Regenerate from the original prompt alone, allowing a new design.
    pub async fn full_refresh_user_widget(&self, widget_id: &str) -> AppResult<String> {
        let mut widget = self.find_user_widget(widget_id).await?;

        let html = self
            .generation
            .generate_widget_html(&Value::Null, &widget.render_prompt, true)
            .await;

        widget.generated_html = html.clone();
        widget.updated_at = Utc::now();
        self.widgets.replace_user_widget(&widget).await?;
        Ok(html)
    }

    pub async fn refresh_app_widget(&self, app_id: &str) -> AppResult<String> {
        let mut widget = self.find_app_widget(app_id).await?;

        let instruction =
            prompt::append_style_preservation(&widget.render_prompt, &widget.generated_html);
        let html = self
            .generation
            .generate_widget_html(&widget.data, &instruction, false)
            .await;

        widget.generated_html = html.clone();
        widget.updated_at = Utc::now();
        self.widgets.upsert_for_app(&widget).await?;
        Ok(html)
    }

    pub async fn full_refresh_app_widget(&self, app_id: &str) -> AppResult<String> {
        let mut widget = self.find_app_widget(app_id).await?;

        let html = self
            .generation
            .generate_widget_html(&widget.data, &widget.render_prompt, false)
            .await;

        widget.generated_html = html.clone();
        widget.updated_at = Utc::now();
        self.widgets.upsert_for_app(&widget).await?;
        Ok(html)
    }

    /// Cards for the dashboard: user widgets newest first, then app widgets
    /// in registration order.
    pub async fn dashboard_cards(&self) -> AppResult<Vec<DashboardCard>> {
        let mut cards = Vec::new();

        for widget in self.widgets.list_user_widgets().await? {
            cards.push(DashboardCard {
                widget_id: widget.id_hex(),
                app_id: None,
                title: widget
                    .widget_name
                    .unwrap_or_else(|| DEFAULT_USER_WIDGET_NAME.to_string()),
                user_created: true,
                html: widget.generated_html,
            });
        }

        for app in self.apps.find_all_ordered().await? {
            let Some(app_id) = app.id_hex() else {
                continue;
            };
            let html = self
                .widgets
                .find_for_app(&app_id)
                .await?
                .map(|widget| widget.generated_html)
                .unwrap_or_else(|| NO_DATA_WIDGET.to_string());

            cards.push(DashboardCard {
                widget_id: None,
                app_id: Some(app_id),
                title: app.app_name,
                user_created: false,
                html,
            });
        }

        Ok(cards)
    }

    async fn find_user_widget(&self, widget_id: &str) -> AppResult<Widget> {
        self.widgets
            .find_user_widget(widget_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User widget not found".to_string()))
    }

    async fn find_app_widget(&self, app_id: &str) -> AppResult<Widget> {
        self.widgets
            .find_for_app(app_id)
            .await?
            .ok_or_else(|| AppError::NotFound("App widget not found".to_string()))
    }
}
