use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{AppRepository, MongoAppRepository, MongoWidgetRepository, WidgetRepository},
    services::{
        app_service::AppService,
        generation::{provider::OpenAiProvider, GenerationService},
        widget_service::WidgetService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub app_service: Arc<AppService>,
    pub widget_service: Arc<WidgetService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let app_repository: Arc<dyn AppRepository> =
            Arc::new(MongoAppRepository::new(&db, &config.apps_collection));
        app_repository.ensure_indexes().await?;

        let widget_repository: Arc<dyn WidgetRepository> =
            Arc::new(MongoWidgetRepository::new(&db, &config.widgets_collection));
        widget_repository.ensure_indexes().await?;

        let configured = !config.openai_api_key.expose_secret().is_empty();
        if !configured {
            log::warn!(
                "OPENAI_API_KEY is not set; widgets will render a configuration error card"
            );
        }

        let provider = Arc::new(OpenAiProvider::new(&config.openai_api_key));
        let generation = Arc::new(GenerationService::new(
            provider,
            configured,
            config.max_concurrent_generations,
            Duration::from_secs(config.generation_timeout_secs),
        ));

        let app_service = Arc::new(AppService::new(
            app_repository.clone(),
            widget_repository.clone(),
        ));
        let widget_service = Arc::new(WidgetService::new(
            app_repository,
            widget_repository,
            generation,
        ));

        Ok(Self {
            app_service,
            widget_service,
            db,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
