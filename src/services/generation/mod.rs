//! Widget generation: prompt construction, the completion-provider cascade,
//! and extraction of the returned markup.

pub mod extract;
pub mod prompt;
pub mod provider;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use crate::{
    constants::MODEL_CANDIDATES,
    errors::{AppError, AppResult},
};

use provider::CompletionProvider;

/// Shown when the provider credential is missing. No network call is made in
/// that case.
pub const CONFIG_ERROR_WIDGET: &str = r#"<div class="widget-error" style="padding: 20px; color: #d32f2f; background: #ffebee; border-radius: 8px;">
    <h3>⚠️ Configuration Error</h3>
    <p>OPENAI_API_KEY is not set. Add it to your .env file before starting the server.</p>
</div>"#;

/// Error card shown when generation fails. The error text is interpolated
/// unescaped: the dashboard renders whatever the provider reported.
pub fn generation_error_widget(detail: &str) -> String {
    format!(
        r#"<div class="widget-error" style="padding: 20px; color: #d32f2f; background: #ffebee; border-radius: 8px;">
    <h3>⚠️ Generation Error</h3>
    <p>Failed to generate widget: {detail}</p>
    <p>Please check your API key and network connection.</p>
</div>"#
    )
}

fn is_model_not_found(err: &AppError) -> bool {
    let text = err.to_string();
    text.contains("404") || text.contains("not_found") || text.contains("does not exist")
}

/// Owns the provider seam and the concurrency ceiling for completion calls.
/// Generation is total: every path returns a widget fragment, never an error.
pub struct GenerationService {
    provider: Arc<dyn CompletionProvider>,
    limiter: Semaphore,
    request_timeout: Duration,
    configured: bool,
}

impl GenerationService {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        configured: bool,
        max_concurrent: usize,
        request_timeout: Duration,
    ) -> Self {
        Self {
            provider,
            limiter: Semaphore::new(max_concurrent),
            request_timeout,
            configured,
        }
    }

    /// Generate a widget fragment for the given payload and instruction.
    /// `user_authored` marks instructions typed on the dashboard, which carry
    /// no data payload.
    pub async fn generate_widget_html(
        &self,
        data: &Value,
        instruction: &str,
        user_authored: bool,
    ) -> String {
        if !self.configured {
            return CONFIG_ERROR_WIDGET.to_string();
        }

        let prompt = prompt::build_generation_prompt(data, instruction, user_authored);

        match self.complete_with_fallback(&prompt).await {
            Ok(raw) => extract::extract_widget_html(&raw),
            Err(err) => {
                log::error!("widget generation failed: {err}");
                generation_error_widget(&err.to_string())
            }
        }
    }

    /// Try each candidate model in order, advancing only past "model not
    /// found" failures. Any other failure aborts immediately. One permit is
    /// held for the whole cascade.
    async fn complete_with_fallback(&self, prompt: &str) -> AppResult<String> {
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| AppError::InternalError("generation pool closed".to_string()))?;

        let mut last_error: Option<AppError> = None;

        for model in MODEL_CANDIDATES {
            match timeout(self.request_timeout, self.provider.complete(model, prompt)).await {
                Ok(Ok(text)) => return Ok(text),
                Ok(Err(err)) => {
                    if is_model_not_found(&err) {
                        log::warn!("model {model} unavailable, trying next candidate: {err}");
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                }
                Err(_) => {
                    return Err(AppError::Provider(format!(
                        "completion request timed out after {}s",
                        self.request_timeout.as_secs()
                    )));
                }
            }
        }

        Err(AppError::Provider(format!(
            "none of the candidate models were available; last error: {}",
            last_error.map_or_else(|| "unknown".to_string(), |err| err.to_string())
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::provider::MockCompletionProvider;
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    fn service(provider: MockCompletionProvider, configured: bool) -> GenerationService {
        GenerationService::new(Arc::new(provider), configured, 2, Duration::from_secs(30))
    }

    #[tokio::test]
    async fn missing_credential_short_circuits_without_a_provider_call() {
        let mut provider = MockCompletionProvider::new();
        provider.expect_complete().times(0);

        let service = service(provider, false);
        let html = service.generate_widget_html(&json!({}), "a clock", true).await;

        assert!(html.contains("Configuration Error"));
        assert!(html.contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn successful_completion_is_extracted() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_, _| Ok("```html\n<div>clock</div>\n```".to_string()));

        let service = service(provider, true);
        let html = service.generate_widget_html(&json!({}), "a clock", true).await;

        assert_eq!(html, "<div>clock</div>");
    }

    #[tokio::test]
    async fn unavailable_models_fall_through_to_the_next_candidate() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .withf(|model, _| model == "gpt-4o-mini" || model == "gpt-4.1-mini")
            .times(2)
            .returning(|model, _| {
                Err(AppError::Provider(format!("status 404: model {model} not_found")))
            });
        provider
            .expect_complete()
            .withf(|model, _| model == "gpt-4o")
            .times(1)
            .returning(|_, _| Ok("<div>third candidate</div>".to_string()));

        let service = service(provider, true);
        let text = service.complete_with_fallback("prompt").await.unwrap();

        // fallback hands the winning completion back untouched
        assert_eq!(text, "<div>third candidate</div>");
    }

    #[tokio::test]
    async fn non_availability_errors_abort_the_cascade() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_, _| Err(AppError::Provider("rate limited".to_string())));

        let service = service(provider, true);
        let err = service.complete_with_fallback("prompt").await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn exhausted_candidates_surface_the_last_error() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .times(MODEL_CANDIDATES.len())
            .returning(|_, _| Err(AppError::Provider("not_found".to_string())));

        let service = service(provider, true);
        let err = service.complete_with_fallback("prompt").await.unwrap_err();
        assert!(err.to_string().contains("none of the candidate models"));
        assert!(err.to_string().contains("not_found"));
    }

    #[tokio::test]
    async fn provider_failure_becomes_an_error_widget() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_, _| Err(AppError::Provider("connection refused".to_string())));

        let service = service(provider, true);
        let html = service.generate_widget_html(&json!({}), "a clock", true).await;

        assert!(html.contains("Generation Error"));
        assert!(html.contains("connection refused"));
    }

    struct StalledProvider;

    #[async_trait]
    impl CompletionProvider for StalledProvider {
        async fn complete(&self, _model: &str, _prompt: &str) -> AppResult<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_provider_calls_time_out() {
        let service = GenerationService::new(
            Arc::new(StalledProvider),
            true,
            1,
            Duration::from_secs(30),
        );

        let err = service.complete_with_fallback("prompt").await.unwrap_err();
        assert!(err.to_string().contains("timed out after 30s"));
    }

    #[test]
    fn model_not_found_detection_matches_on_substrings() {
        assert!(is_model_not_found(&AppError::Provider("http 404".into())));
        assert!(is_model_not_found(&AppError::Provider(
            "error code: model_not_found".into()
        )));
        assert!(is_model_not_found(&AppError::Provider(
            "The model `x` does not exist or you do not have access to it".into()
        )));
        assert!(!is_model_not_found(&AppError::Provider("overloaded".into())));
    }
}
