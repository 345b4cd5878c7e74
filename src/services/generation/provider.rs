use async_openai::{
    config::OpenAIConfig,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    constants::MAX_COMPLETION_TOKENS,
    errors::{AppError, AppResult},
};

/// Completion service seam. One prompt in, one completion out; everything the
/// provider reports wrong surfaces as `AppError::Provider`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> AppResult<String>;
}

pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
}

impl OpenAiProvider {
    pub fn new(api_key: &SecretString) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        Self {
            client: Client::with_config(config),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, model: &str, prompt: &str) -> AppResult<String> {
        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|err| AppError::Provider(err.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .max_completion_tokens(MAX_COMPLETION_TOKENS)
            .messages([message.into()])
            .build()
            .map_err(|err| AppError::Provider(err.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|err| AppError::Provider(err.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Provider("completion response contained no content".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_structure() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OpenAiProvider>();
    }
}
