use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub apps_collection: String,
    pub widgets_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub registration_token: SecretString,
    pub openai_api_key: SecretString,
    pub max_concurrent_generations: usize,
    pub generation_timeout_secs: u64,
    pub widget_refresh_interval_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "mosaic-local".to_string()),
            apps_collection: env::var("APPS_COLLECTION").unwrap_or_else(|_| "apps".to_string()),
            widgets_collection: env::var("WIDGETS_COLLECTION")
                .unwrap_or_else(|_| "widgets".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            registration_token: SecretString::from(
                env::var("REGISTRATION_TOKEN")
                    .unwrap_or_else(|_| "demo_registration_token_123".to_string()),
            ),
            openai_api_key: SecretString::from(
                env::var("OPENAI_API_KEY").unwrap_or_default(),
            ),
            max_concurrent_generations: env::var("MAX_CONCURRENT_GENERATIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),
            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(30),
            widget_refresh_interval_ms: env::var("WIDGET_REFRESH_INTERVAL_MS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(30_000),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let registration_token = self.registration_token.expose_secret();

        if registration_token == "demo_registration_token_123" {
            panic!(
                "FATAL: REGISTRATION_TOKEN is using default value! Set REGISTRATION_TOKEN environment variable to a secure random string."
            );
        }

        if registration_token.len() < 32 {
            panic!(
                "FATAL: REGISTRATION_TOKEN is too short ({}). Must be at least 32 characters for security.",
                registration_token.len()
            );
        }

        if self.openai_api_key.expose_secret().is_empty() {
            panic!(
                "FATAL: OPENAI_API_KEY is not set! Widget generation cannot work without it."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            environment: "local".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "mosaic-test".to_string(),
            apps_collection: "apps".to_string(),
            widgets_collection: "widgets".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            registration_token: SecretString::from("test_registration_token".to_string()),
            openai_api_key: SecretString::from("test_api_key".to_string()),
            max_concurrent_generations: 2,
            generation_timeout_secs: 5,
            widget_refresh_interval_ms: 30_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert_eq!(config.apps_collection, "apps");
        assert_eq!(config.widgets_collection, "widgets");
        assert!(config.max_concurrent_generations > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_conn_string, "mongodb://localhost:27017");
        assert_eq!(config.mongo_db_name, "mosaic-test");
        assert!(!config.is_production());
    }
}
