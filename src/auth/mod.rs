use secrecy::ExposeSecret;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Check the shared registration secret carried in a registration request.
/// Integration tokens are per-app and resolved against the store by
/// `AppService::verify_integration_token`.
pub fn verify_registration_token(supplied: &str, config: &Config) -> AppResult<()> {
    if supplied != config.registration_token.expose_secret() {
        return Err(AppError::Unauthorized(
            "Invalid registration token".to_string(),
        ));
    }
    Ok(())
}
