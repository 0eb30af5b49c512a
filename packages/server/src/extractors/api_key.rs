use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Proof that the request presented the configured API key.
///
/// Add this as a handler parameter to gate the handler.
pub struct ApiKey;

/// Whether `presented` matches `expected`. An empty expected key matches nothing.
pub fn key_matches(presented: &str, expected: &str) -> bool {
    !expected.is_empty() && presented == expected
}

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::ApiKeyMissing)?;

        if !key_matches(presented, &state.config.auth.api_key) {
            tracing::debug!("Rejected request with invalid API key");
            return Err(AppError::ApiKeyInvalid);
        }

        Ok(ApiKey)
    }
}
