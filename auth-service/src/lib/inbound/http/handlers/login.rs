use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use super::CredentialsRequest;
use crate::account::errors::AccountError;
use crate::account::models::Credentials;
use crate::account::models::Identifier;
use crate::account::models::Secret;
use crate::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .login(body.try_into_login_credentials()?)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::OK, result.into()))
}

impl CredentialsRequest {
    /// Presented secrets are not held to the signup length policy.
    fn try_into_login_credentials(self) -> Result<Credentials, AccountError> {
        let identifier = Identifier::new(self.identifier)?;
        let secret = Secret::presented(self.secret)?;
        Ok(Credentials::new(identifier, secret))
    }
}
