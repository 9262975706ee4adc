use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::AuthResult;

pub mod health;
pub mod login;
pub mod signup;

pub(crate) const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(cause) => {
                tracing::error!(error = %cause, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody::new(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidIdentifier(_) | AccountError::InvalidSecret(_) => {
                ApiError::BadRequest(err.to_string())
            }
            AccountError::DuplicateAccount(_) => {
                ApiError::Conflict("Account already exists".to_string())
            }
            AccountError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            AccountError::Password(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_)
            | AccountError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub status_code: u16,
    pub message: String,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message,
        }
    }
}

/// HTTP request body shared by signup and login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequest {
    #[serde(alias = "email")]
    identifier: String,
    #[serde(alias = "password")]
    secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseData {
    pub token: String,
    pub identifier: String,
    pub issued_at: DateTime<Utc>,
}

impl From<AuthResult> for AuthResponseData {
    fn from(result: AuthResult) -> Self {
        Self {
            token: result.token,
            identifier: result.identifier.as_str().to_string(),
            issued_at: result.issued_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;
    use crate::account::errors::IdentifierError;
    use crate::account::errors::TokenError;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            ApiError::from(AccountError::InvalidIdentifier(IdentifierError::Empty)),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(AccountError::DuplicateAccount("a@x.com".to_string())),
            ApiError::Conflict(_)
        ));
        assert_eq!(
            ApiError::from(AccountError::InvalidCredentials),
            ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
        );
        assert!(matches!(
            ApiError::from(AccountError::Token(TokenError::IssuanceFailed("x".into()))),
            ApiError::InternalServerError(_)
        ));
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response = ApiError::InternalServerError("password_hash column missing".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status_code"], 500);
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_request_accepts_aliases() {
        let request: CredentialsRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"secret123"}"#).unwrap();
        assert_eq!(request.identifier, "a@x.com");
        assert_eq!(request.secret, "secret123");
    }

    #[test]
    fn test_response_shape() {
        let data = AuthResponseData {
            token: "t".to_string(),
            identifier: "a@x.com".to_string(),
            issued_at: Utc::now(),
        };
        let value = serde_json::to_value(&data).unwrap();

        assert!(value.get("token").is_some());
        assert!(value.get("identifier").is_some());
        assert!(value.get("issuedAt").is_some());
    }
}
