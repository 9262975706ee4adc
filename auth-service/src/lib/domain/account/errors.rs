use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Identifier validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Identifier must not be empty")]
    Empty,

    #[error("Identifier too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Identifier is not a valid email address: {0}")]
    InvalidFormat(String),
}

/// Error for Secret validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Secret must not be empty")]
    Empty,

    #[error("Secret too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Secret too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for token issuance and verification
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token issuance failed: {0}")]
    IssuanceFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}

impl From<auth::JwtError> for TokenError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::EncodingFailed(msg) => TokenError::IssuanceFailed(msg),
            auth::JwtError::TokenExpired => TokenError::Expired,
            auth::JwtError::DecodingFailed(msg) | auth::JwtError::InvalidToken(msg) => {
                TokenError::Invalid(msg)
            }
        }
    }
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("Invalid secret: {0}")]
    InvalidSecret(#[from] SecretError),

    // Domain-level errors
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    /// Unknown identifier and wrong secret both end up here.
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
