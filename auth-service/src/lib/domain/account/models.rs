use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::IdentifierError;
use crate::account::errors::SecretError;

/// Account aggregate entity.
///
/// Represents a registered identity. Immutable once stored.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub identifier: Identifier,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a fresh id and the current timestamp.
    ///
    /// # Arguments
    /// * `identifier` - Validated identifier
    /// * `password_hash` - PHC string produced by the password hasher
    pub fn new(identifier: Identifier, password_hash: String) -> Self {
        Self {
            id: AccountId::new(),
            identifier,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique login identifier (an email address).
///
/// Stored trimmed and lowercased, so `A@X.com` and `a@x.com` name the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    const MAX_LENGTH: usize = 254;

    /// Create a new normalized identifier.
    ///
    /// # Errors
    /// * `Empty` - Identifier is blank
    /// * `TooLong` - Longer than 254 characters
    /// * `InvalidFormat` - Not a valid email address
    pub fn new(identifier: impl AsRef<str>) -> Result<Self, IdentifierError> {
        let normalized = identifier.as_ref().trim().to_lowercase();

        if normalized.is_empty() {
            return Err(IdentifierError::Empty);
        }

        let length = normalized.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(IdentifierError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&normalized)
            .map(|_| Identifier(normalized))
            .map_err(|e| IdentifierError::InvalidFormat(e.to_string()))
    }

    /// Get identifier as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext secret presented by a caller.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    const MIN_LENGTH: usize = 5;
    const MAX_LENGTH: usize = 128;

    /// Create a secret for a new account, enforcing the length policy.
    ///
    /// # Errors
    /// * `Empty` - Secret is empty
    /// * `TooShort` - Shorter than 5 characters
    /// * `TooLong` - Longer than 128 characters
    pub fn new(secret: String) -> Result<Self, SecretError> {
        let secret = Self::presented(secret)?;
        let length = secret.0.chars().count();

        if length < Self::MIN_LENGTH {
            Err(SecretError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else {
            Ok(secret)
        }
    }

    /// Wrap a secret presented at login.
    ///
    /// Only emptiness and the upper bound are checked; the length policy
    /// applies to new secrets.
    ///
    /// # Errors
    /// * `Empty` - Secret is empty
    /// * `TooLong` - Longer than 128 characters
    pub fn presented(secret: String) -> Result<Self, SecretError> {
        if secret.is_empty() {
            return Err(SecretError::Empty);
        }

        let length = secret.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(SecretError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(secret))
    }

    /// Expose the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Validated identifier and secret pair
#[derive(Debug, Clone)]
pub struct Credentials {
    pub identifier: Identifier,
    pub secret: Secret,
}

impl Credentials {
    pub fn new(identifier: Identifier, secret: Secret) -> Self {
        Self { identifier, secret }
    }
}

/// Signed token as returned by the token issuer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Outcome of a successful signup or login. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub account_id: AccountId,
    pub identifier: Identifier,
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthResult {
    pub fn new(account: &Account, issued: IssuedToken) -> Self {
        Self {
            account_id: account.id,
            identifier: account.identifier.clone(),
            token: issued.token,
            issued_at: issued.issued_at,
            expires_at: issued.expires_at,
        }
    }
}

/// Liveness report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
}

impl HealthStatus {
    pub fn message(&self) -> &'static str {
        match self {
            HealthStatus::Up => "Auth service is running",
        }
    }
}
