use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::TokenError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::AuthResult;
use crate::account::models::Credentials;
use crate::account::models::HealthStatus;
use crate::account::models::Identifier;
use crate::account::models::IssuedToken;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and issue a token for it.
    ///
    /// # Arguments
    /// * `credentials` - Validated identifier and secret
    ///
    /// # Returns
    /// AuthResult carrying a freshly issued token
    ///
    /// # Errors
    /// * `DuplicateAccount` - Identifier is already registered
    /// * `Password` / `Token` / `DatabaseError` - Infrastructure failure
    async fn signup(&self, credentials: Credentials) -> Result<AuthResult, AccountError>;

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `credentials` - Identifier and presented secret
    ///
    /// # Returns
    /// AuthResult carrying a freshly issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong secret
    /// * `Password` / `Token` / `DatabaseError` - Infrastructure failure
    async fn login(&self, credentials: Credentials) -> Result<AuthResult, AccountError>;

    /// Report liveness. Never touches storage.
    fn health(&self) -> HealthStatus;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by identifier.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<Account>, AccountError>;

    /// Persist a new account.
    ///
    /// Must be atomic with respect to identifier uniqueness: of two
    /// concurrent inserts for one identifier, at most one succeeds.
    ///
    /// # Returns
    /// Stored account entity
    ///
    /// # Errors
    /// * `DuplicateAccount` - Identifier is already registered
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;
}

/// Issues and verifies stateless session tokens.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Issue a signed token for an account.
    ///
    /// # Errors
    /// * `IssuanceFailed` - Signing failed
    fn issue(&self, account_id: &AccountId) -> Result<IssuedToken, TokenError>;

    /// Verify a token and return the account it was issued to.
    ///
    /// # Errors
    /// * `Expired` - Token lifetime has passed
    /// * `Invalid` - Signature, issuer, or payload is wrong
    fn verify(&self, token: &str) -> Result<AccountId, TokenError>;
}
