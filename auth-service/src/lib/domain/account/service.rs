use std::sync::Arc;

use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AuthResult;
use crate::account::models::Credentials;
use crate::account::models::HealthStatus;
use crate::account::models::Secret;
use crate::account::ports::AccountRepository;
use crate::account::ports::AuthServicePort;
use crate::account::ports::TokenIssuer;

/// Domain service implementation for authentication.
///
/// Collaborators are injected at construction. Hashing runs on the
/// blocking thread pool.
pub struct AuthService<AR, TI>
where
    AR: AccountRepository,
    TI: TokenIssuer,
{
    repository: Arc<AR>,
    token_issuer: Arc<TI>,
    password_hasher: auth::PasswordHasher,
    /// Verified against when an identifier is unknown, so both login
    /// failure paths cost one hash verification.
    decoy_hash: String,
}

impl<AR, TI> AuthService<AR, TI>
where
    AR: AccountRepository,
    TI: TokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `token_issuer` - Token signing implementation
    /// * `password_hasher` - Hasher configured with the deployment's cost
    ///
    /// # Errors
    /// * `Password` - Computing the decoy hash failed
    pub fn new(
        repository: Arc<AR>,
        token_issuer: Arc<TI>,
        password_hasher: auth::PasswordHasher,
    ) -> Result<Self, AccountError> {
        let decoy_hash = password_hasher.hash("decoy-secret-never-matches")?;

        Ok(Self {
            repository,
            token_issuer,
            password_hasher,
            decoy_hash,
        })
    }

    async fn hash_secret(&self, secret: Secret) -> Result<String, AccountError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(secret.expose()))
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    async fn verify_secret(&self, secret: Secret, hash: String) -> Result<bool, AccountError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(secret.expose(), &hash))
            .await
            .map_err(|e| AccountError::Unknown(format!("Verification task failed: {}", e)))?
            .map_err(AccountError::from)
    }

    fn issue_for(&self, account: &Account) -> Result<AuthResult, AccountError> {
        let issued = self.token_issuer.issue(&account.id)?;
        Ok(AuthResult::new(account, issued))
    }
}

#[async_trait]
impl<AR, TI> AuthServicePort for AuthService<AR, TI>
where
    AR: AccountRepository,
    TI: TokenIssuer,
{
    async fn signup(&self, credentials: Credentials) -> Result<AuthResult, AccountError> {
        let Credentials { identifier, secret } = credentials;

        // Fast path; the insert below is what enforces uniqueness.
        if self
            .repository
            .find_by_identifier(&identifier)
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateAccount(identifier.to_string()));
        }

        let password_hash = self.hash_secret(secret).await?;
        let account = self
            .repository
            .insert(Account::new(identifier, password_hash))
            .await?;

        tracing::info!(account_id = %account.id, "Account registered");

        self.issue_for(&account)
    }

    async fn login(&self, credentials: Credentials) -> Result<AuthResult, AccountError> {
        let Credentials { identifier, secret } = credentials;

        let account = self.repository.find_by_identifier(&identifier).await?;
        let stored_hash = account
            .as_ref()
            .map(|a| a.password_hash.clone())
            .unwrap_or_else(|| self.decoy_hash.clone());

        let matches = self.verify_secret(secret, stored_hash).await?;

        match account {
            Some(account) if matches => {
                tracing::info!(account_id = %account.id, "Login succeeded");
                self.issue_for(&account)
            }
            _ => {
                tracing::warn!("Rejected login attempt");
                Err(AccountError::InvalidCredentials)
            }
        }
    }

    fn health(&self) -> HealthStatus {
        HealthStatus::Up
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::account::errors::TokenError;
    use crate::account::models::AccountId;
    use crate::account::models::Identifier;
    use crate::account::models::IssuedToken;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn find_by_identifier(&self, identifier: &Identifier) -> Result<Option<Account>, AccountError>;
            async fn insert(&self, account: Account) -> Result<Account, AccountError>;
        }
    }

    mock! {
        pub TestTokenIssuer {}

        impl TokenIssuer for TestTokenIssuer {
            fn issue(&self, account_id: &AccountId) -> Result<IssuedToken, TokenError>;
            fn verify(&self, token: &str) -> Result<AccountId, TokenError>;
        }
    }

    fn hasher() -> auth::PasswordHasher {
        auth::PasswordHasher::with_cost(1024, 1, 1).unwrap()
    }

    fn credentials(identifier: &str, secret: &str) -> Credentials {
        Credentials::new(
            Identifier::new(identifier).unwrap(),
            Secret::presented(secret.to_string()).unwrap(),
        )
    }

    fn stored_account(identifier: &str, secret: &str) -> Account {
        Account::new(
            Identifier::new(identifier).unwrap(),
            hasher().hash(secret).unwrap(),
        )
    }

    fn issuing_token_issuer() -> MockTestTokenIssuer {
        let mut token_issuer = MockTestTokenIssuer::new();
        token_issuer.expect_issue().returning(|account_id| {
            let now = Utc::now();
            Ok(IssuedToken {
                token: format!("token-for-{}", account_id),
                issued_at: now,
                expires_at: now + Duration::hours(1),
            })
        });
        token_issuer
    }

    fn service(
        repository: MockTestAccountRepository,
        token_issuer: MockTestTokenIssuer,
    ) -> AuthService<MockTestAccountRepository, MockTestTokenIssuer> {
        AuthService::new(Arc::new(repository), Arc::new(token_issuer), hasher()).unwrap()
    }

    #[tokio::test]
    async fn test_signup_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(|account| {
                account.identifier.as_str() == "a@x.com"
                    && account.password_hash.starts_with("$argon2id$")
                    && !account.password_hash.contains("secret123")
            })
            .times(1)
            .returning(|account| Ok(account));

        let service = service(repository, issuing_token_issuer());

        let result = service
            .signup(credentials("a@x.com", "secret123"))
            .await
            .expect("signup failed");

        assert_eq!(result.identifier.as_str(), "a@x.com");
        assert_eq!(result.token, format!("token-for-{}", result.account_id));
    }

    #[tokio::test]
    async fn test_signup_duplicate_from_lookup() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(|_| Ok(Some(stored_account("a@x.com", "secret123"))));
        repository.expect_insert().times(0);

        let mut token_issuer = MockTestTokenIssuer::new();
        token_issuer.expect_issue().times(0);

        let service = service(repository, token_issuer);

        let result = service.signup(credentials("a@x.com", "other")).await;
        assert!(matches!(result, Err(AccountError::DuplicateAccount(_))));
    }

    #[tokio::test]
    async fn test_signup_duplicate_from_insert_race() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_identifier()
            .returning(|_| Ok(None));
        repository.expect_insert().times(1).returning(|account| {
            Err(AccountError::DuplicateAccount(
                account.identifier.to_string(),
            ))
        });

        let mut token_issuer = MockTestTokenIssuer::new();
        token_issuer.expect_issue().times(0);

        let service = service(repository, token_issuer);

        let result = service.signup(credentials("a@x.com", "secret123")).await;
        assert!(matches!(result, Err(AccountError::DuplicateAccount(_))));
    }

    #[tokio::test]
    async fn test_signup_database_error_propagates() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_identifier()
            .returning(|_| Err(AccountError::DatabaseError("connection reset".to_string())));

        let service = service(repository, MockTestTokenIssuer::new());

        let result = service.signup(credentials("a@x.com", "secret123")).await;
        assert!(matches!(result, Err(AccountError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("a@x.com", "secret123");
        let account_id = account.id;

        repository
            .expect_find_by_identifier()
            .withf(|identifier| identifier.as_str() == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = service(repository, issuing_token_issuer());

        let result = service
            .login(credentials("a@x.com", "secret123"))
            .await
            .expect("login failed");

        assert_eq!(result.account_id, account_id);
        assert_eq!(result.token, format!("token-for-{}", account_id));
    }

    #[tokio::test]
    async fn test_login_wrong_secret_and_unknown_identifier_match() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("a@x.com", "secret123");

        repository
            .expect_find_by_identifier()
            .returning(move |identifier| {
                if identifier.as_str() == "a@x.com" {
                    Ok(Some(account.clone()))
                } else {
                    Ok(None)
                }
            });

        let mut token_issuer = MockTestTokenIssuer::new();
        token_issuer.expect_issue().times(0);

        let service = service(repository, token_issuer);

        let wrong_secret = service
            .login(credentials("a@x.com", "wrong"))
            .await
            .unwrap_err();
        let unknown = service
            .login(credentials("nobody@x.com", "secret123"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_secret, AccountError::InvalidCredentials));
        assert!(matches!(unknown, AccountError::InvalidCredentials));
        assert_eq!(wrong_secret.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_login_decoy_secret_does_not_match_unknown_account() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_identifier()
            .returning(|_| Ok(None));

        let service = service(repository, MockTestTokenIssuer::new());

        let result = service
            .login(credentials("nobody@x.com", "decoy-secret-never-matches"))
            .await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_token_failure_is_internal() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("a@x.com", "secret123");
        repository
            .expect_find_by_identifier()
            .returning(move |_| Ok(Some(account.clone())));

        let mut token_issuer = MockTestTokenIssuer::new();
        token_issuer
            .expect_issue()
            .returning(|_| Err(TokenError::IssuanceFailed("bad key".to_string())));

        let service = service(repository, token_issuer);

        let result = service.login(credentials("a@x.com", "secret123")).await;
        assert!(matches!(
            result,
            Err(AccountError::Token(TokenError::IssuanceFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_login_corrupt_stored_hash_is_internal() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_identifier().returning(|_| {
            Ok(Some(Account::new(
                Identifier::new("a@x.com").unwrap(),
                "not-a-phc-string".to_string(),
            )))
        });

        let service = service(repository, MockTestTokenIssuer::new());

        let result = service.login(credentials("a@x.com", "secret123")).await;
        assert!(matches!(result, Err(AccountError::Password(_))));
    }

    #[test]
    fn test_health_ignores_storage() {
        // No expectations: any repository call would panic.
        let service = service(
            MockTestAccountRepository::new(),
            MockTestTokenIssuer::new(),
        );

        assert_eq!(service.health(), HealthStatus::Up);
        assert_eq!(service.health().message(), "Auth service is running");
    }
}
