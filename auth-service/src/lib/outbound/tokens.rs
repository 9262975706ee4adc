use auth::Claims;
use auth::JwtHandler;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::TokenError;
use crate::account::models::AccountId;
use crate::account::models::IssuedToken;
use crate::account::ports::TokenIssuer;

/// HS256 JWT implementation of the token issuer.
pub struct JwtTokenIssuer {
    handler: JwtHandler,
    issuer: String,
    ttl: Duration,
}

impl JwtTokenIssuer {
    /// # Arguments
    /// * `secret` - HMAC signing key, at least 32 bytes
    /// * `issuer` - Value of the `iss` claim, checked on verify
    /// * `expiration_hours` - Token lifetime
    pub fn new(secret: &[u8], issuer: impl Into<String>, expiration_hours: i64) -> Self {
        let issuer = issuer.into();

        Self {
            handler: JwtHandler::new(secret).with_issuer(issuer.clone()),
            issuer,
            ttl: Duration::hours(expiration_hours),
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, account_id: &AccountId) -> Result<IssuedToken, TokenError> {
        let issued_at = Utc::now();
        let claims = Claims::for_subject(account_id, issued_at, self.ttl).with_issuer(&self.issuer);

        let token = self.handler.encode(&claims)?;

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at: issued_at + self.ttl,
        })
    }

    fn verify(&self, token: &str) -> Result<AccountId, TokenError> {
        let claims: Claims = self.handler.decode(token)?;

        AccountId::from_string(&claims.sub).map_err(|e| TokenError::Invalid(e.to_string()))
    }
}
