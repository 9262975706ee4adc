use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::Identifier;
use crate::account::ports::AccountRepository;

/// Process-local account store keyed by identifier.
///
/// Used when no database is configured and in tests. Contents are lost on
/// restart.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<Identifier, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(identifier).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        // Check and insert under one write guard.
        match self.accounts.write().await.entry(account.identifier.clone()) {
            Entry::Occupied(_) => Err(AccountError::DuplicateAccount(
                account.identifier.to_string(),
            )),
            Entry::Vacant(slot) => Ok(slot.insert(account).clone()),
        }
    }
}
