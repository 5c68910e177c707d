use async_trait::async_trait;

use crate::contract::error::UserAccountsError;
use crate::contract::model::{Credentials, ProfileUpdate, Registration, UserAccount};

/// Public API trait for the user_accounts module that other modules can use
#[async_trait]
pub trait UserAccountsApi: Send + Sync {
    /// List live accounts (bounded by the module's list limit)
    async fn list_accounts(&self) -> Result<Vec<UserAccount>, UserAccountsError>;

    /// Get a live account by id
    async fn get_account(&self, id: i32) -> Result<UserAccount, UserAccountsError>;

    /// Register a new account
    async fn register(&self, req: Registration) -> Result<UserAccount, UserAccountsError>;

    /// Apply a profile update
    async fn update_profile(&self, id: i32, req: ProfileUpdate) -> Result<(), UserAccountsError>;

    /// Soft-delete an account
    async fn delete_account(&self, id: i32) -> Result<(), UserAccountsError>;

    /// Check credentials
    async fn login(&self, creds: Credentials) -> Result<UserAccount, UserAccountsError>;
}
