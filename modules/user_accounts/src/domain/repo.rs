use async_trait::async_trait;
use thiserror::Error;

use crate::contract::model::{ClientAddr, NewAccount, UserAccount};

/// Write failures the service needs to tell apart.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("unique constraint violated")]
    Conflict,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Port for the domain layer: persistence operations the domain needs.
/// Every read skips soft-deleted rows unless stated otherwise.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Up to `limit` live accounts, in no particular order.
    async fn list(&self, limit: u64) -> anyhow::Result<Vec<UserAccount>>;
    /// Insert with a fresh id and return the stored row.
    async fn create(&self, account: NewAccount) -> Result<UserAccount, RepoError>;
    /// Overwrite the mutable columns of the live row with `account.id`.
    /// Absent rows are left alone.
    async fn update(&self, account: UserAccount) -> Result<(), RepoError>;
    /// Soft-delete. Absent rows are left alone.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<UserAccount>>;
    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<UserAccount>>;
    async fn find_by_phone(&self, phone: &str) -> anyhow::Result<Option<UserAccount>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserAccount>>;
    /// True when the table has no rows at all, soft-deleted ones included.
    async fn is_store_empty(&self) -> anyhow::Result<bool>;
    /// Stamp login and heartbeat time, remember the client, clear `is_logout`.
    async fn record_login(&self, id: i32, client: &ClientAddr) -> anyhow::Result<()>;
}
