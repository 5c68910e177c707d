use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::UserAccountsApi,
    error::UserAccountsError,
    model::{Credentials, ProfileUpdate, Registration, UserAccount},
};
use crate::domain::service::Service;

/// Local implementation of the UserAccountsApi trait that delegates to the domain service
pub struct UserAccountsLocalClient {
    service: Arc<Service>,
}

impl UserAccountsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserAccountsApi for UserAccountsLocalClient {
    async fn list_accounts(&self) -> Result<Vec<UserAccount>, UserAccountsError> {
        Ok(self.service.list_accounts().await?)
    }

    async fn get_account(&self, id: i32) -> Result<UserAccount, UserAccountsError> {
        Ok(self.service.get_account(id).await?)
    }

    async fn register(&self, req: Registration) -> Result<UserAccount, UserAccountsError> {
        Ok(self.service.register(req).await?)
    }

    async fn update_profile(&self, id: i32, req: ProfileUpdate) -> Result<(), UserAccountsError> {
        Ok(self.service.update_profile(id, req).await?)
    }

    async fn delete_account(&self, id: i32) -> Result<(), UserAccountsError> {
        Ok(self.service.delete_account(id).await?)
    }

    async fn login(&self, creds: Credentials) -> Result<UserAccount, UserAccountsError> {
        // In-process callers have no socket address to record.
        Ok(self.service.login(creds, None).await?)
    }
}
