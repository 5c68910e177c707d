use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument, warn};
use validator::ValidateEmail;

use crate::contract::model::{
    ClientAddr, Credentials, NewAccount, ProfileUpdate, Registration, UserAccount,
};
use crate::domain::credentials;
use crate::domain::error::DomainError;
use crate::domain::repo::{RepoError, UsersRepository};

// Mainland mobile number; anchored at the end only.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"1[3-9]\d{9}$").expect("valid phone regex"));

/// Domain service with the account rules.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub list_limit: u64,
    /// Digest passwords set through a profile update instead of storing them raw.
    pub rehash_password_on_update: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            list_limit: 1000,
            rehash_password_on_update: false,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(name = "user_accounts.service.list_accounts", skip(self))]
    pub async fn list_accounts(&self) -> Result<Vec<UserAccount>, DomainError> {
        debug!("Listing accounts");
        let accounts = self
            .repo
            .list(self.config.list_limit)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        debug!("Listed {} accounts", accounts.len());
        Ok(accounts)
    }

    #[instrument(name = "user_accounts.service.get_account", skip(self), fields(user_id = id))]
    pub async fn get_account(&self, id: i32) -> Result<UserAccount, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or(DomainError::UserIdNotFound { id })
    }

    #[instrument(
        name = "user_accounts.service.register",
        skip(self, req),
        fields(name = %req.name)
    )]
    pub async fn register(&self, req: Registration) -> Result<UserAccount, DomainError> {
        info!("Registering account");

        if req.password != req.repassword {
            return Err(DomainError::PasswordMismatch);
        }
        if req.name.is_empty() || req.password.is_empty() {
            return Err(DomainError::EmptyCredentials);
        }

        let store_empty = self
            .repo
            .is_store_empty()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        if !store_empty
            && self
                .repo
                .find_by_name(&req.name)
                .await
                .map_err(|e| DomainError::database(e.to_string()))?
                .is_some()
        {
            return Err(DomainError::name_taken(req.name));
        }

        let salt = credentials::derive_salt();
        let new_account = NewAccount {
            password: credentials::digest(&req.password, &salt),
            name: req.name.clone(),
            salt,
            ..Default::default()
        };

        let account = self.repo.create(new_account).await.map_err(|e| match e {
            RepoError::Conflict => DomainError::name_taken(req.name.clone()),
            RepoError::Store(e) => DomainError::database(e.to_string()),
        })?;

        info!("Registered account id={}", account.id);
        Ok(account)
    }

    #[instrument(
        name = "user_accounts.service.update_profile",
        skip(self, req),
        fields(user_id = id)
    )]
    pub async fn update_profile(&self, id: i32, req: ProfileUpdate) -> Result<(), DomainError> {
        info!("Updating profile");

        if req.password != req.repassword {
            return Err(DomainError::PasswordMismatch);
        }
        validate_phone(&req.phone)?;
        validate_email(&req.email)?;

        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .unwrap_or_else(|| UserAccount::bare(id));

        if !req.name.is_empty() {
            current.name = req.name;
        }
        if !req.password.is_empty() {
            current.password = if self.config.rehash_password_on_update {
                credentials::digest(&req.password, &current.salt)
            } else {
                req.password
            };
        }
        if !req.email.is_empty() {
            current.email = req.email;
        }
        if !req.phone.is_empty() {
            current.phone = req.phone;
        }

        let name = current.name.clone();
        self.repo.update(current).await.map_err(|e| match e {
            RepoError::Conflict => DomainError::name_taken(name),
            RepoError::Store(e) => DomainError::database(e.to_string()),
        })?;

        info!("Profile updated");
        Ok(())
    }

    #[instrument(name = "user_accounts.service.delete_account", skip(self), fields(user_id = id))]
    pub async fn delete_account(&self, id: i32) -> Result<(), DomainError> {
        info!("Deleting account");
        self.repo.delete(id).await.map_err(|e| match e {
            RepoError::Conflict => DomainError::database("unexpected conflict on delete"),
            RepoError::Store(e) => DomainError::database(e.to_string()),
        })?;
        Ok(())
    }

    #[instrument(
        name = "user_accounts.service.login",
        skip(self, creds, client),
        fields(name = %creds.name)
    )]
    pub async fn login(
        &self,
        creds: Credentials,
        client: Option<ClientAddr>,
    ) -> Result<UserAccount, DomainError> {
        let account = self
            .repo
            .find_by_name(&creds.name)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(creds.name.clone()))?;

        if !credentials::verify(&creds.password, &account.salt, &account.password) {
            info!("Login rejected: wrong password");
            return Err(DomainError::InvalidPassword);
        }

        let client = client.unwrap_or_default();
        if let Err(e) = self.repo.record_login(account.id, &client).await {
            warn!("Recording login failed (continuing): {}", e);
        }

        info!("Login succeeded for id={}", account.id);
        Ok(account)
    }
}

fn validate_phone(phone: &str) -> Result<(), DomainError> {
    if !phone.is_empty() && !PHONE_RE.is_match(phone) {
        return Err(DomainError::validation("phone", "invalid mobile number"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    if !email.is_empty() && !email.validate_email() {
        return Err(DomainError::validation("email", "invalid email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_rule() {
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("13800138000").is_ok());
        assert!(validate_phone("19912345678").is_ok());
        assert!(validate_phone("12800138000").is_err());
        assert!(validate_phone("1380013800").is_err());
        assert!(validate_phone("phone").is_err());
    }

    #[test]
    fn email_rule() {
        assert!(validate_email("").is_ok());
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("alice").is_err());
        assert!(validate_email("alice@").is_err());
    }
}
