use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserAccountsError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("User name '{name}' already exists")]
    Conflict { name: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Invalid credentials")]
    Auth,

    #[error("Store error")]
    Store,
}

impl UserAccountsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(name: impl Into<String>) -> Self {
        Self::Conflict { name: name.into() }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

impl From<DomainError> for UserAccountsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::PasswordMismatch | DomainError::EmptyCredentials => {
                Self::validation(e.to_string())
            }
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::NameTaken { name } => Self::conflict(name),
            DomainError::UserNotFound { name } => Self::not_found(format!("user '{name}'")),
            DomainError::UserIdNotFound { id } => Self::not_found(format!("user id {id}")),
            DomainError::InvalidPassword => Self::Auth,
            DomainError::Database { .. } => Self::Store,
        }
    }
}
