use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Password and confirmation do not match")]
    PasswordMismatch,

    #[error("Name and password must not be empty")]
    EmptyCredentials,

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("User name '{name}' already exists")]
    NameTaken { name: String },

    #[error("User not found: {name}")]
    UserNotFound { name: String },

    #[error("User not found: id {id}")]
    UserIdNotFound { id: i32 },

    #[error("Wrong password")]
    InvalidPassword,

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn name_taken(name: impl Into<String>) -> Self {
        Self::NameTaken { name: name.into() }
    }

    pub fn user_not_found(name: impl Into<String>) -> Self {
        Self::UserNotFound { name: name.into() }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
