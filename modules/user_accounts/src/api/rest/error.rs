use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::rest::dto::{MsgResponse, CODE_FAIL};
use crate::domain::error::DomainError;

/// Failure reply. The HTTP status stays 200; the failure is signalled by
/// `code: -1` in the body, with a machine-readable `error`.
#[derive(Debug)]
pub struct MsgError {
    pub body: MsgResponse<String>,
}

impl MsgError {
    pub fn new(code: &str, msg: impl Into<String>) -> Self {
        Self {
            body: MsgResponse {
                code: CODE_FAIL,
                msg: msg.into(),
                error: Some(code.to_string()),
            },
        }
    }
}

impl IntoResponse for MsgError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.body)).into_response()
    }
}

/// Map domain error to the response envelope
pub fn map_domain_error(e: &DomainError) -> MsgError {
    match e {
        DomainError::PasswordMismatch => MsgError::new("PASSWORD_MISMATCH", "两次密码不一致"),
        DomainError::EmptyCredentials => {
            MsgError::new("EMPTY_CREDENTIALS", "用户名或密码不能为空")
        }
        DomainError::Validation { .. } => MsgError::new("VALIDATION", "参数错误"),
        DomainError::NameTaken { .. } => MsgError::new("NAME_TAKEN", "用户名已存在"),
        DomainError::UserNotFound { .. } => MsgError::new("USER_NOT_FOUND", "用户名不存在"),
        DomainError::UserIdNotFound { .. } => MsgError::new("USER_NOT_FOUND", "用户不存在"),
        DomainError::InvalidPassword => MsgError::new("INVALID_PASSWORD", "密码错误"),
        DomainError::Database { .. } => {
            // Details stay in the log
            tracing::error!(error = ?e, "Database error occurred");
            MsgError::new("STORE_ERROR", "服务器内部错误")
        }
    }
}
