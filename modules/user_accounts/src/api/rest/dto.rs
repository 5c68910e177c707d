use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{Credentials, ProfileUpdate, Registration, UserAccount};

/// Body code for a successful call.
pub const CODE_OK: i32 = 200;
/// Body code for any failure.
pub const CODE_FAIL: i32 = -1;

/// Uniform response envelope: `{code, msg, error?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgResponse<T> {
    pub code: i32,
    pub msg: T,
    /// Machine-readable error code; absent on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> MsgResponse<T> {
    pub fn ok(msg: T) -> Self {
        Self {
            code: CODE_OK,
            msg,
            error: None,
        }
    }
}

/// Listed account. Password and salt never leave the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccountDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub identity: String,
    pub client_ip: String,
    pub client_port: String,
    pub login_time: DateTime<Utc>,
    pub heartbeat_time: DateTime<Utc>,
    pub login_out_time: DateTime<Utc>,
    pub is_logout: bool,
    pub device_info: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query of `GET /user/createUser`. Missing parameters read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserQuery {
    pub name: String,
    pub password: String,
    pub repassword: String,
}

/// `?id=` of update and delete; parsed by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserForm {
    pub name: String,
    pub password: String,
    pub repassword: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<UserAccount> for UserAccountDto {
    fn from(a: UserAccount) -> Self {
        Self {
            id: a.id,
            name: a.name,
            phone: a.phone,
            email: a.email,
            identity: a.identity,
            client_ip: a.client_ip,
            client_port: a.client_port,
            login_time: a.login_time,
            heartbeat_time: a.heartbeat_time,
            login_out_time: a.login_out_time,
            is_logout: a.is_logout,
            device_info: a.device_info,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<CreateUserQuery> for Registration {
    fn from(q: CreateUserQuery) -> Self {
        Self {
            name: q.name,
            password: q.password,
            repassword: q.repassword,
        }
    }
}

impl From<UpdateUserForm> for ProfileUpdate {
    fn from(f: UpdateUserForm) -> Self {
        Self {
            name: f.name,
            password: f.password,
            repassword: f.repassword,
            email: f.email,
            phone: f.phone,
        }
    }
}

impl From<LoginForm> for Credentials {
    fn from(f: LoginForm) -> Self {
        Self {
            name: f.name,
            password: f.password,
        }
    }
}
