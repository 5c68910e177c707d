use chrono::{DateTime, Utc};

/// Stored user account (no serde; REST has its own DTO).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: i32,
    pub name: String,
    /// Password digest. Raw text if it was last set through a profile update
    /// without re-hashing enabled.
    pub password: String,
    pub salt: String,
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
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// Record carrying only an id, every other field empty.
    pub fn bare(id: i32) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: String::new(),
            password: String::new(),
            salt: String::new(),
            phone: String::new(),
            email: String::new(),
            identity: String::new(),
            client_ip: String::new(),
            client_port: String::new(),
            login_time: now,
            heartbeat_time: now,
            login_out_time: now,
            is_logout: false,
            device_info: String::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Row to insert. Unset timestamps are filled with the write time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub password: String,
    pub salt: String,
    pub phone: String,
    pub email: String,
    pub identity: String,
    pub device_info: String,
    pub login_time: Option<DateTime<Utc>>,
    pub heartbeat_time: Option<DateTime<Utc>>,
    pub login_out_time: Option<DateTime<Utc>>,
}

/// Registration request: plaintext password plus its confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub password: String,
    pub repassword: String,
}

/// Profile update. Empty strings leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub password: String,
    pub repassword: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

/// Remote address of the client that logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientAddr {
    pub ip: String,
    pub port: String,
}

impl From<std::net::SocketAddr> for ClientAddr {
    fn from(addr: std::net::SocketAddr) -> Self {
        Self {
            ip: addr.ip().to_string(),
            port: addr.port().to_string(),
        }
    }
}
