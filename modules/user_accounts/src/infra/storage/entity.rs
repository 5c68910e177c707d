use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_basic")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
