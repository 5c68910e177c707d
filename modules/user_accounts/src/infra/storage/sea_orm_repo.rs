//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction.

use anyhow::Context;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QuerySelect, Set, SqlErr,
};

use crate::contract::model::{ClientAddr, NewAccount, UserAccount};
use crate::domain::repo::{RepoError, UsersRepository};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    async fn find_live_by(
        &self,
        col: Column,
        value: &str,
        what: &'static str,
    ) -> anyhow::Result<Option<UserAccount>> {
        let found = UserEntity::find()
            .filter(col.eq(value))
            .filter(Column::DeletedAt.is_null())
            .one(&self.conn)
            .await
            .with_context(|| format!("{what} failed"))?;
        Ok(found.map(Into::into))
    }
}

fn write_error(e: DbErr, what: &'static str) -> RepoError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return RepoError::Conflict;
    }
    tracing::error!(error = %e, "{what} failed");
    RepoError::Store(anyhow::Error::new(e).context(format!("{what} failed")))
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list(&self, limit: u64) -> anyhow::Result<Vec<UserAccount>> {
        let rows = UserEntity::find()
            .filter(Column::DeletedAt.is_null())
            .limit(limit)
            .all(&self.conn)
            .await
            .context("list failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, a: NewAccount) -> Result<UserAccount, RepoError> {
        let now = Utc::now();
        let m = UserAM {
            id: NotSet,
            name: Set(a.name),
            password: Set(a.password),
            salt: Set(a.salt),
            phone: Set(a.phone),
            email: Set(a.email),
            identity: Set(a.identity),
            client_ip: Set(String::new()),
            client_port: Set(String::new()),
            login_time: Set(a.login_time.unwrap_or(now)),
            heartbeat_time: Set(a.heartbeat_time.unwrap_or(now)),
            login_out_time: Set(a.login_out_time.unwrap_or(now)),
            is_logout: Set(false),
            device_info: Set(a.device_info),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };
        let stored = m
            .insert(&self.conn)
            .await
            .map_err(|e| write_error(e, "insert"))?;
        Ok(stored.into())
    }

    async fn update(&self, u: UserAccount) -> Result<(), RepoError> {
        // id, salt and created_at are immutable
        let m = UserAM {
            name: Set(u.name),
            password: Set(u.password),
            phone: Set(u.phone),
            email: Set(u.email),
            identity: Set(u.identity),
            client_ip: Set(u.client_ip),
            client_port: Set(u.client_port),
            login_time: Set(u.login_time),
            heartbeat_time: Set(u.heartbeat_time),
            login_out_time: Set(u.login_out_time),
            is_logout: Set(u.is_logout),
            device_info: Set(u.device_info),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        UserEntity::update_many()
            .set(m)
            .filter(Column::Id.eq(u.id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.conn)
            .await
            .map_err(|e| write_error(e, "update"))?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let now = Utc::now();
        UserEntity::update_many()
            .col_expr(Column::DeletedAt, Expr::value(now))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.conn)
            .await
            .map_err(|e| write_error(e, "soft delete"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<UserAccount>> {
        let found = UserEntity::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> anyhow::Result<Option<UserAccount>> {
        self.find_live_by(Column::Name, name, "find_by_name").await
    }

    async fn find_by_phone(&self, phone: &str) -> anyhow::Result<Option<UserAccount>> {
        self.find_live_by(Column::Phone, phone, "find_by_phone").await
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserAccount>> {
        self.find_live_by(Column::Email, email, "find_by_email").await
    }

    async fn is_store_empty(&self) -> anyhow::Result<bool> {
        let count = UserEntity::find()
            .count(&self.conn)
            .await
            .context("count failed")?;
        Ok(count == 0)
    }

    async fn record_login(&self, id: i32, client: &ClientAddr) -> anyhow::Result<()> {
        let now = Utc::now();
        UserEntity::update_many()
            .col_expr(Column::LoginTime, Expr::value(now))
            .col_expr(Column::HeartbeatTime, Expr::value(now))
            .col_expr(Column::ClientIp, Expr::value(client.ip.clone()))
            .col_expr(Column::ClientPort, Expr::value(client.port.clone()))
            .col_expr(Column::IsLogout, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::DeletedAt.is_null())
            .exec(&self.conn)
            .await
            .context("record_login failed")?;
        Ok(())
    }
}
