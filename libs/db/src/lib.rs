//! Database handle for the ginchat server.
//!
//! Wraps a concrete sqlx pool (SQLite, MySQL or PostgreSQL, chosen by the DSN
//! scheme) together with a SeaORM `DatabaseConnection` built on top of the
//! same pool. The handle is constructed once at startup and passed by
//! reference to whoever needs storage; there is no global connection.
//!
//! # Example
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> db::Result<()> {
//!     use db::{ConnectOpts, DbHandle};
//!
//!     let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
//!     let conn = db.sea();
//!     # let _ = conn;
//!     db.close().await;
//!     Ok(())
//! }
//! ```

mod dsn;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use dsn::{is_in_memory_sqlite, redact_credentials_in_dsn};

use std::time::Duration;

#[cfg(feature = "mysql")]
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
#[cfg(feature = "pg")]
use sqlx::{postgres::PgPoolOptions, PgPool};
#[cfg(feature = "sqlite")]
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use sea_orm::DatabaseConnection;
#[cfg(feature = "mysql")]
use sea_orm::SqlxMySqlConnector;
#[cfg(feature = "pg")]
use sea_orm::SqlxPostgresConnector;
#[cfg(feature = "sqlite")]
use sea_orm::SqlxSqliteConnector;

use thiserror::Error;

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the DB handle and helpers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error("Feature not enabled: {0}")]
    FeatureDisabled(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DbEngine {
    Postgres,
    MySql,
    Sqlite,
}

/// Pool options; each driver applies the subset it supports.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool.
    pub max_conns: Option<u32>,
    /// Minimum number of connections in the pool.
    pub min_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// Idle timeout before a connection is closed.
    pub idle_timeout: Option<Duration>,
    /// SQLite busy timeout; ignored for other engines.
    pub sqlite_busy_timeout: Option<Duration>,
    /// For SQLite file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            min_conns: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            sqlite_busy_timeout: Some(Duration::from_millis(5000)),
            create_sqlite_dirs: true,
        }
    }
}

/// One concrete sqlx pool.
#[derive(Clone, Debug)]
enum DbPool {
    #[cfg(feature = "pg")]
    Postgres(PgPool),
    #[cfg(feature = "mysql")]
    MySql(MySqlPool),
    #[cfg(feature = "sqlite")]
    Sqlite(SqlitePool),
}

/// Main handle.
#[derive(Debug)]
pub struct DbHandle {
    engine: DbEngine,
    pool: DbPool,
    dsn: String,
    sea: DatabaseConnection,
}

// Applies the pool knobs shared by every sqlx driver.
macro_rules! apply_pool_opts {
    ($o:expr, $opts:expr) => {{
        let mut o = $o;
        if let Some(n) = $opts.max_conns {
            o = o.max_connections(n);
        }
        if let Some(n) = $opts.min_conns {
            o = o.min_connections(n);
        }
        if let Some(t) = $opts.acquire_timeout {
            o = o.acquire_timeout(t);
        }
        if let Some(t) = $opts.idle_timeout {
            o = o.idle_timeout(t);
        }
        o
    }};
}

impl DbHandle {
    /// Detect engine by DSN scheme.
    pub fn detect(dsn: &str) -> Result<DbEngine> {
        let s = dsn.trim_start();

        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            Ok(DbEngine::Postgres)
        } else if s.starts_with("mysql://") || s.starts_with("mariadb://") {
            Ok(DbEngine::MySql)
        } else if s.starts_with("sqlite:") {
            Ok(DbEngine::Sqlite)
        } else {
            Err(DbError::UnknownDsn(redact_credentials_in_dsn(Some(dsn))))
        }
    }

    /// Connect and build handle.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        let engine = Self::detect(dsn)?;
        tracing::debug!(
            dsn = %redact_credentials_in_dsn(Some(dsn)),
            ?engine,
            "connecting database"
        );

        match engine {
            #[cfg(feature = "pg")]
            DbEngine::Postgres => {
                let pool = apply_pool_opts!(PgPoolOptions::new(), opts)
                    .connect(dsn)
                    .await?;
                let sea = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
                Ok(Self {
                    engine,
                    pool: DbPool::Postgres(pool),
                    dsn: dsn.to_string(),
                    sea,
                })
            }
            #[cfg(feature = "mysql")]
            DbEngine::MySql => {
                let dsn = dsn.replacen("mariadb://", "mysql://", 1);
                let pool = apply_pool_opts!(MySqlPoolOptions::new(), opts)
                    .connect(&dsn)
                    .await?;
                let sea = SqlxMySqlConnector::from_sqlx_mysql_pool(pool.clone());
                Ok(Self {
                    engine,
                    pool: DbPool::MySql(pool),
                    dsn,
                    sea,
                })
            }
            #[cfg(feature = "sqlite")]
            DbEngine::Sqlite => {
                let dsn = sqlite::prepare_path(dsn, opts.create_sqlite_dirs)?;
                let in_memory = is_in_memory_sqlite(&dsn);

                let mut o = apply_pool_opts!(SqlitePoolOptions::new(), opts);
                if in_memory {
                    // Every connection to `:memory:` opens a private database,
                    // so the pool must keep exactly one alive forever.
                    o = o
                        .max_connections(1)
                        .min_connections(1)
                        .idle_timeout(None)
                        .max_lifetime(None);
                }
                let busy = opts.sqlite_busy_timeout;
                o = o.after_connect(move |conn, _meta| {
                    Box::pin(async move { sqlite::apply_pragmas(conn, in_memory, busy).await })
                });

                let pool = o.connect(&dsn).await?;
                let sea = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool.clone());
                Ok(Self {
                    engine,
                    pool: DbPool::Sqlite(pool),
                    dsn,
                    sea,
                })
            }
            #[cfg(not(feature = "pg"))]
            DbEngine::Postgres => Err(DbError::FeatureDisabled("PostgreSQL feature not enabled")),
            #[cfg(not(feature = "mysql"))]
            DbEngine::MySql => Err(DbError::FeatureDisabled("MySQL feature not enabled")),
            #[cfg(not(feature = "sqlite"))]
            DbEngine::Sqlite => Err(DbError::FeatureDisabled("SQLite feature not enabled")),
        }
    }

    /// Graceful pool close.
    pub async fn close(self) {
        match self.pool {
            #[cfg(feature = "pg")]
            DbPool::Postgres(p) => p.close().await,
            #[cfg(feature = "mysql")]
            DbPool::MySql(p) => p.close().await,
            #[cfg(feature = "sqlite")]
            DbPool::Sqlite(p) => p.close().await,
        }
    }

    /// Get the backend.
    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// DSN used for this connection (may contain credentials; redact before logging).
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    /// SeaORM connection (clone; cheap handle).
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }

    /// Borrowed SeaORM connection, e.g. for running migrations.
    pub fn seaorm(&self) -> &DatabaseConnection {
        &self.sea
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_detection() {
        assert_eq!(
            DbHandle::detect("postgres://u:p@localhost/db").unwrap(),
            DbEngine::Postgres
        );
        assert_eq!(
            DbHandle::detect("postgresql://localhost/db").unwrap(),
            DbEngine::Postgres
        );
        assert_eq!(
            DbHandle::detect("mysql://root@127.0.0.1:3306/ginchat").unwrap(),
            DbEngine::MySql
        );
        assert_eq!(
            DbHandle::detect("sqlite::memory:").unwrap(),
            DbEngine::Sqlite
        );
        assert_eq!(
            DbHandle::detect("sqlite://data/app.db").unwrap(),
            DbEngine::Sqlite
        );
        assert!(matches!(
            DbHandle::detect("redis://localhost"),
            Err(DbError::UnknownDsn(_))
        ));
    }

    #[test]
    fn unknown_dsn_error_does_not_leak_password() {
        let err = DbHandle::detect("oracle://scott:tiger@db/x").unwrap_err();
        let msg = err.to_string();
        assert!(!msg.contains("tiger"), "password leaked: {msg}");
    }

    #[tokio::test]
    async fn test_postgres_driver_is_built_in() {
        let opts = ConnectOpts {
            acquire_timeout: Some(Duration::from_millis(300)),
            ..Default::default()
        };
        let err = DbHandle::connect("postgres://u:p@127.0.0.1:1/ginchat", opts)
            .await
            .unwrap_err();
        // Reached the driver instead of a disabled-feature error
        assert!(matches!(err, DbError::Sqlx(_)), "got {err:?}");
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn test_sqlite_memory_connection() -> Result<()> {
        let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
        assert_eq!(db.engine(), DbEngine::Sqlite);
        assert_eq!(db.dsn(), "sqlite::memory:");
        db.close().await;
        Ok(())
    }
}
