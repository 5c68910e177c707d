use std::sync::Arc;

use axum::Router;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::UserAccountsConfig;
use crate::contract::client::UserAccountsApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::UserAccountsLocalClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmUsersRepository;

/// The user_accounts module: wires storage, service, REST and the local client.
#[derive(Clone)]
pub struct UserAccounts {
    service: Arc<Service>,
}

impl UserAccounts {
    /// Bring the `user_basic` schema up to date.
    pub async fn migrate(db: &db::DbHandle) -> anyhow::Result<()> {
        info!("Running user_accounts database migrations");
        Migrator::up(db.seaorm(), None).await?;
        info!("user_accounts database migrations completed");
        Ok(())
    }

    pub fn init(cfg: UserAccountsConfig, db: &db::DbHandle) -> Self {
        info!("Initializing user_accounts module");
        debug!(
            "Loaded user_accounts config: list_limit={}, rehash_password_on_update={}",
            cfg.list_limit, cfg.rehash_password_on_update
        );

        // Wire repository (infra) to domain service (port)
        let repo = SeaOrmUsersRepository::new(db.sea());
        let service = Service::new(
            Arc::new(repo),
            ServiceConfig {
                list_limit: cfg.list_limit,
                rehash_password_on_update: cfg.rehash_password_on_update,
            },
        );

        Self {
            service: Arc::new(service),
        }
    }

    pub fn register_rest(&self, router: Router) -> Router {
        let router = routes::register_routes(router, self.service.clone());
        info!("user_accounts REST routes registered");
        router
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn UserAccountsApi> {
        Arc::new(UserAccountsLocalClient::new(self.service.clone()))
    }
}
