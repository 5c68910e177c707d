use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

const LIVE_NAME_INDEX: &str = "ux_user_basic_name_live";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserBasic::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserBasic::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserBasic::Name).string().not_null())
                    .col(ColumnDef::new(UserBasic::Password).string().not_null())
                    .col(ColumnDef::new(UserBasic::Salt).string().not_null())
                    .col(ColumnDef::new(UserBasic::Phone).string().not_null().default(""))
                    .col(ColumnDef::new(UserBasic::Email).string().not_null().default(""))
                    .col(ColumnDef::new(UserBasic::Identity).string().not_null().default(""))
                    .col(ColumnDef::new(UserBasic::ClientIp).string().not_null().default(""))
                    .col(ColumnDef::new(UserBasic::ClientPort).string().not_null().default(""))
                    .col(ColumnDef::new(UserBasic::LoginTime).timestamp_with_time_zone().not_null())
                    .col(
                        ColumnDef::new(UserBasic::HeartbeatTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserBasic::LoginOutTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserBasic::IsLogout).boolean().not_null().default(false))
                    .col(ColumnDef::new(UserBasic::DeviceInfo).string().not_null().default(""))
                    .col(ColumnDef::new(UserBasic::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(UserBasic::UpdatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(UserBasic::DeletedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        // Names are unique among live rows. MySQL has no partial indexes, so it
        // only gets a lookup index and relies on the service-side check.
        match manager.get_database_backend() {
            DbBackend::Sqlite | DbBackend::Postgres => {
                manager
                    .get_connection()
                    .execute_unprepared(&format!(
                        "CREATE UNIQUE INDEX IF NOT EXISTS {LIVE_NAME_INDEX} \
                         ON user_basic (name) WHERE deleted_at IS NULL"
                    ))
                    .await?;
            }
            _ => {
                manager
                    .create_index(
                        Index::create()
                            .name("idx_user_basic_name")
                            .table(UserBasic::Table)
                            .col(UserBasic::Name)
                            .to_owned(),
                    )
                    .await?;
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserBasic::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserBasic {
    Table,
    Id,
    Name,
    Password,
    Salt,
    Phone,
    Email,
    Identity,
    ClientIp,
    ClientPort,
    LoginTime,
    HeartbeatTime,
    LoginOutTime,
    IsLogout,
    DeviceInfo,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
