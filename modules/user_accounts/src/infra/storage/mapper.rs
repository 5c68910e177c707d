use crate::contract::model::UserAccount;
use crate::infra::storage::entity::Model as UserEntity;

impl From<UserEntity> for UserAccount {
    fn from(e: UserEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            password: e.password,
            salt: e.salt,
            phone: e.phone,
            email: e.email,
            identity: e.identity,
            client_ip: e.client_ip,
            client_port: e.client_port,
            login_time: e.login_time,
            heartbeat_time: e.heartbeat_time,
            login_out_time: e.login_out_time,
            is_logout: e.is_logout,
            device_info: e.device_info,
            created_at: e.created_at,
            updated_at: e.updated_at,
            deleted_at: e.deleted_at,
        }
    }
}
