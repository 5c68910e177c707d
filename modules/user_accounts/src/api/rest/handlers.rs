use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::ExtensionRejection, ConnectInfo, Form, Query},
    response::Json,
    Extension,
};
use tracing::{error, info};

use crate::api::rest::dto::{
    CreateUserQuery, IdQuery, LoginForm, MsgResponse, UpdateUserForm, UserAccountDto,
};
use crate::api::rest::error::{map_domain_error, MsgError};
use crate::contract::model::ClientAddr;
use crate::domain::error::DomainError;
use crate::domain::service::Service;

type MsgResult<T> = Result<Json<MsgResponse<T>>, MsgError>;

/// List live accounts
pub async fn list_users(Extension(svc): Extension<Arc<Service>>) -> MsgResult<Vec<UserAccountDto>> {
    info!("Listing users");

    match svc.list_accounts().await {
        Ok(accounts) => {
            let dto: Vec<UserAccountDto> = accounts.into_iter().map(UserAccountDto::from).collect();
            Ok(Json(MsgResponse::ok(dto)))
        }
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Register a user from query parameters
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<CreateUserQuery>,
) -> MsgResult<&'static str> {
    info!("Creating user: {}", query.name);

    match svc.register(query.into()).await {
        Ok(_) => Ok(Json(MsgResponse::ok("创建成功"))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Update profile fields given as a form; the id comes from the query
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<IdQuery>,
    Form(form): Form<UpdateUserForm>,
) -> MsgResult<&'static str> {
    let id = parse_id(&query).map_err(|e| map_domain_error(&e))?;
    info!("Updating user {}", id);

    match svc.update_profile(id, form.into()).await {
        Ok(()) => Ok(Json(MsgResponse::ok("更新成功"))),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Soft-delete by id
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<IdQuery>,
) -> MsgResult<&'static str> {
    let id = parse_id(&query).map_err(|e| map_domain_error(&e))?;
    info!("Deleting user {}", id);

    match svc.delete_account(id).await {
        Ok(()) => Ok(Json(MsgResponse::ok("删除成功"))),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Check name and password
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    peer: Result<ConnectInfo<SocketAddr>, ExtensionRejection>,
    Form(form): Form<LoginForm>,
) -> MsgResult<&'static str> {
    info!("Login attempt for {}", form.name);
    // Absent when the router is served without connect info
    let client = peer.ok().map(|ConnectInfo(addr)| ClientAddr::from(addr));

    match svc.login(form.into(), client).await {
        Ok(_) => Ok(Json(MsgResponse::ok("登录成功"))),
        Err(e) => {
            info!("Login failed: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

fn parse_id(query: &IdQuery) -> Result<i32, DomainError> {
    let raw = query.id.as_deref().unwrap_or("").trim();
    if raw.is_empty() {
        return Err(DomainError::validation("id", "missing"));
    }
    raw.parse::<i32>()
        .map_err(|_| DomainError::validation("id", format!("not an integer: '{raw}'")))
}
