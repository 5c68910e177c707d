use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the `/user/*` endpoints onto `router`.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let users = Router::new()
        // GET /user/login lists users; POST /user/login authenticates
        .route(
            "/user/login",
            get(handlers::list_users).post(handlers::login),
        )
        .route("/user/getUserList", get(handlers::list_users))
        .route("/user/createUser", get(handlers::create_user))
        .route("/user/updateUser", post(handlers::update_user))
        .route("/user/deleteUser", delete(handlers::delete_user))
        .layer(Extension(service));

    router.merge(users)
}
