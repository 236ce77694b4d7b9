//! Auth Router
//!
//! Routes are relative; the binary nests them under `/api/auth`.

use axum::{Router, middleware::from_fn_with_state, routing::post};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::notification::NotificationDispatcher;
use crate::domain::repository::{OtpRepository, SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgAuthRepository,
    config: AuthConfig,
    notifier: NotificationDispatcher,
) -> Router {
    auth_router_generic(repo, config, notifier)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig, notifier: NotificationDispatcher) -> Router
where
    R: UserRepository + OtpRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let state = AuthAppState {
        repo: repo.clone(),
        config: Arc::new(config),
        notifier,
    };
    let auth_state = AuthMiddlewareState { repo };

    let protected = Router::new()
        .route("/register/complete", post(handlers::complete_registration::<R>))
        .route_layer(from_fn_with_state(auth_state, require_auth::<R>));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/verify-otp", post(handlers::verify_otp::<R>))
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
