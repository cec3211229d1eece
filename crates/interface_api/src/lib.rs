//! HTTP API Layer
//!
//! This crate provides the REST API for the lost and found service using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for items, claims, accounts and feedback
//! - **Middleware**: Admin authorization, request IDs, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! Handlers never touch the database directly. They call the
//! [`ClaimLifecycleManager`] and [`AccountService`] held in [`AppState`], so
//! the same router runs against PostgreSQL or the in-memory stores.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::postgres(pool, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, delete},
    middleware as axum_middleware,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{CorsLayer, Any};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::AdminId;
use domain_accounts::{AccountError, AccountService};
use domain_claims::ClaimLifecycleManager;
use infra_db::{PostgresAccountAdapter, PostgresLostFoundAdapter};

use crate::auth::Argon2Hasher;
use crate::config::ApiConfig;
use crate::middleware::{audit_middleware, require_admin};
use crate::handlers::{accounts, claims, feedback, health, items};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub claims: ClaimLifecycleManager,
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(config: ApiConfig, claims: ClaimLifecycleManager, accounts: AccountService) -> Self {
        Self {
            config,
            claims,
            accounts,
        }
    }

    /// Wires the PostgreSQL adapters and Argon2 hashing around one pool
    pub fn postgres(pool: PgPool, config: ApiConfig) -> Self {
        let claims = ClaimLifecycleManager::new(Arc::new(PostgresLostFoundAdapter::new(pool.clone())));
        let accounts = AccountService::new(
            Arc::new(PostgresAccountAdapter::new(pool)),
            Arc::new(Argon2Hasher),
        );
        Self::new(config, claims, accounts)
    }

    /// Upserts the administrator named in `API_ADMIN_EMAIL`/`API_ADMIN_KEY`
    ///
    /// Returns `None` when neither is configured; admin routes then stay
    /// closed until an administrator exists in the store.
    pub async fn provision_admin(&self) -> Result<Option<AdminId>, AccountError> {
        match self.config.admin_credentials() {
            Some((email, key)) => Ok(Some(self.accounts.provision_admin(email, key).await?)),
            None => Ok(None),
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Configuration plus the services handlers call into
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let open_routes = Router::new()
        .route("/lost-items", get(items::lost_items))
        .route("/found-unclaimed-items", get(items::found_unclaimed_items))
        .route("/found-claimed-items", get(items::found_claimed_items))
        .route("/categories", get(items::categories))
        .route("/report-lost-item", post(items::report_lost_item))
        .route("/report-found-item", post(items::report_found_item))
        .route("/submit-claim", post(claims::submit_claim))
        .route("/claim-item", post(claims::claim_item))
        .route("/signup", post(accounts::signup))
        .route("/login", post(accounts::login))
        .route("/admin/login", post(accounts::admin_login))
        .route("/submit-feedback", post(feedback::submit_feedback));

    // route_layer keeps unknown paths at 404 instead of 401
    let admin_routes = Router::new()
        .route("/found-items", get(items::found_items))
        .route("/lost-items/:id", delete(items::remove_lost_item))
        .route("/claims", get(claims::list_claims))
        .route("/claims/accept", post(claims::accept_claim))
        .route("/claims/reject", post(claims::reject_claim))
        .route("/users/summary", get(accounts::user_summaries))
        .route("/reviews/summary", get(feedback::reviews))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), require_admin));

    let api_routes = open_routes
        .merge(admin_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
