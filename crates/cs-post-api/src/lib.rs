use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{middleware, Json, Router};
use cs_core::auth::JwtConfig;
use cs_core::db::DbConfig;
use cs_core::{config, db, http, logging, metrics, server};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod shared;

#[cfg(test)]
mod test_support;

use application::ports::{
    DocumentStore, FriendshipOracle, LikeRepository, NoFriendships, PostRepository,
    SaveRepository, StorageHealth,
};
use application::services::{
    DocumentService, LikeService, PostService, SaveService, VisibilityPolicy,
};
use domain::CanonicalTagNormalizer;
use infrastructure::PgStore;
use presentation::handlers::{documents, posts, reactions, users};

pub(crate) const SERVICE_NAME: &str = "cs-post-api";

#[derive(Clone)]
pub struct AppState {
    pub(crate) posts: Arc<PostService>,
    pub(crate) likes: Arc<LikeService>,
    pub(crate) saves: Arc<SaveService>,
    pub(crate) documents: Arc<DocumentService>,
    pub(crate) health: Arc<dyn StorageHealth>,
    pub(crate) jwt_config: JwtConfig,
    pub(crate) cookie_name: String,
}

impl AppState {
    /// Wires every service onto one store that implements all storage ports.
    pub fn from_store<S>(
        store: Arc<S>,
        friendship: Arc<dyn FriendshipOracle>,
        jwt_config: JwtConfig,
        cookie_name: impl Into<String>,
    ) -> Self
    where
        S: PostRepository + LikeRepository + SaveRepository + DocumentStore + StorageHealth + 'static,
    {
        let posts = PostService::new(
            Arc::clone(&store) as Arc<dyn PostRepository>,
            VisibilityPolicy::new(friendship),
            Arc::new(CanonicalTagNormalizer),
        );
        Self {
            posts: Arc::new(posts),
            likes: Arc::new(LikeService::new(
                Arc::clone(&store) as Arc<dyn LikeRepository>
            )),
            saves: Arc::new(SaveService::new(
                Arc::clone(&store) as Arc<dyn SaveRepository>
            )),
            documents: Arc::new(DocumentService::new(
                Arc::clone(&store) as Arc<dyn DocumentStore>
            )),
            health: store as Arc<dyn StorageHealth>,
            jwt_config,
            cookie_name: cookie_name.into(),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub(crate) struct HealthStatus {
    status: String,
}

pub struct PostApiConfig {
    pub addr: SocketAddr,
    pub db: DbConfig,
    pub request_timeout: Duration,
    pub jwt_config: JwtConfig,
    pub cookie_name: String,
}

pub fn load_config() -> Result<PostApiConfig> {
    let addr = config::socket_addr_from_env("POST_API_ADDR", "0.0.0.0:8080")?;
    let db = DbConfig::from_env(10)?;
    let request_timeout_seconds = config::parse_env_or("REQUEST_TIMEOUT_SECONDS", 60u64)?;
    let jwt_config = load_jwt_config()?;
    let cookie_name = config::optional_env("AUTH_COOKIE_NAME", "access_token");

    Ok(PostApiConfig {
        addr,
        db,
        request_timeout: Duration::from_secs(request_timeout_seconds),
        jwt_config,
        cookie_name,
    })
}

/// Token settings shared by the service and the `cs token` command.
pub fn load_jwt_config() -> Result<JwtConfig> {
    Ok(JwtConfig {
        issuer: config::optional_env("JWT_ISSUER", "chaladshare"),
        audience: config::optional_env("JWT_AUDIENCE", "chaladshare-api"),
        secret: config::required_env("JWT_SECRET")?,
        ttl_seconds: config::parse_env_or("JWT_TTL_SECONDS", 3600u64)?,
    })
}

pub async fn run(config: PostApiConfig) -> Result<()> {
    logging::init(SERVICE_NAME);
    metrics::init(SERVICE_NAME);

    let pool = db::connect(&config.db).await?;
    let store = Arc::new(PgStore::new(pool));
    let state = AppState::from_store(
        store,
        Arc::new(NoFriendships),
        config.jwt_config,
        config.cookie_name,
    );

    let router = build_router(state, config.request_timeout);
    server::serve(config.addr, router).await
}

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let protected = Router::new()
        .route("/v1/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/v1/posts/:id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/v1/posts/:id/like",
            post(reactions::like_post).delete(reactions::unlike_post),
        )
        .route(
            "/v1/posts/:id/save",
            post(reactions::save_post).delete(reactions::unsave_post),
        )
        .route("/v1/users/:id/post-count", get(users::post_count))
        .route(
            "/v1/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route("/v1/documents/:id", delete(documents::delete_document))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            presentation::require_principal,
        ));

    let router = Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics_endpoint))
        .route("/v1/openapi.json", get(openapi_json))
        .merge(protected)
        .with_state(state);

    http::apply_standard_layers(router, SERVICE_NAME, request_timeout)
}

async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    match state.health.check_ready().await {
        Ok(_) => (StatusCode::OK, Json(HealthStatus { status: "ok".into() })),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthStatus {
                status: "unavailable".into(),
            }),
        ),
    }
}

async fn metrics_endpoint() -> impl IntoResponse {
    metrics::metrics_response(SERVICE_NAME)
}

async fn openapi_json() -> impl IntoResponse {
    Json(presentation::openapi::document())
}
