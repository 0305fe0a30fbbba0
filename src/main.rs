//! Wardrobe backend entrypoint.
//!
//! Wires configuration, the Postgres pool, object storage, and the HTTP
//! router together, then serves until shut down.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wardrobe::adapters::auth::DbSessionValidator;
use wardrobe::adapters::http::middleware::AuthState;
use wardrobe::adapters::http::{api_router, PostHandlers, UserHandlers};
use wardrobe::adapters::postgres::{
    connect_pool, PostgresAuthStore, PostgresPostRepository, PostgresUserRepository,
};
use wardrobe::adapters::s3::S3ImageStore;
use wardrobe::application::handlers::post::{
    CreatePostHandler, DeletePostHandler, ListPostsHandler,
};
use wardrobe::application::handlers::user::{
    DeleteImageHandler, EditProfileHandler, GetMeHandler, GetProfileHandler,
    ProfileExistsHandler, SetImageHandler,
};
use wardrobe::application::ImageCleanup;
use wardrobe::config::AppConfig;
use wardrobe::ports::{AuthStore, ImageStore, PostRepository, UserRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting wardrobe v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {:?}", config.server.environment);

    // Infrastructure
    let pool = connect_pool(&config.database).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        "Database pool ready"
    );

    let image_store: Arc<dyn ImageStore> =
        Arc::new(S3ImageStore::from_config(&config.storage).await);
    let cleanup = ImageCleanup::new(Arc::clone(&image_store));

    let auth_store: Arc<dyn AuthStore> = Arc::new(PostgresAuthStore::new(pool.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(pool));

    // Application handlers
    let post_handlers = PostHandlers::new(
        Arc::new(CreatePostHandler::new(
            Arc::clone(&posts),
            Arc::clone(&image_store),
        )),
        Arc::new(DeletePostHandler::new(Arc::clone(&posts), cleanup.clone())),
        Arc::new(ListPostsHandler::new(posts)),
    );

    let user_handlers = UserHandlers::new(
        Arc::new(GetMeHandler::new(Arc::clone(&users))),
        Arc::new(EditProfileHandler::new(Arc::clone(&users))),
        Arc::new(GetProfileHandler::new(Arc::clone(&users))),
        Arc::new(ProfileExistsHandler::new(Arc::clone(&users))),
        Arc::new(SetImageHandler::new(
            Arc::clone(&users),
            image_store,
            cleanup.clone(),
        )),
        Arc::new(DeleteImageHandler::new(users, cleanup)),
    );

    let validator: AuthState = Arc::new(DbSessionValidator::new(auth_store));

    // Router + middleware
    let cors = build_cors(&config.server.cors_origins_list())?;
    let app = api_router(post_handlers, user_handlers, validator)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(origins: &[String]) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    if origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let parsed: Result<Vec<HeaderValue>, _> =
        origins.iter().map(|o| o.parse::<HeaderValue>()).collect();

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed?))
        .allow_methods(Any)
        .allow_headers(Any))
}
