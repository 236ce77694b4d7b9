//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::normalize`.

mod config;

use auth::{NotificationDispatcher, PgAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use platform::aws::{AwsClients, SesEmailSender, SnsTopicPublisher};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,kernel=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.database_url.expose_secret())
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup; errors here should not prevent server startup
    let repo = PgAuthRepository::new(pool.clone());
    if let Err(e) = repo.cleanup_expired().await {
        tracing::warn!(error = %e, "Auth cleanup failed, continuing anyway");
    }

    // AWS clients are built once and injected into the notification worker
    let aws = AwsClients::from_settings(&config.aws).await;
    let email_sender = SesEmailSender::new(aws.ses.clone(), config.ses_from_address.clone());
    let topic_publisher = config
        .sns_topic_arn
        .as_ref()
        .map(|arn| SnsTopicPublisher::new(aws.sns.clone(), arn.clone()));
    if topic_publisher.is_none() {
        tracing::info!("SNS_TOPIC_ARN not set, topic notifications disabled");
    }

    let (notifier, _worker) = NotificationDispatcher::spawn(email_sender, topic_publisher);

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(repo, config.auth_config(), notifier))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
