use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postboard::{
  adapters::http::{AppServices, RequestIdMiddleware, configure_api_routes, configure_health_route},
  domain::post::PostServiceConfig,
  infrastructure::{
    config::{Config, DatabaseConfig},
    persistence::{
      memory::{InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository},
      postgres::{PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository},
    },
    security::{Argon2PasswordHasher, JwtTokenIssuer},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "postboard=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting postboard");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  let password_hasher = Arc::new(Argon2PasswordHasher::new()?);
  let token_issuer = Arc::new(JwtTokenIssuer::new(
    &config.security.token_secret,
    config.security.token_ttl_seconds,
  ));
  let post_config = PostServiceConfig {
    posts_per_page: config.posts.per_page,
  };

  let services = match config.database.url.as_deref() {
    Some(url) => {
      let pool = connect_database(url, &config.database).await?;
      AppServices::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(PostgresPostRepository::new(pool.clone())),
        Arc::new(PostgresCommentRepository::new(pool)),
        password_hasher,
        token_issuer,
        post_config,
      )
    }
    None => {
      tracing::warn!("No database URL configured, using in-memory stores");
      AppServices::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(InMemoryCommentRepository::new()),
        password_hasher,
        token_issuer,
        post_config,
      )
    }
  };

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware)
      .service(web::scope("/api/v1").configure(|cfg| configure_api_routes(cfg, services.clone())))
      .configure(configure_health_route)
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}

/// Connects the pool with a hard timeout and runs pending migrations
async fn connect_database(url: &str, settings: &DatabaseConfig) -> anyhow::Result<sqlx::PgPool> {
  tracing::info!("Connecting to database");

  let pool = tokio::time::timeout(
    Duration::from_secs(settings.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(settings.max_connections)
      .acquire_timeout(Duration::from_secs(settings.acquire_timeout_seconds))
      .connect(url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      settings.connect_timeout_seconds
    );
    anyhow::anyhow!(
      "Database connection timed out after {} seconds",
      settings.connect_timeout_seconds
    )
  })?
  .context("Failed to connect to database")?;

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  Ok(pool)
}
