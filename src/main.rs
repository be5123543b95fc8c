use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingora::{config::Config, handlers, state::AppState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lingora=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::load();

  // Startup self-check: a broken range table must never serve requests
  let catalog = config.catalog().expect("Lesson range table failed validation");
  for range in catalog.languages() {
    tracing::info!(
      "Language {}: lessons {}-{} ({} tiers)",
      range.code,
      range.start_id,
      range.end_id,
      range.tiers.len()
    );
  }

  if !config.content_dir.is_dir() {
    tracing::warn!("Content directory {} does not exist", config.content_dir.display());
  }
  tracing::info!("Serving lessons from {}", config.content_dir.display());

  let state = AppState::new(catalog, config.content_dir.clone());
  let app = handlers::router(state, &config.static_dir);

  let bind_addr = config.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", config.port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
