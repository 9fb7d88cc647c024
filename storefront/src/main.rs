// storefront/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use storefront::config::{AppConfig, LogFormat};
use storefront::state::AppState;
use storefront::storage::{self, seed};
use storefront::web::configure_app_routes;

fn init_tracing(format: LogFormat) {
  // RUST_LOG overrides the default level.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration
  match format {
    LogFormat::Pretty => builder.init(),
    LogFormat::Json => builder.json().init(),
  }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      eprintln!("Configuration error: {}", e);
      std::process::exit(1);
    }
  };
  init_tracing(app_config.log_format);
  tracing::info!("Starting storefront server...");

  let storage = match storage::connect(&app_config).await {
    Ok(storage) => storage,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialize storage.");
      std::process::exit(1);
    }
  };

  if app_config.seed_db {
    if let Err(e) = seed::seed_catalog(storage.as_ref()).await {
      tracing::error!(error = %e, "Failed to seed catalog.");
      std::process::exit(1);
    }
  }

  let server_address = app_config.bind_address();
  let app_state = AppState::new(storage, app_config);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
