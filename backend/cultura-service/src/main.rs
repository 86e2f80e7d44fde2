use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use cultura_service::config::StorageBackend;
use cultura_service::db::{self, CulturaRepository, MemoryCulturaRepository, PgCulturaRepository};
use cultura_service::handlers;
use cultura_service::services::ChatProxy;
use cultura_service::storage::UploadStore;
use cultura_service::{AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let (json_layer, text_layer) = if json {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn build_repository(config: &Config) -> anyhow::Result<Arc<dyn CulturaRepository>> {
    match config.storage {
        StorageBackend::Postgres => {
            let pool = db::create_pool(&config.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
            Ok(Arc::new(PgCulturaRepository::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; posts are lost on restart");
            Ok(Arc::new(MemoryCulturaRepository::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting cultura-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        env = %config.app.env,
        storage = %config.storage,
        upload_dir = %config.uploads.dir.display(),
        "Configuration loaded"
    );

    let repo = build_repository(&config).await?;

    let uploads = UploadStore::new(config.uploads.dir.clone(), config.uploads.max_bytes);
    uploads
        .ensure_root()
        .await
        .context("Failed to create upload directory")?;

    let chat = ChatProxy::new(config.chat.clone()).context("Failed to build chat proxy")?;
    if !chat.is_configured() {
        tracing::warn!("CHAT_API_KEY not set; /api/chat will answer 503");
    }

    let state = web::Data::new(AppState::new(repo, uploads, chat, config.storage));
    let bind_address = config.app.bind_address();
    let allowed_origins = config.cors.allowed_origins.clone();

    tracing::info!("Starting HTTP server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin.is_empty() {
                continue;
            }
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .workers(config.app.workers)
    .run()
    .await?;

    tracing::info!("cultura-service stopped");
    Ok(())
}
