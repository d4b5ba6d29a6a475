use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use portfolio_site::{
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    seed::seed_database,
    settings::{AppConfig, StorageBackend},
    shared_repos::SharedRepositories,
    AppState,
};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

async fn build_repositories(config: &AppConfig) -> anyhow::Result<SharedRepositories> {
    match config.storage {
        StorageBackend::Postgres => {
            let pool = create_pool(&config.database_url, config.database_max_connections).await?;
            run_migrations(&pool).await?;
            Ok(SharedRepositories::postgres(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; content is lost on restart");
            Ok(SharedRepositories::in_memory())
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => {
            init_tracing(cfg.is_production());
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            init_tracing(false);
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let repos = match build_repositories(&config).await {
        Ok(repos) => repos,
        Err(e) => {
            tracing::error!("Failed to initialise storage: {:#}", e);
            std::process::exit(1);
        }
    };

    if config.should_seed_on_startup() {
        if let Err(e) = seed_database(&repos, &config).await {
            tracing::error!("Seeding failed: {:#}", e);
            std::process::exit(1);
        }
    }

    let app_state = web::Data::new(AppState::new(&config, repos));
    let cors_origins = config.cors_origins();
    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        storage = %config.storage,
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(AuthMiddleware)
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&cors_origins))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
