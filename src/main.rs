use std::{process, sync::Arc};

use nms::{
    application::{
        error::AppError,
        news::NewsService,
    },
    cache::{CacheConfig, L0Store, NewsCache},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState},
        memory::InMemoryRepositories,
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let db = match settings.database.url.as_deref() {
        Some(url) => Some(connect_and_migrate(url, &settings).await?),
        None => {
            warn!(
                target = "nms::serve",
                "no database url configured; serving from in-memory stores"
            );
            None
        }
    };

    let news = Arc::new(build_news_service(db.clone(), &settings));
    let mut state = ApiState::new(news);
    if let Some(db) = db {
        state = state.with_db(db);
    }

    serve_http(&settings, state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let url = settings.database.url.as_deref().ok_or_else(|| {
        AppError::unexpected("`nms migrate` requires database.url to be configured")
    })?;
    connect_and_migrate(url, &settings).await?;
    info!(target = "nms::migrate", "migrations applied");
    Ok(())
}

async fn connect_and_migrate(
    url: &str,
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let pool = PostgresRepositories::connect(url, settings.database.max_connections.get())
        .await
        .map_err(InfraError::from)?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(InfraError::from)?;
    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_news_service(
    db: Option<Arc<PostgresRepositories>>,
    settings: &config::Settings,
) -> NewsService {
    let service = match db {
        Some(db) => NewsService::new(db.clone(), db.clone(), db.clone(), db),
        None => {
            let memory = Arc::new(InMemoryRepositories::new());
            NewsService::new(memory.clone(), memory.clone(), memory.clone(), memory)
        }
    }
    .with_default_comment_limit(settings.paging.default_comment_limit);

    let cache_config = CacheConfig::from(&settings.cache);
    if !cache_config.enabled {
        info!(target = "nms::serve", "news cache disabled");
        return service;
    }
    let cache: Arc<dyn NewsCache> = Arc::new(L0Store::new(&cache_config));
    service.with_cache(cache, cache_config.invalidate_on_write)
}

async fn serve_http(settings: &config::Settings, state: ApiState) -> Result<(), AppError> {
    let router = http::build_router(state);
    let addr = settings.server.addr;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| InfraError::Bind { addr, source })?;
    info!(target = "nms::serve", %addr, "listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(InfraError::from)?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(target = "nms::serve", "shutdown requested");
    }
}
