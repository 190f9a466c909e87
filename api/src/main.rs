use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use common::{context::Context, logging, signal};
use tokio::{select, signal::unix::SignalKind, time};

mod api;
mod config;
mod database;
mod global;
mod schedule;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::AppConfig::parse()?;
    logging::init(&config.log_level, config.log_json)?;

    tracing::debug!("config: {:#?}", config);

    let db = sqlx::PgPool::connect(&config.database_url).await?;

    sqlx::migrate!().run(&db).await?;

    let created =
        database::User::ensure_admin(&db, &config.admin.username, &config.admin.password).await?;
    if created {
        tracing::info!(username = %config.admin.username, "admin user created");
    } else {
        tracing::info!(username = %config.admin.username, "admin user already exists");
    }

    let (ctx, handler) = Context::new();

    let global = Arc::new(global::GlobalState { config, ctx, db });

    tracing::info!("starting");

    let api_future = tokio::spawn(api::run(global.clone()));

    // Listen on both sigint and sigterm and cancel the context when either is received
    let mut signal_handler = signal::SignalHandler::new()
        .with_signal(SignalKind::interrupt())
        .with_signal(SignalKind::terminate());

    select! {
        r = api_future => tracing::error!("api stopped unexpectedly: {:?}", r),
        _ = signal_handler.recv() => tracing::info!("shutting down"),
    }

    // We cannot have a context in scope when we cancel the handler, otherwise it will deadlock.
    drop(global);

    tracing::info!("waiting for tasks to finish");

    select! {
        _ = time::sleep(Duration::from_secs(60)) => tracing::warn!("force shutting down"),
        _ = signal_handler.recv() => tracing::warn!("force shutting down"),
        _ = handler.cancel() => tracing::info!("shutting down"),
    }

    Ok(())
}
