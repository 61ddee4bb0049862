mod config;
mod domain;
mod error;
mod manga_api;
mod mangadex_client;

use std::{path::Path, sync::Arc};

use anyhow::Context;
use config::Config;
use mangadex_client::{CatalogApi, MangaDexClient};
use poem::{
    EndpointExt, Route, Server,
    listener::TcpListener,
    middleware::{Cors, Tracing as PoemTracing},
};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder, prelude::*};

type AppResult<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Respect RUST_LOG if set, default to info for our crate and warn for deps.
    let default_filter = format!(
        "{}=info,poem=info,reqwest=warn,h2=warn",
        env!("CARGO_PKG_NAME")
    );
    let env_filter = std::env::var("RUST_LOG").unwrap_or(default_filter);
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .with_level(true)
        .pretty()
        .finish()
        .with(ErrorLayer::default())
        .init();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting MangaDex Web API"
    );
    // Load environment variables from .env files
    if Path::new(".env.local").exists() {
        dotenvy::from_filename(".env.local")?;
    } else if Path::new(".env").exists() {
        dotenvy::from_filename(".env")?;
    };
    let config = Config::load().with_context(|| "Failed to load configuration")?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client =
        MangaDexClient::from_config(&config).with_context(|| "Failed to build MangaDex client")?;
    tracing::info!(
        api = %config.mangadex_api_url,
        uploads = %config.uploads_base_url,
        timeout = ?config.request_timeout,
        languages = ?config.preferred_languages,
        "configured MangaDex client"
    );

    run_poem(Arc::new(client), Arc::new(config)).await?;
    Ok(())
}

pub async fn run_poem(catalog: Arc<dyn CatalogApi>, config: Arc<Config>) -> AppResult<()> {
    let bind_addr = config.bind_addr.clone();
    let api_service = manga_api::api_service(catalog, config);
    let ui = api_service.rapidoc();
    let spec = api_service.spec();
    let route = Route::new()
        .nest("/", api_service)
        .nest("/ui", ui)
        .nest("/spec", poem::endpoint::make_sync(move |_| spec.clone()))
        .with(Cors::new())
        .with(PoemTracing);

    tracing::info!(%bind_addr, "starting HTTP server");
    Server::new(TcpListener::bind(bind_addr)).run(route).await?;
    Ok(())
}
