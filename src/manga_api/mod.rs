pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use poem_openapi::OpenApiService;

pub use routes::MangaDexApi;

use crate::{config::Config, mangadex_client::CatalogApi};

pub fn api_service(
    catalog: Arc<dyn CatalogApi>,
    config: Arc<Config>,
) -> OpenApiService<MangaDexApi, ()> {
    let version = env!("CARGO_PKG_VERSION");
    let server = config.public_url.clone();
    OpenApiService::new(MangaDexApi { catalog, config }, "MangaDex Web API", version).server(server)
}
