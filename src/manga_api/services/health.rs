use poem_openapi::payload::PlainText;

use crate::{manga_api::models::StatusResponse, mangadex_client::CatalogApi};

pub struct HealthService<'a> {
    pub catalog: &'a dyn CatalogApi,
}

impl<'a> HealthService<'a> {
    pub fn new(catalog: &'a dyn CatalogApi) -> Self {
        Self { catalog }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn status(&self) -> StatusResponse {
        match self.catalog.ping().await {
            Ok(reply) => StatusResponse::Ok(PlainText(format!(
                "{} {} catalog={}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                reply
            ))),
            Err(e) => {
                tracing::error!(error = %format!("{:?}", e), "catalog ping failed");
                StatusResponse::BadGateway(PlainText(format!("catalog unreachable: {}", e)))
            }
        }
    }
}
