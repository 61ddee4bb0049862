use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::Query,
    payload::{Json, PlainText},
};

use super::models::{
    AboutResponse, AvailableLanguagesResponse, MangasResponse, ReadResponse, StatusResponse,
};
use super::services::{health::HealthService, manga::MangaService};
use crate::{
    config::Config,
    error::{ApiError, ErrorKind},
    mangadex_client::{CatalogApi, models::PageQuality},
};

const SEARCH_FAILED: &str = "While searching for this request an error happened";
const UNEXPECTED: &str = "An unexpected error occurred.";

pub struct MangaDexApi {
    pub catalog: Arc<dyn CatalogApi>,
    pub config: Arc<Config>,
}

impl MangaDexApi {
    fn manga_service(&self) -> MangaService<'_> {
        MangaService::new(self.catalog.as_ref(), &self.config)
    }
}

#[OpenApi]
impl MangaDexApi {
    /// Search the catalog, 20 manga per page
    #[oai(path = "/api/Mangas", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn mangas(
        &self,
        /// Page number starting at 1 (default 1)
        Query(page): Query<Option<i64>>,
        /// Title to search for
        Query(search): Query<Option<String>>,
    ) -> MangasResponse {
        match self
            .manga_service()
            .find_mangas(search.as_deref(), page.unwrap_or(1))
            .await
        {
            Ok(vm) => MangasResponse::Ok(Json(vm)),
            Err(e) => {
                e.log("search");
                e.into()
            }
        }
    }

    /// Languages the manga has translated chapters in
    #[oai(path = "/api/Manga/AvailableLanguages", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn available_languages(&self, Query(id): Query<String>) -> AvailableLanguagesResponse {
        match self.manga_service().get_available_languages(&id).await {
            Ok(vm) => AvailableLanguagesResponse::Ok(Json(vm)),
            Err(e) => {
                e.log("available_languages");
                e.into()
            }
        }
    }

    /// Metadata of a single manga
    #[oai(path = "/api/Manga/About", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn about(&self, Query(id): Query<String>) -> AboutResponse {
        match self.manga_service().get_by_id(&id).await {
            Ok(manga) => AboutResponse::Ok(Json(manga)),
            Err(e) => {
                e.log("about");
                e.into()
            }
        }
    }

    /// Page images of one chapter
    #[oai(path = "/api/Manga/Read", method = "get")]
    #[tracing::instrument(level = "debug", skip(self, data_saver))]
    async fn read(
        &self,
        /// Manga id
        Query(id): Query<String>,
        /// Position in the language's chapter list, starting at 1 (default 1)
        Query(chapter): Query<Option<i64>>,
        /// Translation language code (default "en")
        Query(language): Query<Option<String>>,
        /// Link the compressed image set instead of the originals
        #[oai(name = "dataSaver")]
        data_saver: Query<Option<bool>>,
    ) -> ReadResponse {
        let language = language.unwrap_or_else(|| "en".to_string());
        let quality = if data_saver.0.unwrap_or(false) {
            PageQuality::DataSaver
        } else {
            PageQuality::Original
        };
        match self
            .manga_service()
            .read(&id, chapter.unwrap_or(1), &language, quality)
            .await
        {
            Ok(vm) => ReadResponse::Ok(Json(vm)),
            Err(e) => {
                e.log("read");
                e.into()
            }
        }
    }

    /// Checks that the manga catalog answers
    #[oai(path = "/api/status", method = "get")]
    #[tracing::instrument(level = "debug", skip(self))]
    async fn status(&self) -> StatusResponse {
        HealthService::new(self.catalog.as_ref()).status().await
    }
}

impl From<ApiError> for MangasResponse {
    fn from(err: ApiError) -> Self {
        let message = PlainText(err.public_message(SEARCH_FAILED));
        match err.kind() {
            ErrorKind::BadGateway => MangasResponse::BadGateway(message),
            ErrorKind::BadRequest | ErrorKind::NotFound => MangasResponse::BadRequest(message),
        }
    }
}

impl From<ApiError> for AboutResponse {
    fn from(err: ApiError) -> Self {
        let message = PlainText(err.public_message(UNEXPECTED));
        match err.kind() {
            ErrorKind::BadRequest => AboutResponse::BadRequest(message),
            ErrorKind::NotFound => AboutResponse::NotFound(message),
            ErrorKind::BadGateway => AboutResponse::BadGateway(message),
        }
    }
}

impl From<ApiError> for AvailableLanguagesResponse {
    fn from(err: ApiError) -> Self {
        let message = PlainText(err.public_message(UNEXPECTED));
        match err.kind() {
            ErrorKind::BadRequest => AvailableLanguagesResponse::BadRequest(message),
            ErrorKind::NotFound => AvailableLanguagesResponse::NotFound(message),
            ErrorKind::BadGateway => AvailableLanguagesResponse::BadGateway(message),
        }
    }
}

impl From<ApiError> for ReadResponse {
    fn from(err: ApiError) -> Self {
        let message = PlainText(err.public_message(UNEXPECTED));
        match err.kind() {
            ErrorKind::BadRequest => ReadResponse::BadRequest(message),
            ErrorKind::NotFound => ReadResponse::NotFound(message),
            ErrorKind::BadGateway => ReadResponse::BadGateway(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use poem::Route;
    use poem::http::StatusCode;
    use poem::test::{TestClient, TestResponse};

    use super::*;
    use crate::manga_api::api_service;
    use crate::mangadex_client::RemoteError;
    use crate::mangadex_client::fake::{FakeCatalog, manga, reading_catalog};

    fn client(catalog: FakeCatalog) -> TestClient<Route> {
        let service = api_service(Arc::new(catalog), Arc::new(Config::default()));
        TestClient::new(Route::new().nest("/", service))
    }

    async fn body_json(resp: TestResponse) -> serde_json::Value {
        resp.0.into_body().into_json().await.unwrap()
    }

    #[tokio::test]
    async fn search_returns_page_and_camel_case_fields() {
        let cli = client(FakeCatalog {
            mangas: vec![manga("abc", "Naruto", Some("x.jpg"))],
            total: 45,
            ..FakeCatalog::default()
        });

        let resp = cli
            .get("/api/Mangas")
            .query("search", &"naruto")
            .query("page", &2)
            .send()
            .await;
        resp.assert_status_is_ok();

        let body = body_json(resp).await;
        assert_eq!(body["page"], 2);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["search"], "naruto");
        assert_eq!(body["mangas"][0]["id"], "abc");
        assert_eq!(body["mangas"][0]["title"], "Naruto");
        assert_eq!(
            body["mangas"][0]["cover"],
            "https://uploads.mangadex.org/covers/abc/x.jpg"
        );
    }

    #[tokio::test]
    async fn search_defaults_to_first_page() {
        let cli = client(FakeCatalog::default());
        let resp = cli.get("/api/Mangas").send().await;
        resp.assert_status_is_ok();
        let body = body_json(resp).await;
        assert_eq!(body["page"], 1);
        assert_eq!(body["mangas"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn remote_errors_become_one_generic_bad_request() {
        let error = |detail: &str| RemoteError {
            id: None,
            status: Some(400),
            title: "validation_exception".into(),
            detail: Some(detail.into()),
        };
        let cli = client(FakeCatalog {
            search_errors: vec![error("first detail"), error("second detail")],
            ..FakeCatalog::default()
        });

        let resp = cli.get("/api/Mangas").query("search", &"x").send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.assert_text(SEARCH_FAILED).await;
    }

    #[tokio::test]
    async fn search_rejects_page_zero() {
        let cli = client(FakeCatalog::default());
        let resp = cli.get("/api/Mangas").query("page", &0).send().await;
        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn about_distinguishes_not_found() {
        let cli = client(reading_catalog());

        let resp = cli.get("/api/Manga/About").query("id", &"m1").send().await;
        resp.assert_status_is_ok();
        let body = body_json(resp).await;
        assert_eq!(body["title"], "Frieren");
        assert_eq!(body["isLocked"], false);

        let resp = cli.get("/api/Manga/About").query("id", &"nope").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn available_languages_echoes_id() {
        let cli = client(reading_catalog());
        let resp = cli
            .get("/api/Manga/AvailableLanguages")
            .query("id", &"m1")
            .send()
            .await;
        resp.assert_status_is_ok();
        let body = body_json(resp).await;
        assert_eq!(body["id"], "m1");
        assert_eq!(body["languages"], serde_json::json!(["en", "ja"]));
    }

    #[tokio::test]
    async fn read_defaults_to_first_english_chapter() {
        let cli = client(reading_catalog());
        let resp = cli.get("/api/Manga/Read").query("id", &"m1").send().await;
        resp.assert_status_is_ok();

        let body = body_json(resp).await;
        assert_eq!(body["mangaId"], "m1");
        assert_eq!(body["chapterId"], "c1");
        assert_eq!(body["chapter"], 1);
        assert_eq!(body["totalChapters"], 2);
        assert_eq!(body["chapterTitle"], "The Journey's End");
        assert_eq!(body["volume"], "1");
        assert_eq!(
            body["pages"],
            serde_json::json!(["https://n/data/h/1.png", "https://n/data/h/2.png"])
        );
    }

    #[tokio::test]
    async fn read_maps_chapter_errors() {
        let cli = client(reading_catalog());

        let resp = cli
            .get("/api/Manga/Read")
            .query("id", &"m1")
            .query("chapter", &0)
            .send()
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);

        let resp = cli
            .get("/api/Manga/Read")
            .query("id", &"m1")
            .query("chapter", &3)
            .send()
            .await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn status_reports_catalog_reply() {
        let cli = client(FakeCatalog::default());
        let resp = cli.get("/api/status").send().await;
        resp.assert_status_is_ok();
    }
}
