pub mod error;
#[cfg(test)]
pub mod fake;
pub mod filter;
pub mod models;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::config::Config;
pub use error::{CatalogError, CatalogResult, RemoteError};
use filter::{FeedFilter, MangaFilter};
use models::{
    AtHomeServerResponse, ChapterData, ChapterDetail, ChapterEntityResponse, ChapterFeedResponse,
    Envelope, MangaData, MangaEntityResponse, MangaListResponse, PageQuality,
};

/// Everything the API layer needs from the manga catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One page (1-based) of the catalog search.
    async fn list_mangas(&self, query: Option<&str>, page: u32)
    -> CatalogResult<MangaListResponse>;

    /// A manga with its cover art relationship expanded.
    async fn get_manga(&self, id: &str) -> CatalogResult<MangaData>;

    async fn get_available_languages(&self, id: &str) -> CatalogResult<Vec<String>>;

    /// Every chapter of `manga_id` translated to `language`, in reading order.
    async fn get_chapter_feed(
        &self,
        manga_id: &str,
        language: &str,
    ) -> CatalogResult<Vec<ChapterData>>;

    async fn get_chapter_pages(
        &self,
        chapter_id: &str,
        quality: PageQuality,
    ) -> CatalogResult<Vec<String>>;

    async fn get_chapter_detail(&self, chapter_id: &str) -> CatalogResult<ChapterDetail>;

    async fn ping(&self) -> CatalogResult<String>;
}

#[derive(Clone, Debug)]
pub struct MangaDexClient {
    base_url: String,
    client: reqwest::Client,
}

impl MangaDexClient {
    /// Create a client for the given API root (e.g. "https://api.mangadex.org").
    #[cfg(test)]
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        Self::from_config(&Config {
            mangadex_api_url: base_url.into(),
            ..Config::default()
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        // MangaDex rejects requests without a genuine User-Agent
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;
        tracing::debug!(base_url = %config.mangadex_api_url, timeout = ?config.request_timeout, "creating MangaDexClient");
        Ok(MangaDexClient {
            base_url: config.mangadex_api_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// GET a JSON document, translating the MangaDex error envelope.
    /// `lookup_id` names the entity a 404 refers to.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        lookup_id: Option<&str>,
    ) -> CatalogResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, ?query, "GET");
        let resp = self.client.get(&url).query(query).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        let envelope = serde_json::from_str::<Envelope>(&body).ok();
        let not_found = status == StatusCode::NOT_FOUND
            || envelope
                .as_ref()
                .is_some_and(|e| e.errors.iter().any(|err| err.status == Some(404)));
        if let Some(id) = lookup_id
            && not_found
        {
            return Err(CatalogError::NotFound { id: id.to_string() });
        }
        if let Some(envelope) = envelope
            && envelope.is_error()
        {
            // 5xx and rate limiting are upstream faults even when enveloped
            let fault = envelope
                .errors
                .iter()
                .filter_map(|err| err.status)
                .find(|s| *s >= 500 || *s == StatusCode::TOO_MANY_REQUESTS.as_u16());
            if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                return Err(CatalogError::UnexpectedStatus {
                    status: status.as_u16(),
                });
            }
            if let Some(fault) = fault {
                return Err(CatalogError::UnexpectedStatus { status: fault });
            }
            return Err(CatalogError::RemoteQuery {
                errors: envelope.errors,
            });
        }
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                let snippet_len = body.len().min(2000);
                let snippet = body.get(..snippet_len).unwrap_or_default();
                tracing::error!(error = %e, %url, body_snippet = %snippet, "failed to parse MangaDex response");
                Err(e.into())
            }
        }
    }

    /// GET /manga
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_manga_list(&self, filter: &MangaFilter) -> CatalogResult<MangaListResponse> {
        self.get_json("/manga", &filter.to_query(), None).await
    }

    /// GET /manga/{id}?includes[]=cover_art
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_manga(&self, id: &str) -> CatalogResult<MangaData> {
        let query = [("includes[]".to_string(), "cover_art".to_string())];
        let resp: MangaEntityResponse = self
            .get_json(&format!("/manga/{}", id), &query, Some(id))
            .await?;
        Ok(resp.data)
    }

    /// GET /manga/{id}/feed
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_feed_page(
        &self,
        manga_id: &str,
        filter: &FeedFilter,
    ) -> CatalogResult<ChapterFeedResponse> {
        self.get_json(
            &format!("/manga/{}/feed", manga_id),
            &filter.to_query(),
            Some(manga_id),
        )
        .await
    }

    /// GET /chapter/{id}
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_chapter(&self, chapter_id: &str) -> CatalogResult<ChapterData> {
        let resp: ChapterEntityResponse = self
            .get_json(&format!("/chapter/{}", chapter_id), &[], Some(chapter_id))
            .await?;
        Ok(resp.data)
    }

    /// GET /at-home/server/{chapterId}
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_at_home_server(
        &self,
        chapter_id: &str,
    ) -> CatalogResult<AtHomeServerResponse> {
        self.get_json(
            &format!("/at-home/server/{}", chapter_id),
            &[],
            Some(chapter_id),
        )
        .await
    }
}

#[async_trait]
impl CatalogApi for MangaDexClient {
    async fn list_mangas(
        &self,
        query: Option<&str>,
        page: u32,
    ) -> CatalogResult<MangaListResponse> {
        self.fetch_manga_list(&MangaFilter::search(query, page)).await
    }

    async fn get_manga(&self, id: &str) -> CatalogResult<MangaData> {
        self.fetch_manga(id).await
    }

    async fn get_available_languages(&self, id: &str) -> CatalogResult<Vec<String>> {
        let resp: MangaEntityResponse = self
            .get_json(&format!("/manga/{}", id), &[], Some(id))
            .await?;
        Ok(resp.data.available_languages())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_chapter_feed(
        &self,
        manga_id: &str,
        language: &str,
    ) -> CatalogResult<Vec<ChapterData>> {
        let mut filter = FeedFilter::for_language(language);
        let mut chapters: Vec<ChapterData> = Vec::new();
        loop {
            let page = self.fetch_feed_page(manga_id, &filter).await?;
            let received = page.data.len() as u32;
            chapters.extend(page.data);
            filter.offset += received;
            if received == 0 || filter.offset >= page.total {
                break;
            }
        }
        tracing::debug!(%manga_id, %language, count = chapters.len(), "fetched chapter feed");

        let mut chapters: Vec<ChapterData> = chapters
            .into_iter()
            .filter(|c| c.translated_language() == Some(language))
            .collect();
        chapters.sort_by(|a, b| a.reading_position().compare(&b.reading_position()));
        Ok(chapters)
    }

    async fn get_chapter_pages(
        &self,
        chapter_id: &str,
        quality: PageQuality,
    ) -> CatalogResult<Vec<String>> {
        Ok(self
            .fetch_at_home_server(chapter_id)
            .await?
            .page_urls(quality))
    }

    async fn get_chapter_detail(&self, chapter_id: &str) -> CatalogResult<ChapterDetail> {
        Ok(self.fetch_chapter(chapter_id).await?.into())
    }

    /// GET /ping (plain text "pong")
    #[tracing::instrument(level = "debug", skip(self))]
    async fn ping(&self) -> CatalogResult<String> {
        let resp = self.client.get(self.url("/ping")).send().await?;
        let body = resp.error_for_status()?.text().await?;
        Ok(body.trim().to_string())
    }
}
