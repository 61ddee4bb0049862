// In-memory catalog for exercising the API layer without a network

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use super::models::{
    ChapterData, ChapterDetail, MangaData, MangaListResponse, PageQuality,
};
use super::{CatalogApi, CatalogError, CatalogResult, RemoteError};

/// In-memory catalog that records the calls it receives.
#[derive(Default)]
pub struct FakeCatalog {
    pub mangas: Vec<MangaData>,
    pub total: u32,
    pub search_errors: Vec<RemoteError>,
    pub feed: Vec<ChapterData>,
    pub pages: HashMap<String, Vec<String>>,
    pub details: HashMap<String, ChapterDetail>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_mangas(
        &self,
        query: Option<&str>,
        page: u32,
    ) -> CatalogResult<MangaListResponse> {
        self.record(format!("list:{}:{}", query.unwrap_or(""), page));
        if !self.search_errors.is_empty() {
            return Err(CatalogError::RemoteQuery {
                errors: self.search_errors.clone(),
            });
        }
        Ok(MangaListResponse {
            data: self.mangas.clone(),
            total: self.total,
        })
    }

    async fn get_manga(&self, id: &str) -> CatalogResult<MangaData> {
        self.record(format!("manga:{}", id));
        self.mangas
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    async fn get_available_languages(&self, id: &str) -> CatalogResult<Vec<String>> {
        Ok(self.get_manga(id).await?.available_languages())
    }

    async fn get_chapter_feed(
        &self,
        manga_id: &str,
        language: &str,
    ) -> CatalogResult<Vec<ChapterData>> {
        self.record(format!("feed:{}:{}", manga_id, language));
        Ok(self
            .feed
            .iter()
            .filter(|c| c.translated_language() == Some(language))
            .cloned()
            .collect())
    }

    async fn get_chapter_pages(
        &self,
        chapter_id: &str,
        quality: PageQuality,
    ) -> CatalogResult<Vec<String>> {
        self.record(format!("pages:{}:{:?}", chapter_id, quality));
        Ok(self.pages.get(chapter_id).cloned().unwrap_or_default())
    }

    async fn get_chapter_detail(&self, chapter_id: &str) -> CatalogResult<ChapterDetail> {
        self.record(format!("detail:{}", chapter_id));
        self.details
            .get(chapter_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                id: chapter_id.to_string(),
            })
    }

    async fn ping(&self) -> CatalogResult<String> {
        Ok("pong".into())
    }
}

pub fn manga(id: &str, title: &str, cover: Option<&str>) -> MangaData {
    let relationships = match cover {
        Some(file) => json!([{ "id": "cover", "type": "cover_art", "attributes": { "fileName": file } }]),
        None => json!([]),
    };
    serde_json::from_value(json!({
        "id": id,
        "attributes": { "title": { "en": title }, "availableTranslatedLanguages": ["en", "ja"] },
        "relationships": relationships
    }))
    .unwrap()
}

pub fn chapter(id: &str, volume: &str, number: &str, language: &str) -> ChapterData {
    serde_json::from_value(json!({
        "id": id,
        "attributes": { "volume": volume, "chapter": number, "translatedLanguage": language }
    }))
    .unwrap()
}

/// Feed `[c1(v1, ch1), c2(v1, ch2)]` in English plus one French chapter.
pub fn reading_catalog() -> FakeCatalog {
    FakeCatalog {
        mangas: vec![manga("m1", "Frieren", Some("f.jpg"))],
        total: 1,
        feed: vec![
            chapter("c1", "1", "1", "en"),
            chapter("c2", "1", "2", "en"),
            chapter("f1", "1", "1", "fr"),
        ],
        pages: HashMap::from([
            ("c1".to_string(), vec!["https://n/data/h/1.png".to_string(), "https://n/data/h/2.png".to_string()]),
            ("c2".to_string(), vec!["https://n/data/h2/1.png".to_string()]),
        ]),
        details: HashMap::from([
            (
                "c1".to_string(),
                ChapterDetail {
                    volume: Some("1".into()),
                    title: Some("The Journey's End".into()),
                    chapter: Some("1".into()),
                },
            ),
            ("c2".to_string(), ChapterDetail::default()),
        ]),
        ..FakeCatalog::default()
    }
}
