use chrono::{DateTime, Utc};
use poem_openapi::{ApiResponse, Object, payload::Json, payload::PlainText};

#[derive(Debug, Clone, PartialEq, Object)]
#[oai(rename_all = "camelCase")]
pub struct Manga {
    pub id: String,
    pub title: Option<String>,
    pub alt_titles: Vec<String>,
    pub description: Option<String>,
    pub available_languages: Vec<String>,
    pub is_locked: bool,
    pub original_language: Option<String>,
    pub last_volume: Option<String>,
    pub last_chapter: Option<String>,
    pub year: Option<i32>,
    pub tags: Vec<String>,
    pub state: Option<String>,
    /// Publication status, e.g. "ongoing" or "completed"
    pub status: Option<String>,
    pub content_rating: Option<String>,
    pub publication_demographic: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub latest_uploaded_chapter: Option<String>,
    /// Cover image on the uploads host
    pub cover: String,
}

#[derive(Debug, Clone, PartialEq, Object)]
#[oai(rename_all = "camelCase")]
pub struct MangasViewModel {
    /// At most 20 entries
    pub mangas: Vec<Manga>,
    /// 1-based page number
    pub page: u32,
    /// Remote total divided by the page size, rounded down
    pub total_pages: u32,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Object)]
#[oai(rename_all = "camelCase")]
pub struct MangaChapterViewModel {
    pub manga_id: String,
    pub chapter_id: String,
    /// Page image URLs in reading order
    pub pages: Vec<String>,
    /// 1-based position in the language's chapter list
    pub chapter: u32,
    pub total_chapters: u32,
    pub chapter_title: Option<String>,
    pub volume: Option<String>,
    /// Chapter number as published, e.g. "12.5"
    pub chapter_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Object)]
#[oai(rename_all = "camelCase")]
pub struct AvailableLanguagesVm {
    pub id: String,
    pub languages: Vec<String>,
}

#[derive(ApiResponse)]
pub enum MangasResponse {
    /// One page of search results
    #[oai(status = 200)]
    Ok(Json<MangasViewModel>),

    /// Invalid page or the catalog rejected the query
    #[oai(status = 400)]
    BadRequest(PlainText<String>),

    /// Catalog unreachable or returned garbage
    #[oai(status = 502)]
    BadGateway(PlainText<String>),
}

#[derive(ApiResponse)]
pub enum AboutResponse {
    #[oai(status = 200)]
    Ok(Json<Manga>),

    #[oai(status = 400)]
    BadRequest(PlainText<String>),

    /// No manga with this id
    #[oai(status = 404)]
    NotFound(PlainText<String>),

    #[oai(status = 502)]
    BadGateway(PlainText<String>),
}

#[derive(ApiResponse)]
pub enum AvailableLanguagesResponse {
    #[oai(status = 200)]
    Ok(Json<AvailableLanguagesVm>),

    #[oai(status = 400)]
    BadRequest(PlainText<String>),

    /// No manga with this id
    #[oai(status = 404)]
    NotFound(PlainText<String>),

    #[oai(status = 502)]
    BadGateway(PlainText<String>),
}

#[derive(ApiResponse)]
pub enum ReadResponse {
    /// Pages of the requested chapter
    #[oai(status = 200)]
    Ok(Json<MangaChapterViewModel>),

    /// Chapter below 1 or the catalog rejected the query
    #[oai(status = 400)]
    BadRequest(PlainText<String>),

    /// Unknown manga, or no such chapter in this language
    #[oai(status = 404)]
    NotFound(PlainText<String>),

    #[oai(status = 502)]
    BadGateway(PlainText<String>),
}

#[derive(ApiResponse)]
pub enum StatusResponse {
    /// Catalog reachable
    #[oai(status = 200)]
    Ok(PlainText<String>),

    /// Catalog unreachable
    #[oai(status = 502)]
    BadGateway(PlainText<String>),
}
