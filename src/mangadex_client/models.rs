// MangaDex response DTOs. Only the fields the API layer reads are modelled.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::RemoteError;
use crate::domain::models::{LocalizedText, ReadingPosition};

/// Any MangaDex body, read only far enough to tell an error envelope apart.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub errors: Vec<RemoteError>,
}

impl Envelope {
    pub fn is_error(&self) -> bool {
        self.result.as_deref() == Some("error") || !self.errors.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct MangaListResponse {
    #[serde(default)]
    pub data: Vec<MangaData>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub struct MangaEntityResponse {
    pub data: MangaData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MangaData {
    pub id: String,
    #[serde(default)]
    pub attributes: Option<MangaAttributes>,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub relationships: Vec<Relationship>,
}

impl MangaData {
    /// File name of the first expanded `cover_art` relationship, if any.
    pub fn cover_file_name(&self) -> Option<&str> {
        self.relationships
            .iter()
            .filter(|r| r.kind == "cover_art")
            .find_map(|r| r.attributes.as_ref()?.file_name.as_deref())
    }

    pub fn available_languages(&self) -> Vec<String> {
        self.attributes
            .as_ref()
            .map(|a| a.available_translated_languages.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MangaAttributes {
    pub title: LocalizedText,
    #[serde(deserialize_with = "de::null_as_default")]
    pub alt_titles: Vec<LocalizedText>,
    pub description: LocalizedText,
    #[serde(deserialize_with = "de::null_as_default")]
    pub is_locked: bool,
    pub original_language: Option<String>,
    pub last_volume: Option<String>,
    pub last_chapter: Option<String>,
    pub publication_demographic: Option<String>,
    pub status: Option<String>,
    pub year: Option<i32>,
    pub content_rating: Option<String>,
    #[serde(deserialize_with = "de::null_as_default")]
    pub tags: Vec<TagData>,
    pub state: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "de::languages")]
    pub available_translated_languages: Vec<String>,
    pub latest_uploaded_chapter: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagData {
    #[serde(default)]
    pub attributes: Option<TagAttributes>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagAttributes {
    pub name: LocalizedText,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Option<RelationshipAttributes>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationshipAttributes {
    pub file_name: Option<String>,
}

// ============ Chapters ============

#[derive(Debug, Deserialize)]
pub struct ChapterFeedResponse {
    #[serde(default)]
    pub data: Vec<ChapterData>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChapterEntityResponse {
    pub data: ChapterData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChapterData {
    pub id: String,
    #[serde(default)]
    pub attributes: Option<ChapterAttributes>,
}

impl ChapterData {
    pub fn translated_language(&self) -> Option<&str> {
        self.attributes.as_ref()?.translated_language.as_deref()
    }

    pub fn reading_position(&self) -> ReadingPosition {
        match &self.attributes {
            Some(a) => ReadingPosition::new(a.volume.as_deref(), a.chapter.as_deref()),
            None => ReadingPosition::new(None, None),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChapterAttributes {
    pub title: Option<String>,
    pub volume: Option<String>,
    pub chapter: Option<String>,
    pub translated_language: Option<String>,
}

/// Volume, title and number of a single chapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChapterDetail {
    pub volume: Option<String>,
    pub title: Option<String>,
    pub chapter: Option<String>,
}

impl From<ChapterData> for ChapterDetail {
    fn from(data: ChapterData) -> Self {
        let attributes = data.attributes.unwrap_or_default();
        ChapterDetail {
            volume: attributes.volume,
            title: attributes.title,
            chapter: attributes.chapter,
        }
    }
}

// ============ At-Home page delivery ============

/// Which image set of a chapter to link to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageQuality {
    #[default]
    Original,
    DataSaver,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeServerResponse {
    pub base_url: String,
    pub chapter: AtHomeChapter,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeChapter {
    pub hash: String,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub data_saver: Vec<String>,
}

impl AtHomeServerResponse {
    /// `{baseUrl}/{data|data-saver}/{hash}/{file}` for every page, in reading order.
    pub fn page_urls(&self, quality: PageQuality) -> Vec<String> {
        let base = self.base_url.trim_end_matches('/');
        let (segment, files) = match quality {
            PageQuality::Original => ("data", &self.chapter.data),
            PageQuality::DataSaver => ("data-saver", &self.chapter.data_saver),
        };
        files
            .iter()
            .map(|file| format!("{}/{}/{}/{}", base, segment, self.chapter.hash, file))
            .collect()
    }
}

/// Internal serde helpers
pub mod de {
    use serde::{Deserialize, Deserializer};

    /// Treat an explicit `null` like a missing field.
    pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    /// Language code list; null entries and a null list are dropped.
    pub fn languages<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let val: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
        Ok(val.unwrap_or_default().into_iter().flatten().collect())
    }
}
