// Mapping from MangaDex DTOs to the view models our API returns

use super::models::LocalizedText;
use crate::manga_api::models::Manga;
use crate::mangadex_client::models::MangaData;

/// `{uploads}/covers/{mangaId}/{fileName}`. A missing file name leaves the
/// last segment empty.
pub fn cover_url(uploads_base_url: &str, manga_id: &str, file_name: Option<&str>) -> String {
    format!(
        "{}/covers/{}/{}",
        uploads_base_url.trim_end_matches('/'),
        manga_id,
        file_name.unwrap_or_default()
    )
}

pub fn map_manga(data: &MangaData, uploads_base_url: &str, preferred_languages: &[String]) -> Manga {
    let cover = cover_url(uploads_base_url, &data.id, data.cover_file_name());
    let Some(attributes) = data.attributes.as_ref() else {
        return Manga {
            id: data.id.clone(),
            title: None,
            alt_titles: vec![],
            description: None,
            available_languages: vec![],
            is_locked: false,
            original_language: None,
            last_volume: None,
            last_chapter: None,
            year: None,
            tags: vec![],
            state: None,
            status: None,
            content_rating: None,
            publication_demographic: None,
            created_at: None,
            updated_at: None,
            latest_uploaded_chapter: None,
            cover,
        };
    };

    let pick = |text: &LocalizedText| {
        text.pick(preferred_languages).map(str::to_string)
    };

    Manga {
        id: data.id.clone(),
        title: pick(&attributes.title),
        alt_titles: attributes.alt_titles.iter().filter_map(pick).collect(),
        description: pick(&attributes.description),
        available_languages: attributes.available_translated_languages.clone(),
        is_locked: attributes.is_locked,
        original_language: attributes.original_language.clone(),
        last_volume: attributes.last_volume.clone(),
        last_chapter: attributes.last_chapter.clone(),
        year: attributes.year,
        tags: attributes
            .tags
            .iter()
            .filter_map(|t| t.attributes.as_ref().and_then(|a| pick(&a.name)))
            .collect(),
        state: attributes.state.clone(),
        status: attributes.status.clone(),
        content_rating: attributes.content_rating.clone(),
        publication_demographic: attributes.publication_demographic.clone(),
        created_at: attributes.created_at,
        updated_at: attributes.updated_at,
        latest_uploaded_chapter: attributes.latest_uploaded_chapter.clone(),
        cover,
    }
}
