// Query builders for the MangaDex list endpoints

/// Manga per page, both for the remote query and the view model.
pub const PAGE_SIZE: u32 = 20;

/// Largest page the MangaDex feed endpoint accepts.
pub const FEED_PAGE_LIMIT: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

/// Filter for `GET /manga`.
#[derive(Debug, Clone, PartialEq)]
pub struct MangaFilter {
    pub title: String,
    pub limit: u32,
    pub offset: u32,
    pub content_rating: Vec<String>,
    pub available_translated_language: Vec<String>,
    pub has_available_chapters: bool,
    pub order: Vec<(String, OrderDirection)>,
    pub includes: Vec<String>,
}

impl MangaFilter {
    /// Safe-rated, English-available manga with at least one chapter, best rated first.
    /// `page` is 1-based.
    pub fn search(query: Option<&str>, page: u32) -> Self {
        MangaFilter {
            title: query.unwrap_or_default().to_string(),
            limit: PAGE_SIZE,
            offset: PAGE_SIZE.saturating_mul(page.saturating_sub(1)),
            content_rating: vec!["safe".into()],
            available_translated_language: vec!["en".into()],
            has_available_chapters: true,
            order: vec![("rating".into(), OrderDirection::Desc)],
            includes: vec!["cover_art".into()],
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut q: Vec<(String, String)> = vec![
            ("limit".into(), self.limit.to_string()),
            ("offset".into(), self.offset.to_string()),
        ];
        if !self.title.is_empty() {
            q.push(("title".into(), self.title.clone()));
        }
        for rating in &self.content_rating {
            q.push(("contentRating[]".into(), rating.clone()));
        }
        for language in &self.available_translated_language {
            q.push(("availableTranslatedLanguage[]".into(), language.clone()));
        }
        if self.has_available_chapters {
            q.push(("hasAvailableChapters".into(), "true".into()));
        }
        push_order(&mut q, &self.order);
        for include in &self.includes {
            q.push(("includes[]".into(), include.clone()));
        }
        q
    }
}

/// Filter for `GET /manga/{id}/feed`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedFilter {
    pub translated_language: Vec<String>,
    pub order: Vec<(String, OrderDirection)>,
    pub limit: u32,
    pub offset: u32,
}

impl FeedFilter {
    /// Chapters in `language`, volume then chapter ascending.
    pub fn for_language(language: &str) -> Self {
        FeedFilter {
            translated_language: vec![language.to_string()],
            order: vec![
                ("volume".into(), OrderDirection::Asc),
                ("chapter".into(), OrderDirection::Asc),
            ],
            limit: FEED_PAGE_LIMIT,
            offset: 0,
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut q: Vec<(String, String)> = vec![
            ("limit".into(), self.limit.to_string()),
            ("offset".into(), self.offset.to_string()),
        ];
        for language in &self.translated_language {
            q.push(("translatedLanguage[]".into(), language.clone()));
        }
        push_order(&mut q, &self.order);
        q
    }
}

fn push_order(q: &mut Vec<(String, String)>, order: &[(String, OrderDirection)]) {
    for (key, direction) in order {
        q.push((format!("order[{}]", key), direction.as_str().to_string()));
    }
}
