use crate::{
    config::Config,
    domain::mapping::map_manga,
    error::ApiError,
    manga_api::models::{AvailableLanguagesVm, Manga, MangaChapterViewModel, MangasViewModel},
    mangadex_client::{
        CatalogApi,
        filter::PAGE_SIZE,
        models::{ChapterData, MangaData, PageQuality},
    },
};

pub struct MangaService<'a> {
    pub catalog: &'a dyn CatalogApi,
    pub config: &'a Config,
}

impl<'a> MangaService<'a> {
    pub fn new(catalog: &'a dyn CatalogApi, config: &'a Config) -> Self {
        Self { catalog, config }
    }

    fn to_manga(&self, data: &MangaData) -> Manga {
        map_manga(
            data,
            &self.config.uploads_base_url,
            &self.config.preferred_languages,
        )
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn find_mangas(
        &self,
        query: Option<&str>,
        page: i64,
    ) -> Result<MangasViewModel, ApiError> {
        let page_number = u32::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(ApiError::InvalidPage { page })?;

        let list = self.catalog.list_mangas(query, page_number).await?;
        let mangas: Vec<Manga> = list
            .data
            .iter()
            .take(PAGE_SIZE as usize)
            .map(|m| self.to_manga(m))
            .collect();
        tracing::debug!(count = mangas.len(), total = list.total, "search results");

        Ok(MangasViewModel {
            mangas,
            page: page_number,
            total_pages: list.total / PAGE_SIZE,
            search: query.map(str::to_string),
        })
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Manga, ApiError> {
        let data = self.catalog.get_manga(id).await?;
        Ok(self.to_manga(&data))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_available_languages(&self, id: &str) -> Result<AvailableLanguagesVm, ApiError> {
        let languages = self.catalog.get_available_languages(id).await?;
        Ok(AvailableLanguagesVm {
            id: id.to_string(),
            languages,
        })
    }

    /// Resolve `chapter` (1-based) in the language's feed, then fetch its pages and
    /// details concurrently.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn read(
        &self,
        manga_id: &str,
        chapter: i64,
        language: &str,
        quality: PageQuality,
    ) -> Result<MangaChapterViewModel, ApiError> {
        if chapter < 1 {
            return Err(ApiError::InvalidChapter { chapter });
        }
        let feed = self.catalog.get_chapter_feed(manga_id, language).await?;
        let selected = resolve_chapter(&feed, chapter).ok_or_else(|| ApiError::ChapterOutOfRange {
            manga_id: manga_id.to_string(),
            language: language.to_string(),
            chapter,
            total: feed.len(),
        })?;
        tracing::debug!(chapter_id = %selected.id, "resolved chapter");

        let (pages, detail) = tokio::try_join!(
            self.catalog.get_chapter_pages(&selected.id, quality),
            self.catalog.get_chapter_detail(&selected.id),
        )?;

        Ok(MangaChapterViewModel {
            manga_id: manga_id.to_string(),
            chapter_id: selected.id.clone(),
            pages,
            chapter: chapter as u32,
            total_chapters: feed.len() as u32,
            chapter_title: detail.title,
            volume: detail.volume,
            chapter_number: detail.chapter,
        })
    }
}

/// The `chapter`-th (1-based) entry of an ordered feed.
pub fn resolve_chapter(feed: &[ChapterData], chapter: i64) -> Option<&ChapterData> {
    let index = usize::try_from(chapter).ok()?.checked_sub(1)?;
    feed.get(index)
}
