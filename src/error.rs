use crate::mangadex_client::CatalogError;

/// Failures of the API layer, translated once into an HTTP status by the routes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("page must be 1 or greater, got {page}")]
    InvalidPage { page: i64 },

    #[error("chapter must be 1 or greater, got {chapter}")]
    InvalidChapter { chapter: i64 },

    #[error("chapter {chapter} does not exist, `{manga_id}` has {total} chapter(s) in `{language}`")]
    ChapterOutOfRange {
        manga_id: String,
        language: String,
        chapter: i64,
        total: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    BadGateway,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Catalog(CatalogError::RemoteQuery { .. }) => ErrorKind::BadRequest,
            ApiError::Catalog(CatalogError::NotFound { .. }) => ErrorKind::NotFound,
            ApiError::Catalog(_) => ErrorKind::BadGateway,
            ApiError::InvalidPage { .. } | ApiError::InvalidChapter { .. } => {
                ErrorKind::BadRequest
            }
            ApiError::ChapterOutOfRange { .. } => ErrorKind::NotFound,
        }
    }

    /// Message safe to return to clients. Remote error details never leave the server;
    /// `remote_query_message` replaces them.
    pub fn public_message(&self, remote_query_message: &str) -> String {
        match self {
            ApiError::Catalog(CatalogError::RemoteQuery { .. }) => remote_query_message.to_string(),
            ApiError::Catalog(CatalogError::NotFound { id }) => {
                format!("No manga or chapter found for id `{}`", id)
            }
            ApiError::Catalog(_) => "The manga catalog is currently unavailable".to_string(),
            other => other.to_string(),
        }
    }

    /// Log the failure with every remote error on its own line.
    pub fn log(&self, operation: &str) {
        match self {
            ApiError::Catalog(CatalogError::RemoteQuery { errors }) => {
                for remote in errors {
                    tracing::warn!(operation, error_id = remote.id.as_deref().unwrap_or(""), title = %remote.title, detail = remote.detail.as_deref().unwrap_or(""), "catalog rejected query");
                }
            }
            ApiError::Catalog(CatalogError::NotFound { .. }) | ApiError::ChapterOutOfRange { .. } => {
                tracing::info!(operation, error = %self, "not found");
            }
            ApiError::Catalog(e) => {
                tracing::error!(operation, error = %format!("{:?}", e), "catalog call failed");
            }
            _ => tracing::debug!(operation, error = %self, "rejected request"),
        }
    }
}
