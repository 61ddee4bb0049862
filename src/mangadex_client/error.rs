use std::fmt;

use serde::Deserialize;

/// One entry of the MangaDex error envelope.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteError {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.title, detail),
            None => f.write_str(&self.title),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog reported {count} error(s)", count = .errors.len())]
    RemoteQuery { errors: Vec<RemoteError> },

    #[error("no catalog entry with id `{id}`")]
    NotFound { id: String },

    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("catalog responded with unexpected status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("failed to parse catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
