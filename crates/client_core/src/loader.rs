use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Film, error::LoadError};
use tracing::{error, info};
use url::Url;

pub const DATASET_FILE: &str = "films.json";
/// Static query parameter appended to the dataset URL to defeat stale caches.
pub const CACHE_BUSTER: (&str, &str) = ("v", "1");

pub fn parse_films(body: &[u8]) -> Result<Vec<Film>, LoadError> {
    Ok(serde_json::from_slice(body)?)
}

#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Film>, LoadError>;

    fn describe(&self) -> String;
}

pub struct HttpSource {
    http: Client,
    dataset_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, LoadError> {
        Ok(Self {
            http: Client::new(),
            dataset_url: dataset_url(base_url)?,
        })
    }

    pub fn dataset_url(&self) -> &Url {
        &self.dataset_url
    }
}

/// Resolves `films.json?v=1` against `base_url`.
pub fn dataset_url(base_url: &str) -> Result<Url, LoadError> {
    let invalid = |source| LoadError::InvalidUrl {
        url: base_url.to_string(),
        source,
    };
    let base = Url::parse(base_url).map_err(invalid)?;
    let mut url = base.join(DATASET_FILE).map_err(invalid)?;
    url.query_pairs_mut()
        .clear()
        .append_pair(CACHE_BUSTER.0, CACHE_BUSTER.1);
    Ok(url)
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<Film>, LoadError> {
        let res = self
            .http
            .get(self.dataset_url.clone())
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| LoadError::Request(e.to_string()))?;
        let body = res
            .bytes()
            .await
            .map_err(|e| LoadError::Request(e.to_string()))?;
        parse_films(&body)
    }

    fn describe(&self) -> String {
        self.dataset_url.to_string()
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<Vec<Film>, LoadError> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        parse_films(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Failures are logged and swallowed; `None` leaves the page empty.
pub async fn load(source: &dyn DatasetSource) -> Option<Vec<Film>> {
    match source.fetch().await {
        Ok(films) => {
            info!(source = %source.describe(), count = films.len(), "dataset loaded");
            Some(films)
        }
        Err(error) => {
            error!(source = %source.describe(), %error, "error loading dataset");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
