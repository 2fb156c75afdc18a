use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid dataset url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("dataset request failed: {0}")]
    Request(String),
    #[error("failed to read dataset file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("dataset is not a JSON array of film records: {0}")]
    Parse(#[from] serde_json::Error),
}
