//! Typed error enum for the extraction crate.

use thiserror::Error;

/// Errors from website content extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code} fetching {url}")]
    HttpStatus { code: u16, url: String },
    #[error("invalid selector: {0}")]
    Selector(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
