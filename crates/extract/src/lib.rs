//! Website content extraction for sitepilot
//!
//! Fetches a page and distills it into the structured shape the suggestion
//! pipeline consumes: title, meta description, headings, and a truncated
//! body excerpt.

mod error;
mod extractor;

pub use error::ExtractError;
pub use extractor::ContentExtractor;
