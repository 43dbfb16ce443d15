use std::sync::Arc;

use serde::Serialize;
use sitepilot_core::WebsiteInfo;
use sitepilot_extract::ContentExtractor;
use sitepilot_llm::LlmClient;

use crate::error::ServiceError;

/// Extraction output paired with the generated site description.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAnalysis {
    pub website_info: WebsiteInfo,
    pub ai_description: String,
}

/// Extracts a page and asks the LLM for a short description of it.
#[derive(Debug)]
pub struct SiteAnalyzer {
    extractor: ContentExtractor,
    llm: Arc<LlmClient>,
}

impl SiteAnalyzer {
    #[must_use]
    pub const fn new(extractor: ContentExtractor, llm: Arc<LlmClient>) -> Self {
        Self { extractor, llm }
    }

    /// Analyze a URL: extract content, then describe it.
    ///
    /// # Errors
    /// Unlike the suggestion pipeline, failures here surface to the caller;
    /// the analyze flow has nothing sensible to degrade to.
    pub async fn analyze(&self, url: &str) -> Result<SiteAnalysis, ServiceError> {
        let website_info = self.extractor.extract(url).await?;
        let ai_description = self.llm.describe_website(url, &website_info).await?;
        Ok(SiteAnalysis { website_info, ai_description })
    }
}
