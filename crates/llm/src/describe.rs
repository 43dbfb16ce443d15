//! AI website description used by the analyze flow.

use sitepilot_core::{truncate, WebsiteInfo};

use crate::ai_types::{ChatRequest, Message};
use crate::client::LlmClient;
use crate::error::LlmError;

/// Character budget for the content excerpt embedded in the prompt.
const EXCERPT_LEN: usize = 1000;

impl LlmClient {
    /// Generate a concise, two-sentence description of an analyzed website.
    ///
    /// # Errors
    /// Returns an error if the chat-completion call fails; callers decide
    /// whether that is fatal (the analyze endpoint surfaces it).
    pub async fn describe_website(
        &self,
        url: &str,
        info: &WebsiteInfo,
    ) -> Result<String, LlmError> {
        let prompt = format!(
            r"Analyze this website and create a concise, professional description (max 2 sentences) that highlights its main purpose and value proposition.

Website URL: {url}
Website Title: {}
Meta Description: {}
Main Headings: {}
Main Content Excerpt: {}",
            info.title,
            info.meta_description.as_deref().unwrap_or(""),
            info.main_headings.join(", "),
            truncate(&info.main_content, EXCERPT_LEN),
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(
                    "You are a professional website analyzer. Create concise, accurate \
                     descriptions that capture the essence of websites.",
                ),
                Message::user(prompt),
            ],
            temperature: 0.7,
            max_tokens: 100,
            presence_penalty: None,
            frequency_penalty: None,
        };

        self.chat_completion(&request).await
    }
}
