//! Question-type suggestion pipeline.
//!
//! One chat-completion round trip per question, no retry, no caching.
//! The raw output is filtered line by line and accepted only as a full
//! batch of exactly three entries; anything else becomes the empty list.
//! Generation is non-deterministic by nature — repeated calls with the
//! same inputs may differ, and callers are expected to tolerate that.

use std::sync::Arc;

use sitepilot_core::{truncate, QuestionType, WebsiteInfo, MAX_CONTENT_LEN};

use crate::ai_types::{ChatRequest, Message};
use crate::client::LlmClient;

/// Required batch size; partial batches are never surfaced.
pub const SUGGESTION_BATCH: usize = 3;

const GENERIC_SYSTEM_PROMPT: &str = "You are a business analyst providing concise, specific \
     insights. Return exactly 3 items, one per line, no numbers or additional text.";

const COMPETITOR_SYSTEM_PROMPT: &str = "You are an expert business analyst specializing in \
     competitive market analysis. Your task is to identify direct competitors based on business \
     model similarity, market overlap, and service offerings. Provide only the competitor names, \
     one per line, no additional text.";

/// Source locator plus whatever the content extractor managed to pull.
#[derive(Debug, Clone, Default)]
pub struct SuggestionContext {
    pub url: String,
    pub website_info: Option<WebsiteInfo>,
}

impl SuggestionContext {
    fn description(&self) -> &str {
        self.website_info.as_ref().map_or("", |info| info.description.as_str())
    }

    fn title(&self) -> &str {
        self.website_info.as_ref().map_or("", |info| info.title.as_str())
    }

    fn content(&self) -> &str {
        let content = self.website_info.as_ref().map_or("", |info| info.main_content.as_str());
        truncate(content, MAX_CONTENT_LEN)
    }
}

/// Turns a question type plus extracted content into a validated batch of
/// exactly 3 (or 0) short suggestions.
#[derive(Debug)]
pub struct SuggestionGenerator {
    llm: Arc<LlmClient>,
}

impl SuggestionGenerator {
    #[must_use]
    pub const fn new(llm: Arc<LlmClient>) -> Self {
        Self { llm }
    }

    /// Generate a suggestion batch for one question.
    ///
    /// Infallible by contract: any failure of the external call (network,
    /// status, malformed body) is caught here and mapped to an empty list so
    /// the wizard flow is never blocked by an outage.
    pub async fn generate(
        &self,
        question_type: QuestionType,
        ctx: &SuggestionContext,
    ) -> Vec<String> {
        let request = build_request(self.llm.model().to_owned(), question_type, ctx);
        match self.llm.chat_completion(&request).await {
            Ok(raw) => {
                let batch = parse_batch(&raw);
                if batch.is_empty() {
                    tracing::debug!(
                        question_type = %question_type,
                        "generator output did not yield a full batch, discarding"
                    );
                }
                batch
            },
            Err(e) => {
                tracing::warn!(
                    question_type = %question_type,
                    error = %e,
                    "suggestion generation failed, returning empty batch"
                );
                Vec::new()
            },
        }
    }
}

/// Split raw output into candidate lines and apply all-or-nothing validation.
///
/// Lines containing a period are dropped as sentence-like or hedged answers.
fn parse_batch(raw: &str) -> Vec<String> {
    let lines: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains('.'))
        .take(SUGGESTION_BATCH)
        .map(ToOwned::to_owned)
        .collect();

    if lines.len() == SUGGESTION_BATCH {
        lines
    } else {
        Vec::new()
    }
}

fn build_request(
    model: String,
    question_type: QuestionType,
    ctx: &SuggestionContext,
) -> ChatRequest {
    // The competitor question is held to a stricter standard: real company
    // names only, with a tighter output budget to discourage hedging.
    let (system, user, max_tokens) = if question_type == QuestionType::Competitors {
        (COMPETITOR_SYSTEM_PROMPT, competitor_prompt(ctx), 50)
    } else {
        (GENERIC_SYSTEM_PROMPT, generic_prompt(question_type, ctx), 150)
    };

    ChatRequest {
        model,
        messages: vec![Message::system(system), Message::user(user)],
        temperature: 0.5,
        max_tokens,
        presence_penalty: Some(0.1),
        frequency_penalty: Some(0.1),
    }
}

fn competitor_prompt(ctx: &SuggestionContext) -> String {
    format!(
        r"Analyze this business description and identify exactly 3 main direct competitors.

Business Description:
{}

Website: {}
Industry Focus: {}
Additional Context: {}

Requirements:
1. List EXACTLY 3 direct competitors
2. Each competitor must be a real company name
3. Focus on companies offering similar core services
4. Consider market size and target audience overlap
5. Prioritize well-known companies in the same space

Format: Return ONLY the company names, one per line, no numbers or additional text.",
        ctx.description(),
        ctx.url,
        ctx.title(),
        ctx.content(),
    )
}

fn generic_prompt(question_type: QuestionType, ctx: &SuggestionContext) -> String {
    let (lead, format_line) = match question_type {
        QuestionType::Benefits => (
            "Analyze this business and list exactly 3 key benefits:",
            "One benefit per line, be specific and concise.",
        ),
        QuestionType::Audience => (
            "Identify exactly 3 primary target audience segments:",
            "One audience segment per line, be specific.",
        ),
        QuestionType::Objections => (
            "List exactly 3 main customer objections or concerns:",
            "One objection per line, be specific.",
        ),
        QuestionType::Keywords => (
            "Identify exactly 3 primary keyword groups for SEO:",
            "One keyword group per line, be specific.",
        ),
        QuestionType::Competitors => (
            "Analyze this business description and identify exactly 3 main direct competitors:",
            "Return ONLY the company names, one per line.",
        ),
    };

    format!(
        r"{lead}

Business: {}
Website: {}
Context: {}

Format: {format_line}",
        ctx.description(),
        ctx.url,
        ctx.content(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_valid_lines_pass_through_in_order() {
        let batch = parse_batch("Fast checkout\nFree shipping\nEasy returns");
        assert_eq!(batch, vec!["Fast checkout", "Free shipping", "Easy returns"]);
    }

    #[test]
    fn two_valid_lines_yield_an_empty_batch() {
        assert!(parse_batch("Fast checkout\nFree shipping").is_empty());
    }

    #[test]
    fn one_valid_line_yields_an_empty_batch() {
        assert!(parse_batch("Fast checkout").is_empty());
    }

    #[test]
    fn lines_with_periods_are_dropped() {
        // "Alpha Inc." contains a period, leaving only 2 valid lines.
        assert!(parse_batch("Alpha Inc.\nBeta Corp\nGamma LLC").is_empty());
    }

    #[test]
    fn blank_lines_and_whitespace_are_ignored() {
        let batch = parse_batch("  Beta Corp  \n\n   \nGamma LLC\nDelta Labs\n");
        assert_eq!(batch, vec!["Beta Corp", "Gamma LLC", "Delta Labs"]);
    }

    #[test]
    fn extra_lines_beyond_three_are_capped() {
        let batch = parse_batch("One\nTwo\nThree\nFour\nFive");
        assert_eq!(batch, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn empty_output_yields_an_empty_batch() {
        assert!(parse_batch("").is_empty());
    }

    #[test]
    fn competitor_requests_use_the_tight_output_budget() {
        let ctx = SuggestionContext { url: "https://example.com".to_owned(), website_info: None };

        let competitors = build_request("m".to_owned(), QuestionType::Competitors, &ctx);
        assert_eq!(competitors.max_tokens, 50);
        assert_eq!(competitors.messages[0].content, COMPETITOR_SYSTEM_PROMPT);

        let benefits = build_request("m".to_owned(), QuestionType::Benefits, &ctx);
        assert_eq!(benefits.max_tokens, 150);
        assert_eq!(benefits.messages[0].content, GENERIC_SYSTEM_PROMPT);
    }

    #[test]
    fn context_content_is_capped_before_prompting() {
        let ctx = SuggestionContext {
            url: "https://example.com".to_owned(),
            website_info: Some(WebsiteInfo {
                main_content: "x".repeat(MAX_CONTENT_LEN * 2),
                ..WebsiteInfo::default()
            }),
        };
        assert_eq!(ctx.content().len(), MAX_CONTENT_LEN);
    }
}
