use std::time::Duration;

use scraper::{Html, Selector};
use sitepilot_core::{truncate, WebsiteInfo, MAX_CONTENT_LEN};

use crate::error::ExtractError;

/// Body text blocks shorter than this are treated as chrome and dropped.
const MIN_BLOCK_LEN: usize = 50;

// Some sites refuse obviously non-browser agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Fetches a URL and extracts structured page data.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    client: reqwest::Client,
}

impl ContentExtractor {
    /// Create a new extractor with a browser-like HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ExtractError::ClientInit(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch a page and distill it into [`WebsiteInfo`].
    ///
    /// # Errors
    /// Returns an error if the fetch fails or the server responds with a
    /// non-success status. Parsing never fails; missing elements produce
    /// empty fields.
    pub async fn extract(&self, url: &str) -> Result<WebsiteInfo, ExtractError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::HttpStatus { code: status.as_u16(), url: url.to_owned() });
        }

        let body = response.text().await?;
        let info = parse_website_info(&body)?;
        tracing::debug!(
            url,
            title = %info.title,
            headings = info.main_headings.len(),
            content_len = info.main_content.len(),
            "extracted website content"
        );
        Ok(info)
    }
}

/// Distill an HTML document into the structured extraction shape.
///
/// Body text is the concatenation of `p`, `article`, and `section` blocks
/// longer than [`MIN_BLOCK_LEN`] chars, truncated to the fixed budget the
/// suggestion pipeline expects.
pub(crate) fn parse_website_info(html: &str) -> Result<WebsiteInfo, ExtractError> {
    let doc = Html::parse_document(html);

    let title_sel = selector("title")?;
    let meta_sel = selector(r#"meta[name="description"]"#)?;
    let heading_sel = selector("h1, h2")?;
    let content_sel = selector("p, article, section")?;

    let title = doc
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .unwrap_or_default();

    let meta_description = doc
        .select(&meta_sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_owned());

    let main_headings: Vec<String> = doc
        .select(&heading_sel)
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .filter(|heading| !heading.is_empty())
        .collect();

    let main_content = doc
        .select(&content_sel)
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .filter(|text| text.len() > MIN_BLOCK_LEN)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(WebsiteInfo {
        title,
        description: meta_description.clone().unwrap_or_default(),
        meta_description,
        main_headings,
        main_content: truncate(&main_content, MAX_CONTENT_LEN).to_owned(),
    })
}

fn selector(raw: &str) -> Result<Selector, ExtractError> {
    Selector::parse(raw).map_err(|e| ExtractError::Selector(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<html>
<head>
  <title> Example Shop </title>
  <meta name="description" content="Handmade goods, shipped worldwide.">
</head>
<body>
  <h1>Welcome to Example Shop</h1>
  <h2>Why shop with us</h2>
  <nav><a href="/about">About</a></nav>
  <p>short</p>
  <p>We sell handmade goods crafted by independent makers from all over the world, delivered to your door</p>
</body>
</html>"#;

    #[test]
    fn parses_title_meta_and_headings() {
        let info = parse_website_info(PAGE).unwrap();
        assert_eq!(info.title, "Example Shop");
        assert_eq!(info.description, "Handmade goods, shipped worldwide.");
        assert_eq!(info.meta_description.as_deref(), Some("Handmade goods, shipped worldwide."));
        assert_eq!(info.main_headings, vec!["Welcome to Example Shop", "Why shop with us"]);
    }

    #[test]
    fn short_blocks_are_dropped_from_main_content() {
        let info = parse_website_info(PAGE).unwrap();
        assert!(!info.main_content.contains("short"));
        assert!(info.main_content.contains("handmade goods"));
    }

    #[test]
    fn main_content_respects_the_character_budget() {
        let long_block = format!("<p>{}</p>", "y".repeat(MAX_CONTENT_LEN * 2));
        let info = parse_website_info(&long_block).unwrap();
        assert_eq!(info.main_content.len(), MAX_CONTENT_LEN);
    }

    #[test]
    fn empty_document_yields_empty_fields() {
        let info = parse_website_info("<html><body></body></html>").unwrap();
        assert!(info.title.is_empty());
        assert!(info.meta_description.is_none());
        assert!(info.main_headings.is_empty());
        assert!(info.main_content.is_empty());
    }

    #[tokio::test]
    async fn extract_fetches_and_parses_a_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let extractor = ContentExtractor::new().unwrap();
        let info = extractor.extract(&server.uri()).await.unwrap();
        assert_eq!(info.title, "Example Shop");
    }

    #[tokio::test]
    async fn extract_surfaces_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let extractor = ContentExtractor::new().unwrap();
        let err = extractor.extract(&server.uri()).await.unwrap_err();
        assert!(matches!(err, ExtractError::HttpStatus { code: 404, .. }));
    }
}
