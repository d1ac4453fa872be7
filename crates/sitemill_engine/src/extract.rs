use scraper::{Html, Selector};

/// Selectors tried in order when looking for the main content region.
const CANDIDATE_SELECTORS: &[&str] = &["article", "main", "[role=\"main\"]"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub title: Option<String>,
    pub content_html: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedContent;
}

/// Lightweight "readability-like" extractor:
/// - pulls `<title>` text if present
/// - returns the inner HTML of the first candidate region (`article`,
///   `main`, `[role=main]`) that matches
/// - otherwise returns `<body>` inner_html
/// - fallback to full document HTML.
#[derive(Debug, Default)]
pub struct ReadabilityLikeExtractor;

impl Extractor for ReadabilityLikeExtractor {
    fn extract(&self, html: &str) -> ExtractedContent {
        let doc = Html::parse_document(html);

        let title = Selector::parse("title")
            .ok()
            .and_then(|sel| doc.select(&sel).next())
            .map(|t| t.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        let content_html = CANDIDATE_SELECTORS
            .iter()
            .filter_map(|raw| Selector::parse(raw).ok())
            .find_map(|sel| doc.select(&sel).next())
            .map(|node| node.inner_html())
            .unwrap_or_else(|| extract_body(&doc));

        ExtractedContent {
            title,
            content_html,
        }
    }
}

fn extract_body(doc: &Html) -> String {
    if let Ok(sel) = Selector::parse("body") {
        if let Some(node) = doc.select(&sel).next() {
            return node.inner_html();
        }
    }
    doc.root_element().html()
}
