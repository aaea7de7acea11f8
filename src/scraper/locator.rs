// Site-specific HTML selection for search pages and article pages
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

const SEARCH_RESULT_SELECTORS: &[&str] = &[
    "article h2 a",
    "article h3 a",
    ".entry-title a",
    ".post-title a",
    "h2 a[href]",
    ".wp-block-post-title a",
];

const TITLE_SELECTORS: &[&str] = &[
    "h1.entry-title",
    "h1.post-title",
    "h1.wp-block-post-title",
    "article h1",
    "h1",
];

const BODY_SELECTORS: &[&str] = &[
    ".entry-content",
    ".post-content",
    "article .content",
    ".wp-block-post-content",
];

/// Characters kept when falling back to the whole `<body>` text.
const BODY_FALLBACK_LIMIT: usize = 2000;

fn selectors(list: &'static [&'static str]) -> impl Iterator<Item = Selector> {
    list.iter().filter_map(|raw| match Selector::parse(raw) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Invalid selector '{}': {:?}", raw, e);
            None
        }
    })
}

/// Whitespace-collapsed text content of an element.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Absolute article links from a search page. The first selector that yields
/// any link decides; duplicates are dropped, order is kept.
pub fn search_result_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    for selector in selectors(SEARCH_RESULT_SELECTORS) {
        let mut links: Vec<String> = Vec::new();
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let Ok(url) = base.join(href.trim()) else {
                continue;
            };
            let url = url.to_string();
            if !links.contains(&url) {
                links.push(url);
            }
        }
        if !links.is_empty() {
            return links;
        }
    }
    Vec::new()
}

pub fn extract_title(document: &Html) -> Option<String> {
    selectors(TITLE_SELECTORS)
        .find_map(|selector| document.select(&selector).next())
        .map(element_text)
        .filter(|title| !title.is_empty())
}

/// Paragraphs of the first matching content container, joined with spaces.
/// Falls back to the container's own text, then to a prefix of `<body>`.
pub fn extract_body(document: &Html) -> Option<String> {
    let paragraph = Selector::parse("p").ok()?;

    if let Some(container) =
        selectors(BODY_SELECTORS).find_map(|selector| document.select(&selector).next())
    {
        let paragraphs: Vec<String> = container
            .select(&paragraph)
            .map(element_text)
            .filter(|p| !p.is_empty())
            .collect();
        let content = if paragraphs.is_empty() {
            element_text(container)
        } else {
            paragraphs.join(" ")
        };
        if !content.is_empty() {
            return Some(content);
        }
    }

    let body = Selector::parse("body").ok()?;
    document
        .select(&body)
        .next()
        .map(|element| element_text(element).chars().take(BODY_FALLBACK_LIMIT).collect::<String>())
        .filter(|content| !content.is_empty())
}

/// Title and body of an article page, or `None` if either is missing.
pub fn locate_article(html: &str) -> Option<(String, String)> {
    let document = Html::parse_document(html);
    let title = extract_title(&document)?;
    let body = extract_body(&document)?;
    Some((title, body))
}
