use crate::config::SiteConfig;
use crate::model::{Article, ScraperError};
use crate::scraper::locator;
use crate::scraper::traits::ArticleSource;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{info, warn};

pub struct ScraperImpl {
    pub client: Client,
    base_url: Url,
    max_results: usize,
}

impl ScraperImpl {
    pub fn new(site: &SiteConfig) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("id-ID,id;q=0.9,en;q=0.5"));

        let client = Client::builder()
            .user_agent(site.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(site.request_timeout_seconds))
            .build()?;
        let base_url =
            Url::parse(&site.base_url).map_err(|_| ScraperError::InvalidUrl(site.base_url.clone()))?;

        Ok(Self {
            client,
            base_url,
            max_results: site.max_results,
        })
    }

    fn build_search_url(&self, keyword: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path("/");
        url.query_pairs_mut().clear().append_pair("s", keyword);
        url
    }

    pub async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::InvalidResponse {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl ArticleSource for ScraperImpl {
    async fn latest(&self, keyword: &str) -> Result<Option<Article>, ScraperError> {
        let search_url = self.build_search_url(keyword);
        info!("🔍 Searching '{}' at {}", keyword, search_url);
        let search_html = self.fetch(search_url.as_str()).await?;

        let links = locator::search_result_links(&search_html, &self.base_url);
        info!("📰 {} search results for '{}'", links.len(), keyword);

        for link in links.into_iter().take(self.max_results) {
            let html = match self.fetch(&link).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("❌ Failed to fetch {}: {}", link, e);
                    continue;
                }
            };

            match locator::locate_article(&html) {
                Some((title, body)) => {
                    info!("✅ Article found: {}", title);
                    return Ok(Some(Article {
                        title,
                        body,
                        url: Some(link),
                    }));
                }
                None => warn!("⚠️ No title or body in {}", link),
            }
        }

        Ok(None)
    }
}
