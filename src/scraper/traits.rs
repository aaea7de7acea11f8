use crate::model::{Article, ScraperError};

/// Finds the newest article for a search keyword.
#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    /// `Ok(None)` when no search result yields a usable title and body.
    async fn latest(&self, keyword: &str) -> Result<Option<Article>, ScraperError>;
}
