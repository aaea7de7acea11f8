// Article discovery and text location for the news site.
pub mod fetcher;
pub mod locator;
pub mod traits;

pub use fetcher::ScraperImpl;
pub use traits::ArticleSource;
