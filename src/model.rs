// Core structs: Article, ExchangeRateRecord, CommodityPriceRecord
use crate::analyzer::trend::Trend;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;

/// Plain-text article as handed over by the article source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    /// Paragraphs joined with single spaces, markup already stripped.
    pub body: String,
    pub url: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: None,
        }
    }
}

/// Percentage move of a secondary (non-subject) currency mentioned in the article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyObservation {
    pub name: String,
    pub change_pct: f64,
}

/// Rupiah against US$ as reported by one article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRateRecord {
    pub title: String,
    pub opening_rate: Option<f64>,
    pub current_rate: Option<f64>,
    pub observed_at: Option<NaiveTime>,
    pub percentage_change: Option<f64>,
    pub trend: Option<Trend>,
    pub currencies: Vec<CurrencyObservation>,
}

impl ExchangeRateRecord {
    /// True when nothing beyond the title could be read from the article.
    pub fn is_empty(&self) -> bool {
        self.opening_rate.is_none()
            && self.current_rate.is_none()
            && self.observed_at.is_none()
            && self.percentage_change.is_none()
            && self.currencies.is_empty()
    }
}

/// Where the observation date of a commodity record came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum ObservationDate {
    /// Date text as written in the article.
    Stated(String),
    /// Article did not state a date; the caller supplied one.
    Supplied(NaiveDate),
}

/// Antam gold prices plus the international reference price from one article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommodityPriceRecord {
    pub title: String,
    pub price: Option<f64>,
    pub price_change: Option<f64>,
    pub price_trend: Option<Trend>,
    pub buyback_price: Option<f64>,
    pub buyback_change: Option<f64>,
    pub buyback_trend: Option<Trend>,
    /// US$ per troy ounce.
    pub reference_price: Option<f64>,
    pub reference_change_pct: Option<f64>,
    pub observed_on: Option<ObservationDate>,
}

impl CommodityPriceRecord {
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.price_change.is_none()
            && self.buyback_price.is_none()
            && self.buyback_change.is_none()
            && self.reference_price.is_none()
            && self.reference_change_pct.is_none()
            && self.observed_on.is_none()
    }
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    InvalidResponse { url: String, status: u16 },
    #[error("invalid url '{0}'")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram is not configured: {0}")]
    NotConfigured(&'static str),
    #[error("telegram request failed: {0}")]
    ApiError(#[from] reqwest::Error),
    #[error("telegram rejected the message: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
