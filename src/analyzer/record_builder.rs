use crate::analyzer::trend::TrendClassifier;
use crate::config::{ExtractionConfig, SecondaryCurrency};
use crate::model::{
    Article, CommodityPriceRecord, CurrencyObservation, ExchangeRateRecord, ObservationDate,
};
use crate::normalizer::normalize_percent;
use crate::parser::rules::CURRENCY_NEGATIVE_KEYWORDS;
use crate::parser::{Field, PatternExtractor, RuleError, RuleTable};
use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use tracing::debug;

const EXCHANGE_FIELDS: &[Field] = &[
    Field::OpeningRate,
    Field::CurrentRate,
    Field::ObservationTime,
    Field::PercentageChange,
];

const COMMODITY_FIELDS: &[Field] = &[
    Field::CommodityPrice,
    Field::CommodityChange,
    Field::BuybackPrice,
    Field::BuybackChange,
    Field::ReferencePrice,
    Field::ReferenceChange,
    Field::ObservationDate,
];

/// Finds `<name> <words> <pct>%` for one secondary currency. An unsigned
/// figure is negated when the words contain a weakening keyword.
#[derive(Debug, Clone)]
struct CurrencyProbe {
    name: String,
    regex: Regex,
}

impl CurrencyProbe {
    fn compile(currency: &SecondaryCurrency) -> Result<Self, RuleError> {
        let pattern = format!(
            r"\b{}\b([\s\w]+?)([+-]?\d+(?:[.,]\d+)?)\s*%",
            regex::escape(currency.needle.trim())
        );
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleError::InvalidProbe {
                name: currency.name.clone(),
                source,
            })?;
        Ok(Self {
            name: currency.name.clone(),
            regex,
        })
    }
}

/// Builds one immutable record per article and domain.
///
/// Every field is extracted on its own from the article body; only the trend
/// fields are derived, from their delta. Nothing here reads the clock: a
/// fallback date must come from the caller.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    exchange: PatternExtractor,
    commodity: PatternExtractor,
    currency_trend: TrendClassifier,
    commodity_trend: TrendClassifier,
    probes: Vec<CurrencyProbe>,
}

impl RecordBuilder {
    /// Builder over the built-in rule tables.
    pub fn new(config: &ExtractionConfig) -> Result<Self, RuleError> {
        Self::with_tables(config, RuleTable::exchange_rate()?, RuleTable::commodity()?)
    }

    pub fn with_tables(
        config: &ExtractionConfig,
        exchange: RuleTable,
        commodity: RuleTable,
    ) -> Result<Self, RuleError> {
        exchange.require(EXCHANGE_FIELDS)?;
        commodity.require(COMMODITY_FIELDS)?;
        let probes = config
            .secondary_currencies
            .iter()
            .map(CurrencyProbe::compile)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            exchange = exchange.version(),
            commodity = commodity.version(),
            currencies = probes.len(),
            "record builder ready"
        );

        Ok(Self {
            exchange: PatternExtractor::new(exchange),
            commodity: PatternExtractor::new(commodity),
            currency_trend: TrendClassifier::new(config.currency_vocabulary.clone()),
            commodity_trend: TrendClassifier::new(config.commodity_vocabulary.clone()),
            probes,
        })
    }

    pub fn exchange_rate(&self, article: &Article) -> ExchangeRateRecord {
        let text = article.body.as_str();
        let percentage_change = self.exchange.number(Field::PercentageChange, text);

        let record = ExchangeRateRecord {
            title: article.title.clone(),
            opening_rate: self.exchange.number(Field::OpeningRate, text),
            current_rate: self.exchange.number(Field::CurrentRate, text),
            observed_at: self.exchange.time(Field::ObservationTime, text),
            percentage_change,
            trend: self.currency_trend.classify(percentage_change),
            currencies: self.secondary_currencies(text),
        };
        debug!(
            title = %record.title,
            current = ?record.current_rate,
            change = ?record.percentage_change,
            currencies = record.currencies.len(),
            "exchange-rate record built"
        );
        record
    }

    /// `fallback_date` is used only when the article states no date.
    pub fn commodity(&self, article: &Article, fallback_date: Option<NaiveDate>) -> CommodityPriceRecord {
        let text = article.body.as_str();
        let price_change = self.commodity.number(Field::CommodityChange, text);
        let buyback_change = self.commodity.number(Field::BuybackChange, text);
        let observed_on = self
            .commodity
            .text(Field::ObservationDate, text)
            .map(ObservationDate::Stated)
            .or_else(|| fallback_date.map(ObservationDate::Supplied));

        let record = CommodityPriceRecord {
            title: article.title.clone(),
            price: self.commodity.number(Field::CommodityPrice, text),
            price_change,
            price_trend: self.commodity_trend.classify(price_change),
            buyback_price: self.commodity.number(Field::BuybackPrice, text),
            buyback_change,
            buyback_trend: self.commodity_trend.classify(buyback_change),
            reference_price: self.commodity.number(Field::ReferencePrice, text),
            reference_change_pct: self.commodity.number(Field::ReferenceChange, text),
            observed_on,
        };
        debug!(
            title = %record.title,
            price = ?record.price,
            change = ?record.price_change,
            reference = ?record.reference_price,
            "commodity record built"
        );
        record
    }

    /// One probe per configured currency, first occurrence only, in configured order.
    fn secondary_currencies(&self, text: &str) -> Vec<CurrencyObservation> {
        self.probes
            .iter()
            .filter_map(|probe| {
                let caps = probe.regex.captures(text)?;
                let between = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let raw = caps.get(2)?.as_str();
                let mut change_pct = normalize_percent(raw)?;

                let explicit_sign = raw.starts_with(['+', '-']);
                let weakening = between
                    .to_lowercase()
                    .split_whitespace()
                    .any(|word| CURRENCY_NEGATIVE_KEYWORDS.iter().any(|k| *k == word));
                if weakening && !explicit_sign && change_pct != 0.0 {
                    change_pct = -change_pct;
                }
                Some(CurrencyObservation {
                    name: probe.name.clone(),
                    change_pct,
                })
            })
            .collect()
    }
}
