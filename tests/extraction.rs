mod common;

use chrono::{NaiveDate, NaiveTime};
use kurs_sniper::analyzer::{Direction, RecordBuilder};
use kurs_sniper::config::ExtractionConfig;
use kurs_sniper::model::{Article, ObservationDate};

fn builder() -> RecordBuilder {
    RecordBuilder::new(&ExtractionConfig::default()).unwrap()
}

#[test]
fn rupiah_article_yields_full_record() {
    let record = builder().exchange_rate(&common::rupiah_article());

    assert_eq!(record.opening_rate, Some(16850.0));
    assert_eq!(record.current_rate, Some(16880.0));
    assert_eq!(record.observed_at, NaiveTime::from_hms_opt(10, 15, 0));
    assert_eq!(record.percentage_change, Some(-0.24));
    let trend = record.trend.as_ref().unwrap();
    assert_eq!(trend.direction, Direction::Down);
    assert_eq!(trend.label, "melemah");

    let currencies: Vec<(&str, f64)> = record
        .currencies
        .iter()
        .map(|c| (c.name.as_str(), c.change_pct))
        .collect();
    assert_eq!(
        currencies,
        vec![("Peso", 0.12), ("Yen", -0.35), ("Ringgit", 0.0), ("Won", -0.41)]
    );
}

#[test]
fn gold_article_yields_full_record() {
    let fallback = NaiveDate::from_ymd_opt(2026, 2, 23);
    let record = builder().commodity(&common::gold_article(), fallback);

    assert_eq!(record.price, Some(2_944_000.0));
    assert_eq!(record.price_change, Some(28_000.0));
    assert_eq!(record.price_trend.as_ref().map(|t| t.label.as_str()), Some("naik"));
    assert_eq!(record.buyback_price, Some(2_725_000.0));
    assert_eq!(record.buyback_change, Some(-31_000.0));
    assert_eq!(record.buyback_trend.as_ref().map(|t| t.label.as_str()), Some("turun"));
    assert_eq!(record.reference_price, Some(4997.7));
    assert_eq!(record.reference_change_pct, Some(0.43));
    assert_eq!(
        record.observed_on,
        Some(ObservationDate::Stated("20 Februari 2026".into()))
    );
}

#[test]
fn unrelated_article_is_empty_but_keeps_title() {
    let article = Article::new("Cuaca", "Hujan ringan diperkirakan turun di Jakarta sore ini.");
    let b = builder();

    let rate = b.exchange_rate(&article);
    assert!(rate.is_empty());
    assert_eq!(rate.title, "Cuaca");

    let gold = b.commodity(&article, None);
    assert!(gold.is_empty());
}

#[test]
fn records_serialize_with_absent_fields_as_null() {
    let record = builder().commodity(&Article::new("t", "naik Rp 5.000/gram"), None);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["price_change"], serde_json::json!(5000.0));
    assert_eq!(json["price_trend"]["direction"], "up");
    assert!(json["reference_price"].is_null());
    assert!(json["observed_on"].is_null());
}
