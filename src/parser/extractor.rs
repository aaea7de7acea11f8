// Ordered, first-match-wins evaluation of rule tables
use crate::parser::rules::{Capture, Field, PatternRule, RuleTable};
use chrono::NaiveTime;
use regex::Captures;
use tracing::{debug, trace};

/// Value produced by a matched alternative.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Number(f64),
    Time(NaiveTime),
    Text(String),
}

/// Runs the rules of one table against article text.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    table: RuleTable,
}

impl PatternExtractor {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Value of `field`, or `None` when the table has no rule for it or no
    /// alternative yields a value.
    pub fn extract(&self, field: Field, text: &str) -> Option<Extracted> {
        self.table.rule(field).and_then(|rule| apply_rule(rule, text))
    }

    /// Index of the alternative that decides `field` for this text.
    pub fn first_match(&self, field: Field, text: &str) -> Option<usize> {
        let rule = self.table.rule(field)?;
        rule.alternatives()
            .iter()
            .position(|alt| alt.regex.is_match(text))
    }

    pub fn number(&self, field: Field, text: &str) -> Option<f64> {
        match self.extract(field, text)? {
            Extracted::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn time(&self, field: Field, text: &str) -> Option<NaiveTime> {
        match self.extract(field, text)? {
            Extracted::Time(value) => Some(value),
            _ => None,
        }
    }

    pub fn text(&self, field: Field, text: &str) -> Option<String> {
        match self.extract(field, text)? {
            Extracted::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Evaluates alternatives in order. The first pattern that matches decides:
/// if its literal does not normalize, the field is absent and later
/// alternatives are not tried.
pub fn apply_rule(rule: &PatternRule, text: &str) -> Option<Extracted> {
    for (index, alternative) in rule.alternatives().iter().enumerate() {
        if let Some(caps) = alternative.regex.captures(text) {
            let value = evaluate(&alternative.capture, &caps);
            debug!(
                field = %rule.field,
                alternative = index,
                matched = caps.get(0).map(|m| m.as_str()).unwrap_or_default(),
                present = value.is_some(),
                "rule matched"
            );
            return value;
        }
    }
    trace!(field = %rule.field, "no alternative matched");
    None
}

fn evaluate(capture: &Capture, caps: &Captures<'_>) -> Option<Extracted> {
    let group = |i: usize| caps.get(i).map(|m| m.as_str());

    match capture {
        Capture::Magnitude { group: g, format } => format
            .normalize(group(*g)?)
            .map(|v| Extracted::Number(v.abs())),
        Capture::Signed { group: g, format } => {
            format.normalize(group(*g)?).map(Extracted::Number)
        }
        Capture::Keyed {
            keyword_group,
            value_group,
            negative,
            format,
        } => {
            let literal = format.normalize(group(*value_group)?)?;
            let Some(keyword) = group(*keyword_group) else {
                return Some(Extracted::Number(literal));
            };
            let keyword = keyword.to_lowercase();
            let magnitude = literal.abs();
            let value = if magnitude != 0.0 && negative.iter().any(|n| *n == keyword) {
                -magnitude
            } else {
                magnitude
            };
            Some(Extracted::Number(value))
        }
        Capture::Time { group: g } => {
            let raw = group(*g)?.replace('.', ":");
            NaiveTime::parse_from_str(&raw, "%H:%M")
                .ok()
                .map(Extracted::Time)
        }
        Capture::Text { group: g } => {
            let raw = group(*g)?.trim();
            (!raw.is_empty()).then(|| Extracted::Text(raw.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::NumberFormat;

    fn exchange() -> PatternExtractor {
        PatternExtractor::new(RuleTable::exchange_rate().unwrap())
    }

    fn commodity() -> PatternExtractor {
        PatternExtractor::new(RuleTable::commodity().unwrap())
    }

    #[test]
    fn current_rate_from_movement_sentence() {
        let text = "rupiah bergerak ke angka 16.100/US$";
        assert_eq!(exchange().number(Field::CurrentRate, text), Some(16100.0));
    }

    #[test]
    fn opening_rate_prefers_level_phrase() {
        let text = "Pada pembukaan, rupiah diperdagangkan di level 16.000/US$";
        let ex = exchange();
        assert_eq!(ex.number(Field::OpeningRate, text), Some(16000.0));
        assert_eq!(ex.first_match(Field::OpeningRate, text), Some(0));
    }

    #[test]
    fn opening_rate_from_dibuka() {
        let text = "Rupiah dibuka melemah ke Rp16.250/US$ pagi ini.";
        assert_eq!(exchange().number(Field::OpeningRate, text), Some(16250.0));
    }

    #[test]
    fn time_of_day_with_colon_or_dot() {
        let ex = exchange();
        assert_eq!(
            ex.time(Field::ObservationTime, "pada pukul 10:30 WIB"),
            NaiveTime::from_hms_opt(10, 30, 0)
        );
        assert_eq!(
            ex.time(Field::ObservationTime, "hingga pukul 09.05 WIB"),
            NaiveTime::from_hms_opt(9, 5, 0)
        );
    }

    #[test]
    fn impossible_time_is_absent() {
        assert_eq!(exchange().time(Field::ObservationTime, "pukul 27:99 WIB"), None);
    }

    #[test]
    fn keyword_sets_percentage_sign() {
        let ex = exchange();
        assert_eq!(
            ex.number(Field::PercentageChange, "melemah 0.5% dari sebelumnya"),
            Some(-0.5)
        );
        assert_eq!(
            ex.number(Field::PercentageChange, "rupiah menguat 0,25% hari ini"),
            Some(0.25)
        );
    }

    #[test]
    fn signed_percentage_fallback() {
        let ex = exchange();
        assert_eq!(ex.number(Field::PercentageChange, "-0,12% dari sebelumnya"), Some(-0.12));
        assert_eq!(ex.first_match(Field::PercentageChange, "-0,12% dari sebelumnya"), Some(1));
        assert_eq!(ex.number(Field::PercentageChange, "turun 0,3 %"), Some(0.3));
    }

    #[test]
    fn commodity_change_sign_from_keyword() {
        let c = commodity();
        assert_eq!(c.number(Field::CommodityChange, "naik Rp 5.000/gram"), Some(5000.0));
        assert_eq!(c.number(Field::CommodityChange, "turun Rp 5.000/gram"), Some(-5000.0));
        assert_eq!(c.number(Field::CommodityChange, "Turun Rp28.000 dari kemarin"), Some(-28000.0));
        assert_eq!(c.number(Field::CommodityChange, "selisih - Rp 3.000"), Some(-3000.0));
    }

    #[test]
    fn commodity_prices() {
        let c = commodity();
        assert_eq!(
            c.number(Field::CommodityPrice, "Harga emas Antam Rp 1.000.000/gram"),
            Some(1_000_000.0)
        );
        assert_eq!(
            c.number(Field::BuybackPrice, "harga buyback Rp 900.000/gram"),
            Some(900_000.0)
        );
        assert_eq!(
            c.number(
                Field::BuybackChange,
                "Harga buyback Rp 2.725.000/gram, turun Rp31.000/gram."
            ),
            Some(-31_000.0)
        );
    }

    #[test]
    fn reference_market() {
        let c = commodity();
        let text = "Harga emas dunia di pasar spot berada di US$ 4.997,7/troy ons, bertambah 0,43%.";
        assert_eq!(c.number(Field::ReferencePrice, text), Some(4997.7));
        assert_eq!(c.number(Field::ReferenceChange, text), Some(0.43));
        assert_eq!(
            c.number(Field::ReferenceChange, "berkurang 1,1% di pasar Asia"),
            Some(-1.1)
        );
    }

    #[test]
    fn reference_change_keyword_before_comparison_sets_sign() {
        let c = commodity();
        assert_eq!(
            c.number(Field::ReferenceChange, "berkurang 0,43% dari hari sebelumnya"),
            Some(-0.43)
        );
        assert_eq!(
            c.number(Field::ReferenceChange, "bertambah 0,43% dari hari sebelumnya"),
            Some(0.43)
        );
        assert_eq!(
            c.first_match(Field::ReferenceChange, "berkurang 0,43% dari hari sebelumnya"),
            Some(0)
        );
    }

    #[test]
    fn reference_change_without_keyword_keeps_literal_sign() {
        let c = commodity();
        assert_eq!(
            c.number(Field::ReferenceChange, "melorot -0,2% dari hari sebelumnya"),
            Some(-0.2)
        );
        assert_eq!(
            c.number(Field::ReferenceChange, "naik tipis 0,2% dari hari sebelumnya"),
            Some(0.2)
        );
    }

    #[test]
    fn observation_date_text() {
        let c = commodity();
        assert_eq!(
            c.text(Field::ObservationDate, "Jakarta, 21 Februari 2026 - Harga emas"),
            Some("21 Februari 2026".to_string())
        );
        assert_eq!(
            c.text(Field::ObservationDate, "per 21/02/2026"),
            Some("21/02/2026".to_string())
        );
    }

    #[test]
    fn first_match_decides_even_when_literal_is_malformed() {
        let rule = PatternRule::new(
            Field::CurrentRate,
            &[
                (r"kurs ([\d.]+)/US\$", Capture::magnitude(1)),
                (r"bergerak ke ({num})", Capture::magnitude(1)),
            ],
        )
        .unwrap();
        let text = "kurs ./US$ lalu bergerak ke 16.100";
        assert_eq!(apply_rule(&rule, text), None);
    }

    #[test]
    fn earlier_alternative_wins_over_later_specific_one() {
        let rule = PatternRule::new(
            Field::CommodityChange,
            &[
                (r"naik\s*Rp\s*({num})", Capture::magnitude(1)),
                (
                    r"(turun)\s*Rp\s*({num})",
                    Capture::keyed(1, 2, &["turun"], NumberFormat::Grouped),
                ),
            ],
        )
        .unwrap();
        let both = "turun Rp 3.000/gram kemarin, hari ini naik Rp 5.000/gram";
        let only_first = PatternRule::new(
            Field::CommodityChange,
            &[(r"naik\s*Rp\s*({num})", Capture::magnitude(1))],
        )
        .unwrap();
        assert_eq!(apply_rule(&rule, both), Some(Extracted::Number(5000.0)));
        assert_eq!(apply_rule(&rule, both), apply_rule(&only_first, both));
    }

    #[test]
    fn missing_rule_is_absent() {
        let ex = exchange();
        assert_eq!(ex.extract(Field::CommodityPrice, "Rp 1.000/gram"), None);
        assert_eq!(ex.first_match(Field::CommodityPrice, "Rp 1.000/gram"), None);
    }
}
