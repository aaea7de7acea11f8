//! Declarative rule tables: field → ordered list of pattern alternatives.
//!
//! Alternatives are tried top to bottom and the first one whose pattern
//! matches decides the field, even when its literal then fails to normalize.
//! Several alternatives overlap on purpose (they were collected from
//! different article phrasings); their order is the only tie-breaker.

use crate::normalizer::NumberFormat;
use regex::{Regex, RegexBuilder};
use std::fmt;
use thiserror::Error;

/// Version of the built-in tables. Bump when an alternative is added, removed or reordered.
pub const RULES_VERSION: &str = "2026.10.2";

/// Words that mark a currency move as weakening. Used by the keyed
/// percentage rule and by the secondary-currency probes.
pub const CURRENCY_NEGATIVE_KEYWORDS: &[&str] = &["melemah"];

/// Grouped number: `16.100`, `1.000.000`, `4.997,7`.
const NUM: &str = r"\d+(?:[.,]\d+)*";
/// Percent figure: `0.5`, `0,43`.
const PCT: &str = r"\d+(?:[.,]\d+)?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    OpeningRate,
    CurrentRate,
    ObservationTime,
    PercentageChange,
    CommodityPrice,
    CommodityChange,
    BuybackPrice,
    BuybackChange,
    ReferencePrice,
    ReferenceChange,
    ObservationDate,
}

/// Shape of the value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Time,
    Text,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::OpeningRate => "opening_rate",
            Field::CurrentRate => "current_rate",
            Field::ObservationTime => "observation_time",
            Field::PercentageChange => "percentage_change",
            Field::CommodityPrice => "commodity_price",
            Field::CommodityChange => "commodity_change",
            Field::BuybackPrice => "buyback_price",
            Field::BuybackChange => "buyback_change",
            Field::ReferencePrice => "reference_price",
            Field::ReferenceChange => "reference_change",
            Field::ObservationDate => "observation_date",
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            Field::ObservationTime => ValueKind::Time,
            Field::ObservationDate => ValueKind::Text,
            _ => ValueKind::Number,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the groups of a matched alternative become a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// Unsigned amount; any sign in the literal is discarded.
    Magnitude { group: usize, format: NumberFormat },
    /// Amount whose sign is written in the literal itself (`-0,3%`, `+ Rp 5.000`).
    Signed { group: usize, format: NumberFormat },
    /// Keyword group decides the sign of the amount group. When the keyword
    /// group is optional and did not participate, the literal's own sign stands.
    Keyed {
        keyword_group: usize,
        value_group: usize,
        negative: &'static [&'static str],
        format: NumberFormat,
    },
    /// `HH:MM` or `HH.MM` time of day.
    Time { group: usize },
    /// Verbatim text.
    Text { group: usize },
}

impl Capture {
    pub fn magnitude(group: usize) -> Self {
        Capture::Magnitude {
            group,
            format: NumberFormat::Grouped,
        }
    }

    pub fn signed(group: usize, format: NumberFormat) -> Self {
        Capture::Signed { group, format }
    }

    pub fn keyed(
        keyword_group: usize,
        value_group: usize,
        negative: &'static [&'static str],
        format: NumberFormat,
    ) -> Self {
        Capture::Keyed {
            keyword_group,
            value_group,
            negative,
            format,
        }
    }

    fn kind(&self) -> ValueKind {
        match self {
            Capture::Magnitude { .. } | Capture::Signed { .. } | Capture::Keyed { .. } => {
                ValueKind::Number
            }
            Capture::Time { .. } => ValueKind::Time,
            Capture::Text { .. } => ValueKind::Text,
        }
    }

    fn groups(&self) -> Vec<usize> {
        match *self {
            Capture::Magnitude { group, .. }
            | Capture::Signed { group, .. }
            | Capture::Time { group }
            | Capture::Text { group } => vec![group],
            Capture::Keyed {
                keyword_group,
                value_group,
                ..
            } => vec![keyword_group, value_group],
        }
    }
}

/// A defect in a rule table. Never caused by article content.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("{field} alternative {index}: invalid pattern: {source}")]
    InvalidPattern {
        field: Field,
        index: usize,
        #[source]
        source: regex::Error,
    },
    #[error("{field} alternative {index}: group {group} does not exist (pattern has {available})")]
    MissingGroup {
        field: Field,
        index: usize,
        group: usize,
        available: usize,
    },
    #[error("{field} alternative {index}: capture yields {found:?} but field holds {expected:?}")]
    KindMismatch {
        field: Field,
        index: usize,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("{field} has no alternatives")]
    EmptyRule { field: Field },
    #[error("{field} is listed twice in table '{table}'")]
    DuplicateField { table: &'static str, field: Field },
    #[error("table '{table}' has no rule for {field}")]
    MissingField { table: &'static str, field: Field },
    #[error("secondary currency '{name}': invalid probe: {source}")]
    InvalidProbe {
        name: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Alternative {
    pub regex: Regex,
    pub capture: Capture,
}

/// Priority-ordered alternatives for one field.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub field: Field,
    alternatives: Vec<Alternative>,
}

impl PatternRule {
    /// Compiles `(pattern, capture)` pairs, case-insensitively, in the order given.
    ///
    /// `{num}` in a pattern stands for a grouped number literal and `{pct}` for a
    /// percent figure.
    pub fn new(field: Field, specs: &[(&str, Capture)]) -> Result<Self, RuleError> {
        if specs.is_empty() {
            return Err(RuleError::EmptyRule { field });
        }
        let mut alternatives = Vec::with_capacity(specs.len());
        for (index, (pattern, capture)) in specs.iter().enumerate() {
            let pattern = pattern.replace("{num}", NUM).replace("{pct}", PCT);
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| RuleError::InvalidPattern {
                    field,
                    index,
                    source,
                })?;

            // captures_len counts the implicit whole-match group 0
            let available = regex.captures_len() - 1;
            if let Some(group) = capture
                .groups()
                .into_iter()
                .find(|&g| g == 0 || g > available)
            {
                return Err(RuleError::MissingGroup {
                    field,
                    index,
                    group,
                    available,
                });
            }
            if capture.kind() != field.kind() {
                return Err(RuleError::KindMismatch {
                    field,
                    index,
                    expected: field.kind(),
                    found: capture.kind(),
                });
            }
            alternatives.push(Alternative {
                regex,
                capture: capture.clone(),
            });
        }
        Ok(Self {
            field,
            alternatives,
        })
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }
}

/// Named, versioned set of rules, one per field.
#[derive(Debug, Clone)]
pub struct RuleTable {
    name: &'static str,
    version: &'static str,
    rules: Vec<PatternRule>,
}

impl RuleTable {
    pub fn new(
        name: &'static str,
        version: &'static str,
        rules: Vec<PatternRule>,
    ) -> Result<Self, RuleError> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.field == rule.field) {
                return Err(RuleError::DuplicateField {
                    table: name,
                    field: rule.field,
                });
            }
        }
        Ok(Self {
            name,
            version,
            rules,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn rule(&self, field: Field) -> Option<&PatternRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules.iter().map(|r| r.field)
    }

    /// Replaces the rule for `rule.field`, or appends it when the table has none.
    pub fn with_rule(mut self, rule: PatternRule) -> Self {
        match self.rules.iter_mut().find(|r| r.field == rule.field) {
            Some(slot) => *slot = rule,
            None => self.rules.push(rule),
        }
        self
    }

    pub fn require(&self, fields: &[Field]) -> Result<(), RuleError> {
        match fields.iter().find(|f| self.rule(**f).is_none()) {
            Some(&field) => Err(RuleError::MissingField {
                table: self.name,
                field,
            }),
            None => Ok(()),
        }
    }

    /// Rupiah against US$.
    pub fn exchange_rate() -> Result<Self, RuleError> {
        let opening = PatternRule::new(
            Field::OpeningRate,
            &[
                (r"level\s+({num})\s*/\s*US\$", Capture::magnitude(1)),
                (r"pembukaan[^/]+?({num})\s*/\s*US\$", Capture::magnitude(1)),
                (r"pada\s+pembukaan[^/]+?({num})", Capture::magnitude(1)),
                (r"dibuka[^/]+?({num})\s*/\s*US\$", Capture::magnitude(1)),
                (r"Rp\s*({num})\s*/\s*US\$\s+pada pembukaan", Capture::magnitude(1)),
                (r"pada pembukaan[^/]+?Rp\s*({num})", Capture::magnitude(1)),
            ],
        )?;

        let current = PatternRule::new(
            Field::CurrentRate,
            &[
                (r"bergerak[\s\w]+?({num})\s*/\s*US\$", Capture::magnitude(1)),
                (r"berada[\s\w]+?({num})\s*/\s*US\$", Capture::magnitude(1)),
                (r"diperdagangkan[\s\w]+?({num})\s*/\s*US\$", Capture::magnitude(1)),
                (r"rupiah dihargai\s*({num})\s*/\s*US\$", Capture::magnitude(1)),
            ],
        )?;

        let time = PatternRule::new(
            Field::ObservationTime,
            &[
                (r"pukul\s*(\d{1,2}[:.]\d{2})\s*WIB", Capture::Time { group: 1 }),
                (r"(\d{1,2}[:.]\d{2})\s*WIB", Capture::Time { group: 1 }),
                (r"pada\s*(\d{1,2}:\d{2})", Capture::Time { group: 1 }),
            ],
        )?;

        let percentage = PatternRule::new(
            Field::PercentageChange,
            &[
                (
                    r"(melemah|menguat)\s*({pct})\s*%",
                    Capture::keyed(1, 2, CURRENCY_NEGATIVE_KEYWORDS, NumberFormat::Percent),
                ),
                (
                    r"([+-]?{pct})\s*%\s*(?:dari sebelumnya|terhadap.*sebelumnya)",
                    Capture::signed(1, NumberFormat::Percent),
                ),
                (
                    r"([+-]?{pct})\s*%",
                    Capture::signed(1, NumberFormat::Percent),
                ),
            ],
        )?;

        Self::new(
            "exchange_rate",
            RULES_VERSION,
            vec![opening, current, time, percentage],
        )
    }

    /// Antam gold, buyback and the international reference price.
    pub fn commodity() -> Result<Self, RuleError> {
        let price = PatternRule::new(
            Field::CommodityPrice,
            &[
                (r"Rp\s*({num})\s*/\s*gram", Capture::magnitude(1)),
                (r"Antam[\s\w]+?Rp\s*({num})", Capture::magnitude(1)),
                (r"harga emas[\s\w]+?Rp\s*({num})", Capture::magnitude(1)),
            ],
        )?;

        let change = PatternRule::new(
            Field::CommodityChange,
            &[
                (
                    r"(naik|turun)\s*Rp\s*({num})\s*/\s*gram",
                    Capture::keyed(1, 2, &["turun"], NumberFormat::Grouped),
                ),
                (
                    r"(naik|turun)\s*Rp\s*({num})",
                    Capture::keyed(1, 2, &["turun"], NumberFormat::Grouped),
                ),
                (
                    r"([+-]\s*Rp\s*{num})",
                    Capture::signed(1, NumberFormat::Grouped),
                ),
            ],
        )?;

        let buyback = PatternRule::new(
            Field::BuybackPrice,
            &[
                (r"buyback[\s\w]+?Rp\s*({num})", Capture::magnitude(1)),
                (r"harga buyback[\s\w]+?Rp\s*({num})", Capture::magnitude(1)),
                (r"Rp\s*({num})\s*/\s*gram.*buyback", Capture::magnitude(1)),
            ],
        )?;

        let buyback_change = PatternRule::new(
            Field::BuybackChange,
            &[(
                r"buyback.{0,80}?(naik|turun)\s*(?:sebesar\s*)?Rp\s*({num})",
                Capture::keyed(1, 2, &["turun"], NumberFormat::Grouped),
            )],
        )?;

        let reference = PatternRule::new(
            Field::ReferencePrice,
            &[
                (r"emas dunia[\s\w]+?US\$\s*({num})", Capture::magnitude(1)),
                (r"global[\s\w]+?US\$\s*({num})", Capture::magnitude(1)),
                (r"spot[\s\w]+?US\$\s*({num})", Capture::magnitude(1)),
                (r"XAU/USD[\s\w]+?({num})", Capture::magnitude(1)),
            ],
        )?;

        let reference_change = PatternRule::new(
            Field::ReferenceChange,
            &[
                (
                    r"(?:(bertambah|berkurang)\s*)?([+-]?{pct})\s*%\s*(?:dari hari sebelumnya|pada.*sebelumnya)",
                    Capture::keyed(1, 2, &["berkurang"], NumberFormat::Percent),
                ),
                (
                    r"(bertambah|berkurang)\s*({pct})\s*%",
                    Capture::keyed(1, 2, &["berkurang"], NumberFormat::Percent),
                ),
            ],
        )?;

        let date = PatternRule::new(
            Field::ObservationDate,
            &[
                (r"(\d{1,2}\s+[[:alpha:]]+\s+\d{4})", Capture::Text { group: 1 }),
                (r"(\d{1,2}/\d{1,2}/\d{4})", Capture::Text { group: 1 }),
                (r"([[:alpha:]]+\s+\d{1,2},\s+\d{4})", Capture::Text { group: 1 }),
            ],
        )?;

        Self::new(
            "commodity",
            RULES_VERSION,
            vec![
                price,
                change,
                buyback,
                buyback_change,
                reference,
                reference_change,
                date,
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_compile() {
        let exchange = RuleTable::exchange_rate().unwrap();
        assert_eq!(
            exchange.fields().collect::<Vec<_>>(),
            vec![
                Field::OpeningRate,
                Field::CurrentRate,
                Field::ObservationTime,
                Field::PercentageChange
            ]
        );
        let commodity = RuleTable::commodity().unwrap();
        assert_eq!(commodity.fields().count(), 7);
        assert_eq!(commodity.version(), RULES_VERSION);
    }

    #[test]
    fn alternatives_keep_declared_order() {
        let table = RuleTable::exchange_rate().unwrap();
        let rule = table.rule(Field::PercentageChange).unwrap();
        assert_eq!(rule.alternatives().len(), 3);
        assert!(matches!(rule.alternatives()[0].capture, Capture::Keyed { .. }));
        assert!(rule.alternatives()[0].regex.as_str().starts_with("(melemah|menguat)"));
    }

    #[test]
    fn missing_group_is_rejected() {
        let err = PatternRule::new(Field::CurrentRate, &[(r"bergerak (\d+)", Capture::magnitude(2))])
            .unwrap_err();
        assert!(matches!(
            err,
            RuleError::MissingGroup {
                group: 2,
                available: 1,
                ..
            }
        ));
    }

    #[test]
    fn group_zero_is_rejected() {
        let err = PatternRule::new(Field::CurrentRate, &[(r"\d+", Capture::magnitude(0))]).unwrap_err();
        assert!(matches!(err, RuleError::MissingGroup { group: 0, .. }));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = PatternRule::new(Field::CurrentRate, &[(r"(\d+", Capture::magnitude(1))]).unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { index: 0, .. }));
    }

    #[test]
    fn capture_kind_must_fit_field() {
        let err = PatternRule::new(Field::OpeningRate, &[(r"(\d+)", Capture::Text { group: 1 })])
            .unwrap_err();
        assert!(matches!(err, RuleError::KindMismatch { .. }));
    }

    #[test]
    fn empty_and_duplicate_rules_are_rejected() {
        assert!(matches!(
            PatternRule::new(Field::OpeningRate, &[]),
            Err(RuleError::EmptyRule { .. })
        ));
        let rule = PatternRule::new(Field::OpeningRate, &[(r"(\d+)", Capture::magnitude(1))]).unwrap();
        let err = RuleTable::new("t", "0", vec![rule.clone(), rule]).unwrap_err();
        assert!(matches!(err, RuleError::DuplicateField { .. }));
    }

    #[test]
    fn with_rule_replaces_in_place() {
        let table = RuleTable::commodity().unwrap();
        let position = table.fields().position(|f| f == Field::CommodityChange);
        let rule = PatternRule::new(Field::CommodityChange, &[(r"naik ({num})", Capture::magnitude(1))])
            .unwrap();
        let table = table.with_rule(rule);
        assert_eq!(table.fields().position(|f| f == Field::CommodityChange), position);
        assert_eq!(table.rule(Field::CommodityChange).unwrap().alternatives().len(), 1);
    }

    #[test]
    fn require_reports_missing_field() {
        let rule = PatternRule::new(Field::OpeningRate, &[(r"(\d+)", Capture::magnitude(1))]).unwrap();
        let table = RuleTable::new("t", "0", vec![rule]).unwrap();
        assert!(table.require(&[Field::OpeningRate]).is_ok());
        assert!(matches!(
            table.require(&[Field::OpeningRate, Field::CurrentRate]),
            Err(RuleError::MissingField {
                field: Field::CurrentRate,
                ..
            })
        ));
    }
}
