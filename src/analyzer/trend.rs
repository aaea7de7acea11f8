use serde::{Deserialize, Serialize};

/// Sign of a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// Direction plus the word the vocabulary uses for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub direction: Direction,
    pub label: String,
}

/// Words used for each direction in one domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrendVocabulary {
    pub positive: String,
    pub negative: String,
    pub flat: String,
}

impl TrendVocabulary {
    /// Currency strength: the rupiah strengthens or weakens.
    pub fn currency() -> Self {
        Self {
            positive: "menguat".into(),
            negative: "melemah".into(),
            flat: "stagnan".into(),
        }
    }

    /// Commodity direction: the price rises or falls.
    pub fn commodity() -> Self {
        Self {
            positive: "naik".into(),
            negative: "turun".into(),
            flat: "stagnan".into(),
        }
    }

    pub fn label(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.positive,
            Direction::Down => &self.negative,
            Direction::Flat => &self.flat,
        }
    }
}

/// Maps signed deltas to trend labels of a single vocabulary.
#[derive(Debug, Clone)]
pub struct TrendClassifier {
    vocabulary: TrendVocabulary,
}

impl TrendClassifier {
    pub fn new(vocabulary: TrendVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &TrendVocabulary {
        &self.vocabulary
    }

    /// Missing or non-finite input has no trend; only an actual zero is flat.
    pub fn classify(&self, value: Option<f64>) -> Option<Trend> {
        let value = value.filter(|v| v.is_finite())?;
        let direction = if value > 0.0 {
            Direction::Up
        } else if value < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        };
        Some(Trend {
            direction,
            label: self.vocabulary.label(direction).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(classifier: &TrendClassifier, value: Option<f64>) -> Option<String> {
        classifier.classify(value).map(|t| t.label)
    }

    #[test]
    fn currency_vocabulary() {
        let c = TrendClassifier::new(TrendVocabulary::currency());
        assert_eq!(labels(&c, Some(0.5)).as_deref(), Some("menguat"));
        assert_eq!(labels(&c, Some(-0.5)).as_deref(), Some("melemah"));
        assert_eq!(labels(&c, Some(0.0)).as_deref(), Some("stagnan"));
    }

    #[test]
    fn commodity_vocabulary() {
        let c = TrendClassifier::new(TrendVocabulary::commodity());
        assert_eq!(labels(&c, Some(5000.0)).as_deref(), Some("naik"));
        assert_eq!(labels(&c, Some(-5000.0)).as_deref(), Some("turun"));
        assert_eq!(labels(&c, Some(-0.0)).as_deref(), Some("stagnan"));
    }

    #[test]
    fn absent_input_has_no_trend() {
        for vocabulary in [TrendVocabulary::currency(), TrendVocabulary::commodity()] {
            let c = TrendClassifier::new(vocabulary);
            assert_eq!(c.classify(None), None);
            assert_eq!(c.classify(Some(f64::NAN)), None);
        }
    }

    #[test]
    fn direction_follows_sign() {
        let c = TrendClassifier::new(TrendVocabulary::commodity());
        for value in [-1e9, -3.5, -1e-9, 1e-9, 2.0, 1e9] {
            let trend = c.classify(Some(value)).unwrap();
            let expected = if value > 0.0 { Direction::Up } else { Direction::Down };
            assert_eq!(trend.direction, expected, "value {value}");
        }
    }
}
