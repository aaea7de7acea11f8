// Analyzer module: trend labels and record assembly on top of the parser.

pub mod record_builder;
pub mod trend;

pub use record_builder::RecordBuilder;
pub use trend::{Direction, Trend, TrendClassifier, TrendVocabulary};
