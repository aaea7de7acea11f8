// Rule tables and the extractor that evaluates them
pub mod extractor;
pub mod rules;

pub use extractor::{Extracted, PatternExtractor};
pub use rules::{Capture, Field, PatternRule, RuleError, RuleTable};
