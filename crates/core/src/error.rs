use std::collections::BTreeSet;

use crate::validation::rules::FieldViolation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed for {} field(s)", count_fields(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Unknown rule set: {0}")]
    UnknownRuleSet(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Number of distinct fields named in a violation list.
fn count_fields(violations: &[FieldViolation]) -> usize {
    violations
        .iter()
        .map(|v| v.field.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}
