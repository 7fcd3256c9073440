//! Validation rule, outcome, and finalize-mode types.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

/// Message reported by a check that carries no custom message.
pub const DEFAULT_MESSAGE: &str = "Invalid value";

/// Request fields keyed by name, as gathered from the body and query string.
pub type FieldSet = serde_json::Map<String, Value>;

/// A single constraint a field value can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    NotEmpty,
    IsString,
    IsUrl,
    IsEmail,
}

impl Constraint {
    pub fn as_str(self) -> &'static str {
        match self {
            Constraint::NotEmpty => "not_empty",
            Constraint::IsString => "is_string",
            Constraint::IsUrl => "is_url",
            Constraint::IsEmail => "is_email",
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint with its optional user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub constraint: Constraint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Cow<'static, str>>,
}

impl Check {
    /// The message to report when this check fails.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }
}

/// One entry in a field's ordered check sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Check(Check),
    /// Stop evaluating this field if any earlier check failed.
    Bail,
}

/// The ordered checks applied to one request field.
///
/// Built with a chained builder that reads like the rule it describes:
///
/// ```
/// use contacto_core::validation::rules::FieldRule;
///
/// let rule = FieldRule::check("name")
///     .not_empty()
///     .with_message("El nombre es requerido")
///     .bail()
///     .is_string();
/// assert_eq!(rule.steps.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRule {
    pub field: Cow<'static, str>,
    pub steps: Vec<Step>,
}

impl FieldRule {
    /// Start a rule for `field` with no checks.
    pub fn check(field: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            steps: Vec::new(),
        }
    }

    pub fn not_empty(self) -> Self {
        self.push(Constraint::NotEmpty)
    }

    pub fn is_string(self) -> Self {
        self.push(Constraint::IsString)
    }

    pub fn is_url(self) -> Self {
        self.push(Constraint::IsUrl)
    }

    pub fn is_email(self) -> Self {
        self.push(Constraint::IsEmail)
    }

    /// Attach a custom message to the most recently added check.
    ///
    /// Has no effect on a rule without checks.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        let last_check = self.steps.iter_mut().rev().find_map(|step| match step {
            Step::Check(check) => Some(check),
            Step::Bail => None,
        });
        if let Some(check) = last_check {
            check.message = Some(message.into());
        }
        self
    }

    /// Stop checking this field past this point if an earlier check failed.
    pub fn bail(mut self) -> Self {
        self.steps.push(Step::Bail);
        self
    }

    /// The checks of this rule in evaluation order, ignoring bail markers.
    pub fn checks(&self) -> impl Iterator<Item = &Check> {
        self.steps.iter().filter_map(|step| match step {
            Step::Check(check) => Some(check),
            Step::Bail => None,
        })
    }

    fn push(mut self, constraint: Constraint) -> Self {
        self.steps.push(Step::Check(Check {
            constraint,
            message: None,
        }));
        self
    }
}

/// A named, ordered list of field rules applied to one request type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    pub name: &'static str,
    pub rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new(name: &'static str, rules: Vec<FieldRule>) -> Self {
        Self { name, rules }
    }

    /// Field names covered by this rule set, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.field.as_ref())
    }

    /// The subset of `fields` this rule set names, values untouched.
    pub fn select(&self, fields: &FieldSet) -> FieldSet {
        self.fields()
            .filter_map(|name| fields.get(name).map(|value| (name.to_string(), value.clone())))
            .collect()
    }
}

/// A single field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub constraint: Constraint,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Result of applying a rule set to one request.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Pass,
    /// Violations in evaluation order; never empty.
    Fail(Vec<FieldViolation>),
}

impl ValidationOutcome {
    pub fn from_violations(violations: Vec<FieldViolation>) -> Self {
        if violations.is_empty() {
            ValidationOutcome::Pass
        } else {
            ValidationOutcome::Fail(violations)
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationOutcome::Pass)
    }

    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ValidationOutcome::Pass => &[],
            ValidationOutcome::Fail(violations) => violations,
        }
    }

    /// Messages reported for `field`, in evaluation order.
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.violations()
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.message.as_str())
            .collect()
    }
}

/// What the finalizer does with a failing outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalizeMode {
    /// Short-circuit the request with the error list.
    #[default]
    Respond,
    /// Record the outcome on the request and let the handler run.
    Collect,
}

impl FinalizeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FinalizeMode::Respond => "respond",
            FinalizeMode::Collect => "collect",
        }
    }
}

impl FromStr for FinalizeMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "respond" => Ok(FinalizeMode::Respond),
            "collect" => Ok(FinalizeMode::Collect),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown finalize mode '{other}' (expected 'respond' or 'collect')"
            ))),
        }
    }
}
