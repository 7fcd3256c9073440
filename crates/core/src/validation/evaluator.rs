//! Rule evaluator: pure logic, no request or I/O access.

use std::borrow::Cow;
use std::net::IpAddr;

use serde_json::Value;
use validator::{ValidateEmail, ValidateUrl};

use super::rules::{
    Check, Constraint, FieldRule, FieldSet, FieldViolation, RuleSet, Step, ValidationOutcome,
};

/// URL schemes accepted by [`Constraint::IsUrl`].
const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Evaluate every rule of `rule_set` against one request's fields.
///
/// Violations accumulate across fields; within a field a bail marker stops
/// evaluation once an earlier check has failed.
pub fn evaluate(rule_set: &RuleSet, fields: &FieldSet) -> ValidationOutcome {
    let violations = rule_set
        .rules
        .iter()
        .flat_map(|rule| evaluate_field(rule, fields))
        .collect();
    ValidationOutcome::from_violations(violations)
}

/// Evaluate a single field rule, returning its violations in check order.
pub fn evaluate_field(rule: &FieldRule, fields: &FieldSet) -> Vec<FieldViolation> {
    let value = fields.get(rule.field.as_ref());
    let mut violations = Vec::new();

    for step in &rule.steps {
        match step {
            Step::Bail if !violations.is_empty() => break,
            Step::Bail => {}
            Step::Check(check) => {
                if !satisfies(check.constraint, value) {
                    violations.push(violation(rule, check, value));
                }
            }
        }
    }

    violations
}

/// Whether `value` satisfies `constraint`.
pub fn satisfies(constraint: Constraint, value: Option<&Value>) -> bool {
    match constraint {
        Constraint::IsString => matches!(value, Some(Value::String(_))),
        Constraint::NotEmpty => text_of(value).is_some_and(|text| !text.is_empty()),
        Constraint::IsUrl => text_of(value).is_some_and(|text| is_web_url(&text)),
        Constraint::IsEmail => text_of(value).is_some_and(|text| text.validate_email()),
    }
}

/// Textual form of a field value.
///
/// Missing and `null` read as the empty string; arrays and objects have no
/// textual form.
fn text_of(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value {
        None | Some(Value::Null) => Some(Cow::Borrowed("")),
        Some(Value::String(s)) => Some(Cow::Borrowed(s.as_str())),
        Some(Value::Number(n)) => Some(Cow::Owned(n.to_string())),
        Some(Value::Bool(b)) => Some(Cow::Owned(b.to_string())),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}

/// Web link check with the defaults of a browser address bar.
///
/// The scheme may be omitted; when present it must be one of
/// [`URL_SCHEMES`]. The host must be an IP address or a domain name that
/// ends in a top-level domain, so `facebook.com/ana` passes and
/// `http://localhost` does not.
fn is_web_url(text: &str) -> bool {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }

    let prefixed;
    let url = match text.split_once("://") {
        Some((scheme, _)) if URL_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s)) => text,
        Some(_) => return false,
        None => {
            prefixed = format!("http://{text}");
            prefixed.as_str()
        }
    };

    url.validate_url() && host_of(url).is_some_and(is_routable_host)
}

/// Host part of an absolute URL, without credentials, port or brackets.
fn host_of(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    if let Some(bracketed) = host_port.strip_prefix('[') {
        return bracketed.split_once(']').map(|(host, _)| host);
    }
    Some(host_port.split_once(':').map_or(host_port, |(host, _)| host))
}

/// IP literal, or a dotted domain name whose last label is a real TLD.
fn is_routable_host(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }

    let host = host.strip_suffix('.').unwrap_or(host);
    let labels: Vec<&str> = host.split('.').collect();
    let Some((tld, _)) = labels.split_last() else {
        return false;
    };

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });
    let tld_ok = tld.to_ascii_lowercase().starts_with("xn--")
        || (tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic));

    labels.len() >= 2 && labels_ok && tld_ok
}

fn violation(rule: &FieldRule, check: &Check, value: Option<&Value>) -> FieldViolation {
    FieldViolation {
        field: rule.field.to_string(),
        constraint: check.constraint,
        message: check.message().to_string(),
        value: value.cloned(),
    }
}
