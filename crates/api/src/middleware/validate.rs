//! Validation finalizer.
//!
//! Applies a [`RuleSet`] to the request's fields and decides whether the
//! request proceeds. Mount per route with
//! `axum::middleware::from_fn_with_state(RuleGuard::new(..), validate)`.
//!
//! Whenever the handler runs, the outcome and the fields it was computed
//! from are inserted into request extensions. Handlers read them with
//! `Extension<ValidationOutcome>` and `Extension<RequestFields>` instead of
//! parsing the body a second time.

use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::extract::{Query, Request, State};
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::Response;
use contacto_core::error::CoreError;
use contacto_core::validation::evaluator::evaluate;
use contacto_core::validation::rules::{FieldSet, FinalizeMode, RuleSet, ValidationOutcome};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Middleware state: which rules to apply and what to do on failure.
#[derive(Debug, Clone, Copy)]
pub struct RuleGuard {
    pub rules: &'static RuleSet,
    pub mode: FinalizeMode,
    pub body_limit: usize,
}

impl RuleGuard {
    pub fn new(rules: &'static RuleSet, mode: FinalizeMode, body_limit: usize) -> Self {
        Self {
            rules,
            mode,
            body_limit,
        }
    }
}

/// Fields gathered from the body and query string of a validated request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFields(pub FieldSet);

/// Evaluate the guard's rule set and either forward or reject the request.
///
/// - Pass: the request continues with its body intact.
/// - Fail in [`FinalizeMode::Respond`]: 400 with the violation list; the
///   handler is not invoked.
/// - Fail in [`FinalizeMode::Collect`]: the request continues and the
///   handler decides.
pub async fn validate(
    State(guard): State<RuleGuard>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, guard.body_limit)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;

    let fields = collect_fields(&parts.uri, &bytes)?;
    let outcome = evaluate(guard.rules, &fields);

    let outcome = match (outcome, guard.mode) {
        (ValidationOutcome::Fail(violations), FinalizeMode::Respond) => {
            tracing::info!(
                rule_set = guard.rules.name,
                violations = violations.len(),
                "Rejecting request that failed validation"
            );
            return Err(CoreError::Validation(violations).into());
        }
        (outcome, mode) => {
            if outcome.is_pass() {
                tracing::debug!(rule_set = guard.rules.name, "Validation passed");
            } else {
                tracing::warn!(
                    rule_set = guard.rules.name,
                    violations = outcome.violations().len(),
                    mode = mode.as_str(),
                    "Validation failed; forwarding with collected errors"
                );
            }
            outcome
        }
    };

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(outcome);
    request.extensions_mut().insert(RequestFields(fields));
    Ok(next.run(request).await)
}

/// Gather request fields from the JSON body and the query string.
///
/// Body fields win; query parameters only fill in fields the body lacks.
/// An empty body is treated as no fields.
fn collect_fields(uri: &Uri, body: &[u8]) -> AppResult<FieldSet> {
    let mut fields = if body.is_empty() {
        FieldSet::new()
    } else {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(AppError::BadRequest(
                    "Request body must be a JSON object".to_string(),
                ))
            }
            Err(e) => return Err(AppError::BadRequest(format!("Invalid JSON body: {e}"))),
        }
    };

    if uri.query().is_some() {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
            .map_err(|e| AppError::BadRequest(format!("Invalid query string: {e}")))?;
        for (name, value) in params {
            fields.entry(name).or_insert(Value::String(value));
        }
    }

    Ok(fields)
}
