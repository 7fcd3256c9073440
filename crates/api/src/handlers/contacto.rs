//! Handlers for the `/contacto` resource.
//!
//! Create and update run behind the validation finalizer (see
//! [`crate::middleware::validate`]) and echo the fields it collected, since
//! contacts are stored elsewhere. The rule listing and dry-run endpoints
//! apply the same rule sets without a finalizer.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use contacto_core::contacto;
use contacto_core::error::CoreError;
use contacto_core::validation::evaluator::evaluate;
use contacto_core::validation::rules::{
    FieldSet, FieldViolation, FinalizeMode, RuleSet, ValidationOutcome,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::validate::RequestFields;
use crate::response::{DataResponse, ValidatedResponse};
use crate::state::AppState;

/// POST /api/v1/contacto
///
/// Accept a new contact. In collect mode a failing request still reaches
/// this handler; its violations are returned alongside the data.
pub async fn create_contacto(
    Extension(outcome): Extension<ValidationOutcome>,
    Extension(RequestFields(fields)): Extension<RequestFields>,
) -> (StatusCode, Json<ValidatedResponse<FieldSet>>) {
    let validation_errors = match outcome {
        ValidationOutcome::Pass => Vec::new(),
        ValidationOutcome::Fail(violations) => violations,
    };

    tracing::info!(violations = validation_errors.len(), "Contact accepted");

    (
        StatusCode::CREATED,
        Json(ValidatedResponse {
            data: contacto::CREATE_CONTACTO.select(&fields),
            validation_errors,
        }),
    )
}

/// PUT /api/v1/contacto/social
///
/// Replace the contact's social profile links.
pub async fn update_contacto(
    Extension(outcome): Extension<ValidationOutcome>,
    Extension(RequestFields(fields)): Extension<RequestFields>,
) -> Json<ValidatedResponse<FieldSet>> {
    tracing::info!(
        violations = outcome.violations().len(),
        "Social links updated"
    );

    Json(ValidatedResponse {
        data: contacto::UPDATE_CONTACTO.select(&fields),
        validation_errors: outcome.violations().to_vec(),
    })
}

/// One rule set and how its route finalizes.
#[derive(Debug, Serialize)]
pub struct RuleSetInfo {
    #[serde(flatten)]
    pub rule_set: &'static RuleSet,
    pub finalize: FinalizeMode,
}

/// GET /api/v1/contacto/rules
///
/// Describe both rule sets and the finalize mode configured for each route.
pub async fn list_rule_sets(State(state): State<AppState>) -> Json<DataResponse<Vec<RuleSetInfo>>> {
    let modes = state.config.contacto;
    let data = contacto::rule_sets()
        .into_iter()
        .map(|rule_set| RuleSetInfo {
            rule_set,
            finalize: if rule_set.name == contacto::CREATE_RULE_SET {
                modes.create
            } else {
                modes.update
            },
        })
        .collect();

    Json(DataResponse { data })
}

/// Result of a dry-run validation.
#[derive(Debug, Serialize)]
pub struct DryRunResult {
    pub rule_set: &'static str,
    pub valid: bool,
    pub errors: Vec<FieldViolation>,
}

/// POST /api/v1/contacto/validate/{rule_set}
///
/// Evaluate a rule set against the supplied fields without finalizing.
/// Always 200 for a known rule set; 404 otherwise.
pub async fn dry_run(
    Path(name): Path<String>,
    payload: Result<Json<FieldSet>, JsonRejection>,
) -> AppResult<Json<DataResponse<DryRunResult>>> {
    let rule_set = contacto::rule_set(&name).ok_or(CoreError::UnknownRuleSet(name))?;
    let Json(fields) = payload.map_err(reject_payload)?;

    let outcome = evaluate(rule_set, &fields);
    tracing::debug!(
        rule_set = rule_set.name,
        valid = outcome.is_pass(),
        "Dry-run validation"
    );

    Ok(Json(DataResponse {
        data: DryRunResult {
            rule_set: rule_set.name,
            valid: outcome.is_pass(),
            errors: outcome.violations().to_vec(),
        },
    }))
}

fn reject_payload(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(format!("Invalid validation payload: {}", rejection.body_text()))
}
