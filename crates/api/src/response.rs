//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Routes whose
//! validation runs in collect mode add the violations next to the data.

use contacto_core::validation::rules::FieldViolation;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "validation_errors": [...] }` envelope.
///
/// `validation_errors` is omitted when the request passed validation.
#[derive(Debug, Serialize)]
pub struct ValidatedResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<FieldViolation>,
}
