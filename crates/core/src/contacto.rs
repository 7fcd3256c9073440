//! Rule sets for the `contacto` resource.
//!
//! Two rule sets are exported, one per route:
//!
//! - [`CREATE_CONTACTO`]: `name` and `email` are required, with Spanish
//!   user-facing messages and bail before the type/format check.
//! - [`UPDATE_CONTACTO`]: `facebook`, `instagram` and `linkedin` must each be
//!   a non-empty URL string; every check always runs.
//!
//! Rule sets are built once on first use and shared read-only.

use std::sync::LazyLock;

use crate::validation::evaluator::evaluate;
use crate::validation::rules::{FieldRule, FieldSet, RuleSet, ValidationOutcome};

pub const CREATE_RULE_SET: &str = "create";
pub const UPDATE_RULE_SET: &str = "update";

pub const NAME_REQUIRED: &str = "El nombre es requerido";
pub const EMAIL_REQUIRED: &str = "El email es requerido";

/// Social profile fields accepted by the update route.
pub const SOCIAL_FIELDS: [&str; 3] = ["facebook", "instagram", "linkedin"];

pub static CREATE_CONTACTO: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        CREATE_RULE_SET,
        vec![
            FieldRule::check("name")
                .not_empty()
                .with_message(NAME_REQUIRED)
                .bail()
                .is_string(),
            FieldRule::check("email")
                .not_empty()
                .with_message(EMAIL_REQUIRED)
                .bail()
                .is_email(),
        ],
    )
});

pub static UPDATE_CONTACTO: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(
        UPDATE_RULE_SET,
        SOCIAL_FIELDS
            .iter()
            .map(|field| FieldRule::check(*field).is_string().is_url().not_empty())
            .collect(),
    )
});

/// Apply the create-contact rules to a request's fields.
pub fn validate_create_contacto(fields: &FieldSet) -> ValidationOutcome {
    evaluate(&CREATE_CONTACTO, fields)
}

/// Apply the update-contact rules to a request's fields.
pub fn validate_update_contacto(fields: &FieldSet) -> ValidationOutcome {
    evaluate(&UPDATE_CONTACTO, fields)
}

/// Look up an exported rule set by name.
pub fn rule_set(name: &str) -> Option<&'static RuleSet> {
    match name {
        CREATE_RULE_SET => Some(&*CREATE_CONTACTO),
        UPDATE_RULE_SET => Some(&*UPDATE_CONTACTO),
        _ => None,
    }
}

/// All exported rule sets, in mount order.
pub fn rule_sets() -> [&'static RuleSet; 2] {
    [&*CREATE_CONTACTO, &*UPDATE_CONTACTO]
}
