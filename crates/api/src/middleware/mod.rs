//! Request middleware.
//!
//! - [`validate::validate`] -- Applies a contact rule set and finalizes the outcome.

pub mod validate;
