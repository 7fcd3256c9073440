//! Contact request validation: rule model, interpreter, and the
//! `contacto` rule sets. No HTTP or database dependencies.

pub mod contacto;
pub mod error;
pub mod validation;
