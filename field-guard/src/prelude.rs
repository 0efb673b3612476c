//! Prelude for commonly used types and traits in field-guard.

pub use crate::config::ValidatorConfig;
pub use crate::core::{
    Constraint, FieldValue, Record, Validatable, ValidationError, ValidationErrors,
    ValidationReport, Validator, ValueKind,
};
pub use crate::error::{GuardError, Result};
pub use crate::logging::LogConfig;
