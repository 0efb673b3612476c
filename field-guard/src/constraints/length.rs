//! String length constraints (`min_length` and `max_length`).
//!
//! Length is counted in characters (Unicode scalar values), not bytes.

use crate::core::{Constraint, FieldValue, ValueKind};
use crate::error::{GuardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of length assertions that can be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthAssertion {
    /// String must be at least this length
    Min(usize),
    /// String must be at most this length
    Max(usize),
}

impl LengthAssertion {
    /// Returns the constraint kind name for this assertion.
    pub fn name(&self) -> &'static str {
        match self {
            LengthAssertion::Min(_) => "min_length",
            LengthAssertion::Max(_) => "max_length",
        }
    }

    /// Returns true if a string of `length` characters satisfies the assertion.
    pub fn holds(&self, length: usize) -> bool {
        match self {
            LengthAssertion::Min(min) => length >= *min,
            LengthAssertion::Max(max) => length <= *max,
        }
    }

    /// Returns the failure message for this assertion.
    fn failure(&self) -> String {
        match self {
            LengthAssertion::Min(min) => format!("must be at least {min} characters"),
            LengthAssertion::Max(max) => format!("must be no more than {max} characters"),
        }
    }
}

impl fmt::Display for LengthAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthAssertion::Min(min) => write!(f, "at least {min} characters"),
            LengthAssertion::Max(max) => write!(f, "at most {max} characters"),
        }
    }
}

/// A constraint that checks the character length of a string field.
///
/// # Examples
///
/// ```rust
/// use field_guard::constraints::LengthConstraint;
/// use field_guard::core::{Constraint, FieldValue};
///
/// let title = LengthConstraint::max(5);
/// assert!(title.check(&FieldValue::Str("12345")).is_none());
/// assert_eq!(
///     title.check(&FieldValue::Str("123456")).as_deref(),
///     Some("must be no more than 5 characters")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthConstraint {
    assertion: LengthAssertion,
}

impl LengthConstraint {
    pub fn new(assertion: LengthAssertion) -> Self {
        Self { assertion }
    }

    /// Creates a minimum length constraint.
    pub fn min(min_length: usize) -> Self {
        Self::new(LengthAssertion::Min(min_length))
    }

    /// Creates a maximum length constraint.
    pub fn max(max_length: usize) -> Self {
        Self::new(LengthAssertion::Max(max_length))
    }

    pub fn assertion(&self) -> LengthAssertion {
        self.assertion
    }
}

impl Constraint for LengthConstraint {
    fn name(&self) -> &str {
        self.assertion.name()
    }

    fn check(&self, value: &FieldValue<'_>) -> Option<String> {
        let Some(text) = value.as_str() else {
            return Some("is not of type string".to_string());
        };
        if self.assertion.holds(text.chars().count()) {
            None
        } else {
            Some(self.assertion.failure())
        }
    }
}

fn parse_bound(kind: &str, options: &str, field_kind: ValueKind) -> Result<usize> {
    if field_kind != ValueKind::String {
        return Err(GuardError::unsupported_kind(kind, field_kind, "string"));
    }
    options
        .parse::<usize>()
        .map_err(|e| GuardError::invalid_option(kind, options, e.to_string()))
}

/// Builder registered as `min_length`.
pub fn min_length_builder(options: &str, kind: ValueKind) -> Result<Box<dyn Constraint>> {
    let bound = parse_bound("min_length", options, kind)?;
    Ok(Box::new(LengthConstraint::min(bound)))
}

/// Builder registered as `max_length`.
pub fn max_length_builder(options: &str, kind: ValueKind) -> Result<Box<dyn Constraint>> {
    let bound = parse_bound("max_length", options, kind)?;
    Ok(Box::new(LengthConstraint::max(bound)))
}
