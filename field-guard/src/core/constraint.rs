//! Constraint trait and related types for validation rules.

use super::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// A single failed check: the field it concerns and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    /// Name of the field that failed
    pub key: String,
    /// What is wrong with the field's value
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The failures of one validation run, in plan order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Returns the errors reported for `key`.
    pub fn for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |err| err.key == key)
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.0.first() else {
            return f.write_str("no validation errors");
        };
        write!(f, "{first}")?;
        if self.0.len() > 1 {
            write!(f, " and {} other errors.", self.0.len() - 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A compiled check against the value of one field.
///
/// Constraints are produced by a builder registered in the
/// [`ValidatorRegistry`](crate::core::ValidatorRegistry) and are immutable
/// afterwards; one instance is shared by every validation of its record type,
/// possibly from many threads at once.
///
/// # Examples
///
/// ```rust
/// use field_guard::core::{Constraint, FieldValue};
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Constraint for Even {
///     fn name(&self) -> &str {
///         "even"
///     }
///
///     fn check(&self, value: &FieldValue<'_>) -> Option<String> {
///         match value.as_i64() {
///             Some(v) if v % 2 == 0 => None,
///             Some(_) => Some("must be even".to_string()),
///             None => Some("is not convertible to type int64".to_string()),
///         }
///     }
/// }
///
/// assert!(Even.check(&FieldValue::Int32(4)).is_none());
/// assert_eq!(Even.check(&FieldValue::Int32(3)).as_deref(), Some("must be even"));
/// ```
pub trait Constraint: Debug + Send + Sync {
    /// Returns the constraint kind name (e.g. `"min_length"`).
    fn name(&self) -> &str;

    /// Checks a value, returning the failure message if it does not pass.
    ///
    /// The message is phrased to follow the field name, e.g.
    /// `"must be at least 3 characters"`.
    fn check(&self, value: &FieldValue<'_>) -> Option<String>;
}

/// A constraint bound to the field it was declared on.
///
/// The binding is fixed when the plan is compiled and cannot change.
#[derive(Debug)]
pub struct BoundConstraint {
    field_name: String,
    field_index: usize,
    constraint: Box<dyn Constraint>,
}

impl BoundConstraint {
    pub fn new(
        field_name: impl Into<String>,
        field_index: usize,
        constraint: Box<dyn Constraint>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_index,
            constraint,
        }
    }

    /// Name of the field this constraint checks.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Position of the field in its record descriptor.
    pub fn field_index(&self) -> usize {
        self.field_index
    }

    /// Kind name of the underlying constraint.
    pub fn kind(&self) -> &str {
        self.constraint.name()
    }

    pub fn constraint(&self) -> &dyn Constraint {
        self.constraint.as_ref()
    }

    /// Runs the check, keying any failure by the bound field name.
    pub fn validate(&self, value: &FieldValue<'_>) -> Option<ValidationError> {
        self.constraint
            .check(value)
            .map(|message| ValidationError::new(self.field_name.as_str(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NotBlank;

    impl Constraint for NotBlank {
        fn name(&self) -> &str {
            "not_blank"
        }

        fn check(&self, value: &FieldValue<'_>) -> Option<String> {
            match value.as_str() {
                Some(s) if !s.trim().is_empty() => None,
                Some(_) => Some("must not be blank".to_string()),
                None => Some("is not of type string".to_string()),
            }
        }
    }

    #[test]
    fn test_bound_constraint_keys_errors_by_field() {
        let bound = BoundConstraint::new("title", 2, Box::new(NotBlank));
        assert_eq!(bound.field_name(), "title");
        assert_eq!(bound.field_index(), 2);
        assert_eq!(bound.kind(), "not_blank");

        assert!(bound.validate(&FieldValue::Str("x")).is_none());
        let err = bound.validate(&FieldValue::Str("  ")).unwrap();
        assert_eq!(err, ValidationError::new("title", "must not be blank"));
        assert_eq!(err.to_string(), "title must not be blank");
    }

    #[test]
    fn test_validation_errors_display() {
        let none = ValidationErrors::default();
        assert_eq!(none.to_string(), "no validation errors");

        let one = ValidationErrors::new(vec![ValidationError::new("a", "is wrong")]);
        assert_eq!(one.to_string(), "a is wrong");

        let three = ValidationErrors::new(vec![
            ValidationError::new("a", "is wrong"),
            ValidationError::new("b", "is wrong"),
            ValidationError::new("c", "is wrong"),
        ]);
        assert_eq!(three.to_string(), "a is wrong and 2 other errors.");
        assert_eq!(three.for_key("b").count(), 1);
    }

    #[test]
    fn test_validation_errors_serialize_as_list() {
        let errors = ValidationErrors::new(vec![ValidationError::new("email", "is bad")]);
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"[{"key":"email","message":"is bad"}]"#);
    }
}
