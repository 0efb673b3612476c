//! Error types for the field-guard validation library.
//!
//! Two classes of problems exist in this crate. Configuration errors (an
//! unknown constraint kind, a malformed declaration, an option a builder
//! cannot parse) are detected when a record type's validation plan is
//! compiled and are returned as [`GuardError`]. Per-record validation
//! failures are never errors in this sense; they are collected as
//! [`ValidationError`](crate::core::ValidationError)s in a
//! [`ValidationReport`](crate::core::ValidationReport).

use thiserror::Error;

/// The main error type for the field-guard library.
#[derive(Error, Debug)]
pub enum GuardError {
    /// A declaration names a constraint kind that is not registered.
    #[error("Unknown constraint kind '{kind}'")]
    UnknownConstraint {
        /// The kind name as written in the declaration
        kind: String,
    },

    /// A declaration token is not of the form `kind=option`.
    #[error("Malformed constraint declaration '{declaration}': expected exactly one '='")]
    MalformedDeclaration {
        /// The offending declaration token
        declaration: String,
    },

    /// A builder could not parse the option text of a declaration.
    #[error("Invalid option '{options}' for constraint '{kind}': {reason}")]
    InvalidOption {
        /// The constraint kind
        kind: String,
        /// The raw option text
        options: String,
        /// Why the option was rejected
        reason: String,
    },

    /// A builder does not operate on the declared value kind of a field.
    #[error("Field is not {expected} (found {kind}). '{constraint}' only accepts {expected} fields")]
    UnsupportedKind {
        /// The constraint kind
        constraint: String,
        /// The declared value kind of the field
        kind: String,
        /// The category the constraint accepts
        expected: &'static str,
    },

    /// Building a declared constraint failed; wraps the builder's error with
    /// the record and field it was declared on.
    #[error("Error creating validation {record}.{field} '{declaration}': {source}")]
    Build {
        /// Record type name
        record: String,
        /// Field name
        field: String,
        /// The declaration token being compiled
        declaration: String,
        /// The builder error
        #[source]
        source: Box<GuardError>,
    },

    /// A null handle (`None`) was passed where a record was expected.
    #[error("Cannot validate a missing {record} record")]
    NullRecord {
        /// Record type name
        record: &'static str,
    },

    /// A compiled plan refers to a field the record did not provide.
    #[error("Record {record} has no value for field '{field}' at index {index}")]
    MissingField {
        /// Record type name
        record: String,
        /// Field name
        field: String,
        /// Field position from the plan
        index: usize,
    },

    /// Error loading or serializing configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, GuardError>`.
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates a new invalid option error.
    pub fn invalid_option(
        kind: impl Into<String>,
        options: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            kind: kind.into(),
            options: options.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new unsupported kind error.
    pub fn unsupported_kind(
        constraint: impl Into<String>,
        kind: impl ToString,
        expected: &'static str,
    ) -> Self {
        Self::UnsupportedKind {
            constraint: constraint.into(),
            kind: kind.to_string(),
            expected,
        }
    }

    /// Returns true for errors caused by constraint declarations or builder
    /// options, as opposed to misuse of the engine at validation time.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GuardError::UnknownConstraint { .. }
                | GuardError::MalformedDeclaration { .. }
                | GuardError::InvalidOption { .. }
                | GuardError::UnsupportedKind { .. }
                | GuardError::Build { .. }
                | GuardError::Configuration(_)
        )
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::Configuration(err.to_string())
    }
}
