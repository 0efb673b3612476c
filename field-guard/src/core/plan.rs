//! Compilation of record descriptors into validation plans.

use super::constraint::BoundConstraint;
use super::record::{FieldDescriptor, RecordDescriptor};
use super::registry::ValidatorRegistry;
use crate::error::{GuardError, Result};
use std::fmt;
use tracing::{debug, instrument};

/// One `kind=option` token of a field's declaration string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// The constraint kind name
    pub kind: &'a str,
    /// The option text handed to the builder
    pub options: &'a str,
}

impl<'a> Declaration<'a> {
    /// Parses a single token. The token must contain exactly one `=`.
    pub fn parse(token: &'a str) -> Result<Self> {
        match token.split_once('=') {
            Some((kind, options)) if !options.contains('=') => Ok(Self { kind, options }),
            _ => Err(GuardError::MalformedDeclaration {
                declaration: token.to_string(),
            }),
        }
    }

    /// Parses every whitespace-separated token of a declaration string.
    pub fn parse_all(declarations: &'a str) -> Result<Vec<Self>> {
        declarations.split_whitespace().map(Self::parse).collect()
    }
}

impl fmt::Display for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.options)
    }
}

/// The compiled, ordered constraints of one record type.
///
/// Constraints are ordered by field (ascending field position) and, within a
/// field, by the order of their declarations. A plan is immutable once
/// built and is shared between threads behind an `Arc`.
#[derive(Debug)]
pub struct ValidationPlan {
    record: String,
    constraints: Vec<BoundConstraint>,
}

impl ValidationPlan {
    /// Creates a plan from already bound constraints.
    pub fn new(record: impl Into<String>, constraints: Vec<BoundConstraint>) -> Self {
        Self {
            record: record.into(),
            constraints,
        }
    }

    /// Name of the record type this plan validates.
    pub fn record(&self) -> &str {
        &self.record
    }

    pub fn constraints(&self) -> &[BoundConstraint] {
        &self.constraints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BoundConstraint> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl<'a> IntoIterator for &'a ValidationPlan {
    type Item = &'a BoundConstraint;
    type IntoIter = std::slice::Iter<'a, BoundConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}

/// Turns record descriptors into validation plans using the builders of a
/// [`ValidatorRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct PlanCompiler<'r> {
    registry: &'r ValidatorRegistry,
}

impl<'r> PlanCompiler<'r> {
    pub fn new(registry: &'r ValidatorRegistry) -> Self {
        Self { registry }
    }

    /// Compiles the constraints declared on `descriptor`.
    ///
    /// Any configuration problem aborts compilation: an unknown kind, a
    /// malformed token or a builder error is returned and no plan is
    /// produced. A descriptor without declarations compiles to the empty
    /// plan.
    #[instrument(skip(self, descriptor), fields(record = %descriptor.type_name()))]
    pub fn compile(&self, descriptor: &RecordDescriptor) -> Result<ValidationPlan> {
        let mut constraints = Vec::new();

        for (index, field) in descriptor.fields().iter().enumerate() {
            if !field.has_declarations() {
                continue;
            }
            for declaration in Declaration::parse_all(field.declarations())? {
                let bound = self.compile_declaration(descriptor, index, field, declaration)?;
                constraints.push(bound);
            }
        }

        Ok(ValidationPlan::new(descriptor.type_name(), constraints))
    }

    fn compile_declaration(
        &self,
        descriptor: &RecordDescriptor,
        index: usize,
        field: &FieldDescriptor,
        declaration: Declaration<'_>,
    ) -> Result<BoundConstraint> {
        let builder =
            self.registry
                .lookup(declaration.kind)?
                .ok_or_else(|| GuardError::UnknownConstraint {
                    kind: declaration.kind.to_string(),
                })?;

        let constraint = builder(declaration.options, field.kind()).map_err(|source| {
            GuardError::Build {
                record: descriptor.type_name().to_string(),
                field: field.name().to_string(),
                declaration: declaration.to_string(),
                source: Box::new(source),
            }
        })?;

        debug!(
            field = field.name(),
            index,
            kind = declaration.kind,
            options = declaration.options,
            "Compiled constraint"
        );
        Ok(BoundConstraint::new(field.name(), index, constraint))
    }
}
