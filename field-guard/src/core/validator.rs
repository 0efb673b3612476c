//! The validation engine.

use super::cache::PlanCache;
use super::constraint::{Constraint, ValidationError, ValidationErrors};
use super::plan::{PlanCompiler, ValidationPlan};
use super::record::{Record, Validatable};
use super::registry::ValidatorRegistry;
use super::value::ValueKind;
use crate::config::ValidatorConfig;
use crate::error::{GuardError, Result};
use crate::logging::truncate_field;
use crate::{log_compilation, log_failure};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

/// The outcome of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Returns true if every constraint passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The failures, in plan order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Splits the report into `(all_passed, errors)`.
    pub fn into_parts(self) -> (bool, Vec<ValidationError>) {
        (self.errors.is_empty(), self.errors)
    }

    /// Converts the report into a `Result`, failing with every error.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(self.errors))
        }
    }
}

/// Validates records against the constraints declared on their types.
///
/// A validator owns a [`ValidatorRegistry`] of constraint kinds and a
/// [`PlanCache`] of compiled plans. It is `Send + Sync` and meant to be
/// shared; the process-wide instance behind [`is_valid`] is one of these.
/// Tests and embedders that need isolation construct their own.
///
/// # Examples
///
/// ```rust
/// use field_guard::core::Validator;
///
/// field_guard::record! {
///     struct Reading {
///         celsius: f32 => "min=-273.15",
///     }
/// }
///
/// let validator = Validator::new();
/// let report = validator.is_valid(&Reading { celsius: -300.0 }).unwrap();
/// assert!(!report.is_valid());
/// assert_eq!(report.errors()[0].key, "celsius");
/// ```
#[derive(Debug)]
pub struct Validator {
    registry: ValidatorRegistry,
    cache: PlanCache,
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with the built-in constraint kinds and default
    /// configuration.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Creates a validator with the built-in constraint kinds configured by
    /// `config`.
    pub fn with_config(config: ValidatorConfig) -> Self {
        let registry = ValidatorRegistry::with_builtins(&config);
        Self::with_registry(registry, config)
    }

    /// Creates a validator over an existing registry.
    pub fn with_registry(registry: ValidatorRegistry, config: ValidatorConfig) -> Self {
        Self {
            registry,
            cache: PlanCache::new(),
            config,
        }
    }

    /// Registers a constraint kind, replacing any builder of the same name.
    ///
    /// Plans already compiled keep the builders they were compiled with;
    /// register custom kinds before validating the types that use them.
    pub fn register<F>(&self, name: impl Into<String>, builder: F) -> Result<()>
    where
        F: Fn(&str, ValueKind) -> Result<Box<dyn Constraint>> + Send + Sync + 'static,
    {
        self.registry.register(name, builder)
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &PlanCache {
        &self.cache
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns the compiled plan for `R`, compiling it on first use.
    pub fn plan_for<R: Record>(&self) -> Result<Arc<ValidationPlan>> {
        let (plan, compiled) = self
            .cache
            .fetch::<R>(&PlanCompiler::new(&self.registry))?;
        if compiled {
            log_compilation!(
                self.config.log,
                record = plan.record(),
                constraints = plan.len(),
                "Compiled validation plan"
            );
        }
        Ok(plan)
    }

    /// Validates a record, or the record behind a reference, smart pointer
    /// or `Option`.
    ///
    /// Per-field failures are returned in the report, ordered by field and
    /// then by declaration. An `Err` means the record type's declarations
    /// could not be compiled, or the handle was empty.
    #[instrument(skip_all, fields(record = std::any::type_name::<V::Record>()))]
    pub fn is_valid<V>(&self, record: &V) -> Result<ValidationReport>
    where
        V: Validatable + ?Sized,
    {
        let record = record.resolve()?;
        let plan = self.plan_for::<V::Record>()?;
        if plan.is_empty() {
            return Ok(ValidationReport::default());
        }

        let values = record.field_values();
        let mut errors = Vec::new();
        for constraint in plan.iter() {
            let value = values
                .get(constraint.field_index())
                .ok_or_else(|| GuardError::MissingField {
                    record: plan.record().to_string(),
                    field: constraint.field_name().to_string(),
                    index: constraint.field_index(),
                })?;
            if let Some(error) = constraint.validate(value) {
                log_failure!(
                    self.config.log,
                    record = plan.record(),
                    field = %error.key,
                    value = %truncate_field(&value.to_string(), self.config.log.max_field_length),
                    message = %error.message,
                    "Validation failed"
                );
                errors.push(error);
            }
        }

        Ok(ValidationReport::new(errors))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_VALIDATOR: Lazy<Validator> = Lazy::new(Validator::new);

/// The process-wide validator used by [`is_valid`] and
/// [`register_constraint_kind`].
pub fn default_validator() -> &'static Validator {
    &DEFAULT_VALIDATOR
}

/// Validates a record with the process-wide validator.
pub fn is_valid<V>(record: &V) -> Result<ValidationReport>
where
    V: Validatable + ?Sized,
{
    default_validator().is_valid(record)
}

/// Registers a constraint kind on the process-wide validator.
pub fn register_constraint_kind<F>(name: impl Into<String>, builder: F) -> Result<()>
where
    F: Fn(&str, ValueKind) -> Result<Box<dyn Constraint>> + Send + Sync + 'static,
{
    default_validator().register(name, builder)
}
