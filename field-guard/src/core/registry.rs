//! The table of constraint kinds known to a validator.
//!
//! Each kind name (`"min"`, `"max_length"`, ...) maps to a
//! [`ConstraintBuilder`] that turns the option text of a declaration into a
//! [`Constraint`]. Registration normally happens once at startup; lookups
//! happen every time a record type is compiled.

use super::constraint::Constraint;
use super::value::ValueKind;
use crate::config::ValidatorConfig;
use crate::error::{GuardError, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Builds a constraint from a declaration's option text and the declared
/// kind of the field it is attached to.
pub type ConstraintBuilder =
    Arc<dyn Fn(&str, ValueKind) -> Result<Box<dyn Constraint>> + Send + Sync>;

/// A concurrency-safe map from constraint kind name to builder.
///
/// Registering a name that already exists replaces the previous builder.
/// Readers share the lock, so concurrent compilations never wait on each
/// other. A lock poisoned by a panicking writer fails every later call with
/// [`GuardError::Internal`].
#[derive(Default)]
pub struct ValidatorRegistry {
    builders: RwLock<HashMap<String, ConstraintBuilder>>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in kinds (`min`, `max`,
    /// `min_length`, `max_length`, `format`) registered.
    pub fn with_builtins(config: &ValidatorConfig) -> Self {
        let builders = crate::constraints::builtin_builders(config)
            .into_iter()
            .map(|(name, builder)| (name.to_string(), builder))
            .collect();
        Self {
            builders: RwLock::new(builders),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, ConstraintBuilder>>> {
        self.builders.read().map_err(|_| {
            GuardError::Internal("Failed to acquire read lock on validator registry".to_string())
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, ConstraintBuilder>>> {
        self.builders.write().map_err(|_| {
            GuardError::Internal("Failed to acquire write lock on validator registry".to_string())
        })
    }

    /// Registers `builder` under `name`, replacing any previous builder.
    pub fn register<F>(&self, name: impl Into<String>, builder: F) -> Result<()>
    where
        F: Fn(&str, ValueKind) -> Result<Box<dyn Constraint>> + Send + Sync + 'static,
    {
        self.register_shared(name, Arc::new(builder))
    }

    /// Registers an already shared builder under `name`.
    pub fn register_shared(
        &self,
        name: impl Into<String>,
        builder: ConstraintBuilder,
    ) -> Result<()> {
        let name = name.into();
        if self.write()?.insert(name.clone(), builder).is_some() {
            debug!(kind = %name, "Replaced constraint builder");
        } else {
            debug!(kind = %name, "Registered constraint builder");
        }
        Ok(())
    }

    /// Looks up the builder registered for `name`.
    pub fn lookup(&self, name: &str) -> Result<Option<ConstraintBuilder>> {
        Ok(self.read()?.get(name).cloned())
    }

    /// Returns true if a builder is registered for `name`.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(name))
    }

    /// Returns the registered kind names, sorted.
    pub fn kinds(&self) -> Result<Vec<String>> {
        let mut kinds: Vec<String> = self.read()?.keys().cloned().collect();
        kinds.sort();
        Ok(kinds)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ValidatorRegistry");
        match self.kinds() {
            Ok(kinds) => debug.field("kinds", &kinds),
            Err(_) => debug.field("kinds", &"<poisoned>"),
        };
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldValue;

    #[derive(Debug)]
    struct Fixed(&'static str);

    impl Constraint for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn check(&self, _value: &FieldValue<'_>) -> Option<String> {
            None
        }
    }

    fn build(registry: &ValidatorRegistry, name: &str) -> Box<dyn Constraint> {
        let builder = registry.lookup(name).unwrap().unwrap();
        builder("", ValueKind::String).unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = ValidatorRegistry::new();
        assert!(registry.is_empty().unwrap());

        registry
            .register("fixed", |_, _| Ok(Box::new(Fixed("first")) as Box<dyn Constraint>))
            .unwrap();
        assert!(registry.contains("fixed").unwrap());
        assert!(!registry.contains("missing").unwrap());
        assert!(registry.lookup("missing").unwrap().is_none());
        assert_eq!(build(&registry, "fixed").name(), "first");
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = ValidatorRegistry::new();
        registry
            .register("fixed", |_, _| Ok(Box::new(Fixed("first")) as Box<dyn Constraint>))
            .unwrap();
        registry
            .register("fixed", |_, _| Ok(Box::new(Fixed("second")) as Box<dyn Constraint>))
            .unwrap();

        assert_eq!(registry.len().unwrap(), 1);
        assert_eq!(build(&registry, "fixed").name(), "second");
    }

    #[test]
    fn test_builtins() {
        let registry = ValidatorRegistry::with_builtins(&ValidatorConfig::default());
        assert_eq!(
            registry.kinds().unwrap(),
            vec!["format", "max", "max_length", "min", "min_length"]
        );
    }

    #[test]
    fn test_concurrent_register_and_lookup() {
        let registry = Arc::new(ValidatorRegistry::new());
        registry
            .register("fixed", |_, _| Ok(Box::new(Fixed("seed")) as Box<dyn Constraint>))
            .unwrap();

        let writer = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..1_000 {
                    registry
                        .register("fixed", |_, _| Ok(Box::new(Fixed("w")) as Box<dyn Constraint>))
                        .unwrap();
                }
            })
        };
        let reader = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..1_000 {
                    assert!(registry.lookup("fixed").unwrap().is_some());
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(build(&registry, "fixed").name(), "w");
    }

    #[test]
    fn test_poisoned_lock_is_an_internal_error() {
        let registry = Arc::new(ValidatorRegistry::with_builtins(&ValidatorConfig::default()));
        let poisoner = Arc::clone(&registry);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.builders.write().unwrap();
            panic!("writer panicked while holding the lock");
        })
        .join();

        assert!(matches!(registry.lookup("min"), Err(GuardError::Internal(_))));
        assert!(matches!(registry.contains("min"), Err(GuardError::Internal(_))));
        assert!(matches!(registry.kinds(), Err(GuardError::Internal(_))));
        assert!(matches!(registry.len(), Err(GuardError::Internal(_))));
        assert!(matches!(registry.is_empty(), Err(GuardError::Internal(_))));
        let err = registry
            .register("fixed", |_, _| Ok(Box::new(Fixed("late")) as Box<dyn Constraint>))
            .unwrap_err();
        assert!(matches!(err, GuardError::Internal(_)));
        assert!(!err.is_configuration());
        assert!(format!("{registry:?}").contains("<poisoned>"));
    }
}
