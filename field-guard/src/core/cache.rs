//! Per-type cache of compiled validation plans.

use super::plan::{PlanCompiler, ValidationPlan};
use super::record::Record;
use crate::error::Result;
use arc_swap::ArcSwap;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

type PlanMap = HashMap<TypeId, Arc<ValidationPlan>>;

/// Caches one compiled [`ValidationPlan`] per record type.
///
/// Readers load an immutable snapshot of the map and never block. A miss
/// compiles outside of any lock and publishes a new snapshot; when two
/// threads compile the same type at once, the plan stored first is kept
/// and returned to both. Entries are never evicted.
pub struct PlanCache {
    plans: ArcSwap<PlanMap>,
    compilations: AtomicUsize,
}

impl PlanCache {
    pub fn new() -> Self {
        Self {
            plans: ArcSwap::from_pointee(HashMap::new()),
            compilations: AtomicUsize::new(0),
        }
    }

    /// Returns the cached plan for `R`, if it has been compiled.
    pub fn get<R: Record>(&self) -> Option<Arc<ValidationPlan>> {
        self.plans.load().get(&TypeId::of::<R>()).cloned()
    }

    /// Returns the plan for `R`, compiling and caching it on first use.
    ///
    /// A compilation error is returned as is and nothing is cached, so the
    /// next call tries again and fails the same way.
    pub fn get_or_compile<R: Record>(
        &self,
        compiler: &PlanCompiler<'_>,
    ) -> Result<Arc<ValidationPlan>> {
        self.fetch::<R>(compiler).map(|(plan, _)| plan)
    }

    /// Like [`get_or_compile`](Self::get_or_compile), also returning true
    /// when the plan returned is the one this call compiled and published.
    pub(crate) fn fetch<R: Record>(
        &self,
        compiler: &PlanCompiler<'_>,
    ) -> Result<(Arc<ValidationPlan>, bool)> {
        let type_id = TypeId::of::<R>();
        if let Some(plan) = self.plans.load().get(&type_id) {
            trace!(record = plan.record(), "Validation plan cache hit");
            return Ok((Arc::clone(plan), false));
        }

        let plan = Arc::new(compiler.compile(&R::descriptor())?);
        self.compilations.fetch_add(1, Ordering::Relaxed);

        let previous = self.plans.rcu(|current| {
            if current.contains_key(&type_id) {
                return Arc::clone(current);
            }
            let mut next = PlanMap::clone(current);
            next.insert(type_id, Arc::clone(&plan));
            Arc::new(next)
        });

        if let Some(existing) = previous.get(&type_id) {
            return Ok((Arc::clone(existing), false));
        }
        debug!(
            record = plan.record(),
            constraints = plan.len(),
            "Cached validation plan"
        );
        Ok((plan, true))
    }

    /// Number of cached record types.
    pub fn len(&self) -> usize {
        self.plans.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of plans compiled by this cache, including ones discarded
    /// because another thread published first.
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PlanCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanCache")
            .field("records", &self.len())
            .field("compilations", &self.compilations())
            .finish()
    }
}
