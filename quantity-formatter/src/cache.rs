//! Spec cache
//!
//! One slot per (quantity type, system). A slot is a `OnceCell` so concurrent
//! requests for a missing entry share a single build. The build runs on its
//! own task: a caller that stops waiting does not cancel it, and the finished
//! pair still lands in the slot for later callers. Eviction drops the slot
//! from the index; a build still running against it finishes into the
//! detached cell and is never served again.

use std::collections::HashMap;
use std::future::Future;
use std::panic;
use std::sync::Arc;
use parking_lot::Mutex;
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use quantity_core::{QuantityError, QuantityResult};
use quantity_format::{FormatterSpec, ParserSpec};
use crate::QuantityType;

/// Formatter and parser built together from one format
#[derive(Debug, Clone)]
pub struct SpecPair {
    pub formatter: Arc<FormatterSpec>,
    pub parser: Arc<ParserSpec>,
}

type CacheKey = (QuantityType, bool);
type Slot = Arc<OnceCell<SpecPair>>;

#[derive(Default)]
pub(crate) struct SpecCache {
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl SpecCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &CacheKey) -> Slot {
        self.slots.lock().entry(key.clone()).or_default().clone()
    }

    /// Remove `slot` from the index if it is still the live, unfilled entry
    fn discard(&self, key: &CacheKey, slot: &Slot) {
        let mut slots = self.slots.lock();
        if slots
            .get(key)
            .is_some_and(|live| Arc::ptr_eq(live, slot) && !live.initialized())
        {
            slots.remove(key);
        }
    }

    /// Cached pair, or the result of the build `plan` yields, shared with every
    /// concurrent caller. `plan` runs on the caller and decides what to build;
    /// an error from it leaves no slot behind.
    pub(crate) async fn get_or_build<P, Fut>(&self, quantity_type: &QuantityType, use_imperial: bool, plan: P) -> QuantityResult<SpecPair>
    where
        P: FnOnce() -> QuantityResult<Fut>,
        Fut: Future<Output = QuantityResult<SpecPair>> + Send + 'static,
    {
        let key = (quantity_type.clone(), use_imperial);
        let slot = self.slot(&key);
        if let Some(pair) = slot.get() {
            debug!(quantity_type = %quantity_type, use_imperial, "spec cache hit");
            return Ok(pair.clone());
        }

        let build = match plan() {
            Ok(build) => build,
            Err(e) => {
                self.discard(&key, &slot);
                return Err(e);
            }
        };

        debug!(quantity_type = %quantity_type, use_imperial, "spec cache miss");
        let task_slot = Arc::clone(&slot);
        let task = tokio::spawn(async move { task_slot.get_or_try_init(|| build).await.cloned() });

        let result = match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => panic::resume_unwind(e.into_panic()),
            Err(e) => {
                warn!(quantity_type = %quantity_type, use_imperial, error = %e, "spec build interrupted");
                Err(QuantityError::BuildInterrupted(quantity_type.to_string()))
            }
        };
        if result.is_err() {
            self.discard(&key, &slot);
        }
        result
    }

    /// Cached pair, without building
    pub(crate) fn get(&self, quantity_type: &QuantityType, use_imperial: bool) -> Option<SpecPair> {
        self.slots
            .lock()
            .get(&(quantity_type.clone(), use_imperial))
            .and_then(|slot| slot.get().cloned())
    }

    pub(crate) fn is_ready(&self, quantity_type: &QuantityType, use_imperial: bool) -> bool {
        self.get(quantity_type, use_imperial).is_some()
    }

    /// Number of slots in the index, filled or not
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Drop both systems' entries for a type
    pub(crate) fn evict(&self, quantity_type: &QuantityType) {
        let mut slots = self.slots.lock();
        slots.remove(&(quantity_type.clone(), false));
        slots.remove(&(quantity_type.clone(), true));
        debug!(quantity_type = %quantity_type, "spec cache evicted");
    }
}
