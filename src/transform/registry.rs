//! Transformer instance registry.
//!
//! Fields reference transformer types; the registry owns the instances. Each
//! type is constructed at most once per registry lifetime and shared across
//! every field that declares it, so stateful transformers (discouraged, but
//! supported) see one instance per resolution scope.

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ResolveError, ResolveResult};

use super::transformer::{Transformer, TransformerSpec};

/// Lazily populated cache of transformer instances, keyed by type identity.
#[derive(Default)]
pub struct TransformerRegistry {
    instances: HashMap<TypeId, Arc<dyn Transformer>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Return the shared instance for `spec`, constructing it on first use.
    ///
    /// Construction failure is not recoverable here: without the transformer
    /// the field's copy semantics are undefined, so the error propagates to
    /// the resolution caller.
    pub fn resolve(&mut self, spec: &TransformerSpec) -> ResolveResult<Arc<dyn Transformer>> {
        if let Some(existing) = self.instances.get(&spec.key()) {
            tracing::trace!(transformer = spec.name(), "transformer cache hit");
            return Ok(Arc::clone(existing));
        }

        let constructed =
            spec.construct()
                .map_err(|source| ResolveError::TransformerConstruction {
                    transformer: spec.name().to_string(),
                    source,
                })?;
        let shared: Arc<dyn Transformer> = Arc::from(constructed);
        self.instances.insert(spec.key(), Arc::clone(&shared));
        tracing::debug!(transformer = spec.name(), "constructed transformer instance");
        Ok(shared)
    }

    /// Number of distinct transformer types constructed so far.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerRegistry")
            .field("instances", &self.instances.len())
            .finish()
    }
}
