//! Operation registry.
//!
//! Operations are registered explicitly at startup instead of being
//! discovered by scanning for plugins. Adding an operation means adding it to
//! [`builtin_operations`] (or calling [`OperationRegistry::register`]); the
//! dispatcher only sees the [`OperationSource`] trait.

use std::collections::HashMap;
use std::sync::Arc;

use crate::operation::{Add, Mean, Median, Multiply, Operation, Square, Subtract};

/// Lookup trait consumed by the dispatcher.
pub trait OperationSource: Send + Sync {
    /// Find an operation by exact, case-sensitive name.
    fn lookup(&self, name: &str) -> Option<Arc<dyn Operation>>;

    /// All registered names, in registration order.
    fn names(&self) -> Vec<&str>;
}

/// The built-in operations, in menu order.
#[must_use]
pub fn builtin_operations() -> Vec<Arc<dyn Operation>> {
    vec![
        Arc::new(Add),
        Arc::new(Subtract),
        Arc::new(Multiply),
        Arc::new(Square),
        Arc::new(Mean),
        Arc::new(Median),
    ]
}

/// Insertion-ordered mapping from name to a shared operation instance.
#[derive(Default)]
pub struct OperationRegistry {
    operations: Vec<Arc<dyn Operation>>,
    index: HashMap<String, usize>,
}

impl OperationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the built-in registration list.
    #[must_use]
    pub fn discover() -> Self {
        let mut registry = Self::new();
        for op in builtin_operations() {
            registry.register(op);
        }
        tracing::info!(count = registry.len(), "operations registered");
        registry
    }

    /// Register an operation under its own name.
    ///
    /// A name collision replaces the earlier operation in place (keeping its
    /// menu position) and returns it.
    pub fn register(&mut self, op: Arc<dyn Operation>) -> Option<Arc<dyn Operation>> {
        let name = op.name().to_string();
        if let Some(&slot) = self.index.get(&name) {
            tracing::warn!(operation = %name, "operation registered twice, replacing");
            return Some(std::mem::replace(&mut self.operations[slot], op));
        }
        tracing::debug!(operation = %name, "registered operation");
        self.index.insert(name, self.operations.len());
        self.operations.push(op);
        None
    }

    /// Number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Iterate operations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Operation>> {
        self.operations.iter()
    }
}

impl OperationSource for OperationRegistry {
    fn lookup(&self, name: &str) -> Option<Arc<dyn Operation>> {
        self.index
            .get(name)
            .map(|&slot| Arc::clone(&self.operations[slot]))
    }

    fn names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.name()).collect()
    }
}
