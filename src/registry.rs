//! Task name to benchmark unit lookup

use crate::catalog::{BenchmarkUnit, CATALOG};
use std::collections::HashMap;

/// Maps exact, case-sensitive task names to their units
///
/// Populated once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    units: HashMap<&'static str, BenchmarkUnit>,
    order: Vec<&'static str>,
}

impl TaskRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            units: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registry holding the full task catalog
    #[must_use]
    pub fn with_catalog() -> Self {
        let mut registry = Self::new();
        for unit in CATALOG {
            registry.register(unit);
        }
        registry
    }

    /// Add a unit
    ///
    /// # Panics
    /// When a unit with the same name is already registered.
    pub fn register(&mut self, unit: BenchmarkUnit) {
        let name = unit.name();
        let previous = self.units.insert(name, unit);
        assert!(previous.is_none(), "task '{}' registered twice", name);
        self.order.push(name);
    }

    /// Exact-match lookup
    pub fn lookup(&self, name: &str) -> Option<&BenchmarkUnit> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Task names in registration order
    pub fn names(&self) -> &[&'static str] {
        &self.order
    }

    /// Units in registration order
    pub fn units(&self) -> impl Iterator<Item = &BenchmarkUnit> {
        self.order.iter().filter_map(|name| self.units.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::with_catalog()
    }
}
