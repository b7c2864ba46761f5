use std::collections::HashMap;

use serde_json::Value;

/// Last known result per (operation, variables).
///
/// Entries are only replaced by a fetch or dropped by an explicit
/// invalidation; nothing expires on its own.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<(String, String), Value>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(operation: &str, vars: &Value) -> (String, String) {
        // serde_json's map is ordered, so equal variables give equal strings
        (operation.to_string(), vars.to_string())
    }

    pub fn get(&self, operation: &str, vars: &Value) -> Option<&Value> {
        self.entries.get(&Self::key(operation, vars))
    }

    pub fn put(&mut self, operation: &str, vars: &Value, data: Value) {
        self.entries.insert(Self::key(operation, vars), data);
    }

    /// Drop every cached result of `operation`, whatever its variables.
    pub fn invalidate(&mut self, operation: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(op, _), _| op != operation);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
