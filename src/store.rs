//! Department configuration store.
//!
//! The persistence collaborator: a synchronous key-value lookup from a
//! department identifier to its stored scheduling request. Absence is a
//! distinct outcome (`Ok(None)`), never conflated with a backend
//! failure or with schedule infeasibility.

use crate::models::RosterRequest;
use std::collections::HashMap;
use thiserror::Error;

/// Store-level failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached or answered malformed data.
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous lookup of a department's scheduling configuration.
pub trait DepartmentStore {
    /// Returns the stored request for a department, `Ok(None)` when the
    /// department is unknown.
    fn fetch(&self, department_id: &str) -> Result<Option<RosterRequest>, StoreError>;
}

/// In-memory store, seedable for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryDepartmentStore {
    items: HashMap<String, RosterRequest>,
}

impl InMemoryDepartmentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a request under its own department id, replacing any
    /// previous configuration for that department.
    pub fn insert(&mut self, request: RosterRequest) {
        self.items.insert(request.department_id.clone(), request);
    }

    /// Number of stored departments.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl DepartmentStore for InMemoryDepartmentStore {
    fn fetch(&self, department_id: &str) -> Result<Option<RosterRequest>, StoreError> {
        Ok(self.items.get(department_id).cloned())
    }
}
