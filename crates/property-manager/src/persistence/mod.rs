//! Storage collaborators the management session copies registry data through.
//!
//! The registry never calls a store itself; [`crate::session::ManagementSession`] forwards
//! each mutation after the registry accepted it.

pub mod memory;
pub mod sqlite;

use crate::registry::{Property, PropertyId, Tenant, TenantId};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Persisted `(property, tenant)` pair restored into the registry at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAssignment {
    pub property_id: PropertyId,
    pub tenant_id: TenantId,
}

/// Storage abstraction so the session can run against SQLite or memory.
pub trait PropertyStore {
    fn load_properties(&self) -> Result<Vec<Property>, StoreError>;
    fn load_tenants(&self) -> Result<Vec<Tenant>, StoreError>;
    fn load_assignments(&self) -> Result<Vec<StoredAssignment>, StoreError>;
    fn insert_property(&mut self, property: &Property) -> Result<(), StoreError>;
    fn insert_tenant(&mut self, tenant: &Tenant) -> Result<(), StoreError>;
    fn mark_occupied(
        &mut self,
        property_id: &PropertyId,
        tenant_id: &TenantId,
    ) -> Result<(), StoreError>;
    fn mark_vacant(&mut self, property_id: &PropertyId) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record with id '{0}' already exists")]
    Conflict(String),
    #[error("no record with id '{0}'")]
    NotFound(String),
    #[error("stored {column} value '{value}' could not be decoded")]
    Corrupt { column: &'static str, value: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
