use super::{PropertyStore, StoreError, StoredAssignment};
use crate::registry::{Property, PropertyId, Tenant, TenantId};

/// Vector-backed store for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    properties: Vec<Property>,
    tenants: Vec<Tenant>,
    assignments: Vec<StoredAssignment>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail, simulating a lost database connection.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    pub fn assignments(&self) -> &[StoredAssignment] {
        &self.assignments
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("memory store offline".to_string()));
        }
        Ok(())
    }

    fn has_property(&self, property_id: &PropertyId) -> bool {
        self.properties
            .iter()
            .any(|property| &property.id == property_id)
    }
}

impl PropertyStore for MemoryStore {
    fn load_properties(&self) -> Result<Vec<Property>, StoreError> {
        Ok(self.properties.clone())
    }

    fn load_tenants(&self) -> Result<Vec<Tenant>, StoreError> {
        Ok(self.tenants.clone())
    }

    fn load_assignments(&self) -> Result<Vec<StoredAssignment>, StoreError> {
        Ok(self.assignments.clone())
    }

    fn insert_property(&mut self, property: &Property) -> Result<(), StoreError> {
        self.ensure_available()?;
        if self.has_property(&property.id) {
            return Err(StoreError::Conflict(property.id.to_string()));
        }
        self.properties.push(property.clone());
        Ok(())
    }

    fn insert_tenant(&mut self, tenant: &Tenant) -> Result<(), StoreError> {
        self.ensure_available()?;
        if self.tenants.iter().any(|existing| existing.id == tenant.id) {
            return Err(StoreError::Conflict(tenant.id.to_string()));
        }
        self.tenants.push(tenant.clone());
        Ok(())
    }

    fn mark_occupied(
        &mut self,
        property_id: &PropertyId,
        tenant_id: &TenantId,
    ) -> Result<(), StoreError> {
        self.ensure_available()?;
        if !self.has_property(property_id) {
            return Err(StoreError::NotFound(property_id.to_string()));
        }
        self.assignments
            .retain(|assignment| &assignment.property_id != property_id);
        self.assignments.push(StoredAssignment {
            property_id: property_id.clone(),
            tenant_id: tenant_id.clone(),
        });
        Ok(())
    }

    fn mark_vacant(&mut self, property_id: &PropertyId) -> Result<(), StoreError> {
        self.ensure_available()?;
        if !self.has_property(property_id) {
            return Err(StoreError::NotFound(property_id.to_string()));
        }
        self.assignments
            .retain(|assignment| &assignment.property_id != property_id);
        Ok(())
    }
}
