//! Glue between the in-memory registry and a [`PropertyStore`].
//!
//! Adds are checked against the registry, then written to the store, and reach the registry
//! only once the row is written.
//! Assign and vacate go the other way: the registry decides, then the store is updated.
//! A failed store write after an accepted assign/vacate is reported but not rolled back.

use tracing::{info, warn};

use crate::persistence::{PropertyStore, StoreError};
use crate::registry::{Property, PropertyManager, RegistryError, Tenant};

/// Whether a registry mutation also reached the store.
#[derive(Debug)]
pub enum Persistence {
    Saved,
    NotSaved(StoreError),
}

impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Counts gathered while restoring the registry from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrationSummary {
    pub properties: usize,
    pub tenants: usize,
    pub assignments: usize,
    pub skipped_assignments: usize,
}

pub struct ManagementSession<S> {
    manager: PropertyManager,
    store: S,
    hydration: HydrationSummary,
}

impl<S: PropertyStore> ManagementSession<S> {
    /// Loads every stored property, tenant and assignment into a fresh registry.
    ///
    /// Stored assignments the registry rejects are cleared from the store so both sides
    /// agree on which properties are vacant.
    pub fn open(mut store: S) -> Result<Self, StoreError> {
        let mut manager = PropertyManager::new();
        let mut hydration = HydrationSummary::default();

        for property in store.load_properties()? {
            manager.add_property(property);
        }
        for tenant in store.load_tenants()? {
            manager.add_tenant(tenant);
        }
        hydration.properties = manager.list_properties().len();
        hydration.tenants = manager.list_tenants().len();

        for assignment in store.load_assignments()? {
            match manager.assign_tenant_to_property(
                assignment.tenant_id.as_str(),
                assignment.property_id.as_str(),
            ) {
                Ok(()) => hydration.assignments += 1,
                Err(err) => {
                    hydration.skipped_assignments += 1;
                    warn!(
                        property_id = %assignment.property_id,
                        tenant_id = %assignment.tenant_id,
                        error = %err,
                        "skipped stored assignment"
                    );
                    if let Err(err) = store.mark_vacant(&assignment.property_id) {
                        warn!(
                            property_id = %assignment.property_id,
                            error = %err,
                            "could not clear skipped assignment"
                        );
                    }
                }
            }
        }

        info!(
            properties = hydration.properties,
            tenants = hydration.tenants,
            assignments = hydration.assignments,
            "registry hydrated from store"
        );

        Ok(Self {
            manager,
            store,
            hydration,
        })
    }

    pub fn manager(&self) -> &PropertyManager {
        &self.manager
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn hydration(&self) -> HydrationSummary {
        self.hydration
    }

    pub fn add_property(&mut self, property: Property) -> Result<(), SessionError> {
        if self.manager.property(property.id.as_str()).is_some() {
            return Err(StoreError::Conflict(property.id.to_string()).into());
        }
        self.store.insert_property(&property)?;
        self.manager.add_property(property);
        Ok(())
    }

    pub fn add_tenant(&mut self, tenant: Tenant) -> Result<(), SessionError> {
        if self.manager.tenant(tenant.id.as_str()).is_some() {
            return Err(StoreError::Conflict(tenant.id.to_string()).into());
        }
        self.store.insert_tenant(&tenant)?;
        self.manager.add_tenant(tenant);
        Ok(())
    }

    pub fn assign(
        &mut self,
        tenant_id: &str,
        property_id: &str,
    ) -> Result<Persistence, SessionError> {
        self.manager
            .assign_tenant_to_property(tenant_id, property_id)?;

        let (property, tenant) = match (
            self.manager.property(property_id),
            self.manager.occupant_of(property_id),
        ) {
            (Some(property), Some(tenant)) => (property.id.clone(), tenant.clone()),
            _ => return Err(RegistryError::PropertyNotFound(property_id.into()).into()),
        };

        Ok(match self.store.mark_occupied(&property, &tenant) {
            Ok(()) => Persistence::Saved,
            Err(err) => {
                warn!(property_id = %property, error = %err, "assignment not persisted");
                Persistence::NotSaved(err)
            }
        })
    }

    pub fn vacate(&mut self, property_id: &str) -> Result<Persistence, SessionError> {
        self.manager.vacate_property(property_id)?;

        let property = match self.manager.property(property_id) {
            Some(property) => property.id.clone(),
            None => return Err(RegistryError::PropertyNotFound(property_id.into()).into()),
        };

        Ok(match self.store.mark_vacant(&property) {
            Ok(()) => Persistence::Saved,
            Err(err) => {
                warn!(property_id = %property, error = %err, "vacate not persisted");
                Persistence::NotSaved(err)
            }
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
