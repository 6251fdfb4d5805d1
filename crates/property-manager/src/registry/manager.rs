use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use super::domain::{canonical_key, Property, PropertyId, Tenant, TenantId};

/// In-memory registry of properties, tenants and active assignments.
///
/// Properties and tenants keep insertion order. Lookups by identifier are case-insensitive
/// (keys are lowercased at the boundary). A property is occupied exactly when an assignment
/// entry exists for it; only [`assign_tenant_to_property`](Self::assign_tenant_to_property)
/// and [`vacate_property`](Self::vacate_property) move a property between the two states.
#[derive(Debug, Default, Clone)]
pub struct PropertyManager {
    properties: Vec<Property>,
    tenants: Vec<Tenant>,
    property_index: HashMap<String, usize>,
    tenant_index: HashMap<String, usize>,
    assignments: BTreeMap<String, Assignment>,
}

#[derive(Debug, Clone)]
struct Assignment {
    property_id: PropertyId,
    tenant_id: TenantId,
}

impl PropertyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a property. Absent values and duplicate identifiers are ignored; the only
    /// observable effect of a rejected add is an unchanged collection.
    ///
    /// The property is always admitted vacant.
    pub fn add_property(&mut self, property: impl Into<Option<Property>>) {
        let Some(mut property) = property.into() else {
            warn!("ignored property add without a property");
            return;
        };

        let key = property.id.canonical();
        if self.property_index.contains_key(&key) {
            warn!(property_id = %property.id, "ignored property with duplicate id");
            return;
        }

        property.set_occupied(false);
        debug!(property_id = %property.id, "property added");
        self.property_index.insert(key, self.properties.len());
        self.properties.push(property);
    }

    /// Same contract as [`add_property`](Self::add_property), keyed on the tenant id.
    pub fn add_tenant(&mut self, tenant: impl Into<Option<Tenant>>) {
        let Some(tenant) = tenant.into() else {
            warn!("ignored tenant add without a tenant");
            return;
        };

        let key = tenant.id.canonical();
        if self.tenant_index.contains_key(&key) {
            warn!(tenant_id = %tenant.id, "ignored tenant with duplicate id");
            return;
        }

        debug!(tenant_id = %tenant.id, "tenant added");
        self.tenant_index.insert(key, self.tenants.len());
        self.tenants.push(tenant);
    }

    pub fn list_properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn list_tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn property(&self, property_id: &str) -> Option<&Property> {
        self.property_index
            .get(&canonical_key(property_id))
            .map(|&idx| &self.properties[idx])
    }

    pub fn tenant(&self, tenant_id: &str) -> Option<&Tenant> {
        self.tenant_index
            .get(&canonical_key(tenant_id))
            .map(|&idx| &self.tenants[idx])
    }

    /// Tenant currently assigned to the property, if any.
    pub fn occupant_of(&self, property_id: &str) -> Option<&TenantId> {
        self.assignments
            .get(&canonical_key(property_id))
            .map(|assignment| &assignment.tenant_id)
    }

    /// Active `(property, tenant)` pairs ordered by canonical property id.
    pub fn assignments(&self) -> impl Iterator<Item = (&PropertyId, &TenantId)> + '_ {
        self.assignments
            .values()
            .map(|assignment| (&assignment.property_id, &assignment.tenant_id))
    }

    /// Properties the tenant currently occupies, in insertion order.
    pub fn properties_of(&self, tenant_id: &str) -> Vec<&Property> {
        let key = canonical_key(tenant_id);
        self.properties
            .iter()
            .filter(|property| {
                self.assignments
                    .get(&property.id.canonical())
                    .is_some_and(|assignment| assignment.tenant_id.canonical() == key)
            })
            .collect()
    }

    /// Marks the property occupied by the tenant.
    ///
    /// Fails without touching any state when either identifier is unknown or when the
    /// property already has an occupant.
    pub fn assign_tenant_to_property(
        &mut self,
        tenant_id: &str,
        property_id: &str,
    ) -> Result<(), RegistryError> {
        let tenant_key = canonical_key(tenant_id);
        let property_key = canonical_key(property_id);

        let tenant_idx = *self
            .tenant_index
            .get(&tenant_key)
            .ok_or_else(|| RegistryError::TenantNotFound(TenantId::new(tenant_id)))?;
        let property_idx = *self
            .property_index
            .get(&property_key)
            .ok_or_else(|| RegistryError::PropertyNotFound(PropertyId::new(property_id)))?;

        let property = &mut self.properties[property_idx];
        if property.is_occupied() {
            return Err(RegistryError::AlreadyOccupied(property.id.clone()));
        }

        property.set_occupied(true);
        let tenant = &self.tenants[tenant_idx];
        debug!(tenant_id = %tenant.id, property_id = %property.id, "tenant assigned");
        self.assignments.insert(
            property_key,
            Assignment {
                property_id: property.id.clone(),
                tenant_id: tenant.id.clone(),
            },
        );
        Ok(())
    }

    /// Clears the property's occupancy and drops its assignment.
    pub fn vacate_property(&mut self, property_id: &str) -> Result<(), RegistryError> {
        let property_key = canonical_key(property_id);
        let property_idx = *self
            .property_index
            .get(&property_key)
            .ok_or_else(|| RegistryError::PropertyNotFound(PropertyId::new(property_id)))?;

        let property = &mut self.properties[property_idx];
        if property.is_available() {
            return Err(RegistryError::AlreadyVacant(property.id.clone()));
        }

        property.set_occupied(false);
        self.assignments.remove(&property_key);
        debug!(property_id = %property.id, "property vacated");
        Ok(())
    }
}

/// Failures surfaced by assign and vacate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("property '{0}' was not found")]
    PropertyNotFound(PropertyId),
    #[error("tenant '{0}' was not found")]
    TenantNotFound(TenantId),
    #[error("property '{0}' is already occupied")]
    AlreadyOccupied(PropertyId),
    #[error("property '{0}' is already vacant")]
    AlreadyVacant(PropertyId),
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PropertyNotFound(_) | Self::TenantNotFound(_))
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::AlreadyOccupied(_) | Self::AlreadyVacant(_))
    }
}
