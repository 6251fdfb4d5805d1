use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Property, PropertyId, PropertyType, Rent, Tenant, TenantId};
use super::manager::PropertyManager;

/// Occupancy-based selection applied by callers when listing properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyFilter {
    #[default]
    All,
    Available,
    Occupied,
}

impl OccupancyFilter {
    pub fn matches(self, property: &Property) -> bool {
        match self {
            Self::All => true,
            Self::Available => property.is_available(),
            Self::Occupied => property.is_occupied(),
        }
    }

    pub const fn heading(self) -> &'static str {
        match self {
            Self::All => "ALL PROPERTIES",
            Self::Available => "AVAILABLE PROPERTIES",
            Self::Occupied => "OCCUPIED PROPERTIES",
        }
    }

    pub fn select(self, properties: &[Property]) -> Vec<&Property> {
        properties
            .iter()
            .filter(|property| self.matches(property))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyRow {
    pub id: PropertyId,
    pub address: String,
    pub property_type: PropertyType,
    pub property_type_label: &'static str,
    pub bedrooms: u32,
    pub square_footage: u32,
    pub monthly_rent: Rent,
    pub occupied: bool,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
}

impl PropertyRow {
    pub fn from_property(property: &Property, manager: &PropertyManager) -> Self {
        Self {
            id: property.id.clone(),
            address: property.address.clone(),
            property_type: property.kind,
            property_type_label: property.kind.label(),
            bedrooms: property.bedrooms,
            square_footage: property.square_footage,
            monthly_rent: property.monthly_rent,
            occupied: property.is_occupied(),
            status_label: property.status_label(),
            tenant_id: manager.occupant_of(property.id.as_str()).cloned(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TenantRow {
    pub id: TenantId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub age: u32,
    pub property_ids: Vec<PropertyId>,
}

impl TenantRow {
    pub fn from_tenant(tenant: &Tenant, manager: &PropertyManager, today: NaiveDate) -> Self {
        Self {
            id: tenant.id.clone(),
            full_name: tenant.full_name.clone(),
            email: tenant.email.clone(),
            phone: tenant.phone.clone(),
            date_of_birth: tenant.date_of_birth,
            age: tenant.age_on(today),
            property_ids: manager
                .properties_of(tenant.id.as_str())
                .into_iter()
                .map(|property| property.id.clone())
                .collect(),
        }
    }
}

pub fn property_rows(manager: &PropertyManager, filter: OccupancyFilter) -> Vec<PropertyRow> {
    filter
        .select(manager.list_properties())
        .into_iter()
        .map(|property| PropertyRow::from_property(property, manager))
        .collect()
}

pub fn tenant_rows(manager: &PropertyManager, today: NaiveDate) -> Vec<TenantRow> {
    manager
        .list_tenants()
        .iter()
        .map(|tenant| TenantRow::from_tenant(tenant, manager, today))
        .collect()
}
