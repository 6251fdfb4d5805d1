//! Property and tenant registry with the vacant/occupied assignment workflow.

pub mod domain;
pub mod manager;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{DomainParseError, Property, PropertyId, PropertyType, Rent, Tenant, TenantId};
pub use manager::{PropertyManager, RegistryError};
pub use views::{property_rows, tenant_rows, OccupancyFilter, PropertyRow, TenantRow};
