use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, ErrorCode};
use tracing::{debug, info};

use super::{PropertyStore, StoreError, StoredAssignment};
use crate::registry::{Property, PropertyId, PropertyType, Rent, Tenant, TenantId};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS properties (
    property_id TEXT PRIMARY KEY COLLATE NOCASE,
    address TEXT NOT NULL,
    monthly_rent_cents INTEGER NOT NULL,
    bedrooms INTEGER NOT NULL,
    square_footage INTEGER NOT NULL,
    property_type TEXT NOT NULL,
    is_occupied INTEGER NOT NULL DEFAULT 0,
    occupant_tenant_id TEXT
);

CREATE TABLE IF NOT EXISTS tenants (
    tenant_id TEXT PRIMARY KEY COLLATE NOCASE,
    full_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    date_of_birth TEXT NOT NULL
);
"#;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Relational store backed by a single SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "opened property database");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl PropertyStore for SqliteStore {
    fn load_properties(&self) -> Result<Vec<Property>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT property_id, address, monthly_rent_cents, bedrooms, square_footage, property_type
             FROM properties ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PropertyRowData {
                    property_id: row.get(0)?,
                    address: row.get(1)?,
                    monthly_rent_cents: row.get(2)?,
                    bedrooms: row.get(3)?,
                    square_footage: row.get(4)?,
                    property_type: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let properties = rows
            .into_iter()
            .map(PropertyRowData::decode)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = properties.len(), "loaded properties");
        Ok(properties)
    }

    fn load_tenants(&self) -> Result<Vec<Tenant>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT tenant_id, full_name, email, phone, date_of_birth
             FROM tenants ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let tenants = rows
            .into_iter()
            .map(|(tenant_id, full_name, email, phone, date_of_birth)| {
                let date_of_birth = NaiveDate::parse_from_str(&date_of_birth, DATE_FORMAT)
                    .map_err(|_| StoreError::Corrupt {
                        column: "date_of_birth",
                        value: date_of_birth.clone(),
                    })?;
                Ok(Tenant::new(tenant_id, full_name, email, phone, date_of_birth))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;
        debug!(count = tenants.len(), "loaded tenants");
        Ok(tenants)
    }

    fn load_assignments(&self) -> Result<Vec<StoredAssignment>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT property_id, occupant_tenant_id FROM properties
             WHERE is_occupied = 1 AND occupant_tenant_id IS NOT NULL
             ORDER BY rowid",
        )?;
        let assignments = stmt
            .query_map([], |row| {
                Ok(StoredAssignment {
                    property_id: PropertyId::new(row.get::<_, String>(0)?),
                    tenant_id: TenantId::new(row.get::<_, String>(1)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(assignments)
    }

    fn insert_property(&mut self, property: &Property) -> Result<(), StoreError> {
        let rent = i64::try_from(property.monthly_rent.cents()).map_err(|_| {
            StoreError::Corrupt {
                column: "monthly_rent_cents",
                value: property.monthly_rent.to_decimal_string(),
            }
        })?;

        self.conn
            .execute(
                "INSERT INTO properties
                 (property_id, address, monthly_rent_cents, bedrooms, square_footage, property_type, is_occupied)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
                params![
                    property.id.as_str(),
                    property.address,
                    rent,
                    i64::from(property.bedrooms),
                    i64::from(property.square_footage),
                    property.kind.label(),
                ],
            )
            .map_err(|err| conflict_or(err, property.id.as_str()))?;
        debug!(property_id = %property.id, "property row inserted");
        Ok(())
    }

    fn insert_tenant(&mut self, tenant: &Tenant) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO tenants (tenant_id, full_name, email, phone, date_of_birth)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    tenant.id.as_str(),
                    tenant.full_name,
                    tenant.email,
                    tenant.phone,
                    tenant.date_of_birth.format(DATE_FORMAT).to_string(),
                ],
            )
            .map_err(|err| conflict_or(err, tenant.id.as_str()))?;
        debug!(tenant_id = %tenant.id, "tenant row inserted");
        Ok(())
    }

    fn mark_occupied(
        &mut self,
        property_id: &PropertyId,
        tenant_id: &TenantId,
    ) -> Result<(), StoreError> {
        let updated = self.conn.execute(
            "UPDATE properties SET is_occupied = 1, occupant_tenant_id = ?2 WHERE property_id = ?1",
            params![property_id.as_str(), tenant_id.as_str()],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(property_id.to_string()));
        }
        Ok(())
    }

    fn mark_vacant(&mut self, property_id: &PropertyId) -> Result<(), StoreError> {
        let updated = self.conn.execute(
            "UPDATE properties SET is_occupied = 0, occupant_tenant_id = NULL WHERE property_id = ?1",
            params![property_id.as_str()],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(property_id.to_string()));
        }
        Ok(())
    }
}

struct PropertyRowData {
    property_id: String,
    address: String,
    monthly_rent_cents: i64,
    bedrooms: i64,
    square_footage: i64,
    property_type: String,
}

impl PropertyRowData {
    fn decode(self) -> Result<Property, StoreError> {
        let rent = u64::try_from(self.monthly_rent_cents).map_err(|_| StoreError::Corrupt {
            column: "monthly_rent_cents",
            value: self.monthly_rent_cents.to_string(),
        })?;
        let bedrooms = u32::try_from(self.bedrooms).map_err(|_| StoreError::Corrupt {
            column: "bedrooms",
            value: self.bedrooms.to_string(),
        })?;
        let square_footage =
            u32::try_from(self.square_footage).map_err(|_| StoreError::Corrupt {
                column: "square_footage",
                value: self.square_footage.to_string(),
            })?;
        let kind: PropertyType =
            self.property_type
                .parse()
                .map_err(|_| StoreError::Corrupt {
                    column: "property_type",
                    value: self.property_type.clone(),
                })?;

        Ok(Property::new(
            self.property_id,
            self.address,
            Rent::from_cents(rent),
            kind,
            bedrooms,
            square_footage,
        ))
    }
}

fn conflict_or(err: rusqlite::Error, id: &str) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            StoreError::Conflict(id.to_string())
        }
        _ => StoreError::Database(err),
    }
}
