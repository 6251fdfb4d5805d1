use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::registry::{Property, PropertyType, Rent, Tenant};

/// Row-level failure with its 1-based data row number (header excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct PropertyCsvRow {
    property_id: String,
    address: String,
    monthly_rent: String,
    bedrooms: u32,
    square_footage: u32,
    property_type: String,
}

#[derive(Debug, Deserialize)]
struct TenantCsvRow {
    tenant_id: String,
    full_name: String,
    email: String,
    phone: String,
    date_of_birth: String,
}

pub(crate) enum Parsed<T> {
    Record(T),
    Invalid(RowError),
}

fn build_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub(crate) fn parse_properties<R: Read>(reader: R) -> Result<Vec<Parsed<Property>>, csv::Error> {
    let mut csv_reader = build_reader(reader);
    let mut records = Vec::new();
    for (idx, record) in csv_reader.deserialize::<PropertyCsvRow>().enumerate() {
        let row = record?;
        records.push(match row.into_property() {
            Ok(property) => Parsed::Record(property),
            Err(message) => Parsed::Invalid(RowError {
                row: idx + 1,
                message,
            }),
        });
    }
    Ok(records)
}

pub(crate) fn parse_tenants<R: Read>(reader: R) -> Result<Vec<Parsed<Tenant>>, csv::Error> {
    let mut csv_reader = build_reader(reader);
    let mut records = Vec::new();
    for (idx, record) in csv_reader.deserialize::<TenantCsvRow>().enumerate() {
        let row = record?;
        records.push(match row.into_tenant() {
            Ok(tenant) => Parsed::Record(tenant),
            Err(message) => Parsed::Invalid(RowError {
                row: idx + 1,
                message,
            }),
        });
    }
    Ok(records)
}

impl PropertyCsvRow {
    fn into_property(self) -> Result<Property, String> {
        if self.property_id.is_empty() {
            return Err("property_id is blank".to_string());
        }
        let rent: Rent = self.monthly_rent.parse().map_err(|err| format!("{err}"))?;
        let kind: PropertyType = self.property_type.parse().map_err(|err| format!("{err}"))?;
        Ok(Property::new(
            self.property_id,
            self.address,
            rent,
            kind,
            self.bedrooms,
            self.square_footage,
        ))
    }
}

impl TenantCsvRow {
    fn into_tenant(self) -> Result<Tenant, String> {
        if self.tenant_id.is_empty() {
            return Err("tenant_id is blank".to_string());
        }
        let date_of_birth = parse_date(&self.date_of_birth)
            .ok_or_else(|| format!("'{}' is not a valid date of birth", self.date_of_birth))?;
        Ok(Tenant::new(
            self.tenant_id,
            self.full_name,
            self.email,
            self.phone,
            date_of_birth,
        ))
    }
}

/// Accepts ISO dates and US-style `MM/DD/YYYY`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .ok()
}
