//! Bulk CSV import of properties and tenants through a [`ManagementSession`].
//!
//! Property files use the header
//! `property_id,address,monthly_rent,bedrooms,square_footage,property_type`; tenant files use
//! `tenant_id,full_name,email,phone,date_of_birth`. The whole file is parsed before anything
//! is written, so a malformed row aborts the import without partial writes.

mod parser;

pub use parser::{parse_date, RowError};

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::persistence::{PropertyStore, StoreError};
use crate::session::{ManagementSession, SessionError};
use parser::Parsed;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRows(Vec<RowError>),
    Session(SessionError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read import file: {}", err),
            ImportError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            ImportError::InvalidRows(rows) => {
                write!(f, "{} invalid row(s)", rows.len())?;
                for row in rows {
                    write!(f, "; row {}: {}", row.row, row.message)?;
                }
                Ok(())
            }
            ImportError::Session(err) => write!(f, "could not store imported record: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::InvalidRows(_) => None,
            ImportError::Session(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<SessionError> for ImportError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

/// Outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    /// Identifiers already present in the store.
    pub duplicates: Vec<String>,
}

pub struct CsvImporter;

impl CsvImporter {
    pub fn properties_from_path<P: AsRef<Path>, S: PropertyStore>(
        path: P,
        session: &mut ManagementSession<S>,
    ) -> Result<ImportSummary, ImportError> {
        let file = File::open(path)?;
        Self::properties_from_reader(file, session)
    }

    pub fn tenants_from_path<P: AsRef<Path>, S: PropertyStore>(
        path: P,
        session: &mut ManagementSession<S>,
    ) -> Result<ImportSummary, ImportError> {
        let file = File::open(path)?;
        Self::tenants_from_reader(file, session)
    }

    pub fn properties_from_reader<R: Read, S: PropertyStore>(
        reader: R,
        session: &mut ManagementSession<S>,
    ) -> Result<ImportSummary, ImportError> {
        let properties = collect_valid(parser::parse_properties(reader)?)?;
        let mut summary = ImportSummary::default();

        for property in properties {
            let id = property.id.to_string();
            record_outcome(&mut summary, id, session.add_property(property))?;
        }

        info!(
            added = summary.added,
            duplicates = summary.duplicates.len(),
            "property import finished"
        );
        Ok(summary)
    }

    pub fn tenants_from_reader<R: Read, S: PropertyStore>(
        reader: R,
        session: &mut ManagementSession<S>,
    ) -> Result<ImportSummary, ImportError> {
        let tenants = collect_valid(parser::parse_tenants(reader)?)?;
        let mut summary = ImportSummary::default();

        for tenant in tenants {
            let id = tenant.id.to_string();
            record_outcome(&mut summary, id, session.add_tenant(tenant))?;
        }

        info!(
            added = summary.added,
            duplicates = summary.duplicates.len(),
            "tenant import finished"
        );
        Ok(summary)
    }
}

fn collect_valid<T>(parsed: Vec<Parsed<T>>) -> Result<Vec<T>, ImportError> {
    let mut records = Vec::with_capacity(parsed.len());
    let mut invalid = Vec::new();

    for entry in parsed {
        match entry {
            Parsed::Record(record) => records.push(record),
            Parsed::Invalid(row) => invalid.push(row),
        }
    }

    if invalid.is_empty() {
        Ok(records)
    } else {
        Err(ImportError::InvalidRows(invalid))
    }
}

fn record_outcome(
    summary: &mut ImportSummary,
    id: String,
    outcome: Result<(), SessionError>,
) -> Result<(), ImportError> {
    match outcome {
        Ok(()) => summary.added += 1,
        Err(SessionError::Store(StoreError::Conflict(_))) => {
            warn!(id = %id, "skipped duplicate import row");
            summary.duplicates.push(id);
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::registry::{PropertyType, Rent};
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn session() -> ManagementSession<MemoryStore> {
        ManagementSession::open(MemoryStore::new()).expect("opens")
    }

    #[test]
    fn imports_properties_and_reports_duplicates() {
        let csv = "property_id,address,monthly_rent,bedrooms,square_footage,property_type\n\
P1,12 Elm Street,\"1,500.00\",3,1400,house\n\
P2, 9 Oak Court ,980,1,620,Apartment\n\
p1,Duplicate Row,1700,2,900,House\n";
        let mut session = session();

        let summary =
            CsvImporter::properties_from_reader(Cursor::new(csv), &mut session).expect("imports");

        assert_eq!(summary.added, 2);
        assert_eq!(summary.duplicates, vec!["p1".to_string()]);
        let manager = session.manager();
        let first = manager.property("P1").expect("present");
        assert_eq!(first.monthly_rent, Rent::from_dollars(1500));
        assert_eq!(first.kind, PropertyType::House);
        assert_eq!(manager.property("P2").expect("present").address, "9 Oak Court");
    }

    #[test]
    fn invalid_rows_abort_before_writing() {
        let csv = "property_id,address,monthly_rent,bedrooms,square_footage,property_type\n\
P1,12 Elm Street,1500,3,1400,House\n\
P2,9 Oak Court,lots,1,620,Castle\n";
        let mut session = session();

        match CsvImporter::properties_from_reader(Cursor::new(csv), &mut session) {
            Err(ImportError::InvalidRows(rows)) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].row, 2);
            }
            other => panic!("expected invalid rows, got {other:?}"),
        }
        assert!(session.manager().list_properties().is_empty());
    }

    #[test]
    fn imports_tenants_with_either_date_format() {
        let csv = "tenant_id,full_name,email,phone,date_of_birth\n\
T1,Avery Stone,avery@example.com,555-0101,1985-04-12\n\
T2,Jordan Park,jordan@example.com,(515) 555-0102,07/30/1990\n";
        let mut session = session();

        let summary =
            CsvImporter::tenants_from_reader(Cursor::new(csv), &mut session).expect("imports");

        assert_eq!(summary.added, 2);
        let tenant = session.manager().tenant("t2").expect("present");
        assert_eq!(
            tenant.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 7, 30).expect("valid date")
        );
    }

    #[test]
    fn non_numeric_counts_are_csv_errors() {
        let csv = "property_id,address,monthly_rent,bedrooms,square_footage,property_type\n\
P1,12 Elm Street,1500,three,1400,House\n";
        let mut session = session();

        match CsvImporter::properties_from_reader(Cursor::new(csv), &mut session) {
            Err(ImportError::Csv(_)) => {}
            other => panic!("expected csv error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut session = session();
        match CsvImporter::tenants_from_path("./does-not-exist.csv", &mut session) {
            Err(ImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn parse_date_rejects_blank_and_garbage() {
        assert!(parse_date("  ").is_none());
        assert!(parse_date("31/31/2020").is_none());
        assert_eq!(
            parse_date("2001-02-03"),
            NaiveDate::from_ymd_opt(2001, 2, 3)
        );
    }
}
