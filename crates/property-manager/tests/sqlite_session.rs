//! Session behaviour against a real SQLite file, including restart recovery.

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use property_manager::persistence::{PropertyStore, SqliteStore};
use property_manager::registry::{OccupancyFilter, Property, PropertyType, Rent, Tenant};
use property_manager::session::ManagementSession;

fn property(id: &str) -> Property {
    Property::new(
        id,
        "3300 Ingersoll Avenue",
        Rent::from_cents(149_999),
        PropertyType::Apartment,
        2,
        1010,
    )
}

fn tenant(id: &str) -> Tenant {
    Tenant::new(
        id,
        "Sam Okafor",
        "sam@example.com",
        "515-555-0110",
        NaiveDate::from_ymd_opt(1983, 5, 17).expect("valid date"),
    )
}

#[test]
fn occupancy_survives_reopen() {
    let db = NamedTempFile::new().expect("temp file");

    {
        let store = SqliteStore::open(db.path()).expect("database opens");
        let mut session = ManagementSession::open(store).expect("session opens");
        session.add_tenant(tenant("T1")).expect("tenant stored");
        session.add_property(property("P1")).expect("property stored");
        session.add_property(property("P2")).expect("property stored");
        let outcome = session.assign("T1", "P2").expect("assign succeeds");
        assert!(outcome.is_saved());
    }

    let store = SqliteStore::open(db.path()).expect("database reopens");
    let session = ManagementSession::open(store).expect("session reopens");
    let manager = session.manager();

    assert_eq!(manager.list_properties().len(), 2);
    assert_eq!(manager.list_tenants().len(), 1);
    let occupied = OccupancyFilter::Occupied.select(manager.list_properties());
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].id.as_str(), "P2");
    assert_eq!(
        manager.occupant_of("p2").map(|id| id.as_str()),
        Some("T1")
    );
    assert_eq!(session.hydration().assignments, 1);
}

#[test]
fn vacate_clears_stored_occupant() {
    let db = NamedTempFile::new().expect("temp file");

    let store = SqliteStore::open(db.path()).expect("database opens");
    let mut session = ManagementSession::open(store).expect("session opens");
    session.add_tenant(tenant("T1")).expect("tenant stored");
    session.add_property(property("P1")).expect("property stored");
    session.assign("T1", "P1").expect("assign succeeds");
    session.vacate("p1").expect("vacate succeeds");

    assert!(session
        .store()
        .load_assignments()
        .expect("assignments load")
        .is_empty());
}
