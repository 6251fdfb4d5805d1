//! End-to-end registry scenarios exercised through the public API only.

use chrono::NaiveDate;

use property_manager::registry::{
    Property, PropertyManager, PropertyType, RegistryError, Rent, Tenant,
};

fn property(id: &str, rent_dollars: u64) -> Property {
    Property::new(
        id,
        "221 Lakeview Terrace",
        Rent::from_dollars(rent_dollars),
        PropertyType::Apartment,
        1,
        700,
    )
}

fn tenant(id: &str) -> Tenant {
    Tenant::new(
        id,
        "Casey Morgan",
        "casey@example.com",
        "555-0188",
        NaiveDate::from_ymd_opt(1995, 11, 2).expect("valid date"),
    )
}

#[test]
fn duplicate_property_id_keeps_first_rent() {
    let mut manager = PropertyManager::new();

    manager.add_property(property("1", 1500));
    assert_eq!(manager.list_properties().len(), 1);

    manager.add_property(property("1", 1700));
    assert_eq!(manager.list_properties().len(), 1);
    assert_eq!(
        manager.list_properties()[0].monthly_rent,
        Rent::from_dollars(1500)
    );
}

#[test]
fn tenant_moves_in_and_out() {
    let mut manager = PropertyManager::new();
    manager.add_tenant(tenant("T1"));
    manager.add_property(property("P1", 1250));
    assert!(!manager.property("P1").expect("present").is_occupied());

    manager
        .assign_tenant_to_property("T1", "P1")
        .expect("assignment succeeds");
    assert!(manager.property("P1").expect("present").is_occupied());

    manager.vacate_property("P1").expect("vacate succeeds");
    assert!(!manager.property("P1").expect("present").is_occupied());
    assert!(manager.occupant_of("P1").is_none());
}

#[test]
fn failed_operations_surface_typed_errors() {
    let mut manager = PropertyManager::new();
    manager.add_tenant(tenant("T1"));
    manager.add_property(property("P1", 1250));

    let missing = manager
        .assign_tenant_to_property("T1", "missing")
        .expect_err("unknown property");
    assert!(missing.is_not_found());

    manager
        .assign_tenant_to_property("T1", "P1")
        .expect("assignment succeeds");
    let occupied = manager
        .assign_tenant_to_property("T1", "P1")
        .expect_err("already occupied");
    assert_eq!(occupied.to_string(), "property 'P1' is already occupied");

    manager.vacate_property("P1").expect("vacate succeeds");
    assert!(matches!(
        manager.vacate_property("P1"),
        Err(RegistryError::AlreadyVacant(_))
    ));
}
