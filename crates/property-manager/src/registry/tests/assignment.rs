use super::common::*;
use crate::registry::domain::{PropertyId, TenantId};
use crate::registry::manager::{PropertyManager, RegistryError};

#[test]
fn assign_then_vacate_round_trips_occupancy() {
    let mut manager = seeded_manager();

    manager
        .assign_tenant_to_property("T1", "P1")
        .expect("assignment succeeds");
    let property = manager.property("P1").expect("property present");
    assert!(property.is_occupied());
    assert_eq!(
        manager.occupant_of("P1").map(TenantId::as_str),
        Some("T1")
    );

    manager.vacate_property("P1").expect("vacate succeeds");
    let property = manager.property("P1").expect("property present");
    assert!(property.is_available());
    assert!(manager.occupant_of("P1").is_none());
    assert_eq!(manager.assignments().count(), 0);
}

#[test]
fn assignment_matches_ids_case_insensitively() {
    let mut manager = seeded_manager();
    manager
        .assign_tenant_to_property("t1", "p1")
        .expect("assignment succeeds");

    let (property_id, tenant_id) = manager.assignments().next().expect("one assignment");
    assert_eq!(property_id.as_str(), "P1", "stored with original spelling");
    assert_eq!(tenant_id.as_str(), "T1");
}

#[test]
fn second_assignment_fails_and_keeps_first_tenant() {
    let mut manager = seeded_manager();
    manager.add_tenant(tenant("T2"));
    manager
        .assign_tenant_to_property("T1", "P1")
        .expect("first assignment succeeds");

    let before = manager.clone();
    match manager.assign_tenant_to_property("T2", "P1") {
        Err(RegistryError::AlreadyOccupied(id)) => assert_eq!(id, PropertyId::from("P1")),
        other => panic!("expected already occupied, got {other:?}"),
    }

    assert_eq!(manager.list_properties(), before.list_properties());
    assert_eq!(
        manager.occupant_of("P1").map(TenantId::as_str),
        Some("T1")
    );
}

#[test]
fn vacating_vacant_property_fails() {
    let mut manager = seeded_manager();
    match manager.vacate_property("P1") {
        Err(err @ RegistryError::AlreadyVacant(_)) => assert!(err.is_invalid_state()),
        other => panic!("expected already vacant, got {other:?}"),
    }
}

#[test]
fn unknown_property_is_not_found_and_mutates_nothing() {
    let mut manager = seeded_manager();

    match manager.assign_tenant_to_property("T1", "P404") {
        Err(err @ RegistryError::PropertyNotFound(_)) => assert!(err.is_not_found()),
        other => panic!("expected property not found, got {other:?}"),
    }
    match manager.vacate_property("P404") {
        Err(RegistryError::PropertyNotFound(id)) => assert_eq!(id.as_str(), "P404"),
        other => panic!("expected property not found, got {other:?}"),
    }

    assert!(manager.list_properties().iter().all(|p| p.is_available()));
    assert_eq!(manager.assignments().count(), 0);
}

#[test]
fn unknown_tenant_is_not_found() {
    let mut manager = seeded_manager();
    match manager.assign_tenant_to_property("T404", "P1") {
        Err(RegistryError::TenantNotFound(id)) => assert_eq!(id.as_str(), "T404"),
        other => panic!("expected tenant not found, got {other:?}"),
    }
    assert!(manager.property("P1").expect("present").is_available());
}

#[test]
fn occupancy_tracks_assignments_across_operations() {
    let mut manager = PropertyManager::new();
    for id in ["T1", "T2"] {
        manager.add_tenant(tenant(id));
    }
    for id in ["P1", "P2", "P3"] {
        manager.add_property(property(id, 1000));
    }

    let steps: [(&str, Option<&str>); 6] = [
        ("P1", Some("T1")),
        ("P2", Some("T1")),
        ("P1", None),
        ("P3", Some("T2")),
        ("P1", Some("T2")),
        ("P2", None),
    ];
    for (property_id, tenant_id) in steps {
        match tenant_id {
            Some(tenant_id) => manager
                .assign_tenant_to_property(tenant_id, property_id)
                .expect("assignment succeeds"),
            None => manager.vacate_property(property_id).expect("vacate succeeds"),
        }

        for property in manager.list_properties() {
            assert_eq!(
                property.is_occupied(),
                manager.occupant_of(property.id.as_str()).is_some(),
                "occupancy of {} out of sync",
                property.id
            );
        }
    }

    let t2_properties: Vec<&str> = manager
        .properties_of("t2")
        .into_iter()
        .map(|property| property.id.as_str())
        .collect();
    assert_eq!(t2_properties, ["P1", "P3"]);
}
