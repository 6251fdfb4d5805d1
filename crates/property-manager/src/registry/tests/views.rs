use super::common::*;
use crate::registry::views::{property_rows, tenant_rows, OccupancyFilter};

#[test]
fn occupancy_filter_selects_matching_properties() {
    let mut manager = seeded_manager();
    manager.add_property(property("P2", 1300));
    manager
        .assign_tenant_to_property("T1", "P2")
        .expect("assignment succeeds");

    let available = OccupancyFilter::Available.select(manager.list_properties());
    let occupied = OccupancyFilter::Occupied.select(manager.list_properties());
    let all = OccupancyFilter::All.select(manager.list_properties());

    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id.as_str(), "P1");
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].id.as_str(), "P2");
    assert_eq!(all.len(), 2);
}

#[test]
fn property_rows_carry_occupant() {
    let mut manager = seeded_manager();
    manager
        .assign_tenant_to_property("T1", "P1")
        .expect("assignment succeeds");

    let rows = property_rows(&manager, OccupancyFilter::All);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status_label, "Occupied");
    assert_eq!(rows[0].tenant_id.as_ref().map(|id| id.as_str()), Some("T1"));

    let json = serde_json::to_value(&rows[0]).expect("row serializes");
    assert_eq!(json["monthly_rent"], "1500.00");
    assert_eq!(json["property_type"], "apartment");
}

#[test]
fn tenant_rows_compute_age_and_properties() {
    let mut manager = seeded_manager();
    manager
        .assign_tenant_to_property("T1", "P1")
        .expect("assignment succeeds");

    let rows = tenant_rows(&manager, today());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].age, 37);
    assert_eq!(rows[0].property_ids.len(), 1);
    assert_eq!(rows[0].property_ids[0].as_str(), "P1");
}
