use chrono::NaiveDate;

use crate::registry::domain::{Property, PropertyType, Rent, Tenant};
use crate::registry::manager::PropertyManager;

pub(super) fn property(id: &str, rent_dollars: u64) -> Property {
    Property::new(
        id,
        format!("{id} Riverside Drive"),
        Rent::from_dollars(rent_dollars),
        PropertyType::Apartment,
        2,
        950,
    )
}

pub(super) fn tenant(id: &str) -> Tenant {
    Tenant::new(
        id,
        format!("Tenant {id}"),
        format!("{}@example.com", id.to_lowercase()),
        "(515) 555-0142",
        NaiveDate::from_ymd_opt(1988, 3, 9).expect("valid date"),
    )
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 4).expect("valid date")
}

/// Registry holding tenant `T1` and vacant property `P1`.
pub(super) fn seeded_manager() -> PropertyManager {
    let mut manager = PropertyManager::new();
    manager.add_tenant(tenant("T1"));
    manager.add_property(property("P1", 1500));
    manager
}
