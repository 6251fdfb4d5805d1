use property_manager::registry::{PropertyRow, TenantRow};

pub(crate) fn property_table(rows: &[PropertyRow]) -> String {
    let mut out = format!(
        "{:<10} {:<20} {:<12} {:<10} {:>12} {:<10}\n{}\n",
        "ID",
        "Address",
        "Type",
        "Bedrooms",
        "Rent",
        "Status",
        "-".repeat(80)
    );
    for row in rows {
        out.push_str(&format!(
            "{:<10} {:<20} {:<12} {:<10} {:>12} {:<10}\n",
            row.id.as_str(),
            clip(&row.address, 20),
            row.property_type_label,
            row.bedrooms,
            row.monthly_rent,
            row.status_label
        ));
    }
    out.push_str(&format!("\nTotal: {} properties", rows.len()));
    out
}

pub(crate) fn tenant_table(rows: &[TenantRow]) -> String {
    let mut out = format!(
        "{:<10} {:<15} {:<20} {:<15} {:<5}\n{}\n",
        "ID",
        "Name",
        "Email",
        "Phone",
        "Age",
        "-".repeat(70)
    );
    for row in rows {
        out.push_str(&format!(
            "{:<10} {:<15} {:<20} {:<15} {:<5}\n",
            row.id.as_str(),
            clip(&row.full_name, 15),
            clip(&row.email, 20),
            row.phone,
            row.age
        ));
    }
    out.push_str(&format!("\nTotal: {} tenants", rows.len()));
    out
}

fn clip(value: &str, width: usize) -> String {
    value.chars().take(width).collect()
}
