use std::io::{self, BufRead, Write};

use property_manager::persistence::PropertyStore;
use property_manager::registry::{
    property_rows, tenant_rows, OccupancyFilter, Property, Tenant,
};
use property_manager::session::{ManagementSession, Persistence};
use tracing::info;

use crate::prompt::{self, Console};
use crate::render::{property_table, tenant_table};

/// Whether the menu loop keeps running after a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Drives the interactive menu until the user exits or input ends.
pub(crate) fn run<S, R, W>(
    session: &mut ManagementSession<S>,
    console: &mut Console<R, W>,
) -> io::Result<()>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    info!("menu session started");
    loop {
        writeln!(console.out(), "\n=== PROPERTY MANAGEMENT SYSTEM ===")?;
        writeln!(console.out(), "1. Property Operations")?;
        writeln!(console.out(), "2. Tenant Operations")?;
        writeln!(console.out(), "3. Assignment Operations")?;
        writeln!(console.out(), "4. Exit")?;
        write!(console.out(), "\nEnter your choice (1-4): ")?;
        console.out().flush()?;

        let flow = match console.choose(1, 4)? {
            Some(1) => property_menu(session, console)?,
            Some(2) => tenant_menu(session, console)?,
            Some(3) => assignment_menu(session, console)?,
            Some(_) => {
                writeln!(console.out(), "\nExiting the system. Goodbye!")?;
                Flow::Exit
            }
            None => Flow::Exit,
        };

        if flow == Flow::Exit || wait_for_user(console)? == Flow::Exit {
            break;
        }
    }
    info!("menu session ended");
    Ok(())
}

fn wait_for_user<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<Flow> {
    writeln!(console.out(), "\nPress Enter to continue...")?;
    console.out().flush()?;
    Ok(match console.read_line()? {
        Some(_) => Flow::Continue,
        None => Flow::Exit,
    })
}

fn property_menu<S, R, W>(
    session: &mut ManagementSession<S>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    writeln!(console.out(), "\n=== PROPERTY OPERATIONS ===")?;
    writeln!(console.out(), "1. Add New Property")?;
    writeln!(console.out(), "2. View All Properties")?;
    writeln!(console.out(), "3. View Available Properties")?;
    writeln!(console.out(), "4. View Occupied Properties")?;
    writeln!(console.out(), "5. Back to Main Menu")?;
    write!(console.out(), "\nEnter your choice (1-5): ")?;
    console.out().flush()?;

    match console.choose(1, 5)? {
        Some(1) => add_property(session, console),
        Some(2) => view_properties(session, console, OccupancyFilter::All),
        Some(3) => view_properties(session, console, OccupancyFilter::Available),
        Some(4) => view_properties(session, console, OccupancyFilter::Occupied),
        Some(_) => Ok(Flow::Continue),
        None => Ok(Flow::Exit),
    }
}

fn add_property<S, R, W>(
    session: &mut ManagementSession<S>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    writeln!(console.out(), "\n=== ADD NEW PROPERTY ===")?;

    let Some(id) = console.prompt("Property ID: ", prompt::required)? else {
        return Ok(Flow::Exit);
    };
    let Some(address) = console.prompt("Address: ", prompt::required)? else {
        return Ok(Flow::Exit);
    };
    let Some(rent) = console.prompt("Monthly Rent: ", prompt::monthly_rent)? else {
        return Ok(Flow::Exit);
    };
    let Some(bedrooms) = console.prompt("Number of Bedrooms: ", prompt::positive_count)? else {
        return Ok(Flow::Exit);
    };
    let Some(square_footage) = console.prompt("Square Footage: ", prompt::positive_count)? else {
        return Ok(Flow::Exit);
    };
    let Some(kind) = console.prompt(
        "Property Type (Apartment/House/Commercial): ",
        prompt::property_type,
    )?
    else {
        return Ok(Flow::Exit);
    };

    let property = Property::new(id, address, rent, kind, bedrooms, square_footage);
    let id = property.id.clone();
    match session.add_property(property) {
        Ok(()) => console.success(&format!("Property {id} added to database successfully!"))?,
        Err(err) => console.error(&format!("Failed to add property: {err}"))?,
    }
    Ok(Flow::Continue)
}

fn view_properties<S, R, W>(
    session: &ManagementSession<S>,
    console: &mut Console<R, W>,
    filter: OccupancyFilter,
) -> io::Result<Flow>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    writeln!(console.out(), "\n=== {} ===", filter.heading())?;
    let rows = property_rows(session.manager(), filter);
    if rows.is_empty() {
        writeln!(console.out(), "\nNo properties found.")?;
    } else {
        writeln!(console.out(), "\n{}", property_table(&rows))?;
    }
    Ok(Flow::Continue)
}

fn tenant_menu<S, R, W>(
    session: &mut ManagementSession<S>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    writeln!(console.out(), "\n=== TENANT OPERATIONS ===")?;
    writeln!(console.out(), "1. Add New Tenant")?;
    writeln!(console.out(), "2. View All Tenants")?;
    writeln!(console.out(), "3. Back to Main Menu")?;
    write!(console.out(), "\nEnter your choice (1-3): ")?;
    console.out().flush()?;

    match console.choose(1, 3)? {
        Some(1) => add_tenant(session, console),
        Some(2) => view_tenants(session, console),
        Some(_) => Ok(Flow::Continue),
        None => Ok(Flow::Exit),
    }
}

fn add_tenant<S, R, W>(
    session: &mut ManagementSession<S>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    writeln!(console.out(), "\n=== ADD NEW TENANT ===")?;

    let Some(id) = console.prompt("Tenant ID: ", prompt::required)? else {
        return Ok(Flow::Exit);
    };
    let Some(full_name) = console.prompt("Full Name: ", prompt::required)? else {
        return Ok(Flow::Exit);
    };
    let Some(email) = console.prompt("Email: ", prompt::email)? else {
        return Ok(Flow::Exit);
    };
    let Some(phone) = console.prompt("Phone: ", prompt::phone)? else {
        return Ok(Flow::Exit);
    };
    let Some(date_of_birth) =
        console.prompt("Date of Birth (MM/DD/YYYY): ", prompt::date_of_birth)?
    else {
        return Ok(Flow::Exit);
    };

    let tenant = Tenant::new(id, full_name, email, phone, date_of_birth);
    let name = tenant.full_name.clone();
    match session.add_tenant(tenant) {
        Ok(()) => console.success(&format!("Tenant {name} added successfully!"))?,
        Err(err) => console.error(&format!("Failed to add tenant: {err}"))?,
    }
    Ok(Flow::Continue)
}

fn view_tenants<S, R, W>(
    session: &ManagementSession<S>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    writeln!(console.out(), "\n=== ALL TENANTS ===")?;
    let rows = tenant_rows(session.manager(), console.today());
    if rows.is_empty() {
        writeln!(console.out(), "\nNo tenants found.")?;
    } else {
        writeln!(console.out(), "\n{}", tenant_table(&rows))?;
    }
    Ok(Flow::Continue)
}

fn assignment_menu<S, R, W>(
    session: &mut ManagementSession<S>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    writeln!(console.out(), "\n=== ASSIGNMENT OPERATIONS ===")?;
    writeln!(console.out(), "1. Assign Tenant to Property")?;
    writeln!(console.out(), "2. Vacate Property")?;
    writeln!(console.out(), "3. Back to Main Menu")?;
    write!(console.out(), "\nEnter your choice (1-3): ")?;
    console.out().flush()?;

    match console.choose(1, 3)? {
        Some(1) => assign_tenant(session, console),
        Some(2) => vacate_property(session, console),
        Some(_) => Ok(Flow::Continue),
        None => Ok(Flow::Exit),
    }
}

fn assign_tenant<S, R, W>(
    session: &mut ManagementSession<S>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    writeln!(console.out(), "\n=== ASSIGN TENANT TO PROPERTY ===")?;

    view_tenants(session, console)?;
    let Some(tenant_id) = console.prompt("\nEnter Tenant ID: ", prompt::required)? else {
        return Ok(Flow::Exit);
    };

    view_properties(session, console, OccupancyFilter::Available)?;
    let Some(property_id) = console.prompt("\nEnter Property ID: ", prompt::required)? else {
        return Ok(Flow::Exit);
    };

    match session.assign(&tenant_id, &property_id) {
        Ok(Persistence::Saved) => console.success(&format!(
            "Tenant {tenant_id} assigned to property {property_id} successfully!"
        ))?,
        Ok(Persistence::NotSaved(err)) => console.error(&format!(
            "Tenant assigned, but the database update failed: {err}"
        ))?,
        Err(err) => console.error(&format!("Error assigning tenant: {err}"))?,
    }
    Ok(Flow::Continue)
}

fn vacate_property<S, R, W>(
    session: &mut ManagementSession<S>,
    console: &mut Console<R, W>,
) -> io::Result<Flow>
where
    S: PropertyStore,
    R: BufRead,
    W: Write,
{
    writeln!(console.out(), "\n=== VACATE PROPERTY ===")?;

    view_properties(session, console, OccupancyFilter::Occupied)?;
    let Some(property_id) = console.prompt("\nEnter Property ID: ", prompt::required)? else {
        return Ok(Flow::Exit);
    };

    match session.vacate(&property_id) {
        Ok(Persistence::Saved) => console.success(&format!(
            "Property {property_id} has been vacated successfully!"
        ))?,
        Ok(Persistence::NotSaved(err)) => console.error(&format!(
            "Property vacated, but the database update failed: {err}"
        ))?,
        Err(err) => console.error(&format!("Error vacating property: {err}"))?,
    }
    Ok(Flow::Continue)
}
