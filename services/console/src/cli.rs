use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use property_manager::config::{AppConfig, DatabaseConfig};
use property_manager::error::AppError;
use property_manager::import::{CsvImporter, ImportSummary};
use property_manager::persistence::{MemoryStore, PropertyStore, SqliteStore};
use property_manager::registry::{property_rows, tenant_rows, OccupancyFilter};
use property_manager::session::ManagementSession;
use property_manager::telemetry;
use tracing::info;

use crate::menu;
use crate::prompt::Console;
use crate::render::{property_table, tenant_table};

#[derive(Parser, Debug)]
#[command(
    name = "Property Management System",
    about = "Track rental properties, tenants and who lives where",
    version
)]
struct Cli {
    /// SQLite database file (overrides APP_DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    /// Keep records in memory only; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive menu (default command)
    Menu,
    /// List properties
    Properties(ListPropertiesArgs),
    /// List tenants
    Tenants(ListTenantsArgs),
    /// Bulk-load records from a CSV file
    Import {
        #[command(subcommand)]
        command: ImportCommand,
    },
}

#[derive(Args, Debug)]
struct ListPropertiesArgs {
    /// Which properties to show
    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    status: StatusFilter,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ListTenantsArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum ImportCommand {
    /// Columns: property_id,address,monthly_rent,bedrooms,square_footage,property_type
    Properties { path: PathBuf },
    /// Columns: tenant_id,full_name,email,phone,date_of_birth
    Tenants { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusFilter {
    All,
    Available,
    Occupied,
}

impl From<StatusFilter> for OccupancyFilter {
    fn from(value: StatusFilter) -> Self {
        match value {
            StatusFilter::All => OccupancyFilter::All,
            StatusFilter::Available => OccupancyFilter::Available,
            StatusFilter::Occupied => OccupancyFilter::Occupied,
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(path) = cli.database {
        config.database = DatabaseConfig::new(path.to_string_lossy())?;
    }

    telemetry::init(&config.telemetry)?;
    info!(?config.environment, ephemeral = cli.ephemeral, "starting property manager");

    let command = cli.command.unwrap_or(Command::Menu);
    if cli.ephemeral {
        let session = ManagementSession::open(MemoryStore::new())?;
        execute(command, session)
    } else {
        let store = SqliteStore::open(&config.database.path)?;
        let session = ManagementSession::open(store)?;
        execute(command, session)
    }
}

fn execute<S: PropertyStore>(
    command: Command,
    mut session: ManagementSession<S>,
) -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Menu => {
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), out, today);
            menu::run(&mut session, &mut console)?;
        }
        Command::Properties(args) => {
            let rows = property_rows(session.manager(), args.status.into());
            if args.json {
                serde_json::to_writer_pretty(&mut out, &rows)?;
                writeln!(out)?;
            } else if rows.is_empty() {
                writeln!(out, "No properties found.")?;
            } else {
                writeln!(out, "{}", property_table(&rows))?;
            }
        }
        Command::Tenants(args) => {
            let rows = tenant_rows(session.manager(), today);
            if args.json {
                serde_json::to_writer_pretty(&mut out, &rows)?;
                writeln!(out)?;
            } else if rows.is_empty() {
                writeln!(out, "No tenants found.")?;
            } else {
                writeln!(out, "{}", tenant_table(&rows))?;
            }
        }
        Command::Import { command } => {
            let (label, summary) = match command {
                ImportCommand::Properties { path } => (
                    "properties",
                    CsvImporter::properties_from_path(path, &mut session)?,
                ),
                ImportCommand::Tenants { path } => (
                    "tenants",
                    CsvImporter::tenants_from_path(path, &mut session)?,
                ),
            };
            report_import(&mut out, label, &summary)?;
        }
    }

    Ok(())
}

fn report_import<W: Write>(out: &mut W, label: &str, summary: &ImportSummary) -> io::Result<()> {
    writeln!(out, "Imported {} {label}.", summary.added)?;
    if !summary.duplicates.is_empty() {
        writeln!(
            out,
            "Skipped {} already stored: {}",
            summary.duplicates.len(),
            summary.duplicates.join(", ")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_menu_without_subcommand() {
        let cli = Cli::try_parse_from(["property-manager-console"]).expect("parses");
        assert!(cli.command.is_none());
        assert!(!cli.ephemeral);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "property-manager-console",
            "properties",
            "--status",
            "occupied",
            "--json",
            "--ephemeral",
        ])
        .expect("parses");

        assert!(cli.ephemeral);
        match cli.command {
            Some(Command::Properties(args)) => {
                assert_eq!(args.status, StatusFilter::Occupied);
                assert!(args.json);
            }
            other => panic!("expected properties command, got {other:?}"),
        }
    }

    #[test]
    fn parses_import_subcommand() {
        let cli = Cli::try_parse_from([
            "property-manager-console",
            "--database",
            "records.db",
            "import",
            "tenants",
            "tenants.csv",
        ])
        .expect("parses");

        assert_eq!(cli.database, Some(PathBuf::from("records.db")));
        match cli.command {
            Some(Command::Import {
                command: ImportCommand::Tenants { path },
            }) => assert_eq!(path, PathBuf::from("tenants.csv")),
            other => panic!("expected import command, got {other:?}"),
        }
    }

    #[test]
    fn import_report_lists_duplicates() {
        let summary = ImportSummary {
            added: 2,
            duplicates: vec!["P1".to_string(), "P7".to_string()],
        };
        let mut out = Vec::new();
        report_import(&mut out, "properties", &summary).expect("writes");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Imported 2 properties."));
        assert!(text.contains("Skipped 2 already stored: P1, P7"));
    }

    #[test]
    fn status_filter_maps_to_occupancy_filter() {
        assert_eq!(
            OccupancyFilter::from(StatusFilter::Available),
            OccupancyFilter::Available
        );
    }
}
