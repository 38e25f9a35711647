//! `cloud-vendor` command-line entry point.
//!
//! # Responsibility
//! - Map each `CloudVendorService` operation onto a subcommand.
//! - Resolve db path and logging config from flags, env, then defaults.
//! - Print results to stdout (JSON for records) and errors to stderr.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use cloud_vendor_core::db::open_db;
use cloud_vendor_core::{
    default_log_level, init_logging, init_stderr_logging, CloudVendor, CloudVendorService,
    SqliteCloudVendorRepository, VendorListQuery, VendorServiceError,
};
use log::error;
use rusqlite::Connection;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "cloud-vendor", version, about = "Manage cloud vendor records")]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "CLOUD_VENDOR_DB", default_value = "cloud_vendor.sqlite3", global = true)]
    db: PathBuf,

    /// trace|debug|info|warn|error
    #[arg(long, env = "CLOUD_VENDOR_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr when unset.
    #[arg(long, env = "CLOUD_VENDOR_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new vendor.
    Create(VendorArgs),
    /// Replace an existing vendor.
    Update(VendorArgs),
    /// Delete a vendor by id.
    Delete { id: String },
    /// Print one vendor as JSON.
    Get { id: String },
    /// Print vendors ordered by id as a JSON array.
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Print vendors with exactly this name as a JSON array.
    FindByName { name: String },
    /// Print the number of stored vendors.
    Count,
}

#[derive(Debug, Args)]
struct VendorArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    phone: Option<String>,
}

impl From<VendorArgs> for CloudVendor {
    fn from(args: VendorArgs) -> Self {
        Self {
            vendor_id: args.id,
            vendor_name: args.name,
            vendor_address: args.address,
            vendor_phone_number: args.phone,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = setup_logging(&cli) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(
                "event=cli_command module=cli status=error error_code={}",
                error_code(&err)
            );
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(cli: &Cli) -> Result<(), String> {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    match cli.log_dir.as_deref() {
        Some(dir) => init_logging(level, dir),
        None => init_stderr_logging(level),
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let conn = open_db(&cli.db)
        .map_err(VendorServiceError::from)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    execute(cli.command, &conn)
}

/// Runs one subcommand against a migrated connection and renders its output.
fn execute(command: Command, conn: &Connection) -> anyhow::Result<String> {
    let repo = SqliteCloudVendorRepository::try_new(conn).map_err(VendorServiceError::from)?;
    let service = CloudVendorService::new(repo);

    let output = match command {
        Command::Create(args) => service.create_cloud_vendor(&args.into())?.to_string(),
        Command::Update(args) => service.update_cloud_vendor(&args.into())?.to_string(),
        Command::Delete { id } => service.delete_cloud_vendor(&id)?.to_string(),
        Command::Get { id } => serde_json::to_string_pretty(&service.require_cloud_vendor(&id)?)?,
        Command::List { limit, offset } => {
            let vendors = if limit.is_none() && offset == 0 {
                service.get_all_cloud_vendors()?
            } else {
                service.list_cloud_vendors(&VendorListQuery { limit, offset })?
            };
            serde_json::to_string_pretty(&vendors)?
        }
        Command::FindByName { name } => {
            serde_json::to_string_pretty(&service.get_by_vendor_name(&name)?)?
        }
        Command::Count => service.count_cloud_vendors()?.to_string(),
    };

    Ok(output)
}

/// Service errors keep their `code()`; anything else is `internal_error`.
fn error_code(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<VendorServiceError>()
        .map_or("internal_error", VendorServiceError::code)
}

fn render_error(err: &anyhow::Error) -> String {
    format!("error[{}]: {err:#}", error_code(err))
}
