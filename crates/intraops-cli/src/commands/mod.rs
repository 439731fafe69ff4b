//! Subcommand implementations

pub mod account_group;
pub mod migrate;
pub mod payment_term;

use std::path::PathBuf;

use clap::Args;
use intraops_core::errors::Result;
use intraops_core::logging_facility;
use intraops_core::ListOptions;
use intraops_engine::{AppConfig, Services};
use intraops_store::Database;
use serde::Serialize;

/// Options shared by every subcommand
#[derive(Debug)]
pub struct GlobalArgs {
    pub config: PathBuf,
    pub db: Option<PathBuf>,
}

/// Paging flags of the `list` subcommands
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Maximum items to return
    #[arg(long)]
    pub limit: Option<usize>,

    /// Cursor printed by the previous page
    #[arg(long)]
    pub cursor: Option<String>,

    /// Only items whose name contains this text (case-insensitive)
    #[arg(long)]
    pub name_contains: Option<String>,
}

impl From<ListArgs> for ListOptions {
    fn from(args: ListArgs) -> Self {
        ListOptions {
            limit: args.limit,
            cursor: args.cursor,
            name_contains: args.name_contains,
        }
    }
}

/// Load the config, start logging and open the database
pub fn connect(global: &GlobalArgs) -> Result<(AppConfig, Database)> {
    let mut config = AppConfig::load(&global.config)?;
    if let Some(db) = &global.db {
        config.database_path = db.clone();
    }
    logging_facility::init(config.log_profile);

    let db = Database::open(&config.database_path)?;
    Ok((config, db))
}

/// Build the services over the configured database, migrating it first
pub fn services(global: &GlobalArgs) -> Result<Services> {
    let (config, db) = connect(global)?;
    db.migrate()?;
    Services::build(db, &config)
}

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
