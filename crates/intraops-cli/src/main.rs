//! IntraOps CLI
//!
//! Command-line interface for the IntraOps back office

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "intraops")]
#[command(about = "IntraOps - Back-office master data", long_about = None)]
struct Cli {
    /// TOML configuration file; a missing file means defaults
    #[arg(long, global = true, default_value = "intraops.toml")]
    config: PathBuf,

    /// SQLite database, overriding `database_path` from the config
    #[arg(long, global = true, env = "INTRAOPS_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Account group operations
    AccountGroup(commands::account_group::AccountGroupArgs),
    /// Payment term operations
    PaymentTerm(commands::payment_term::PaymentTermArgs),
}

fn main() {
    let cli = Cli::parse();
    let global = commands::GlobalArgs {
        config: cli.config,
        db: cli.db,
    };

    let result = match cli.command {
        Commands::Migrate => commands::migrate::execute(&global),
        Commands::AccountGroup(args) => commands::account_group::execute(&global, args),
        Commands::PaymentTerm(args) => commands::payment_term::execute(&global, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
