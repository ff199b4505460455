//! Command-line front end.
//!
//! A thin caller over the library: it opens one [`Db`] session, hands it to
//! the selected command and prints the outcome. All validation and
//! integrity rules live in the `db` layer.

pub mod add;
pub mod init;
pub mod report;
pub mod reset;
pub mod status;

use crate::db::db::Db;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the database location and define the schema")]
    Init(init::InitArgs),
    #[command(about = "Drop and recreate every table")]
    Reset(reset::ResetArgs),
    #[command(about = "Show schema version and row counts")]
    Status,
    #[command(about = "Add a record", arg_required_else_help = true)]
    Add(add::AddArgs),
    #[command(about = "Run a canned report", arg_required_else_help = true)]
    Report(report::ReportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();

        match cli.command {
            Commands::Init(args) => init::cmd(args, cli.db),
            Commands::Reset(args) => reset::cmd(&mut open_db(cli.db)?, args),
            Commands::Status => status::cmd(&open_db(cli.db)?),
            Commands::Add(args) => add::cmd(&mut open_db(cli.db)?, args),
            Commands::Report(args) => report::cmd(&open_db(cli.db)?, args),
        }
    }
}

fn open_db(path: Option<PathBuf>) -> Result<Db> {
    let db = match path {
        Some(path) => Db::open(path)?,
        None => Db::new()?,
    };
    Ok(db)
}
