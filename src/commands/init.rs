//! First-time setup: choose where the database lives and define the schema.

use crate::{
    db::db::Db,
    libs::{config::Config, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Database file to record in the configuration; prompts when omitted
    #[arg(short, long)]
    path: Option<PathBuf>,
}

pub fn cmd(init_args: InitArgs, db_override: Option<PathBuf>) -> Result<()> {
    let config = match init_args.path.or(db_override) {
        Some(path) => Config::with_database_path(path),
        None => Config::init()?,
    };
    config.save()?;
    msg_success!(Message::ConfigSaved);

    let path = config.database_path()?;
    Db::from_config(&config)?;
    msg_info!(Message::SchemaDefined(path.display().to_string()));
    Ok(())
}
