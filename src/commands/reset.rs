use crate::{
    db::db::Db,
    libs::messages::Message,
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

/// Drops every table and recreates the empty schema.
pub fn cmd(db: &mut Db, args: ResetArgs) -> Result<()> {
    if !args.yes {
        let location = db.location();
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmReset(location).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::ResetCancelled);
            return Ok(());
        }
    }

    db.reset_schema()?;
    msg_success!(Message::SchemaReset);
    Ok(())
}
