use crate::{
    db::db::Db,
    libs::{messages::Message, view::View},
    msg_print,
};
use anyhow::Result;

pub fn cmd(db: &Db) -> Result<()> {
    let location = db.location();
    msg_print!(Message::DatabaseLocation(location));

    msg_print!(Message::SchemaVersion(db.schema_version()?));

    let counts = db.table_row_counts()?;
    msg_print!(Message::TableCountsHeader, true);
    View::table_counts(&counts);
    Ok(())
}
