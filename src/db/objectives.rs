//! Learning objectives and their sub-objective tree.
//!
//! Each objective may name a parent objective. The storage layer only checks
//! that the parent exists, so acyclicity is enforced here: before inserting,
//! the ancestor chain of the proposed parent is walked and the insert is
//! rejected if it reaches the new objective's id.

use super::db::Db;
use crate::libs::error::{Constraint, IntegrityError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const INSERT_OBJECTIVE: &str = "INSERT INTO learning_objectives (id, description, parent_id) VALUES (?1, ?2, ?3)";
const SELECT_OBJECTIVE_BY_ID: &str = "SELECT id, description, parent_id FROM learning_objectives WHERE id = ?1";
const SELECT_PARENT_ID: &str = "SELECT parent_id FROM learning_objectives WHERE id = ?1";
const SELECT_CHILDREN: &str = "SELECT id, description, parent_id FROM learning_objectives WHERE parent_id = ?1 ORDER BY id";
const SELECT_ROOTS: &str = "SELECT id, description, parent_id FROM learning_objectives WHERE parent_id IS NULL ORDER BY id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningObjective {
    pub id: String,
    pub description: String,
    pub parent_id: Option<String>,
}

impl LearningObjective {
    pub fn new(id: impl Into<String>, description: impl Into<String>, parent_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            parent_id,
        }
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            description: row.get(1)?,
            parent_id: row.get(2)?,
        })
    }
}

pub struct Objectives<'a> {
    db: &'a mut Db,
}

impl<'a> Objectives<'a> {
    pub fn new(db: &'a mut Db) -> Self {
        Self { db }
    }

    /// Adds an objective, optionally as a sub-objective of `parent_id`.
    ///
    /// Fails with [`Constraint::SelfParent`] when the objective names itself
    /// as parent, [`Constraint::Cycle`] when the parent chain leads back to
    /// it, and [`Constraint::ForeignKey`] when any link in the chain is missing.
    pub fn insert(&mut self, objective: &LearningObjective) -> Result<()> {
        self.db
            .transaction(|tx| {
                if let Some(parent_id) = &objective.parent_id {
                    check_parent_chain(tx, &objective.id, parent_id)?;
                }
                tx.execute(INSERT_OBJECTIVE, params![objective.id, objective.description, objective.parent_id])?;
                Ok(())
            })
            .inspect(|_| tracing::debug!(id = %objective.id, parent = ?objective.parent_id, "objective added"))
            .inspect_err(|e| tracing::warn!(id = %objective.id, error = %e, "objective rejected"))
    }

    pub fn get(&self, id: &str) -> Result<Option<LearningObjective>> {
        let objective = self
            .db
            .conn
            .query_row(SELECT_OBJECTIVE_BY_ID, params![id], LearningObjective::from_row)
            .optional()?;
        Ok(objective)
    }

    /// Direct sub-objectives of `id`, sorted by id.
    pub fn children(&self, id: &str) -> Result<Vec<LearningObjective>> {
        self.query_list(SELECT_CHILDREN, id)
    }

    /// Objectives without a parent, sorted by id.
    pub fn roots(&self) -> Result<Vec<LearningObjective>> {
        let mut stmt = self.db.conn.prepare(SELECT_ROOTS)?;
        let objectives = stmt
            .query_map([], LearningObjective::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(objectives)
    }

    /// Ancestors of `id`, nearest parent first.
    pub fn ancestors(&self, id: &str) -> Result<Vec<LearningObjective>> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::from([id.to_string()]);
        let mut next = parent_of(&self.db.conn, id)?.flatten();

        while let Some(parent_id) = next {
            if !seen.insert(parent_id.clone()) {
                break;
            }
            let Some(parent) = self.get(&parent_id)? else {
                break;
            };
            next = parent.parent_id.clone();
            ancestors.push(parent);
        }
        Ok(ancestors)
    }

    fn query_list(&self, sql: &str, id: &str) -> Result<Vec<LearningObjective>> {
        let mut stmt = self.db.conn.prepare(sql)?;
        let objectives = stmt
            .query_map(params![id], LearningObjective::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(objectives)
    }
}

/// `None` if `id` does not exist, `Some(None)` for a root objective.
fn parent_of(conn: &Connection, id: &str) -> Result<Option<Option<String>>> {
    let parent = conn
        .query_row(SELECT_PARENT_ID, params![id], |row| row.get::<_, Option<String>>(0))
        .optional()?;
    Ok(parent)
}

/// Walks from `parent_id` to the root, rejecting the insert of `id` if the
/// walk reaches it or hits a dangling link.
fn check_parent_chain(conn: &Connection, id: &str, parent_id: &str) -> Result<()> {
    if parent_id == id {
        return Err(IntegrityError::new(Constraint::SelfParent, format!("objective '{id}' cannot be its own parent")).into());
    }

    let mut seen = HashSet::new();
    let mut current = parent_id.to_string();
    loop {
        if current == id || !seen.insert(current.clone()) {
            return Err(IntegrityError::new(
                Constraint::Cycle,
                format!("making '{parent_id}' the parent of '{id}' would create a cycle"),
            )
            .into());
        }

        match parent_of(conn, &current)? {
            None => return Err(IntegrityError::missing_reference("learning_objectives", "id", &current).into()),
            Some(None) => return Ok(()),
            Some(Some(next)) => current = next,
        }
    }
}
