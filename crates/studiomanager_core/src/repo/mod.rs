//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity family.
//! - Isolate SQL details from callers; return typed records.
//! - Share the cross-family plumbing (readiness checks, idempotent deletes,
//!   validated renames) that every repository repeats.
//!
//! # Invariants
//! - Write paths validate user-entered fields before SQL mutations.
//! - Deletes are idempotent: removing an absent row is a no-op.
//! - Fetches return rows sorted ascending by name with a uuid tiebreak.

use crate::db::{migrations::latest_version, DbError};
use crate::validate::ValidationResult;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod catalog_repo;
pub mod gear_repo;
pub mod preset_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error shared by all entity families.
#[derive(Debug)]
pub enum RepoError {
    /// User-entered fields failed validation; carries the reasons.
    Validation(Vec<String>),
    /// Persistence-layer failure, cause not distinguished further.
    Db(DbError),
    /// The targeted record does not exist (updates only; deletes are no-ops).
    NotFound { entity: &'static str, id: Uuid },
    /// Persisted state could not be interpreted.
    InvalidData(String),
    /// The connection was not opened through `db::open_db` and misses
    /// migrations.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A table required by this repository is absent.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(reasons) => write!(f, "validation failed: {}", reasons.join("; ")),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Converts a validation result into a repository error when invalid.
pub(crate) fn require_valid(result: ValidationResult) -> RepoResult<()> {
    if result.is_valid {
        Ok(())
    } else {
        Err(RepoError::Validation(result.errors))
    }
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

/// Deletes one row by uuid. Absent rows are tolerated so that a double
/// delete never errors.
pub(crate) fn delete_by_uuid(conn: &Connection, table: &str, id: Uuid) -> RepoResult<()> {
    conn.execute(
        &format!("DELETE FROM {table} WHERE uuid = ?1;"),
        [id.to_string()],
    )?;
    Ok(())
}

/// Renames one row by uuid after validating the new name.
pub(crate) fn rename_by_uuid(
    conn: &Connection,
    entity: &'static str,
    table: &str,
    id: Uuid,
    name: &str,
    validation: ValidationResult,
) -> RepoResult<()> {
    require_valid(validation)?;

    let changed = conn.execute(
        &format!("UPDATE {table} SET name = ?2 WHERE uuid = ?1;"),
        rusqlite::params![id.to_string(), name],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }

    Ok(())
}

/// Loads `(uuid, name)` rows of one table sorted by name.
pub(crate) fn fetch_named_rows(
    conn: &Connection,
    table: &str,
    uuid_column: &'static str,
) -> RepoResult<Vec<(Uuid, String)>> {
    let mut stmt =
        conn.prepare(&format!("SELECT uuid, name FROM {table} ORDER BY name ASC, uuid ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        records.push((parse_uuid(&uuid_text, uuid_column)?, row.get("name")?));
    }
    Ok(records)
}

/// Returns whether one row with the given uuid exists in `table`.
pub(crate) fn row_exists(conn: &Connection, table: &str, id: Uuid) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE uuid = ?1);"),
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Verifies the connection went through migration bootstrap and carries the
/// tables this repository touches.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    required_tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in required_tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}
