//! Database schema initialization and versioning.

use rusqlite::Connection;

use crate::error::{CadenceError, DatabaseResultExt, Result};

/// Version stamped into `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 2;

/// Enables foreign keys, creates missing tables and stamps the version.
pub(super) fn initialize_schema(connection: &Connection) -> Result<()> {
    connection
        .execute("PRAGMA foreign_keys = ON", [])
        .db_context("Failed to enable foreign keys")?;

    let version: i64 = connection
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .db_context("Failed to read schema version")?;
    if version > SCHEMA_VERSION {
        return Err(CadenceError::Configuration {
            message: format!(
                "Database schema version {version} is newer than supported version {SCHEMA_VERSION}"
            ),
        });
    }

    let schema_sql = include_str!("../../assets/schema.sql");
    connection
        .execute_batch(schema_sql)
        .db_context("Failed to initialize database schema")?;

    if version < SCHEMA_VERSION {
        connection
            .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
            .db_context("Failed to stamp schema version")?;
        log::debug!("Database schema upgraded from version {version} to {SCHEMA_VERSION}");
    }

    Ok(())
}
