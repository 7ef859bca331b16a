//! Settings stored as key/value rows.
//!
//! Each field of [`Settings`] is one row whose value is the field's JSON
//! encoding. Missing rows fall back to the field's default and unknown
//! keys are ignored.

use rusqlite::{params, Connection};
use serde_json::{Map, Value};

use crate::{
    error::{CadenceError, DatabaseResultExt, Result},
    models::Settings,
};

const SELECT_SETTINGS_SQL: &str = "SELECT key, value FROM settings";
const UPSERT_SETTING_SQL: &str = "INSERT INTO settings (key, value) VALUES (?1, ?2) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";

pub(super) fn load_settings(connection: &Connection) -> Result<Settings> {
    let mut stmt = connection
        .prepare(SELECT_SETTINGS_SQL)
        .db_context("Failed to prepare settings query")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .db_context("Failed to query settings")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read settings row")?;

    let mut map = Map::new();
    for (key, value) in rows {
        map.insert(key, serde_json::from_str(&value)?);
    }
    Ok(serde_json::from_value(Value::Object(map))?)
}

pub(super) fn save_settings(connection: &Connection, settings: &Settings) -> Result<()> {
    let Value::Object(map) = serde_json::to_value(settings)? else {
        return Err(CadenceError::Persistence {
            message: "Settings did not serialize to an object".to_string(),
        });
    };
    for (key, value) in map {
        connection
            .execute(UPSERT_SETTING_SQL, params![key, value.to_string()])
            .db_context(&format!("Failed to save setting '{key}'"))?;
    }
    Ok(())
}
