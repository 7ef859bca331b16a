//! History persistence queries. Records are only ever inserted.

use rusqlite::{params, Connection, Row};

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, Result},
    models::HistoryRecord,
};

const INSERT_RECORD_SQL: &str = "INSERT INTO history (id, kind, title, timestamp, subject_id, \
     subject_type) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_HISTORY_SQL: &str = "SELECT id, kind, title, timestamp, subject_id, subject_type \
     FROM history ORDER BY id";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
    Ok(HistoryRecord {
        id: row.get::<_, i64>(0)? as u64,
        kind: parse_column(row, 1)?,
        title: row.get(2)?,
        timestamp: parse_column(row, 3)?,
        subject_id: row.get::<_, i64>(4)? as u64,
        subject_type: parse_column(row, 5)?,
    })
}

pub(super) fn load_history(connection: &Connection) -> Result<Vec<HistoryRecord>> {
    let mut stmt = connection
        .prepare(SELECT_HISTORY_SQL)
        .db_context("Failed to prepare history query")?;
    let records = stmt
        .query_map([], record_from_row)
        .db_context("Failed to query history")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read history row")?;
    Ok(records)
}

pub(super) fn insert_record(connection: &Connection, record: &HistoryRecord) -> Result<()> {
    connection
        .execute(
            INSERT_RECORD_SQL,
            params![
                record.id as i64,
                record.kind.as_str(),
                record.title,
                record.timestamp.to_string(),
                record.subject_id as i64,
                record.subject_type.as_str(),
            ],
        )
        .db_context(&format!("Failed to append history record {}", record.id))?;
    Ok(())
}
