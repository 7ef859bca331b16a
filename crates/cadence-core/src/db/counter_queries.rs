//! Id counter rows, one per collection.

use rusqlite::{params, Connection};

use crate::{
    error::{DatabaseResultExt, Result},
    store::IdCounters,
};

const SELECT_COUNTERS_SQL: &str = "SELECT name, next_id FROM counters";
const UPSERT_COUNTER_SQL: &str = "INSERT INTO counters (name, next_id) VALUES (?1, ?2) \
     ON CONFLICT(name) DO UPDATE SET next_id = MAX(next_id, excluded.next_id)";

pub(super) fn load_counters(connection: &Connection) -> Result<IdCounters> {
    let mut stmt = connection
        .prepare(SELECT_COUNTERS_SQL)
        .db_context("Failed to prepare counters query")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
        .db_context("Failed to query counters")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read counter row")?;

    let mut counters = IdCounters::default();
    for (name, next_id) in rows {
        match name.as_str() {
            "task" => counters.next_task_id = next_id as u64,
            "plan" => counters.next_plan_id = next_id as u64,
            _ => {}
        }
    }
    Ok(counters)
}

/// Counters only move forward.
pub(super) fn save_counters(connection: &Connection, counters: &IdCounters) -> Result<()> {
    for (name, next_id) in [
        ("task", counters.next_task_id),
        ("plan", counters.next_plan_id),
    ] {
        connection
            .execute(UPSERT_COUNTER_SQL, params![name, next_id as i64])
            .db_context(&format!("Failed to save {name} counter"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> Connection {
        let connection = Connection::open_in_memory().expect("open");
        super::super::migrations::initialize_schema(&connection).expect("schema");
        connection
    }

    #[test]
    fn test_missing_rows_load_as_zero() {
        let connection = connection();
        assert_eq!(load_counters(&connection).expect("load"), IdCounters::default());
    }

    #[test]
    fn test_counters_never_move_backwards() {
        let connection = connection();
        let high = IdCounters {
            next_task_id: 8,
            next_plan_id: 3,
        };
        save_counters(&connection, &high).expect("save");
        save_counters(
            &connection,
            &IdCounters {
                next_task_id: 5,
                next_plan_id: 4,
            },
        )
        .expect("save lower");

        let loaded = load_counters(&connection).expect("load");
        assert_eq!(loaded.next_task_id, 8);
        assert_eq!(loaded.next_plan_id, 4);
    }
}
