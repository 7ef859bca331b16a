//! Plan persistence queries.

use std::collections::BTreeSet;

use rusqlite::{params, types::Type, Connection, Row};

use super::parse_column;
use crate::{
    error::{DatabaseResultExt, Result},
    models::Plan,
};

const PLAN_COLUMNS: &str = "id, title, description, category, cycle, occurrence_days, \
     start_time, end_time, lifetime_target, cycle_target, cycle_count, lifetime_count, \
     last_reset_date, created_at, active, important";

const UPSERT_PLAN_SQL: &str = "INSERT INTO plans (id, title, description, category, cycle, \
     occurrence_days, start_time, end_time, lifetime_target, cycle_target, cycle_count, \
     lifetime_count, last_reset_date, created_at, active, important) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16) \
     ON CONFLICT(id) DO UPDATE SET title = excluded.title, \
     description = excluded.description, category = excluded.category, \
     cycle = excluded.cycle, occurrence_days = excluded.occurrence_days, \
     start_time = excluded.start_time, end_time = excluded.end_time, \
     lifetime_target = excluded.lifetime_target, cycle_target = excluded.cycle_target, \
     cycle_count = excluded.cycle_count, lifetime_count = excluded.lifetime_count, \
     last_reset_date = excluded.last_reset_date, created_at = excluded.created_at, \
     active = excluded.active, important = excluded.important";
// Spawned tasks go with the plan through ON DELETE CASCADE
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
    let days_json: String = row.get(5)?;
    let occurrence_days: BTreeSet<u8> = serde_json::from_str(&days_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Plan {
        id: row.get::<_, i64>(0)? as u64,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        cycle: parse_column(row, 4)?,
        occurrence_days,
        start_time: parse_column(row, 6)?,
        end_time: parse_column(row, 7)?,
        lifetime_target: row.get(8)?,
        cycle_target: row.get(9)?,
        cycle_count: row.get(10)?,
        lifetime_count: row.get(11)?,
        last_reset_date: parse_column(row, 12)?,
        created_at: parse_column(row, 13)?,
        active: row.get(14)?,
        important: row.get(15)?,
    })
}

pub(super) fn load_plans(connection: &Connection) -> Result<Vec<Plan>> {
    let mut stmt = connection
        .prepare(&format!("SELECT {PLAN_COLUMNS} FROM plans ORDER BY id"))
        .db_context("Failed to prepare plan query")?;
    let plans = stmt
        .query_map([], plan_from_row)
        .db_context("Failed to query plans")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read plan row")?;
    Ok(plans)
}

pub(super) fn upsert_plan(connection: &Connection, plan: &Plan) -> Result<()> {
    let occurrence_days = serde_json::to_string(&plan.occurrence_days)?;
    connection
        .execute(
            UPSERT_PLAN_SQL,
            params![
                plan.id as i64,
                plan.title,
                plan.description,
                plan.category,
                plan.cycle.as_str(),
                occurrence_days,
                plan.start_time.to_string(),
                plan.end_time.to_string(),
                plan.lifetime_target,
                plan.cycle_target,
                plan.cycle_count,
                plan.lifetime_count,
                plan.last_reset_date.to_string(),
                plan.created_at.to_string(),
                plan.active,
                plan.important,
            ],
        )
        .db_context(&format!("Failed to save plan {}", plan.id))?;
    Ok(())
}

pub(super) fn delete_plan(connection: &Connection, id: u64) -> Result<()> {
    connection
        .execute(DELETE_PLAN_SQL, params![id as i64])
        .db_context(&format!("Failed to delete plan {id}"))?;
    Ok(())
}
