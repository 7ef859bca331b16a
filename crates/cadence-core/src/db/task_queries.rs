//! Task persistence queries.

use rusqlite::{params, Connection, Row};

use super::{parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::Task,
};

const TASK_COLUMNS: &str = "id, title, description, category, completed, completed_at, \
     important, priority, due_date, created_at, source_plan_id";

const UPSERT_TASK_SQL: &str = "INSERT INTO tasks (id, title, description, category, completed, \
     completed_at, important, priority, due_date, created_at, source_plan_id) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11) \
     ON CONFLICT(id) DO UPDATE SET title = excluded.title, \
     description = excluded.description, category = excluded.category, \
     completed = excluded.completed, completed_at = excluded.completed_at, \
     important = excluded.important, priority = excluded.priority, \
     due_date = excluded.due_date, created_at = excluded.created_at, \
     source_plan_id = excluded.source_plan_id";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get::<_, i64>(0)? as u64,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        completed: row.get(4)?,
        completed_at: parse_optional_column(row, 5)?,
        important: row.get(6)?,
        priority: parse_column(row, 7)?,
        due_date: parse_optional_column(row, 8)?,
        created_at: parse_column(row, 9)?,
        source_plan_id: row.get::<_, Option<i64>>(10)?.map(|id| id as u64),
    })
}

pub(super) fn load_tasks(connection: &Connection) -> Result<Vec<Task>> {
    let mut stmt = connection
        .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id"))
        .db_context("Failed to prepare task query")?;
    let tasks = stmt
        .query_map([], task_from_row)
        .db_context("Failed to query tasks")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read task row")?;
    Ok(tasks)
}

pub(super) fn upsert_task(connection: &Connection, task: &Task) -> Result<()> {
    connection
        .execute(
            UPSERT_TASK_SQL,
            params![
                task.id as i64,
                task.title,
                task.description,
                task.category,
                task.completed,
                task.completed_at.map(|ts| ts.to_string()),
                task.important,
                task.priority.as_str(),
                task.due_date.map(|d| d.to_string()),
                task.created_at.to_string(),
                task.source_plan_id.map(|id| id as i64),
            ],
        )
        .db_context(&format!("Failed to save task {}", task.id))?;
    Ok(())
}

pub(super) fn delete_task(connection: &Connection, id: u64) -> Result<()> {
    connection
        .execute(DELETE_TASK_SQL, params![id as i64])
        .db_context(&format!("Failed to delete task {id}"))?;
    Ok(())
}
