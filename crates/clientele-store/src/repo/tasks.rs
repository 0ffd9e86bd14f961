use crate::error::{Result, StoreError};
use crate::repo::{parse_enum, parse_id};
use clientele_core::domain::{ActivityStatus, CustomerId, Task, TaskId, TaskNew};
use rusqlite::{params, Connection, Params};

const SELECT_TASKS: &str =
    "SELECT id, customer_id, title, description, status, due_at, created_at FROM tasks";

pub struct TasksRepo<'a> {
    conn: &'a Connection,
}

impl<'a> TasksRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn add(&self, task: &Task) -> Result<()> {
        task.ensure_valid()?;
        self.conn.execute(
            "INSERT INTO tasks (id, customer_id, title, description, status, due_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                task.id().to_string(),
                task.customer_id().to_string(),
                task.title,
                task.description,
                task.status.as_str(),
                task.due_at,
                task.created_at(),
            ],
        )?;
        Ok(())
    }

    pub fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let mut items = self.query(&format!("{SELECT_TASKS} WHERE id = ?1;"), [id.to_string()])?;
        Ok(items.pop())
    }

    pub fn list_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Task>> {
        self.query(
            &format!("{SELECT_TASKS} WHERE customer_id = ?1 ORDER BY created_at ASC, id ASC;"),
            [customer_id.to_string()],
        )
    }

    /// Tasks whose due date has passed and that are not done.
    pub fn list_overdue(&self, now_utc: i64) -> Result<Vec<Task>> {
        self.query(
            &format!(
                "{SELECT_TASKS}
                 WHERE due_at IS NOT NULL AND due_at < ?1 AND status != ?2
                 ORDER BY due_at ASC, id ASC;"
            ),
            params![now_utc, ActivityStatus::Done.as_str()],
        )
    }

    pub fn list_all(&self) -> Result<Vec<Task>> {
        self.query(&format!("{SELECT_TASKS} ORDER BY created_at ASC, id ASC;"), [])
    }

    pub fn update(&self, task: &Task) -> Result<()> {
        task.ensure_valid()?;
        let updated = self.conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, status = ?4, due_at = ?5 WHERE id = ?1;",
            params![
                task.id().to_string(),
                task.title,
                task.description,
                task.status.as_str(),
                task.due_at,
            ],
        )?;
        if updated == 0 {
            return Err(StoreError::NotFound(task.id().to_string()));
        }
        Ok(())
    }

    pub fn delete(&self, id: TaskId) -> Result<()> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;
        Ok(())
    }

    fn query<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(task_from_row(row)?);
        }
        Ok(items)
    }
}

fn task_from_row(row: &rusqlite::Row<'_>) -> Result<Task> {
    let id: TaskId = parse_id(row.get(0)?)?;
    let customer_id: CustomerId = parse_id(row.get(1)?)?;
    let status = parse_enum("tasks.status", row.get(4)?)?;
    Ok(Task::restore(
        id,
        row.get(6)?,
        TaskNew {
            customer_id,
            title: row.get(2)?,
            description: row.get(3)?,
            status,
            due_at: row.get(5)?,
        },
    ))
}
