//! `PostgreSQL` store implementation.
//!
//! This module provides the `PostgreSQL`-backed implementation of
//! [`TaskStore`] using `sqlx`. Each operation is a single statement executed
//! on a connection checked out of the pool for that statement only.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS todos (
//!     id BIGSERIAL PRIMARY KEY,
//!     title TEXT NOT NULL,
//!     description TEXT
//! );
//! ```
//!
//! Existing `todos` tables created with `SERIAL` ids or a nullable title are
//! also supported: ids are widened to `BIGINT` in every projection and a
//! `NULL` title reads back as an empty string.

use futures::FutureExt;
use sqlx::PgPool;

use crate::domain::{Task, TaskDraft, TaskId};
use crate::infrastructure::{StoreError, StoreFuture, TaskStore};

/// Idempotent bootstrap statement for the `todos` relation.
pub const CREATE_TABLE_STATEMENT: &str = "CREATE TABLE IF NOT EXISTS todos (\
     id BIGSERIAL PRIMARY KEY, \
     title TEXT NOT NULL, \
     description TEXT\
     )";

const SELECT_ALL: &str =
    "SELECT id::BIGINT AS id, title, description FROM todos ORDER BY id DESC";
const SELECT_BY_ID: &str =
    "SELECT id::BIGINT AS id, title, description FROM todos WHERE id = $1";
const INSERT: &str = "INSERT INTO todos (title, description) VALUES ($1, $2) \
     RETURNING id::BIGINT AS id, title, description";
const UPDATE: &str = "UPDATE todos SET title = $1, description = $2 WHERE id = $3 \
     RETURNING id::BIGINT AS id, title, description";
const DELETE: &str = "DELETE FROM todos WHERE id = $1";

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw row as returned by every projection above.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: Option<String>,
    description: Option<String>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: TaskId::new(row.id),
            title: row.title.unwrap_or_default(),
            description: row.description,
        }
    }
}

// =============================================================================
// PostgreSQL Task Store
// =============================================================================

/// `PostgreSQL` implementation of `TaskStore`.
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/todolist").await?;
/// let store = PostgresTaskStore::new(pool);
/// store.ensure_schema().await?;
///
/// let task = store.create(TaskDraft::new("Buy milk", None)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: PgPool,
}

impl PostgresTaskStore {
    /// Creates a store over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the `todos` table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE_STATEMENT)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl TaskStore for PostgresTaskStore {
    fn list(&self) -> StoreFuture<'_, Vec<Task>> {
        select_all(&self.pool).boxed()
    }

    fn find_by_id(&self, id: TaskId) -> StoreFuture<'_, Option<Task>> {
        select_by_id(&self.pool, id).boxed()
    }

    fn create(&self, draft: TaskDraft) -> StoreFuture<'_, Task> {
        insert_row(&self.pool, draft).boxed()
    }

    fn update(&self, id: TaskId, draft: TaskDraft) -> StoreFuture<'_, Option<Task>> {
        update_row(&self.pool, id, draft).boxed()
    }

    fn delete(&self, id: TaskId) -> StoreFuture<'_, bool> {
        delete_row(&self.pool, id).boxed()
    }
}

async fn select_all(pool: &PgPool) -> Result<Vec<Task>, StoreError> {
    let rows: Vec<TaskRow> = sqlx::query_as(SELECT_ALL).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Task::from).collect())
}

async fn select_by_id(pool: &PgPool, id: TaskId) -> Result<Option<Task>, StoreError> {
    let row: Option<TaskRow> = sqlx::query_as(SELECT_BY_ID)
        .bind(id.value())
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Task::from))
}

async fn insert_row(pool: &PgPool, draft: TaskDraft) -> Result<Task, StoreError> {
    let row: TaskRow = sqlx::query_as(INSERT)
        .bind(draft.title)
        .bind(draft.description)
        .fetch_one(pool)
        .await?;

    let task = Task::from(row);
    tracing::debug!(id = %task.id, "Inserted task row");
    Ok(task)
}

async fn update_row(
    pool: &PgPool,
    id: TaskId,
    draft: TaskDraft,
) -> Result<Option<Task>, StoreError> {
    let row: Option<TaskRow> = sqlx::query_as(UPDATE)
        .bind(draft.title)
        .bind(draft.description)
        .bind(id.value())
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Task::from))
}

async fn delete_row(pool: &PgPool, id: TaskId) -> Result<bool, StoreError> {
    let result = sqlx::query(DELETE).bind(id.value()).execute(pool).await?;
    Ok(result.rows_affected() > 0)
}
