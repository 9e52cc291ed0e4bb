//! Task registry: CRUD over tasks, scoped to an owning user.
//!
//! Every lookup keys on `(id, user_id)` in a single query, so a task owned
//! by someone else and a task that does not exist produce the same
//! `NotFound`. There is no separate existence check anywhere in this module.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskCreate, TaskStatus, TaskUpdate};

fn validate_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".into()));
    }
    if title.chars().count() > 200 {
        return Err(AppError::InvalidInput("Title exceeds 200 characters".into()));
    }
    Ok(title.to_string())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.chars().count() > 1000 {
        return Err(AppError::InvalidInput(
            "Description exceeds 1000 characters".into(),
        ));
    }
    Ok(())
}

/// Creates a task for `user_id`, trimming the title and starting as
/// `Incomplete`.
pub async fn create(pool: &PgPool, user_id: i32, input: TaskCreate) -> Result<Task, AppError> {
    let title = validate_title(&input.title)?;
    if let Some(description) = &input.description {
        validate_description(description)?;
    }

    let task = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, user_id, title, description, status)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, user_id, title, description, status, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(title)
    .bind(&input.description)
    .bind(TaskStatus::Incomplete)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

/// All tasks owned by `user_id`, most recently created first.
pub async fn list(pool: &PgPool, user_id: i32) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, user_id, title, description, status, created_at, updated_at
         FROM tasks WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Fetches a single task. Ownership is part of the lookup key.
pub async fn get(pool: &PgPool, task_id: Uuid, user_id: i32) -> Result<Task, AppError> {
    sqlx::query_as::<_, Task>(
        "SELECT id, user_id, title, description, status, created_at, updated_at
         FROM tasks WHERE id = $1 AND user_id = $2",
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Applies a partial update. Provided fields are validated with the same
/// rules as `create`; absent fields keep their current values. `updated_at`
/// refreshes on every call, including one with no fields set.
pub async fn update(
    pool: &PgPool,
    task_id: Uuid,
    user_id: i32,
    input: TaskUpdate,
) -> Result<Task, AppError> {
    let current = get(pool, task_id, user_id).await?;

    let title = match &input.title {
        Some(raw) => validate_title(raw)?,
        None => current.title,
    };
    let description = match input.description {
        Some(description) => {
            validate_description(&description)?;
            Some(description)
        }
        None => current.description,
    };
    let status = input.status.unwrap_or(current.status);

    let task = sqlx::query_as::<_, Task>(
        "UPDATE tasks SET title = $1, description = $2, status = $3, updated_at = NOW()
         WHERE id = $4 AND user_id = $5
         RETURNING id, user_id, title, description, status, created_at, updated_at",
    )
    .bind(title)
    .bind(description)
    .bind(status)
    .bind(task_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

/// Flips the status between `Incomplete` and `Complete`. No other field
/// changes.
pub async fn toggle(pool: &PgPool, task_id: Uuid, user_id: i32) -> Result<Task, AppError> {
    let current = get(pool, task_id, user_id).await?;

    let task = sqlx::query_as::<_, Task>(
        "UPDATE tasks SET status = $1, updated_at = NOW()
         WHERE id = $2 AND user_id = $3
         RETURNING id, user_id, title, description, status, created_at, updated_at",
    )
    .bind(current.status.toggled())
    .bind(task_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

/// Deletes the task. A second call for the same id reports `NotFound`.
pub async fn delete(pool: &PgPool, task_id: Uuid, user_id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(())
}
