use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{TaskCreate, TaskUpdate},
    services::tasks,
};
use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;

/// Lists the authenticated user's tasks, most recently created first.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = tasks::list(pool.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task owned by the authenticated user.
///
/// The title is trimmed before validation; the new task starts as
/// `Incomplete`. Responds 201 with the stored record.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    payload: web::Json<TaskCreate>,
) -> Result<impl Responder, AppError> {
    let task = tasks::create(pool.get_ref(), user.0.id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Fetches one task by id. A task owned by another user responds 404, same
/// as a task that does not exist.
#[get("/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = tasks::get(pool.get_ref(), task_id.into_inner(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates a task. Only the provided fields change.
#[put("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: CurrentUser,
    payload: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let task = tasks::update(
        pool.get_ref(),
        task_id.into_inner(),
        user.0.id,
        payload.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Flips a task between `Incomplete` and `Complete`.
#[patch("/{id}/toggle")]
pub async fn toggle_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = tasks::toggle(pool.get_ref(), task_id.into_inner(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task. Responds 204 with no body; deleting the same id again
/// responds 404.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    tasks::delete(pool.get_ref(), task_id.into_inner(), user.0.id).await?;
    Ok(HttpResponse::NoContent().finish())
}
