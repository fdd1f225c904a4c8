use crate::{
    auth::AuthContext,
    error::AppError,
    models::{parse_id, TaskInput, TaskPatch},
    tasks::TaskRepository,
};
use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde_json::json;

/// Creates a task owned by the caller.
///
/// ## Responses:
/// - `200 OK`: the created task.
/// - `400 Bad Request`: `text` missing or blank.
/// - `401 Unauthorized`: missing or revoked token.
#[post("")]
pub async fn create_task(
    repo: web::Data<TaskRepository>,
    auth: AuthContext,
    task_data: web::Json<TaskInput>,
) -> Result<HttpResponse, AppError> {
    let task = repo.create(auth.user.id, task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Lists the caller's tasks as `{"todos": [...]}`.
#[get("")]
pub async fn get_tasks(
    repo: web::Data<TaskRepository>,
    auth: AuthContext,
) -> Result<HttpResponse, AppError> {
    let todos = repo.list_by_owner(auth.user.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "todos": todos })))
}

/// Fetches one task as `{"todo": ...}`.
///
/// ## Responses:
/// - `400 Bad Request`: `id` is not a valid identifier.
/// - `404 Not Found`: no such task, or the task belongs to another user.
#[get("/{id}")]
pub async fn get_task(
    repo: web::Data<TaskRepository>,
    auth: AuthContext,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&task_id)?;
    let todo = repo.get_by_id_for_owner(auth.user.id, id).await?;
    Ok(HttpResponse::Ok().json(json!({ "todo": todo })))
}

/// Deletes one task and returns what was deleted as `{"todo": ...}`.
#[delete("/{id}")]
pub async fn delete_task(
    repo: web::Data<TaskRepository>,
    auth: AuthContext,
    task_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&task_id)?;
    let todo = repo.delete_by_id_for_owner(auth.user.id, id).await?;
    Ok(HttpResponse::Ok().json(json!({ "todo": todo })))
}

/// Updates `text` and/or `completed` of one task and returns it as `{"todo": ...}`.
///
/// `completedAt` is managed by the server: it is stamped when `completed` is
/// `true` and cleared otherwise.
#[patch("/{id}")]
pub async fn update_task(
    repo: web::Data<TaskRepository>,
    auth: AuthContext,
    task_id: web::Path<String>,
    patch: web::Json<TaskPatch>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&task_id)?;
    let todo = repo
        .update_by_id_for_owner(auth.user.id, id, patch.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "todo": todo })))
}
