//! HTTP handlers for the books module.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use bookshelf_http::{error::AppError, response::ApiResponse};

use super::models::{BookDetail, BookList, BookPayload, CreatedBook};
use super::repository::{BookError, BookRepository};

pub type SharedBookRepository = Arc<dyn BookRepository>;

/// Verb used in the operation-specific failure messages.
#[derive(Debug, Clone, Copy)]
enum Action {
    Add,
    Update,
    Delete,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

fn failure(action: Action, error: BookError) -> AppError {
    let verb = action.verb();
    match error {
        BookError::MissingName => AppError::validation(format!(
            "Failed to {} book. Please provide the book name",
            verb
        )),
        BookError::ReadPageExceedsPageCount { .. } => AppError::validation(format!(
            "Failed to {} book. readPage must not be greater than pageCount",
            verb
        )),
        BookError::NotFound(_) => {
            AppError::not_found(format!("Failed to {} book. Id not found", verb))
        }
    }
}

/// Routes relative to the module mount point.
pub fn router(repository: SharedBookRepository) -> Router {
    Router::new()
        .route("/", get(list_books).post(add_book))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(repository)
}

async fn add_book(
    State(repository): State<SharedBookRepository>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<CreatedBook>, AppError> {
    let Json(payload) = payload?;
    let book_id = repository
        .insert(payload)
        .await
        .map_err(|e| failure(Action::Add, e))?;

    tracing::info!(%book_id, "book added");
    Ok(ApiResponse::created(CreatedBook { book_id }).with_message("Book added successfully"))
}

async fn list_books(State(repository): State<SharedBookRepository>) -> ApiResponse<BookList> {
    let books = repository.list_summaries().await;
    ApiResponse::ok(BookList { books })
}

async fn get_book(
    State(repository): State<SharedBookRepository>,
    Path(id): Path<String>,
) -> Result<ApiResponse<BookDetail>, AppError> {
    let book = repository.get_by_id(&id).await.map_err(|e| match e {
        BookError::NotFound(_) => AppError::not_found("Book not found"),
        other => AppError::Internal(other.into()),
    })?;

    Ok(ApiResponse::ok(BookDetail { book }))
}

async fn update_book(
    State(repository): State<SharedBookRepository>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<()>, AppError> {
    let Json(payload) = payload?;
    let book = repository
        .update_by_id(&id, payload)
        .await
        .map_err(|e| failure(Action::Update, e))?;

    tracing::info!(book_id = %book.id, finished = book.finished, "book updated");
    Ok(ApiResponse::message("Book updated successfully"))
}

async fn delete_book(
    State(repository): State<SharedBookRepository>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    repository
        .delete_by_id(&id)
        .await
        .map_err(|e| failure(Action::Delete, e))?;

    tracing::info!(book_id = %id, "book deleted");
    Ok(ApiResponse::message("Book deleted successfully"))
}
