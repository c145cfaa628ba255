use std::collections::HashMap;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{Map, Value};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::book_stats_cmd::{BookStatsCommand, BookStatsCommandRequest, BookStatsCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest, SearchBooksCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::core::command::Command;
use crate::core::controller::{AppState, bad_request, read_to_server_error, ServerError};

pub(crate) fn routes<B>(state: AppState) -> Router<(), B>
where
    B: axum::body::HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<axum::BoxError>,
{
    let books = Router::new()
        .route("/", get(find_books).post(add_book))
        .route("/authors/stats", get(author_stats))
        .route("/search", get(search_books))
        .route("/:id", get(find_book_by_id).put(update_book).delete(remove_book));
    Router::new()
        .nest("/books", books)
        .route("/books/", get(find_books).post(add_book))
        .with_state(state)
}

// A missing, unparsable or empty body are all the same client error.
fn required_book(json: Option<Json<Value>>) -> Result<Map<String, Value>, ServerError> {
    match json {
        Some(Json(Value::Object(book))) if !book.is_empty() => Ok(book),
        _ => Err(bad_request("book is required")),
    }
}

fn status_reply(ok: bool) -> (StatusCode, String) {
    let status = if ok { StatusCode::OK } else { StatusCode::BAD_REQUEST };
    (status, status.canonical_reason().unwrap_or_default().to_string())
}

fn int_param(params: &HashMap<String, String>, name: &str, default: usize) -> Result<usize, ServerError> {
    match params.get(name) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => v.parse::<usize>()
            .map_err(|_| bad_request(format!("{} must be a non-negative integer", name).as_str())),
    }
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Option<Json<Value>>) -> Result<Json<AddBookCommandResponse>, ServerError> {
    let req = AddBookCommandRequest::new(required_book(json)?);
    let res = AddBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn author_stats(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>) -> Result<Json<BookStatsCommandResponse>, ServerError> {
    let include_author = params.get("authorInfo").map(|v| !v.is_empty()).unwrap_or(false);
    let req = BookStatsCommandRequest::new(include_author);
    let res = BookStatsCommand::new(state.catalog).execute(req).await.map_err(read_to_server_error)?;
    Ok(Json(res))
}

pub(crate) async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>) -> Result<Json<SearchBooksCommandResponse>, ServerError> {
    let query = params.get("query").ok_or((StatusCode::NOT_FOUND, "Not Found".to_string()))?;
    let req = SearchBooksCommandRequest::new(query.as_str());
    let res = SearchBooksCommand::new(state.catalog).execute(req).await.map_err(read_to_server_error)?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest { book_id };
    let res = GetBookCommand::new(state.catalog).execute(req).await.map_err(read_to_server_error)?;
    Ok(Json(res))
}

pub(crate) async fn find_books(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let page = int_param(&params, "page", 0)?;
    let per_page = int_param(&params, "perPage", state.config.default_page_size)?;
    let req = ListBooksCommandRequest::new(page, per_page, params.get("authorId").cloned());
    let res = ListBooksCommand::new(state.catalog).execute(req).await.map_err(read_to_server_error)?;
    Ok(Json(res))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    json: Option<Json<Value>>) -> Result<(StatusCode, String), ServerError> {
    let req = UpdateBookCommandRequest::new(book_id.as_str(), required_book(json)?);
    let res = UpdateBookCommand::new(state.catalog).execute(req).await?;
    Ok(status_reply(res.updated))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<(StatusCode, String), ServerError> {
    let req = RemoveBookCommandRequest { book_id };
    let res = RemoveBookCommand::new(state.catalog).execute(req).await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.message().to_string()))?;
    Ok(status_reply(res.removed))
}
