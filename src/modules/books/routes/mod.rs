//! HTTP handlers for the Books module.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde::Serialize;

use shelf_http::{ApiJson, ApiResponse, AppError};

use super::models::{Book, BookFilter, BookPayload, BookRule, BookSummary};
use super::store::{BookStore, StoreError};
use crate::utils;

/// Routes relative to the module mount point (`/api/books`).
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/", get(list_books).post(add_book))
        .route("/health", get(health_check))
        .route(
            "/{book_id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

/// Query string of the listing endpoint, before flag translation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub name: Option<String>,
    pub reading: Option<String>,
    pub finished: Option<String>,
}

/// Collects raw query pairs. A repeated key keeps its last value and unknown
/// keys are ignored, so no query string is ever rejected.
impl FromIterator<(String, String)> for ListQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = ListQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => query.name = Some(value),
                "reading" => query.reading = Some(value),
                "finished" => query.finished = Some(value),
                _ => {}
            }
        }
        query
    }
}

impl From<ListQuery> for BookFilter {
    fn from(query: ListQuery) -> Self {
        Self {
            name: utils::non_empty(query.name),
            reading: utils::parse_flag(query.reading.as_deref()),
            finished: utils::parse_flag(query.finished.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedBook {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub book: Book,
}

/// Which endpoint failed; selects the wording of `fail` messages.
#[derive(Debug, Clone, Copy)]
enum Action {
    Add,
    List,
    Get,
    Update,
    Delete,
}

impl Action {
    fn rule_message(self, rule: BookRule) -> String {
        let prefix = match self {
            Action::Update => "Failed to update book.",
            _ => "Failed to add book.",
        };
        match rule {
            BookRule::NameRequired => format!("{} Please provide the book name", prefix),
            BookRule::ReadPageExceedsPageCount => format!(
                "{} readPage must not be greater than pageCount",
                prefix
            ),
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Action::Update => "Failed to update book. Id not found",
            Action::Delete => "Failed to delete book. Id not found",
            _ => "Book not found",
        }
    }

    fn fail(self, err: StoreError) -> AppError {
        match err {
            StoreError::Validation(rule) => AppError::validation(self.rule_message(rule)),
            StoreError::NotFound(_) => AppError::not_found(self.not_found_message()),
            StoreError::Internal(_) => {
                AppError::Internal(anyhow::Error::new(err).context(format!("{:?} book", self)))
            }
        }
    }
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn add_book(
    State(store): State<Arc<BookStore>>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> Result<ApiResponse<AddedBook>, AppError> {
    let book_id = store.add(payload).map_err(|err| Action::Add.fail(err))?;
    Ok(ApiResponse::created(
        "Book added successfully",
        AddedBook { book_id },
    ))
}

async fn list_books(
    State(store): State<Arc<BookStore>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ApiResponse<BookList>, AppError> {
    let filter = BookFilter::from(pairs.into_iter().collect::<ListQuery>());
    let books = store.list(&filter).map_err(|err| Action::List.fail(err))?;
    Ok(ApiResponse::ok(BookList { books }))
}

async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(book_id): Path<String>,
) -> Result<ApiResponse<BookDetail>, AppError> {
    let book = store.get(&book_id).map_err(|err| Action::Get.fail(err))?;
    Ok(ApiResponse::ok(BookDetail { book }))
}

async fn update_book(
    State(store): State<Arc<BookStore>>,
    Path(book_id): Path<String>,
    ApiJson(payload): ApiJson<BookPayload>,
) -> Result<ApiResponse<()>, AppError> {
    store
        .update(&book_id, payload)
        .map_err(|err| Action::Update.fail(err))?;
    Ok(ApiResponse::message("Book updated successfully"))
}

async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(book_id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    store
        .delete(&book_id)
        .map_err(|err| Action::Delete.fail(err))?;
    Ok(ApiResponse::message("Book deleted successfully"))
}
