//! In-memory book store.
//!
//! The store is the only owner of book records. Every operation takes the
//! single collection lock, so mutations are serialized against each other
//! and against reads. Callers only ever receive clones.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shelf_kernel::{Clock, IdGenerator, SystemClock, UuidV7Generator};

use super::models::{Book, BookFilter, BookPayload, BookRule, BookSummary};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] BookRule),

    #[error("book '{0}' not found")]
    NotFound(String),

    #[error("book store fault: {0}")]
    Internal(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct BookStore {
    books: Mutex<Vec<Book>>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl BookStore {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            books: Mutex::new(Vec::new()),
            clock,
            ids,
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Vec<Book>>> {
        self.books
            .lock()
            .map_err(|_| StoreError::Internal("book collection lock poisoned".to_string()))
    }

    /// Validate and append a new book, returning its id.
    pub fn add(&self, payload: BookPayload) -> StoreResult<String> {
        let fields = payload.validate().inspect_err(|rule| {
            tracing::debug!(%rule, "rejected new book");
        })?;

        let mut books = self.lock()?;

        let id = self.ids.generate();
        if books.iter().any(|book| book.id == id) {
            return Err(StoreError::Internal(format!(
                "generated id '{}' is already in use",
                id
            )));
        }

        books.push(Book::new(id.clone(), fields, self.clock.now()));

        if !books.iter().any(|book| book.id == id) {
            return Err(StoreError::Internal(format!(
                "book '{}' missing after insert",
                id
            )));
        }

        tracing::info!(book_id = %id, total = books.len(), "book added");
        Ok(id)
    }

    /// Summaries of every book matching `filter`, in insertion order.
    pub fn list(&self, filter: &BookFilter) -> StoreResult<Vec<BookSummary>> {
        let books = self.lock()?;
        let keep = filter.matcher();

        Ok(books
            .iter()
            .filter(|book| keep(book))
            .map(BookSummary::from)
            .collect())
    }

    pub fn get(&self, id: &str) -> StoreResult<Book> {
        self.lock()?
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Replace every mutable field of the book `id`.
    ///
    /// The id is looked up before the payload is validated, so an unknown id
    /// reports `NotFound` even when the payload is also invalid.
    pub fn update(&self, id: &str, payload: BookPayload) -> StoreResult<()> {
        let mut books = self.lock()?;

        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let fields = payload.validate().inspect_err(|rule| {
            tracing::debug!(book_id = %id, %rule, "rejected book update");
        })?;

        // Never move updatedAt behind a previous write
        let now = self.clock.now().max(book.updated_at);
        book.apply(fields, now);

        tracing::info!(book_id = %id, finished = book.finished, "book updated");
        Ok(())
    }

    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut books = self.lock()?;

        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        books.remove(index);

        tracing::info!(book_id = %id, total = books.len(), "book deleted");
        Ok(())
    }

    /// Number of stored books.
    pub fn len(&self) -> usize {
        // A push/remove cannot leave the Vec half-modified, so a poisoned
        // lock still guards a consistent count.
        self.books
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidV7Generator))
    }
}
