use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// A single bookshelf record.
///
/// `finished` is derived from the page counters and is never taken from the
/// caller. `id` and `inserted_at` never change after creation. `year`,
/// `author`, `summary` and `publisher` are stored as whatever JSON value the
/// caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: Option<Value>,
    pub author: Option<Value>,
    pub summary: Option<Value>,
    pub publisher: Option<Value>,
    pub page_count: u32,
    pub read_page: u32,
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    pub(crate) fn new(id: String, fields: BookFields, now: OffsetDateTime) -> Self {
        let finished = fields.is_finished();
        Self {
            id,
            name: fields.name,
            year: fields.year,
            author: fields.author,
            summary: fields.summary,
            publisher: fields.publisher,
            page_count: fields.page_count,
            read_page: fields.read_page,
            finished,
            reading: fields.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every caller-owned field and refresh `updated_at`.
    pub(crate) fn apply(&mut self, fields: BookFields, now: OffsetDateTime) {
        self.finished = fields.is_finished();
        self.name = fields.name;
        self.year = fields.year;
        self.author = fields.author;
        self.summary = fields.summary;
        self.publisher = fields.publisher;
        self.page_count = fields.page_count;
        self.read_page = fields.read_page;
        self.reading = fields.reading;
        self.updated_at = now;
    }
}

/// Request body for creating or replacing a book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub author: Option<Value>,
    #[serde(default)]
    pub summary: Option<Value>,
    #[serde(default)]
    pub publisher: Option<Value>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    #[serde(default)]
    pub reading: bool,
}

impl BookPayload {
    /// Check the business rules, name first, then the page counters.
    pub fn validate(self) -> Result<BookFields, BookRule> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(BookRule::NameRequired),
        };

        if self.read_page > self.page_count {
            return Err(BookRule::ReadPageExceedsPageCount);
        }

        Ok(BookFields {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count: self.page_count,
            read_page: self.read_page,
            reading: self.reading,
        })
    }
}

/// Business rule a payload can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookRule {
    #[error("name required")]
    NameRequired,
    #[error("readPage exceeds pageCount")]
    ReadPageExceedsPageCount,
}

/// Payload fields that passed validation.
#[derive(Debug, Clone)]
pub struct BookFields {
    name: String,
    year: Option<Value>,
    author: Option<Value>,
    summary: Option<Value>,
    publisher: Option<Value>,
    page_count: u32,
    read_page: u32,
    reading: bool,
}

impl BookFields {
    fn is_finished(&self) -> bool {
        self.page_count == self.read_page
    }
}

/// Lightweight listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<Value>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Listing filters; every field set must match (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Case-insensitive substring of `name`
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    pub(crate) fn matcher(&self) -> impl Fn(&Book) -> bool + '_ {
        let needle = self.name.as_deref().map(str::to_lowercase);
        move |book: &Book| {
            needle
                .as_deref()
                .map_or(true, |needle| book.name.to_lowercase().contains(needle))
                && self.reading.map_or(true, |reading| book.reading == reading)
                && self.finished.map_or(true, |finished| book.finished == finished)
        }
    }
}
