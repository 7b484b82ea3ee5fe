//! Composite identifiers for join records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a book ↔ author link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAuthorKey {
    pub book_id: i32,
    pub author_id: i32,
}

impl BookAuthorKey {
    pub fn new(book_id: i32, author_id: i32) -> Self {
        Self { book_id, author_id }
    }
}

impl fmt::Display for BookAuthorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "book={} author={}", self.book_id, self.author_id)
    }
}

/// Identifies a book ↔ category link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCategoryKey {
    pub book_id: i32,
    pub category_id: i32,
}

impl BookCategoryKey {
    pub fn new(book_id: i32, category_id: i32) -> Self {
        Self {
            book_id,
            category_id,
        }
    }
}

impl fmt::Display for BookCategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "book={} category={}", self.book_id, self.category_id)
    }
}
