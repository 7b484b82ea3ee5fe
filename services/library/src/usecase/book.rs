use tracing::info;

use crate::domain::repository::BookRepository;
use crate::domain::types::{Book, BookQuery, NewBook};
use crate::error::LibraryServiceError;

// ── AddBook ──────────────────────────────────────────────────────────────────

pub struct AddBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> AddBookUseCase<R> {
    pub async fn execute(&self, input: NewBook) -> Result<Book, LibraryServiceError> {
        if !input.copies_consistent() {
            return Err(LibraryServiceError::InvalidCopies);
        }
        let book = self.repo.create(&input).await?;
        info!(book_id = book.id, "book added");
        Ok(book)
    }
}

// ── GetBook ──────────────────────────────────────────────────────────────────

pub struct GetBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> GetBookUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Book, LibraryServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(LibraryServiceError::BookNotFound)
    }
}

// ── ListBooks ────────────────────────────────────────────────────────────────

pub struct ListBooksUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> ListBooksUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Book>, LibraryServiceError> {
        self.repo.list().await
    }
}

// ── SearchBooks ──────────────────────────────────────────────────────────────

/// Title / availability range / author name / category name lookups.
pub struct SearchBooksUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> SearchBooksUseCase<R> {
    pub async fn execute(&self, query: BookQuery) -> Result<Vec<Book>, LibraryServiceError> {
        if let BookQuery::AvailableCopies { min, max } = query {
            if min > max {
                return Err(LibraryServiceError::Validation(format!(
                    "min ({min}) must not exceed max ({max})"
                )));
            }
        }
        self.repo.search(&query).await
    }
}

// ── UpdateBook ───────────────────────────────────────────────────────────────

pub struct UpdateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> UpdateBookUseCase<R> {
    /// Full replacement; the id is preserved.
    pub async fn execute(&self, id: i32, input: NewBook) -> Result<Book, LibraryServiceError> {
        if !input.copies_consistent() {
            return Err(LibraryServiceError::InvalidCopies);
        }
        if !self.repo.update(id, &input).await? {
            return Err(LibraryServiceError::BookNotFound);
        }
        info!(book_id = id, "book updated");
        Ok(Book {
            id,
            title: input.title,
            description: input.description,
            available_copies: input.available_copies,
            total_copies: input.total_copies,
        })
    }
}

// ── DeleteBook ───────────────────────────────────────────────────────────────

pub struct DeleteBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> DeleteBookUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<(), LibraryServiceError> {
        if !self.repo.delete(id).await? {
            return Err(LibraryServiceError::BookNotFound);
        }
        info!(book_id = id, "book deleted");
        Ok(())
    }
}
